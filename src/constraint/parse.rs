//! Turns a grounded `&constraint(tmin?, tmax, id?){...}` term into the
//! element list and time bounds a [TheoryConstraint](super::TheoryConstraint)
//! is built from.

use crate::db::SignatureRegistry;
use crate::host::TheoryConstraintTerm;
use crate::structures::atom_info::AtomInfo;
use crate::structures::literal::Time;
use crate::types::err::ConstructionError;

/// The result of parsing one grounded constraint term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedConstraint {
    pub tmin: Time,
    pub tmax: Time,
    pub id: Option<String>,
    pub elements: Vec<AtomInfo>,
}

/// Parses `term` against `registry`, the signature domain declared via
/// `&signature{...}` atoms.
///
/// `tmin` defaults to `0` when the term omits it. Every element's
/// `(functor, arity)` — arity counting the trailing time argument — must
/// already be registered; this function never registers a new signature
/// itself, since the domain is fixed by the `&signature{...}` atoms read
/// before any `&constraint{...}` atom is parsed.
pub fn parse_constraint(
    term: &TheoryConstraintTerm,
    registry: &SignatureRegistry,
) -> Result<ParsedConstraint, ConstructionError> {
    if term.elements.is_empty() {
        return Err(ConstructionError::EmptyConstraint);
    }

    let tmin = term.tmin.unwrap_or(0);
    let tmax = term.tmax;
    if tmin < 0 || tmax < 0 || tmin > tmax {
        return Err(ConstructionError::DegenerateRange);
    }

    let mut elements = Vec::with_capacity(term.elements.len());
    for element in &term.elements {
        let arity = element.args.len() as u32 + 1;
        let untimed_lit = registry.lookup(&element.functor, arity, element.prefix.sign())?;
        elements.push(AtomInfo {
            sign: element.prefix.sign(),
            time_mod: element.prefix.time_mod(),
            untimed_lit,
        });
    }

    Ok(ParsedConstraint {
        tmin,
        tmax,
        id: term.id.clone(),
        elements,
    })
}
