//! The naive watch strategy: watch every element's literal
//! at every assigned time, and re-examine every assigned time on every
//! relevant change. No attempt is made to minimise watch set size or
//! propagation volume; this is the baseline the other strategies improve on.

use crate::db::{LiteralMap, SignatureRegistry};
use crate::host::{Init, PropagateControl};
use crate::structures::atom_info::AtomInfo;
use crate::structures::literal::{SolverLiteral, Time};
use crate::types::err::ErrorKind;

/// Naive bookkeeping is stateless: there is nothing to remember between
/// calls, since every call re-derives everything from `elements` directly.
#[derive(Default)]
pub struct NaiveState;

impl NaiveState {
    pub fn new(_time_count: usize) -> Self {
        NaiveState
    }
}

pub fn build_watches(
    _state: &mut NaiveState,
    elements: &[AtomInfo],
    tmin: Time,
    tmax: Time,
    registry: &SignatureRegistry,
    literal_map: &LiteralMap,
    init: &mut dyn Init,
) -> Vec<SolverLiteral> {
    let mut watched = Vec::new();
    for time in tmin..=tmax {
        for info in elements {
            let internal = registry.to_internal(info.untimed_lit, info.wall_clock_time(time));
            if let Some(lit) = literal_map.get(internal) {
                init.add_watch(lit);
                init.add_watch(-lit);
                watched.push(lit);
            }
        }
    }
    watched
}

/// Ignores `changed`'s identity entirely: every assigned time is always a
/// candidate, by design.
pub fn propagate(
    _state: &mut NaiveState,
    _elements: &[AtomInfo],
    tmin: Time,
    tmax: Time,
    _changed: SolverLiteral,
    _registry: &SignatureRegistry,
    _literal_map: &LiteralMap,
    _control: &mut dyn PropagateControl,
) -> Result<Vec<Time>, ErrorKind> {
    Ok((tmin..=tmax).collect())
}

pub fn undo(
    _state: &mut NaiveState,
    _elements: &[AtomInfo],
    _tmin: Time,
    _tmax: Time,
    _changed: SolverLiteral,
    _registry: &SignatureRegistry,
    _literal_map: &LiteralMap,
) {
}
