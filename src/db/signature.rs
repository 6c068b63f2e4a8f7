//! The dense `(functor, arity)` registry and the untimed/internal literal
//! codec built on top of it.
//!
//! Registration happens once, during `init`; every id handed out is stable
//! for the lifetime of the registry, so the codec in this module can be
//! called freely once search begins without ever mutating the registry.

use std::collections::HashMap;

use crate::structures::literal::{sign, InternalLiteral, Time, UntimedLiteral};
use crate::types::err::ConstructionError;

/// A dense, write-once `(functor, arity)` → id table, plus the codec between
/// [UntimedLiteral]s and [InternalLiteral]s it makes possible.
#[derive(Default, Debug)]
pub struct SignatureRegistry {
    by_key: HashMap<(String, u32), UntimedLiteral>,
    templates: Vec<(String, u32)>,
}

impl SignatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of distinct templates registered so far: `fullsig_size`.
    pub fn size(&self) -> i64 {
        self.templates.len() as i64
    }

    /// Registers `(functor, arity)` if not already present, and returns its
    /// (always positive) untimed literal. Idempotent: registering the same
    /// key twice returns the same id.
    pub fn register(&mut self, functor: &str, arity: u32) -> UntimedLiteral {
        let key = (functor.to_string(), arity);
        if let Some(id) = self.by_key.get(&key) {
            return *id;
        }
        let id = (self.templates.len() + 1) as UntimedLiteral;
        self.templates.push(key.clone());
        self.by_key.insert(key, id);
        id
    }

    /// Looks up a previously registered `(functor, arity)`, signed by
    /// `sign`. Used when parsing a constraint element against the domain
    /// declared via `&signature{...}`.
    pub fn lookup(&self, functor: &str, arity: u32, element_sign: i64) -> Result<UntimedLiteral, ConstructionError> {
        self.by_key
            .get(&(functor.to_string(), arity))
            .map(|id| element_sign * id)
            .ok_or(ConstructionError::UnknownSignature)
    }

    /// The `(functor, arity)` a (possibly negative) untimed literal's
    /// magnitude identifies.
    pub fn template_of(&self, untimed_lit: UntimedLiteral) -> Option<&(String, u32)> {
        self.templates.get((untimed_lit.unsigned_abs() - 1) as usize)
    }

    /// `internal_lit = untimed_lit + sign(untimed_lit) * fullsig_size * time`
    ///.
    pub fn to_internal(&self, untimed_lit: UntimedLiteral, time: Time) -> InternalLiteral {
        untimed_lit + sign(untimed_lit) * self.size() * time
    }

    /// The inverse of [Self::to_internal]: recovers `(untimed_lit, time)`
    /// from a packed internal literal.
    pub fn from_internal(&self, internal_lit: InternalLiteral) -> (UntimedLiteral, Time) {
        let size = self.size();
        if size == 0 {
            return (internal_lit, 0);
        }
        let s = sign(internal_lit);
        let magnitude = internal_lit.unsigned_abs() as i64;
        let template_id = magnitude % size;
        let (template_id, time) = if template_id == 0 {
            (size, magnitude / size - 1)
        } else {
            (template_id, magnitude / size)
        };
        (s * template_id, time)
    }
}
