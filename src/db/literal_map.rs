//! The bidirectional table between internal literals and solver literals,
//! together with its sentinel rule.
//!
//! Not every internal literal that a constraint might reference corresponds
//! to an atom the grounder actually produced (an element naming a time point
//! outside the grounded horizon, say). [LiteralMap::grab] turns a miss into
//! one of the two sentinels rather than an error: a missing *positive*
//! internal literal is always false, a missing *negative* one is always
//! true. This lets [form_nogood](crate::nogood::form_nogood) short-circuit
//! without special-casing every caller.

use std::collections::HashMap;

use crate::structures::literal::{InternalLiteral, SolverLiteral, SOLVER_FALSE, SOLVER_TRUE};

/// The internal-literal ↔ solver-literal table.
#[derive(Default, Debug)]
pub struct LiteralMap {
    internal_to_solver: HashMap<InternalLiteral, SolverLiteral>,
    solver_to_internal: HashMap<SolverLiteral, InternalLiteral>,
}

impl LiteralMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `internal` corresponds to `solver`, the positive solver
    /// literal underlying the ground atom. Both directions of the mapping
    /// are seeded: `internal -> solver` and `-internal -> -solver`.
    pub fn insert(&mut self, internal: InternalLiteral, solver: SolverLiteral) {
        self.internal_to_solver.insert(internal, solver);
        self.internal_to_solver.insert(-internal, -solver);
        self.solver_to_internal.insert(solver, internal);
        self.solver_to_internal.insert(-solver, -internal);
    }

    /// Looks up `internal` without applying the sentinel rule. Used by the
    /// build step, which needs to distinguish "not grounded" from "resolves
    /// to a sentinel" when deciding whether to watch an atom at all.
    pub fn get(&self, internal: InternalLiteral) -> Option<SolverLiteral> {
        self.internal_to_solver.get(&internal).copied()
    }

    pub fn internal_of(&self, solver: SolverLiteral) -> Option<InternalLiteral> {
        self.solver_to_internal.get(&solver).copied()
    }

    /// Resolves `internal` to a solver literal, falling back to a sentinel
    /// on a miss: [SOLVER_FALSE] if `internal` is positive, [SOLVER_TRUE] if
    /// it is negative.
    pub fn grab(&self, internal: InternalLiteral) -> SolverLiteral {
        match self.get(internal) {
            Some(solver) => solver,
            None if internal > 0 => SOLVER_FALSE,
            None => SOLVER_TRUE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_seeds_both_directions_and_both_signs() {
        let mut map = LiteralMap::new();
        map.insert(42, 7);
        assert_eq!(map.get(42), Some(7));
        assert_eq!(map.get(-42), Some(-7));
        assert_eq!(map.internal_of(7), Some(42));
        assert_eq!(map.internal_of(-7), Some(-42));
    }

    #[test]
    fn missing_positive_internal_grabs_always_false() {
        let map = LiteralMap::new();
        assert_eq!(map.grab(42), SOLVER_FALSE);
    }

    #[test]
    fn missing_negative_internal_grabs_always_true() {
        let map = LiteralMap::new();
        assert_eq!(map.grab(-42), SOLVER_TRUE);
    }

    #[test]
    fn present_internal_grabs_its_solver_literal() {
        let mut map = LiteralMap::new();
        map.insert(42, 7);
        assert_eq!(map.grab(42), 7);
        assert_eq!(map.grab(-42), -7);
    }
}
