/*!
Nogood construction and evaluation.

A nogood is a set of solver literals that must never *all* be true at once.
[form_nogood] builds one from a constraint's element literals at a given
assigned time; [check_assignment] and [check_assignment_complete] classify a
nogood against the host's current assignment, driving both `propagate` (where
the assignment may be partial) and `check` (where it is total).
*/

use crate::db::{LiteralMap, SignatureRegistry};
use crate::host::PropagateControl;
use crate::structures::atom_info::AtomInfo;
use crate::structures::literal::{SolverLiteral, Time, SOLVER_FALSE};

/// The outcome of classifying a nogood against the current assignment.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NogoodOutcome {
    /// At least one literal is false, or more than one literal is
    /// unassigned: the nogood cannot fire yet and implies nothing.
    None,

    /// Every literal but one is true; `Unit(lit)` names the remaining
    /// unassigned literal, which must be driven false to avoid a conflict.
    Unit(SolverLiteral),

    /// Every literal is true: the nogood has fired.
    Conflict,
}

/// Builds the nogood for a constraint's elements anchored at `assigned_time`.
///
/// Returns `None` if any element resolves to the "always false" sentinel:
/// such an element can never be true, so the conjunction can never fire and
/// there is nothing useful to add. Otherwise returns the
/// deduplicated, sorted list of solver literals.
pub fn form_nogood(
    elements: &[AtomInfo],
    assigned_time: Time,
    registry: &SignatureRegistry,
    literal_map: &LiteralMap,
) -> Option<Vec<SolverLiteral>> {
    let mut lits = Vec::with_capacity(elements.len());
    for info in elements {
        let wall_clock = info.wall_clock_time(assigned_time);
        let internal = registry.to_internal(info.untimed_lit, wall_clock);
        let solver_lit = literal_map.grab(internal);
        if solver_lit == SOLVER_FALSE {
            return None;
        }
        lits.push(solver_lit);
    }
    lits.sort_unstable();
    lits.dedup();
    Some(lits)
}

/// Classifies `nogood` against `control`'s current (possibly partial)
/// assignment.
pub fn check_assignment(control: &dyn PropagateControl, nogood: &[SolverLiteral]) -> NogoodOutcome {
    let mut unassigned = None;
    for &lit in nogood {
        match control.value(lit) {
            Some(false) => return NogoodOutcome::None,
            Some(true) => continue,
            None => {
                if unassigned.is_some() {
                    return NogoodOutcome::None;
                }
                unassigned = Some(lit);
            }
        }
    }
    match unassigned {
        Some(lit) => NogoodOutcome::Unit(lit),
        None => NogoodOutcome::Conflict,
    }
}

/// Classifies `nogood` against a total assignment.
///
/// # Panics
/// Panics if any literal in `nogood` is unassigned: callers only use this
/// once the host has committed to a complete assignment (the `check`
/// callback, so an unassigned literal here means the
/// caller violated that contract.
pub fn check_assignment_complete(control: &dyn PropagateControl, nogood: &[SolverLiteral]) -> NogoodOutcome {
    for &lit in nogood {
        match control.value(lit) {
            Some(false) => return NogoodOutcome::None,
            Some(true) => continue,
            None => panic!("check_assignment_complete called against a partial assignment"),
        }
    }
    NogoodOutcome::Conflict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::mock::MockControl;

    fn elements() -> (SignatureRegistry, LiteralMap, Vec<AtomInfo>) {
        let mut registry = SignatureRegistry::new();
        let holds = registry.register("holds", 2);
        let occurs = registry.register("occurs", 1);

        let mut literal_map = LiteralMap::new();
        literal_map.insert(registry.to_internal(holds, 0), 10);
        literal_map.insert(registry.to_internal(occurs, 0), 11);

        let elements = vec![
            AtomInfo { sign: 1, time_mod: 0, untimed_lit: holds },
            AtomInfo { sign: 1, time_mod: 0, untimed_lit: occurs },
        ];
        (registry, literal_map, elements)
    }

    #[test]
    fn forms_nogood_from_grounded_elements() {
        let (registry, literal_map, elements) = elements();
        let nogood = form_nogood(&elements, 0, &registry, &literal_map).unwrap();
        assert_eq!(nogood, vec![10, 11]);
    }

    #[test]
    fn missing_positive_element_aborts_formation() {
        let (registry, literal_map, mut elements) = elements();
        elements.push(AtomInfo { sign: 1, time_mod: 0, untimed_lit: 99 });
        assert_eq!(form_nogood(&elements, 0, &registry, &literal_map), None);
    }

    #[test]
    fn check_assignment_reports_unit_with_one_literal_left() {
        let (registry, literal_map, elements) = elements();
        let nogood = form_nogood(&elements, 0, &registry, &literal_map).unwrap();

        let mut control = MockControl::new();
        control.set(10, Some(true));
        assert_eq!(check_assignment(&control, &nogood), NogoodOutcome::Unit(11));
    }

    #[test]
    fn check_assignment_reports_conflict_when_all_true() {
        let (registry, literal_map, elements) = elements();
        let nogood = form_nogood(&elements, 0, &registry, &literal_map).unwrap();

        let mut control = MockControl::new();
        control.set(10, Some(true));
        control.set(11, Some(true));
        assert_eq!(check_assignment(&control, &nogood), NogoodOutcome::Conflict);
    }

    #[test]
    fn check_assignment_reports_none_when_any_literal_false() {
        let (registry, literal_map, elements) = elements();
        let nogood = form_nogood(&elements, 0, &registry, &literal_map).unwrap();

        let mut control = MockControl::new();
        control.set(10, Some(false));
        assert_eq!(check_assignment(&control, &nogood), NogoodOutcome::None);
    }

    #[test]
    fn check_assignment_reports_none_with_multiple_unassigned() {
        let (registry, literal_map, elements) = elements();
        let nogood = form_nogood(&elements, 0, &registry, &literal_map).unwrap();
        let control = MockControl::new();
        assert_eq!(check_assignment(&control, &nogood), NogoodOutcome::None);
    }
}
