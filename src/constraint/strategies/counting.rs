//! The counting strategy: rather than watching a fixed
//! pair of literals, watch every element and maintain a live count of
//! not-yet-true elements per assigned time. The nogood is worth examining
//! once the count drops to one (unit) or, having already reached one, drops
//! to zero (which `check_assignment` alone resolves as conflict).

use crate::db::{LiteralMap, SignatureRegistry};
use crate::host::{Init, PropagateControl};
use crate::structures::atom_info::AtomInfo;
use crate::structures::literal::{SolverLiteral, Time};
use crate::types::err::{ErrorKind, InvariantError};

/// The count of not-yet-true elements for each assigned time.
pub struct CountingState {
    live: Vec<u32>,
}

impl CountingState {
    pub fn new(time_count: usize) -> Self {
        CountingState { live: vec![0; time_count] }
    }
}

fn element_literal(
    info: &AtomInfo,
    time: Time,
    registry: &SignatureRegistry,
    literal_map: &LiteralMap,
) -> Option<SolverLiteral> {
    let internal = registry.to_internal(info.untimed_lit, info.wall_clock_time(time));
    literal_map.get(internal)
}

pub fn build_watches(
    state: &mut CountingState,
    elements: &[AtomInfo],
    tmin: Time,
    tmax: Time,
    registry: &SignatureRegistry,
    literal_map: &LiteralMap,
    init: &mut dyn Init,
) -> Vec<SolverLiteral> {
    let mut watched = Vec::new();
    for time in tmin..=tmax {
        let offset = (time - tmin) as usize;
        let mut count = 0;
        for info in elements {
            if let Some(lit) = element_literal(info, time, registry, literal_map) {
                init.add_watch(lit);
                init.add_watch(-lit);
                watched.push(lit);
                count += 1;
            }
        }
        state.live[offset] = count;
    }
    watched
}

pub fn propagate(
    state: &mut CountingState,
    elements: &[AtomInfo],
    tmin: Time,
    tmax: Time,
    changed: SolverLiteral,
    registry: &SignatureRegistry,
    literal_map: &LiteralMap,
    control: &mut dyn PropagateControl,
) -> Result<Vec<Time>, ErrorKind> {
    if control.value(changed) != Some(true) {
        return Ok(Vec::new());
    }
    let mut due = Vec::new();
    for time in tmin..=tmax.min(tmin + state.live.len() as Time - 1) {
        let offset = (time - tmin) as usize;
        let belongs = elements
            .iter()
            .any(|info| element_literal(info, time, registry, literal_map) == Some(changed));
        if !belongs {
            continue;
        }
        state.live[offset] = state.live[offset]
            .checked_sub(1)
            .ok_or(InvariantError::CounterUnderflow)?;
        if state.live[offset] <= 1 {
            due.push(time);
        }
    }
    Ok(due)
}

pub fn undo(
    state: &mut CountingState,
    elements: &[AtomInfo],
    tmin: Time,
    tmax: Time,
    changed: SolverLiteral,
    registry: &SignatureRegistry,
    literal_map: &LiteralMap,
) {
    for time in tmin..=tmax {
        let offset = (time - tmin) as usize;
        let Some(slot) = state.live.get_mut(offset) else { continue };
        let belongs = elements
            .iter()
            .any(|info| element_literal(info, time, registry, literal_map) == Some(changed));
        if belongs {
            *slot += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{LiteralMap, SignatureRegistry};
    use crate::host::mock::{MockControl, MockInit};

    /// A literal and its negation share a magnitude but not an identity:
    /// deciding one element of a pair false (by deciding the atom it shares
    /// with another, opposite-polarity element true) must leave the other
    /// element's contribution to the live count untouched.
    #[test]
    fn deciding_the_atom_true_does_not_decrement_the_opposite_polarity_elements_count() {
        let mut registry = SignatureRegistry::new();
        let p = registry.register("p", 1);
        let mut literal_map = LiteralMap::new();
        literal_map.insert(registry.to_internal(p, 0), 10);

        let elements = vec![
            AtomInfo { sign: 1, time_mod: 0, untimed_lit: p },
            AtomInfo { sign: -1, time_mod: 0, untimed_lit: -p },
        ];

        let mut state = CountingState::new(1);
        let mut init = MockInit::new();
        build_watches(&mut state, &elements, 0, 0, &registry, &literal_map, &mut init);
        assert_eq!(state.live[0], 2);

        let mut control = MockControl::new();
        control.set(10, Some(true));
        propagate(&mut state, &elements, 0, 0, 10, &registry, &literal_map, &mut control).unwrap();
        assert_eq!(state.live[0], 1, "only the element requiring p true was satisfied");
    }
}
