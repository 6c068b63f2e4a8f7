//! The timed-atom strategy: watches every element's literal
//! across the whole assigned-time range, then recovers the assigned time
//! directly from the changed literal's decoding rather than scanning a
//! watch table. The shell still dispatches on whichever literal changed;
//! this strategy's own distinguishing trait is that `propagate` never walks
//! the assigned-time range — it decodes `changed` back to
//! `(untimed_lit, wall_clock_time)` via the signature registry and checks
//! only the elements sharing that untimed literal.

use crate::db::{LiteralMap, SignatureRegistry};
use crate::host::{Init, PropagateControl};
use crate::structures::atom_info::AtomInfo;
use crate::structures::literal::{SolverLiteral, Time};
use crate::types::err::ErrorKind;

/// Timed-atom bookkeeping is stateless: every assigned time consistent with
/// a change is recovered directly from the changed literal's decoding, not
/// from a table built at watch time.
#[derive(Default)]
pub struct TimedAtomState;

impl TimedAtomState {
    pub fn new(_time_count: usize) -> Self {
        TimedAtomState
    }
}

pub fn build_watches(
    _state: &mut TimedAtomState,
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

pub fn propagate(
    _state: &mut TimedAtomState,
    elements: &[AtomInfo],
    tmin: Time,
    tmax: Time,
    changed: SolverLiteral,
    registry: &SignatureRegistry,
    literal_map: &LiteralMap,
    _control: &mut dyn PropagateControl,
) -> Result<Vec<Time>, ErrorKind> {
    let Some(internal) = literal_map.internal_of(changed) else { return Ok(Vec::new()) };
    let (untimed_lit, wall_clock) = registry.from_internal(internal);
    let due = elements
        .iter()
        .filter(|info| info.untimed_lit == untimed_lit)
        .map(|info| info.assigned_time_for(wall_clock))
        .filter(|&at| at >= tmin && at <= tmax)
        .collect();
    Ok(due)
}

pub fn undo(
    _state: &mut TimedAtomState,
    _elements: &[AtomInfo],
    _tmin: Time,
    _tmax: Time,
    _changed: SolverLiteral,
    _registry: &SignatureRegistry,
    _literal_map: &LiteralMap,
) {
}
