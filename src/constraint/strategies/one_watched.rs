//! The one-watched-literal strategy: watch exactly one
//! not-yet-true element per assigned time. When that element becomes true
//! the watch moves to another not-yet-true element if one exists; once none
//! does, the nogood is down to unit or conflict and is handed to the shared
//! nogood check.

use crate::db::{LiteralMap, SignatureRegistry};
use crate::host::{Init, PropagateControl};
use crate::structures::atom_info::AtomInfo;
use crate::structures::literal::{SolverLiteral, Time};
use crate::types::err::ErrorKind;

/// The literal currently watched for each assigned time, indexed by
/// `time - tmin`. `None` if the constraint has no groundable element at
/// that time (every element resolved to a sentinel).
pub struct OneWatchedState {
    watch: Vec<Option<SolverLiteral>>,
}

impl OneWatchedState {
    pub fn new(time_count: usize) -> Self {
        OneWatchedState { watch: vec![None; time_count] }
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
    state: &mut OneWatchedState,
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
        if let Some(lit) = elements.iter().find_map(|info| element_literal(info, time, registry, literal_map)) {
            init.add_watch(lit);
            init.add_watch(-lit);
            state.watch[offset] = Some(lit);
            watched.push(lit);
        }
    }
    watched
}

pub fn propagate(
    state: &mut OneWatchedState,
    elements: &[AtomInfo],
    tmin: Time,
    _tmax: Time,
    changed: SolverLiteral,
    registry: &SignatureRegistry,
    literal_map: &LiteralMap,
    control: &mut dyn PropagateControl,
) -> Result<Vec<Time>, ErrorKind> {
    let mut due = Vec::new();
    for (offset, watched) in state.watch.iter_mut().enumerate() {
        let Some(lit) = *watched else { continue };
        if lit.abs() != changed.abs() || control.value(lit) != Some(true) {
            continue;
        }
        let time = tmin + offset as Time;
        if let Some(replacement) = elements.iter().find_map(|info| {
            let candidate = element_literal(info, time, registry, literal_map)?;
            if candidate.abs() == lit.abs() || control.value(candidate) == Some(true) {
                None
            } else {
                Some(candidate)
            }
        }) {
            control.remove_watch(lit);
            control.remove_watch(-lit);
            control.add_watch(replacement);
            control.add_watch(-replacement);
            *watched = Some(replacement);
        } else {
            due.push(time);
        }
    }
    Ok(due)
}

pub fn undo(
    _state: &mut OneWatchedState,
    _elements: &[AtomInfo],
    _tmin: Time,
    _tmax: Time,
    _changed: SolverLiteral,
    _registry: &SignatureRegistry,
    _literal_map: &LiteralMap,
) {
}
