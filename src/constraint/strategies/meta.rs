//! The meta strategy: functionally equivalent to
//! [timed_atom](super::timed_atom) (every element watched across the whole
//! assigned-time range, only assigned times consistent with the observed
//! change re-examined), but realised as an explicit per-constraint dispatch
//! table built once in `build_watches` rather than a filter walked at
//! propagate time: `dispatch[untimed_lit]` holds every `time_mod` an element
//! sharing that untimed literal contributes, so `propagate` decodes the
//! changed literal once and looks the table up, rather than scanning
//! `elements` on every call.

use std::collections::HashMap;

use crate::db::{LiteralMap, SignatureRegistry};
use crate::host::{Init, PropagateControl};
use crate::structures::atom_info::AtomInfo;
use crate::structures::literal::{SolverLiteral, Time, UntimedLiteral};
use crate::types::err::ErrorKind;

/// `untimed_lit -> every time_mod an element sharing that literal
/// contributes`, precomputed once at build time.
pub struct MetaState {
    dispatch: HashMap<UntimedLiteral, Vec<Time>>,
}

impl MetaState {
    pub fn new(_time_count: usize) -> Self {
        MetaState { dispatch: HashMap::new() }
    }
}

pub fn build_watches(
    state: &mut MetaState,
    elements: &[AtomInfo],
    tmin: Time,
    tmax: Time,
    registry: &SignatureRegistry,
    literal_map: &LiteralMap,
    init: &mut dyn Init,
) -> Vec<SolverLiteral> {
    for info in elements {
        state.dispatch.entry(info.untimed_lit).or_default().push(info.time_mod);
    }

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
    state: &mut MetaState,
    _elements: &[AtomInfo],
    tmin: Time,
    tmax: Time,
    changed: SolverLiteral,
    registry: &SignatureRegistry,
    literal_map: &LiteralMap,
    _control: &mut dyn PropagateControl,
) -> Result<Vec<Time>, ErrorKind> {
    let Some(internal) = literal_map.internal_of(changed) else { return Ok(Vec::new()) };
    let (untimed_lit, wall_clock) = registry.from_internal(internal);
    let Some(time_mods) = state.dispatch.get(&untimed_lit) else { return Ok(Vec::new()) };
    let due = time_mods
        .iter()
        .map(|&time_mod| wall_clock + time_mod)
        .filter(|&at| at >= tmin && at <= tmax)
        .collect();
    Ok(due)
}

pub fn undo(
    _state: &mut MetaState,
    _elements: &[AtomInfo],
    _tmin: Time,
    _tmax: Time,
    _changed: SolverLiteral,
    _registry: &SignatureRegistry,
    _literal_map: &LiteralMap,
) {
}
