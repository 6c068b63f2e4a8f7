//! The two-watched-literal strategy, the classical CDCL
//! watch scheme adapted to nogoods. A nogood fires when every element
//! becomes true, so (unlike a clause, watched on "not yet false") two
//! elements that are not yet true are watched per assigned time; when one of
//! them becomes true, look for a third not-yet-true element to take over the
//! watch, and only fall back to a full check when no replacement exists
//! (meaning the nogood is down to unit or conflict).
//!
//! [TwoWatchedLiteralMap](super::two_watched_map) and
//! [Consequences](super::consequences) each have their own module: the map
//! variant indexes the watched pairs by literal so `propagate` looks up the
//! handful of offsets a changed literal actually watches instead of scanning
//! every offset here; the consequences variant is restricted to two-element
//! constraints and precomputes each element's partner so `propagate` decodes
//! the other literal directly, with neither a scan nor a literal index. Both
//! reuse [element_literal] below.

use crate::db::{LiteralMap, SignatureRegistry};
use crate::host::{Init, PropagateControl};
use crate::structures::atom_info::AtomInfo;
use crate::structures::literal::{SolverLiteral, Time};
use crate::types::err::{ErrorKind, InvariantError};

/// The watched pair for each assigned time, indexed by `time - tmin`.
/// Entries with fewer than two groundable elements hold as many as exist.
pub struct TwoWatchedState {
    watch: Vec<Vec<SolverLiteral>>,
}

impl TwoWatchedState {
    pub fn new(time_count: usize) -> Self {
        TwoWatchedState { watch: vec![Vec::new(); time_count] }
    }
}

pub(crate) fn element_literal(
    info: &AtomInfo,
    time: Time,
    registry: &SignatureRegistry,
    literal_map: &LiteralMap,
) -> Option<SolverLiteral> {
    let internal = registry.to_internal(info.untimed_lit, info.wall_clock_time(time));
    literal_map.get(internal)
}

pub fn build_watches(
    state: &mut TwoWatchedState,
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
        let picked: Vec<SolverLiteral> = elements
            .iter()
            .filter_map(|info| element_literal(info, time, registry, literal_map))
            .take(2)
            .collect();
        for &lit in &picked {
            init.add_watch(lit);
            init.add_watch(-lit);
            watched.push(lit);
        }
        state.watch[offset] = picked;
    }
    watched
}

pub fn propagate(
    state: &mut TwoWatchedState,
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
        let Some(pos) = watched.iter().position(|&lit| lit.abs() == changed.abs()) else { continue };
        if control.value(watched[pos]) != Some(true) {
            continue;
        }
        let time = tmin + offset as Time;
        let old = watched[pos];
        let replacement = elements.iter().find_map(|info| {
            let candidate = element_literal(info, time, registry, literal_map)?;
            if watched.iter().any(|&w| w.abs() == candidate.abs()) || control.value(candidate) == Some(true) {
                None
            } else {
                Some(candidate)
            }
        });
        match replacement {
            Some(new) => {
                if new.abs() == old.abs() {
                    return Err(InvariantError::TrivialReplacement(new).into());
                }
                if !control.has_watch(old) && !control.has_watch(-old) {
                    return Err(InvariantError::ReplacedUnwatchedLiteral(old).into());
                }
                control.remove_watch(old);
                control.remove_watch(-old);
                control.add_watch(new);
                control.add_watch(-new);
                watched[pos] = new;
            }
            None => due.push(time),
        }
    }
    Ok(due)
}

pub fn undo(
    _state: &mut TwoWatchedState,
    _elements: &[AtomInfo],
    _tmin: Time,
    _tmax: Time,
    _changed: SolverLiteral,
    _registry: &SignatureRegistry,
    _literal_map: &LiteralMap,
) {
}
