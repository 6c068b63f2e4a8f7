//! The literal-indexed variant of [two_watched](super::two_watched): the
//! same watched-pair-per-assigned-time scheme, but `propagate` looks a
//! changed literal up in a `literal -> offsets` index built once in
//! `build_watches`, rather than scanning every offset to find the ones that
//! watch it. Worth the extra bookkeeping once a constraint spans enough
//! assigned times that a linear scan of all of them, on every propagation,
//! starts to show up.

use std::collections::HashMap;

use crate::db::{LiteralMap, SignatureRegistry};
use crate::host::{Init, PropagateControl};
use crate::structures::atom_info::AtomInfo;
use crate::structures::literal::{SolverLiteral, Time};
use crate::types::err::{ErrorKind, InvariantError};

use super::two_watched::element_literal;

/// As [two_watched::TwoWatchedState](super::two_watched::TwoWatchedState),
/// plus a reverse index from each watched literal's magnitude to the offsets
/// it is watched at.
pub struct TwoWatchedMapState {
    watch: Vec<Vec<SolverLiteral>>,
    index: HashMap<SolverLiteral, Vec<usize>>,
}

impl TwoWatchedMapState {
    pub fn new(time_count: usize) -> Self {
        TwoWatchedMapState { watch: vec![Vec::new(); time_count], index: HashMap::new() }
    }

    /// Re-points the index entry for `offset` from `lit`'s magnitude to
    /// `new`'s, without touching `self.watch` — the caller overwrites the
    /// watched slot directly.
    fn rewatch_at(&mut self, offset: usize, new: SolverLiteral) {
        self.index.entry(new.abs()).or_default().push(offset);
    }

    fn unwatch_at(&mut self, offset: usize, lit: SolverLiteral) {
        if let Some(offsets) = self.index.get_mut(&lit.abs()) {
            offsets.retain(|&o| o != offset);
        }
    }
}

pub fn build_watches(
    state: &mut TwoWatchedMapState,
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
            state.index.entry(lit.abs()).or_default().push(offset);
        }
        state.watch[offset] = picked;
    }
    watched
}

pub fn propagate(
    state: &mut TwoWatchedMapState,
    elements: &[AtomInfo],
    tmin: Time,
    _tmax: Time,
    changed: SolverLiteral,
    registry: &SignatureRegistry,
    literal_map: &LiteralMap,
    control: &mut dyn PropagateControl,
) -> Result<Vec<Time>, ErrorKind> {
    let Some(offsets) = state.index.get(&changed.abs()).cloned() else { return Ok(Vec::new()) };

    let mut due = Vec::new();
    for offset in offsets {
        let watched = state.watch[offset].clone();
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
                state.unwatch_at(offset, old);
                state.rewatch_at(offset, new);
                state.watch[offset][pos] = new;
            }
            None => due.push(time),
        }
    }
    Ok(due)
}

pub fn undo(
    _state: &mut TwoWatchedMapState,
    _elements: &[AtomInfo],
    _tmin: Time,
    _tmax: Time,
    _changed: SolverLiteral,
    _registry: &SignatureRegistry,
    _literal_map: &LiteralMap,
) {
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{LiteralMap, SignatureRegistry};
    use crate::host::mock::{MockControl, MockInit};

    /// The index, not a scan, must be what finds the watching offset: a
    /// constraint spanning several assigned times where only one offset
    /// actually watches the changed literal.
    #[test]
    fn propagate_uses_the_index_to_find_only_the_watching_offsets() {
        let mut registry = SignatureRegistry::new();
        let a = registry.register("a", 1);
        let b = registry.register("b", 1);
        let mut literal_map = LiteralMap::new();
        for t in 0..=2 {
            literal_map.insert(registry.to_internal(a, t), 10 + t * 2);
            literal_map.insert(registry.to_internal(b, t), 11 + t * 2);
        }
        let elements = vec![
            AtomInfo { sign: 1, time_mod: 0, untimed_lit: a },
            AtomInfo { sign: 1, time_mod: 0, untimed_lit: b },
        ];

        let mut state = TwoWatchedMapState::new(3);
        let mut init = MockInit::new();
        build_watches(&mut state, &elements, 0, 2, &registry, &literal_map, &mut init);
        assert_eq!(state.index.get(&13).cloned(), Some(vec![1]));

        let mut control = MockControl::new();
        control.set(13, Some(true));
        let due = propagate(&mut state, &elements, 0, 2, 13, &registry, &literal_map, &mut control).unwrap();
        assert_eq!(due, vec![1]);
    }
}
