//! The consequences strategy: restricted to exactly two elements, where a
//! change to one element's literal names the other's required literal
//! directly. `build_watches` precomputes, for each of the two elements, its
//! partner's `(untimed_lit, time_mod)`; `propagate` decodes `changed` back to
//! `(untimed_lit, wall_clock)`, recovers the assigned time from whichever
//! element matches, and reads the partner's identity straight out of the
//! precomputed pair — no scan of the assigned-time range and no literal
//! index, just the one precomputed lookup.
//!
//! A constraint with any other element count falls back to
//! [two_watched](super::two_watched)'s algorithm; this is a real fallback,
//! not a relabelling, since the binary shortcut above has no meaning outside
//! exactly two elements.

use crate::db::{LiteralMap, SignatureRegistry};
use crate::host::{Init, PropagateControl};
use crate::structures::atom_info::AtomInfo;
use crate::structures::literal::{SolverLiteral, Time, UntimedLiteral};
use crate::types::err::ErrorKind;

use super::two_watched::{self, TwoWatchedState};

/// The other element's untimed literal and time modifier, one entry per
/// element, indexed the same way as `elements`.
struct BinaryLink {
    partner: [(UntimedLiteral, Time); 2],
}

enum Inner {
    Binary(BinaryLink),
    Fallback(TwoWatchedState),
}

pub struct ConsequencesState {
    inner: Inner,
}

impl ConsequencesState {
    pub fn new(time_count: usize) -> Self {
        ConsequencesState { inner: Inner::Fallback(TwoWatchedState::new(time_count)) }
    }
}

pub fn build_watches(
    state: &mut ConsequencesState,
    elements: &[AtomInfo],
    tmin: Time,
    tmax: Time,
    registry: &SignatureRegistry,
    literal_map: &LiteralMap,
    init: &mut dyn Init,
) -> Vec<SolverLiteral> {
    if elements.len() != 2 {
        let Inner::Fallback(inner) = &mut state.inner else {
            unreachable!("ConsequencesState starts in Fallback and only build_watches can move it to Binary")
        };
        return two_watched::build_watches(inner, elements, tmin, tmax, registry, literal_map, init);
    }

    state.inner = Inner::Binary(BinaryLink {
        partner: [
            (elements[1].untimed_lit, elements[1].time_mod),
            (elements[0].untimed_lit, elements[0].time_mod),
        ],
    });

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
    state: &mut ConsequencesState,
    elements: &[AtomInfo],
    tmin: Time,
    tmax: Time,
    changed: SolverLiteral,
    registry: &SignatureRegistry,
    literal_map: &LiteralMap,
    control: &mut dyn PropagateControl,
) -> Result<Vec<Time>, ErrorKind> {
    let Inner::Binary(link) = &state.inner else {
        let Inner::Fallback(inner) = &mut state.inner else { unreachable!() };
        return two_watched::propagate(inner, elements, tmin, tmax, changed, registry, literal_map, control);
    };

    let Some(internal) = literal_map.internal_of(changed) else { return Ok(Vec::new()) };
    let (untimed_lit, wall_clock) = registry.from_internal(internal);
    let Some(index) = elements.iter().position(|info| info.untimed_lit == untimed_lit) else {
        return Ok(Vec::new());
    };

    let assigned_time = elements[index].assigned_time_for(wall_clock);
    if assigned_time < tmin || assigned_time > tmax {
        return Ok(Vec::new());
    }

    // The partner's identity is read directly from the precomputed pair: no
    // scan of `elements`, no enumeration of the assigned-time range.
    let (partner_untimed, partner_time_mod) = link.partner[index];
    let partner_internal = registry.to_internal(partner_untimed, assigned_time - partner_time_mod);
    if literal_map.get(partner_internal).is_none() {
        return Ok(Vec::new());
    }
    Ok(vec![assigned_time])
}

pub fn undo(
    state: &mut ConsequencesState,
    elements: &[AtomInfo],
    tmin: Time,
    tmax: Time,
    changed: SolverLiteral,
    registry: &SignatureRegistry,
    literal_map: &LiteralMap,
) {
    if let Inner::Fallback(inner) = &mut state.inner {
        two_watched::undo(inner, elements, tmin, tmax, changed, registry, literal_map);
    }
}
