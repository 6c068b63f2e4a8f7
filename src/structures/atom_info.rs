//! The per-element descriptor of a theory constraint.

use super::literal::{Time, UntimedLiteral};

/// A constraint-element descriptor.
///
/// `untimed_lit` already carries `sign` baked into it (its magnitude is the
/// registry id, its own sign is `sign`); `sign` is kept alongside rather than
/// recomputed from `untimed_lit` at every use, matching the encoding in
/// `internal_lit = untimed_lit + sign(untimed_lit) * fullsig_size
/// * time`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AtomInfo {
    /// `+1` for a `+.`/`+~` prefix, `-1` for a `-.`/`-~` prefix.
    pub sign: i64,

    /// `+1` for the `~` ("previous time step") prefixes, `0` otherwise.
    pub time_mod: i64,

    /// The signed, dense registry id of the atom's `(functor, arity)`
    /// template, with `sign` already applied.
    pub untimed_lit: UntimedLiteral,
}

impl AtomInfo {
    /// The wall-clock time an element participating at assigned time `at`
    /// refers to: `at - time_mod`.
    pub fn wall_clock_time(&self, assigned_time: Time) -> Time {
        assigned_time - self.time_mod
    }

    /// The assigned time a real time point `t` would contribute to:
    /// `t + time_mod`.
    pub fn assigned_time_for(&self, time: Time) -> Time {
        time + self.time_mod
    }
}
