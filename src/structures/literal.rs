//! The three distinct notions of "literal" this crate juggles:
//!
//! - An [UntimedLiteral] identifies an atomic predicate template
//!   independent of time; its sign carries polarity.
//! - An [InternalLiteral] packs `(untimed_lit, time)` into a single signed
//!   integer (see [crate::db::signature::SignatureRegistry] for the codec).
//! - A [SolverLiteral] is the host CDCL engine's own opaque literal type,
//!   with the sentinels [SOLVER_TRUE]/[SOLVER_FALSE] reserved.
//!
//! All three share a representation (a signed integer whose sign is
//! polarity) but are kept as distinct type aliases so a mismatched level
//! shows up as a type error at the call site rather than a silent mixing of
//! namespaces.

/// A signed integer identifying an atomic predicate template, independent of
/// time. Magnitude is a dense id assigned in registration order, starting at
/// 1; sign carries polarity.
pub type UntimedLiteral = i64;

/// A signed integer packing `(untimed_lit, time)`: `i = untimed_lit +
/// sign(untimed_lit) * fullsig_size * time`.
pub type InternalLiteral = i64;

/// The host CDCL engine's opaque literal type.
pub type SolverLiteral = i64;

/// A discrete time index. Wall-clock time may be negative transiently (an
/// assigned time at `tmin` with `time_mod = 1` refers to wall-clock `tmin -
/// 1`), so this is signed.
pub type Time = i64;

/// Sentinel meaning "always true",
pub const SOLVER_TRUE: SolverLiteral = 1;

/// Sentinel meaning "always false",
pub const SOLVER_FALSE: SolverLiteral = -1;

/// The sign of a nonzero signed integer, as `+1` or `-1`.
///
/// # Panics
/// Panics if `x` is zero: literals are never represented as zero in this
/// crate (ids are assigned starting at 1, and a time-shifted literal with a
/// zero untimed part would collide with the "unset" niche).
pub fn sign(x: i64) -> i64 {
    assert_ne!(x, 0, "literal zero has no sign");
    if x < 0 {
        -1
    } else {
        1
    }
}
