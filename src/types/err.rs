/*!
Error types used in the crate.

- Construction errors are fatal and surface before search begins.
- Host-rejection errors are recoverable at the level of a single `propagate`
  or `check` call: the current call aborts and control returns to the host.
- Invariant errors indicate a bug in this crate (or a host violating its side
  of the watch-replacement contract) and are unrecoverable.

Sentinel short-circuits (a literal missing from the literal map) are *not*
errors: they drive the `None` returns of [form_nogood](crate::nogood::form_nogood).
*/

use crate::structures::literal::SolverLiteral;

/// A union of the error kinds raised by this crate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// An error raised while parsing a grounded theory constraint term.
    Construction(ConstructionError),

    /// The host rejected a nogood, or signalled no further propagation is
    /// possible this round.
    HostRejection(HostRejectionError),

    /// An invariant of the crate's own bookkeeping was violated.
    Invariant(InvariantError),
}

impl From<ConstructionError> for ErrorKind {
    fn from(e: ConstructionError) -> Self {
        ErrorKind::Construction(e)
    }
}

impl From<HostRejectionError> for ErrorKind {
    fn from(e: HostRejectionError) -> Self {
        ErrorKind::HostRejection(e)
    }
}

impl From<InvariantError> for ErrorKind {
    fn from(e: InvariantError) -> Self {
        ErrorKind::Invariant(e)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Construction(e) => write!(f, "{e}"),
            Self::HostRejection(e) => write!(f, "{e}"),
            Self::Invariant(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ErrorKind {}

/// Errors raised while parsing a grounded theory constraint term.
///
/// Fatal: the constraint that raised one of these is never built, and the
/// caller should abort before search rather than attempt to continue with a
/// partially-understood theory.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConstructionError {
    /// A term prefix outside of `{+., +~, -., -~}` was used on an element.
    InvalidPrefix,

    /// `tmax` is required but was not given.
    MissingTmax,

    /// `tmin > tmax`, or either bound is negative.
    DegenerateRange,

    /// An element refers to a `(functor, arity)` that was never declared via
    /// a `&signature{...}` theory atom.
    UnknownSignature,

    /// A constraint has no elements.
    EmptyConstraint,
}

impl std::fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPrefix => write!(f, "element used a prefix outside of {{+., +~, -., -~}}"),
            Self::MissingTmax => write!(f, "constraint is missing a required tmax argument"),
            Self::DegenerateRange => write!(f, "tmin/tmax form a degenerate or negative range"),
            Self::UnknownSignature => write!(f, "element refers to an undeclared signature"),
            Self::EmptyConstraint => write!(f, "constraint has no elements"),
        }
    }
}

/// Raised when the host rejects a nogood, or signals no further propagation
/// is possible.
///
/// Recoverable: the current `propagate`/`check` call aborts immediately, and
/// the shell returns control to the host without further callbacks this
/// round. The host's own CDCL restart/backtrack loop is the retry mechanism.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HostRejectionError {
    /// `control.add_nogood` returned `false`.
    NogoodRejected,

    /// `control.propagate` returned `false` after a nogood was added.
    PropagationHalted,
}

impl std::fmt::Display for HostRejectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NogoodRejected => write!(f, "host rejected an added nogood"),
            Self::PropagationHalted => write!(f, "host halted propagation after a nogood was added"),
        }
    }
}

/// Raised when one of the crate's own invariants is violated.
///
/// Unrecoverable: these are treated as fatal assertions, not
/// retried or self-healed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InvariantError {
    /// The counting strategy's live-literal counter for some assigned time
    /// would go negative on undo.
    CounterUnderflow,

    /// A watch-replacement instruction named an `old` watch the caller was
    /// not actually observing.
    ReplacedUnwatchedLiteral(SolverLiteral),

    /// A watch-replacement instruction's `new` watch equals its `old` watch.
    TrivialReplacement(SolverLiteral),
}

impl std::fmt::Display for InvariantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CounterUnderflow => write!(f, "live-literal counter underflowed on undo"),
            Self::ReplacedUnwatchedLiteral(lit) => {
                write!(f, "attempted to replace watch on {lit}, which was not being watched")
            }
            Self::TrivialReplacement(lit) => {
                write!(f, "replacement watch {lit} is identical to the watch it replaces")
            }
        }
    }
}
