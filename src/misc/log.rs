/*!
Miscellaneous items related to [logging](log).

Calls to the [log] macros are made throughout the crate. These are intended
to help diagnose watch-replacement and locking bugs, which are otherwise
difficult to reproduce outside of a full solver run.

Note, no log implementation is provided. For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to [the signature registry](crate::db::signature).
    pub const SIGNATURE: &str = "signature";

    /// Logs related to [the literal map](crate::db::literal_map).
    pub const LITERAL_MAP: &str = "literal_map";

    /// Logs related to [constraint construction](crate::constraint::parse).
    pub const PARSE: &str = "parse";

    /// Logs related to [nogood formation and classification](crate::nogood).
    pub const NOGOOD: &str = "nogood";

    /// Logs related to [propagation](crate::propagator).
    pub const PROPAGATE: &str = "propagate";

    /// Logs related to [model checking](crate::constraint::TheoryConstraint::check).
    pub const CHECK: &str = "check";

    /// Logs related to [locking and eager grounding](crate::constraint::LockPolicy).
    pub const LOCK: &str = "lock";

    /// Logs related to [undo](crate::constraint::strategy::WatchStrategy::undo), relevant to the counting strategy only.
    pub const UNDO: &str = "undo";
}
