/*!
Runtime configuration for the propagator: which watch strategy each constraint size uses, how aggressively
learned nogoods are locked, how much of the time horizon is grounded eagerly,
and whether constraints partition by `id`.

Mirrors the host solver's own `Config` shape: a handful of named, bounded
[ConfigOption] values, with a `Default` giving the same "quick, deterministic
results" intent a sensible out-of-the-box configuration should have.
*/

pub mod config_option;

pub use config_option::ConfigOption;

use std::num::NonZeroU32;

/// Which watch strategy a constraint is built with. Chosen
/// once, at build time, per constraint; never changes for the constraint's
/// lifetime.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WatchStrategyKind {
    /// Re-checks every element on every relevant assignment. No watches
    /// beyond all elements; simplest to reason about, weakest asymptotics.
    Naive,

    /// Watches exactly one not-yet-false element per assigned time.
    OneWatchedLiteral,

    /// Watches exactly two not-yet-false elements per assigned time,
    /// rewatching on falsification.
    TwoWatchedLiteral,

    /// As [Self::TwoWatchedLiteral], but indexes watches through an
    /// auxiliary literal → constraint-instance map rather than a
    /// per-constraint scan, trading memory for faster rewatch lookups.
    TwoWatchedLiteralMap,

    /// Watches only the distinguished "new time step" atom and defers
    /// per-element watching until that atom fires.
    TimedAtom,

    /// Watches every element across the whole assigned-time range, like
    /// [Self::TimedAtom], but recovers the due assigned times from a
    /// precomputed per-untimed-literal dispatch table built at watch time
    /// instead of decoding and filtering `elements` on every propagation.
    Meta,

    /// Maintains a live (not-yet-falsified) element count per assigned time
    /// instead of explicit watch literals.
    Counting,

    /// As [Self::TwoWatchedLiteral], additionally pre-computing which
    /// assignment would make the constraint's remaining elements a forced
    /// consequence, to propagate one step earlier.
    Consequences,
}

impl Default for WatchStrategyKind {
    fn default() -> Self {
        WatchStrategyKind::TwoWatchedLiteral
    }
}

/// How the propagator decides whether a nogood it adds is locked (survives
/// the host's nogood-forgetting policy across restarts).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LockPolicy {
    /// Never lock.
    Never,

    /// Always lock.
    Always,

    /// Lock the first `k` times a given assigned time's nogood fires as
    /// UNIT or CONFLICT; stop locking (and retire that assigned time's
    /// watches) after the `k`th. Bookkeeping is per assigned time, not
    /// per-constraint, matching the Python original's `lock_nogoods` list.
    Threshold(NonZeroU32),
}

impl Default for LockPolicy {
    fn default() -> Self {
        LockPolicy::Never
    }
}

/// Top-level propagator configuration, corresponding 1:1 to the CLI surface
/// lists (`--watch-type`, `--lock-ng`, `--ground-up-to`,
/// `--ground-from`, `--use-ids`); the CLI parsing itself is out of scope.
#[derive(Clone, Debug)]
pub struct Config {
    pub watch_strategy: ConfigOption<WatchStrategyKind>,
    pub lock_policy: ConfigOption<LockPolicy>,

    /// Eager-grounding prefix size: the nogoods for a constraint's first
    /// `ground_up_to` assigned times (`tmin ..= tmin + ground_up_to - 1`) are
    /// added as permanent clauses at init rather than watched and formed
    /// lazily. `0` disables this.
    pub ground_up_to: ConfigOption<u32>,

    /// Eager-grounding suffix size: the nogoods for a constraint's last
    /// `ground_from` assigned times (`tmax - ground_from + 1 ..= tmax`) are
    /// added as permanent clauses at init rather than watched and formed
    /// lazily. `0` disables this.
    pub ground_from: ConfigOption<u32>,

    /// Partition constraints into one propagator per theory-atom `id`
    /// rather than a single shared propagator.
    pub use_ids: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            watch_strategy: ConfigOption {
                name: "watch_strategy",
                min: WatchStrategyKind::Naive,
                max: WatchStrategyKind::Consequences,
                value: WatchStrategyKind::default(),
            },
            lock_policy: ConfigOption {
                name: "lock_policy",
                min: LockPolicy::Never,
                max: LockPolicy::Always,
                value: LockPolicy::default(),
            },
            ground_up_to: ConfigOption { name: "ground_up_to", min: 0, max: u32::MAX, value: 0 },
            ground_from: ConfigOption { name: "ground_from", min: 0, max: u32::MAX, value: 0 },
            use_ids: false,
        }
    }
}
