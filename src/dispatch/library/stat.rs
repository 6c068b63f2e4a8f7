//! Statistics regarding the propagator's own activity. Collection is always
//! on; only printing/dispatching it anywhere is left to the host.

/// One statistic, suitable for dispatch to an external observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stat {
    /// A nogood was added in response to a `Conflict` classification.
    ConflictsAdded(usize),

    /// A nogood was added in response to a `Unit` classification.
    UnitsAdded(usize),

    /// A nogood was added with `lock = true`.
    LockedNogoods(usize),

    /// A nogood was added for an assigned time that was eagerly built
    /// (`Config::ground_up_to`/`ground_from`) rather than built lazily.
    PreGroundedNogoods(usize),

    /// The number of `TheoryConstraint`s built.
    ConstraintsBuilt(usize),

    /// The number of distinct `(functor, arity)` signatures registered.
    SignaturesRegistered(usize),
}

/// Running counts of the statistics a propagator accumulates over its
/// lifetime. Plain counters, not a pub/sub bus: a host wanting dispatch-style
/// notification can diff two snapshots and emit [Stat] values itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counters {
    pub conflicts_added: usize,
    pub units_added: usize,
    pub locked_nogoods: usize,
    pub pre_grounded_nogoods: usize,
    pub constraints_built: usize,
    pub signatures_registered: usize,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_conflict(&mut self) {
        self.conflicts_added += 1;
    }

    pub fn record_unit(&mut self) {
        self.units_added += 1;
    }

    pub fn record_lock(&mut self) {
        self.locked_nogoods += 1;
    }

    pub fn record_pre_grounded(&mut self) {
        self.pre_grounded_nogoods += 1;
    }

    pub fn record_constraint_built(&mut self) {
        self.constraints_built += 1;
    }

    pub fn record_signature_registered(&mut self) {
        self.signatures_registered += 1;
    }

    /// A snapshot as a list of [Stat] values, for a host that wants to
    /// forward these through its own dispatch mechanism.
    pub fn snapshot(&self) -> Vec<Stat> {
        vec![
            Stat::ConflictsAdded(self.conflicts_added),
            Stat::UnitsAdded(self.units_added),
            Stat::LockedNogoods(self.locked_nogoods),
            Stat::PreGroundedNogoods(self.pre_grounded_nogoods),
            Stat::ConstraintsBuilt(self.constraints_built),
            Stat::SignaturesRegistered(self.signatures_registered),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let counters = Counters::new();
        assert_eq!(counters.conflicts_added, 0);
        assert_eq!(counters.snapshot().len(), 6);
    }

    #[test]
    fn recording_increments_the_right_field() {
        let mut counters = Counters::new();
        counters.record_conflict();
        counters.record_conflict();
        counters.record_unit();
        assert_eq!(counters.conflicts_added, 2);
        assert_eq!(counters.units_added, 1);
        assert_eq!(counters.locked_nogoods, 0);
    }
}
