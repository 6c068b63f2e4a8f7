//! The closed sum over watch-strategy bookkeeping: one variant
//! per entry in [WatchStrategyKind](crate::config::WatchStrategyKind),
//! holding whatever per-assigned-time state that strategy needs to decide
//! when a constraint's nogood is worth re-examining.
//!
//! New strategies are added as new variants here, not as new implementors of
//! an open trait — the set of strategies is fixed and small, and a closed
//! enum lets `TheoryConstraint`'s dispatch be a single match with no dynamic
//! dispatch overhead.

use crate::config::WatchStrategyKind;
use crate::constraint::strategies::{consequences, counting, meta, naive, one_watched, timed_atom, two_watched, two_watched_map};

/// Per-assigned-time watch bookkeeping, one instance per
/// [crate::constraint::TheoryConstraint].
pub enum StrategyState {
    Naive(naive::NaiveState),
    OneWatchedLiteral(one_watched::OneWatchedState),
    TwoWatchedLiteral(two_watched::TwoWatchedState),
    TwoWatchedLiteralMap(two_watched_map::TwoWatchedMapState),
    TimedAtom(timed_atom::TimedAtomState),
    Meta(meta::MetaState),
    Counting(counting::CountingState),
    Consequences(consequences::ConsequencesState),
}

impl StrategyState {
    /// Builds the initial (empty) bookkeeping for `time_count` assigned
    /// times, one variant per [WatchStrategyKind] with no further
    /// resolution: meta is a strategy in its own right now, not a router to
    /// one of the others.
    pub fn new(kind: WatchStrategyKind, time_count: usize) -> Self {
        match kind {
            WatchStrategyKind::Naive => StrategyState::Naive(naive::NaiveState::new(time_count)),
            WatchStrategyKind::OneWatchedLiteral => {
                StrategyState::OneWatchedLiteral(one_watched::OneWatchedState::new(time_count))
            }
            WatchStrategyKind::TwoWatchedLiteral => {
                StrategyState::TwoWatchedLiteral(two_watched::TwoWatchedState::new(time_count))
            }
            WatchStrategyKind::TwoWatchedLiteralMap => {
                StrategyState::TwoWatchedLiteralMap(two_watched_map::TwoWatchedMapState::new(time_count))
            }
            WatchStrategyKind::TimedAtom => StrategyState::TimedAtom(timed_atom::TimedAtomState::new(time_count)),
            WatchStrategyKind::Meta => StrategyState::Meta(meta::MetaState::new(time_count)),
            WatchStrategyKind::Counting => StrategyState::Counting(counting::CountingState::new(time_count)),
            WatchStrategyKind::Consequences => {
                StrategyState::Consequences(consequences::ConsequencesState::new(time_count))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{LiteralMap, SignatureRegistry};
    use crate::host::mock::{MockControl, MockInit};
    use crate::structures::atom_info::AtomInfo;

    /// Meta's dispatch table must single out the same assigned time
    /// timed-atom's own decode-on-propagate would, for the same change — the
    /// whole point of the meta strategy is to be observably identical to
    /// timed-atom while getting there through a precomputed table instead.
    #[test]
    fn meta_dispatch_table_matches_timed_atom_observable_behavior() {
        let mut registry = SignatureRegistry::new();
        let a = registry.register("a", 1);
        let b = registry.register("b", 1);
        let mut literal_map = LiteralMap::new();
        for t in 0..=1 {
            literal_map.insert(registry.to_internal(a, t), 10 + t * 2);
            literal_map.insert(registry.to_internal(b, t), 11 + t * 2);
        }
        let elements = vec![
            AtomInfo { sign: 1, time_mod: 0, untimed_lit: a },
            AtomInfo { sign: 1, time_mod: 0, untimed_lit: b },
        ];

        let mut meta_state = match StrategyState::new(WatchStrategyKind::Meta, 2) {
            StrategyState::Meta(s) => s,
            _ => unreachable!(),
        };
        let mut timed_state = match StrategyState::new(WatchStrategyKind::TimedAtom, 2) {
            StrategyState::TimedAtom(s) => s,
            _ => unreachable!(),
        };

        let mut meta_init = MockInit::new();
        let mut timed_init = MockInit::new();
        crate::constraint::strategies::meta::build_watches(
            &mut meta_state, &elements, 0, 1, &registry, &literal_map, &mut meta_init,
        );
        crate::constraint::strategies::timed_atom::build_watches(
            &mut timed_state, &elements, 0, 1, &registry, &literal_map, &mut timed_init,
        );

        let mut meta_control = MockControl::new();
        let mut timed_control = MockControl::new();
        meta_control.set(13, Some(true));
        timed_control.set(13, Some(true));

        let meta_due = crate::constraint::strategies::meta::propagate(
            &mut meta_state, &elements, 0, 1, 13, &registry, &literal_map, &mut meta_control,
        )
        .unwrap();
        let timed_due = crate::constraint::strategies::timed_atom::propagate(
            &mut timed_state, &elements, 0, 1, 13, &registry, &literal_map, &mut timed_control,
        )
        .unwrap();
        assert_eq!(meta_due, timed_due);
        assert_eq!(meta_due, vec![1]);
    }
}
