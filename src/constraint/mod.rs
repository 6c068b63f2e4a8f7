/*!
The constraint lifecycle: one `TheoryConstraint` per grounded
`&constraint(...){...}` theory atom, covering every assigned time in
`[tmin, tmax]`. `build_watches` runs once, at `init`; `propagate`, `check`,
and `undo` run during search, driven by the shell (`propagator::mod`).

Per-assigned-time watch bookkeeping is delegated to a
[StrategyState](strategy::StrategyState); everything downstream of "this
assigned time's nogood is worth examining" — forming the nogood, classifying
it, deciding whether to lock it, retiring a satisfied instance — is common to
every strategy and lives here.
*/

pub mod parse;
pub mod strategies;
pub mod strategy;

use std::num::NonZeroU32;

use crate::config::LockPolicy;
use crate::db::{LiteralMap, SignatureRegistry};
use crate::dispatch::library::stat::Counters;
use crate::host::{Init, PropagateControl};
use crate::misc::log::targets;
use crate::nogood::{check_assignment, check_assignment_complete, form_nogood, NogoodOutcome};
use crate::structures::atom_info::AtomInfo;
use crate::structures::literal::{SolverLiteral, Time};
use crate::types::err::{ErrorKind, HostRejectionError};
use parse::ParsedConstraint;
use strategy::StrategyState;

/// One grounded temporal constraint, covering every assigned time in
/// `[tmin, tmax]`.
pub struct TheoryConstraint {
    pub elements: Vec<AtomInfo>,
    pub tmin: Time,
    pub tmax: Time,
    pub source_id: Option<String>,
    lock_policy: LockPolicy,
    /// Per assigned time: `Some(k)` counts down a [LockPolicy::Threshold];
    /// `None` means "not under a countdown" (either the policy is
    /// `Never`/`Always`, or the countdown already reached zero and this
    /// assigned time is retired).
    lock_remaining: Vec<Option<NonZeroU32>>,
    retired: Vec<bool>,
    strategy: StrategyState,
}

impl TheoryConstraint {
    /// Builds a constraint from a parsed term. Does not register any
    /// watches yet — call [Self::build_watches] once the registry and
    /// literal map are complete.
    pub fn new(parsed: ParsedConstraint, strategy_kind: crate::config::WatchStrategyKind) -> Self {
        let time_count = (parsed.tmax - parsed.tmin + 1).max(0) as usize;
        TheoryConstraint {
            elements: parsed.elements,
            tmin: parsed.tmin,
            tmax: parsed.tmax,
            source_id: parsed.id,
            lock_policy: LockPolicy::default(),
            lock_remaining: vec![None; time_count],
            retired: vec![false; time_count],
            strategy: StrategyState::new(strategy_kind, time_count),
        }
    }

    /// Overrides the default lock policy.
    pub fn with_lock_policy(mut self, policy: LockPolicy) -> Self {
        let reset = match policy {
            LockPolicy::Threshold(k) => Some(k),
            LockPolicy::Never | LockPolicy::Always => None,
        };
        self.lock_remaining = vec![reset; self.lock_remaining.len()];
        self.lock_policy = policy;
        self
    }

    pub fn is_valid_time(&self, time: Time) -> bool {
        time >= self.tmin && time <= self.tmax
    }

    fn offset(&self, time: Time) -> usize {
        (time - self.tmin) as usize
    }

    fn is_retired(&self, time: Time) -> bool {
        self.retired.get(self.offset(time)).copied().unwrap_or(true)
    }

    /// Registers this constraint's initial watches and returns every solver
    /// literal (positive form) it registered, for the shell's dispatch index.
    pub fn build_watches(
        &mut self,
        init: &mut dyn Init,
        registry: &SignatureRegistry,
        literal_map: &LiteralMap,
    ) -> Vec<SolverLiteral> {
        match &mut self.strategy {
            StrategyState::Naive(s) => {
                strategies::naive::build_watches(s, &self.elements, self.tmin, self.tmax, registry, literal_map, init)
            }
            StrategyState::OneWatchedLiteral(s) => strategies::one_watched::build_watches(
                s,
                &self.elements,
                self.tmin,
                self.tmax,
                registry,
                literal_map,
                init,
            ),
            StrategyState::TwoWatchedLiteral(s) => strategies::two_watched::build_watches(
                s,
                &self.elements,
                self.tmin,
                self.tmax,
                registry,
                literal_map,
                init,
            ),
            StrategyState::TwoWatchedLiteralMap(s) => strategies::two_watched_map::build_watches(
                s,
                &self.elements,
                self.tmin,
                self.tmax,
                registry,
                literal_map,
                init,
            ),
            StrategyState::Consequences(s) => strategies::consequences::build_watches(
                s,
                &self.elements,
                self.tmin,
                self.tmax,
                registry,
                literal_map,
                init,
            ),
            StrategyState::TimedAtom(s) => strategies::timed_atom::build_watches(
                s,
                &self.elements,
                self.tmin,
                self.tmax,
                registry,
                literal_map,
                init,
            ),
            StrategyState::Meta(s) => {
                strategies::meta::build_watches(s, &self.elements, self.tmin, self.tmax, registry, literal_map, init)
            }
            StrategyState::Counting(s) => {
                strategies::counting::build_watches(s, &self.elements, self.tmin, self.tmax, registry, literal_map, init)
            }
        }
    }

    /// Reacts to `changed` having been assigned. Forms and fires the nogood
    /// for every assigned time the strategy judges worth examining.
    pub fn propagate(
        &mut self,
        changed: SolverLiteral,
        control: &mut dyn PropagateControl,
        registry: &SignatureRegistry,
        literal_map: &LiteralMap,
    ) -> Result<(), ErrorKind> {
        let due = match &mut self.strategy {
            StrategyState::Naive(s) => strategies::naive::propagate(
                s, &self.elements, self.tmin, self.tmax, changed, registry, literal_map, control,
            )?,
            StrategyState::OneWatchedLiteral(s) => strategies::one_watched::propagate(
                s, &self.elements, self.tmin, self.tmax, changed, registry, literal_map, control,
            )?,
            StrategyState::TwoWatchedLiteral(s) => strategies::two_watched::propagate(
                s, &self.elements, self.tmin, self.tmax, changed, registry, literal_map, control,
            )?,
            StrategyState::TwoWatchedLiteralMap(s) => strategies::two_watched_map::propagate(
                s, &self.elements, self.tmin, self.tmax, changed, registry, literal_map, control,
            )?,
            StrategyState::Consequences(s) => strategies::consequences::propagate(
                s, &self.elements, self.tmin, self.tmax, changed, registry, literal_map, control,
            )?,
            StrategyState::TimedAtom(s) => strategies::timed_atom::propagate(
                s, &self.elements, self.tmin, self.tmax, changed, registry, literal_map, control,
            )?,
            StrategyState::Meta(s) => strategies::meta::propagate(
                s, &self.elements, self.tmin, self.tmax, changed, registry, literal_map, control,
            )?,
            StrategyState::Counting(s) => strategies::counting::propagate(
                s, &self.elements, self.tmin, self.tmax, changed, registry, literal_map, control,
            )?,
        };

        for time in due {
            if self.is_retired(time) {
                continue;
            }
            let Some(nogood) = form_nogood(&self.elements, time, registry, literal_map) else { continue };
            match check_assignment(control, &nogood) {
                NogoodOutcome::None => {}
                NogoodOutcome::Unit(_) | NogoodOutcome::Conflict => self.fire(time, &nogood, control)?,
            }
        }
        Ok(())
    }

    /// Re-examines every still-watched assigned time against a (now total)
    /// assignment.
    pub fn check(
        &mut self,
        control: &mut dyn PropagateControl,
        registry: &SignatureRegistry,
        literal_map: &LiteralMap,
    ) -> Result<(), ErrorKind> {
        for time in self.tmin..=self.tmax {
            if self.is_retired(time) {
                continue;
            }
            let Some(nogood) = form_nogood(&self.elements, time, registry, literal_map) else { continue };
            if check_assignment_complete(control, &nogood) == NogoodOutcome::Conflict {
                self.fire(time, &nogood, control)?;
            }
        }
        Ok(())
    }

    pub fn undo(
        &mut self,
        changed: SolverLiteral,
        registry: &SignatureRegistry,
        literal_map: &LiteralMap,
    ) {
        match &mut self.strategy {
            StrategyState::Naive(s) => {
                strategies::naive::undo(s, &self.elements, self.tmin, self.tmax, changed, registry, literal_map)
            }
            StrategyState::OneWatchedLiteral(s) => {
                strategies::one_watched::undo(s, &self.elements, self.tmin, self.tmax, changed, registry, literal_map)
            }
            StrategyState::TwoWatchedLiteral(s) => {
                strategies::two_watched::undo(s, &self.elements, self.tmin, self.tmax, changed, registry, literal_map)
            }
            StrategyState::TwoWatchedLiteralMap(s) => {
                strategies::two_watched_map::undo(s, &self.elements, self.tmin, self.tmax, changed, registry, literal_map)
            }
            StrategyState::Consequences(s) => {
                strategies::consequences::undo(s, &self.elements, self.tmin, self.tmax, changed, registry, literal_map)
            }
            StrategyState::TimedAtom(s) => {
                strategies::timed_atom::undo(s, &self.elements, self.tmin, self.tmax, changed, registry, literal_map)
            }
            StrategyState::Meta(s) => {
                strategies::meta::undo(s, &self.elements, self.tmin, self.tmax, changed, registry, literal_map)
            }
            StrategyState::Counting(s) => {
                strategies::counting::undo(s, &self.elements, self.tmin, self.tmax, changed, registry, literal_map)
            }
        }
    }

    /// Adds the nogood for `time` to the host, applying the lock policy and
    /// retiring the assigned time once its countdown reaches zero.
    fn fire(&mut self, time: Time, nogood: &[SolverLiteral], control: &mut dyn PropagateControl) -> Result<(), ErrorKind> {
        let offset = self.offset(time);
        let lock = match self.lock_policy {
            LockPolicy::Never => false,
            LockPolicy::Always => true,
            LockPolicy::Threshold(_) => {
                let remaining = self.lock_remaining[offset];
                match remaining {
                    Some(k) => {
                        match NonZeroU32::new(k.get() - 1) {
                            Some(next) => self.lock_remaining[offset] = Some(next),
                            None => {
                                self.lock_remaining[offset] = None;
                                self.retired[offset] = true;
                            }
                        }
                        true
                    }
                    None => false,
                }
            }
        };

        if !control.add_nogood(nogood, lock) {
            return Err(HostRejectionError::NogoodRejected.into());
        }
        if !control.propagate() {
            return Err(HostRejectionError::PropagationHalted.into());
        }
        Ok(())
    }
}

/// Builds a constraint from a parsed term, registering its initial watches.
///
/// A single-element constraint is forbidden outright rather than watched: at
/// every assigned time its one element must be false, so a unit clause is
/// added directly to the host and no `TheoryConstraint` is constructed at
/// all.
///
/// `ground_up_to`/`ground_from` name an eager-grounding prefix and suffix of
/// assigned times (see [crate::config::Config]): each such assigned time has
/// its nogood formed and added as a permanent clause right here, and is
/// marked retired so the lazy `propagate`/`check` path never reconsiders it.
/// Watches are still registered for those assigned times same as any other —
/// narrowing the range passed to a strategy's `build_watches` would
/// desynchronize its offset bookkeeping from `propagate`/`undo`, which always
/// index from the constraint's true `tmin` — so eager grounding only changes
/// when a nogood is formed, not whether a literal is watched.
#[allow(clippy::too_many_arguments)]
pub fn build(
    parsed: ParsedConstraint,
    strategy_kind: crate::config::WatchStrategyKind,
    lock_policy: LockPolicy,
    ground_up_to: u32,
    ground_from: u32,
    init: &mut dyn Init,
    registry: &SignatureRegistry,
    literal_map: &LiteralMap,
    counters: &mut Counters,
) -> Option<(TheoryConstraint, Vec<SolverLiteral>)> {
    if parsed.elements.len() == 1 {
        let info = &parsed.elements[0];
        for time in parsed.tmin..=parsed.tmax {
            let internal = registry.to_internal(info.untimed_lit, info.wall_clock_time(time));
            let lit = literal_map.grab(internal);
            if lit != crate::structures::literal::SOLVER_TRUE {
                init.add_clause(&[-lit]);
            }
        }
        return None;
    }

    let mut constraint = TheoryConstraint::new(parsed, strategy_kind).with_lock_policy(lock_policy);
    let watched = constraint.build_watches(init, registry, literal_map);

    let prefix_end =
        if ground_up_to > 0 { constraint.tmin + ground_up_to as Time - 1 } else { constraint.tmin - 1 };
    let suffix_start =
        if ground_from > 0 { constraint.tmax - ground_from as Time + 1 } else { constraint.tmax + 1 };

    for time in constraint.tmin..=constraint.tmax {
        if time > prefix_end && time < suffix_start {
            continue;
        }
        let Some(nogood) = form_nogood(&constraint.elements, time, registry, literal_map) else { continue };
        let negated: Vec<SolverLiteral> = nogood.iter().map(|&lit| -lit).collect();
        init.add_clause(&negated);
        let offset = constraint.offset(time);
        constraint.retired[offset] = true;
        counters.record_pre_grounded();
        log::trace!(target: targets::LOCK, "eagerly grounded assigned time {time} as a permanent clause");
    }

    Some((constraint, watched))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WatchStrategyKind;
    use crate::host::mock::{MockControl, MockInit};

    fn setup() -> (SignatureRegistry, LiteralMap, MockInit) {
        let mut registry = SignatureRegistry::new();
        registry.register("holds", 2);
        let literal_map = LiteralMap::new();
        (registry, literal_map, MockInit::new())
    }

    fn ground(registry: &SignatureRegistry, literal_map: &mut LiteralMap, untimed: i64, time: Time, solver: i64) {
        let internal = registry.to_internal(untimed, time);
        literal_map.insert(internal, solver);
    }

    #[test]
    fn size_one_constraint_adds_unit_clauses_and_builds_nothing() {
        let (mut registry, mut literal_map, mut init) = setup();
        let holds = registry.register("holds", 2);
        ground(&registry, &mut literal_map, holds, 0, 10);
        ground(&registry, &mut literal_map, holds, 1, 11);

        let parsed = ParsedConstraint {
            tmin: 0,
            tmax: 1,
            id: None,
            elements: vec![AtomInfo { sign: 1, time_mod: 0, untimed_lit: holds }],
        };
        let built = build(
            parsed,
            WatchStrategyKind::TwoWatchedLiteral,
            LockPolicy::Never,
            0,
            0,
            &mut init,
            &registry,
            &literal_map,
            &mut Counters::new(),
        );
        assert!(built.is_none());
        assert_eq!(init.clauses, vec![vec![-10], vec![-11]]);
    }

    #[test]
    fn two_element_constraint_fires_conflict_once_both_elements_true() {
        let (mut registry, mut literal_map, mut init) = setup();
        let holds = registry.register("holds", 2);
        let occurs = registry.register("occurs", 1);
        ground(&registry, &mut literal_map, holds, 0, 10);
        ground(&registry, &mut literal_map, occurs, 0, 11);

        let parsed = ParsedConstraint {
            tmin: 0,
            tmax: 0,
            id: None,
            elements: vec![
                AtomInfo { sign: 1, time_mod: 0, untimed_lit: holds },
                AtomInfo { sign: 1, time_mod: 0, untimed_lit: occurs },
            ],
        };
        let (mut constraint, watched) = build(
            parsed,
            WatchStrategyKind::TwoWatchedLiteral,
            LockPolicy::Never,
            0,
            0,
            &mut init,
            &registry,
            &literal_map,
            &mut Counters::new(),
        )
        .unwrap();
        assert_eq!(watched.len(), 2);

        let mut control = MockControl::new();
        control.set(10, Some(true));
        constraint.propagate(10, &mut control, &registry, &literal_map).unwrap();
        assert_eq!(control.last_nogood(), Some([10i64, 11].as_slice()));

        control.set(11, Some(true));
        constraint.propagate(11, &mut control, &registry, &literal_map).unwrap();
        assert_eq!(control.last_nogood(), Some([10i64, 11].as_slice()));
        assert_eq!(control.added_nogoods.len(), 2);
    }

    #[test]
    fn eager_grounding_prefix_adds_a_permanent_clause_and_retires_the_assigned_time() {
        let (mut registry, mut literal_map, mut init) = setup();
        let holds = registry.register("holds", 2);
        let occurs = registry.register("occurs", 1);
        ground(&registry, &mut literal_map, holds, 0, 10);
        ground(&registry, &mut literal_map, occurs, 0, 11);
        ground(&registry, &mut literal_map, holds, 1, 20);
        ground(&registry, &mut literal_map, occurs, 1, 21);

        let parsed = ParsedConstraint {
            tmin: 0,
            tmax: 1,
            id: None,
            elements: vec![
                AtomInfo { sign: 1, time_mod: 0, untimed_lit: holds },
                AtomInfo { sign: 1, time_mod: 0, untimed_lit: occurs },
            ],
        };
        let mut counters = Counters::new();
        let (constraint, _watched) = build(
            parsed,
            WatchStrategyKind::TwoWatchedLiteral,
            LockPolicy::Never,
            1,
            0,
            &mut init,
            &registry,
            &literal_map,
            &mut counters,
        )
        .unwrap();

        assert_eq!(init.clauses, vec![vec![-10, -11]]);
        assert!(constraint.is_retired(0));
        assert!(!constraint.is_retired(1));
        assert_eq!(counters.pre_grounded_nogoods, 1);
    }
}
