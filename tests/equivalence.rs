//! Property 1: for every watch strategy, the set of assignments
//! the propagator rejects matches the naive, fully-expanded oracle —
//! `a(t) ∧ b(t)` forbidden for every `t` in `[tmin, tmax]`. `check` is the
//! strategy-independent completeness backstop (it re-examines every assigned
//! time against a total assignment regardless of what any strategy's watches
//! noticed along the way), so driving assignments incrementally through
//! `propagate` and then calling `check` exercises exactly the soundness +
//! completeness property the strategies are meant to preserve.

use temporal_propagator::config::{Config, WatchStrategyKind};
use temporal_propagator::host::mock::{MockControl, MockInit};
use temporal_propagator::host::{GroundAtom, Prefix, SignatureDecl, TheoryAtomTerm, TheoryConstraintTerm, TheoryElementTerm};
use temporal_propagator::propagator::PropagatorShell;

const TMAX: i64 = 2;

fn build_shell(strategy: WatchStrategyKind) -> (PropagatorShell, [i64; 3], [i64; 3]) {
    let mut config = Config::default();
    config.watch_strategy.value = strategy;
    let mut shell = PropagatorShell::new(config);
    let mut init = MockInit::new();

    init.add_theory_atom(TheoryAtomTerm::Signature(vec![
        SignatureDecl { sign: 1, functor: "a".to_string(), arity: 1 },
        SignatureDecl { sign: 1, functor: "b".to_string(), arity: 1 },
    ]));

    let mut a_lits = [0i64; 3];
    let mut b_lits = [0i64; 3];
    let mut next_lit = 10;
    for t in 0..=TMAX {
        a_lits[t as usize] = next_lit;
        init.add_ground_atom("a", 1, GroundAtom { functor: "a".to_string(), args: vec![], time: t, solver_literal: next_lit });
        next_lit += 1;
        b_lits[t as usize] = next_lit;
        init.add_ground_atom("b", 1, GroundAtom { functor: "b".to_string(), args: vec![], time: t, solver_literal: next_lit });
        next_lit += 1;
    }

    init.add_theory_atom(TheoryAtomTerm::Constraint(TheoryConstraintTerm {
        tmin: Some(0),
        tmax: TMAX,
        id: None,
        elements: vec![
            TheoryElementTerm { prefix: Prefix::PlusDot, functor: "a".to_string(), args: vec![] },
            TheoryElementTerm { prefix: Prefix::PlusDot, functor: "b".to_string(), args: vec![] },
        ],
    }));

    shell.init(&mut init).unwrap();
    (shell, a_lits, b_lits)
}

fn naive_conflict(a: &[bool; 3], b: &[bool; 3]) -> bool {
    (0..3).any(|t| a[t] && b[t])
}

#[test]
fn every_strategy_agrees_with_the_naive_oracle() {
    for strategy in [
        WatchStrategyKind::Naive,
        WatchStrategyKind::OneWatchedLiteral,
        WatchStrategyKind::TwoWatchedLiteral,
        WatchStrategyKind::TwoWatchedLiteralMap,
        WatchStrategyKind::TimedAtom,
        WatchStrategyKind::Meta,
        WatchStrategyKind::Counting,
        WatchStrategyKind::Consequences,
    ] {
        let (mut shell, a_lits, b_lits) = build_shell(strategy);

        for mask in 0u32..64 {
            let mut a = [false; 3];
            let mut b = [false; 3];
            for t in 0..3 {
                a[t] = (mask >> (t * 2)) & 1 == 1;
                b[t] = (mask >> (t * 2 + 1)) & 1 == 1;
            }

            let mut control = MockControl::new();
            for t in 0..3 {
                control.set(a_lits[t], Some(a[t]));
                shell.propagate(&mut control, &[a_lits[t]]).unwrap();
                control.set(b_lits[t], Some(b[t]));
                shell.propagate(&mut control, &[b_lits[t]]).unwrap();
            }
            shell.check(&mut control).unwrap();

            let expected = naive_conflict(&a, &b);
            let fired = !control.added_nogoods.is_empty();
            assert_eq!(
                fired, expected,
                "strategy {strategy:?}, mask {mask:06b}: expected conflict={expected}, got added_nogoods={:?}",
                control.added_nogoods
            );
        }
    }
}
