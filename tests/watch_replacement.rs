//! Property 4: after a two-watched `propagate` replaces a watch,
//! the new watch differs from the old one and was unassigned at the moment
//! it was picked, and the host's watch table reflects exactly the
//! replacement (the old literal is no longer watched, the new one is).

use temporal_propagator::config::LockPolicy;
use temporal_propagator::config::WatchStrategyKind;
use temporal_propagator::constraint::parse::ParsedConstraint;
use temporal_propagator::constraint::{self};
use temporal_propagator::db::{LiteralMap, SignatureRegistry};
use temporal_propagator::dispatch::library::stat::Counters;
use temporal_propagator::host::mock::{MockControl, MockInit};
use temporal_propagator::host::PropagateControl;
use temporal_propagator::structures::atom_info::AtomInfo;

/// Seeds `control` with every literal `init` registered a watch on, mimicking
/// a host whose watch table is shared between the init and search phases.
fn carry_watches(control: &mut MockControl, init: &MockInit) {
    for &lit in &init.watched {
        control.add_watch(lit);
        control.add_watch(-lit);
    }
}

#[test]
fn replacement_picks_a_fresh_unassigned_watch() {
    // Four distinct signatures so each element has its own literal at time 0.
    let mut registry = SignatureRegistry::new();
    let mut literal_map = LiteralMap::new();
    let mut elements = Vec::new();
    for (idx, functor) in ["p0", "p1", "p2", "p3"].iter().enumerate() {
        let untimed = registry.register(functor, 1);
        literal_map.insert(registry.to_internal(untimed, 0), 10 + idx as i64);
        elements.push(AtomInfo { sign: 1, time_mod: 0, untimed_lit: untimed });
    }

    let parsed = ParsedConstraint { tmin: 0, tmax: 0, id: None, elements };
    let mut init = MockInit::new();
    let (mut built, watched) = constraint::build(
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
    assert_eq!(watched, vec![10, 11]);

    let mut control = MockControl::new();
    carry_watches(&mut control, &init);

    control.set(10, Some(true));
    built.propagate(10, &mut control, &registry, &literal_map).unwrap();

    // 10 was replaced by 12 (the first not-yet-watched, not-yet-true element).
    assert!(!control.has_watch(10));
    assert!(!control.has_watch(-10));
    assert!(control.has_watch(12));
    assert!(control.has_watch(-12));
    assert!(control.added_nogoods.is_empty(), "a replacement exists, nothing should fire yet");

    // Exhaust the remaining replacements: only 13 is left once 11 also fires.
    control.set(11, Some(true));
    built.propagate(11, &mut control, &registry, &literal_map).unwrap();
    assert!(!control.has_watch(11));
    assert!(control.has_watch(13));
    assert!(control.added_nogoods.is_empty());

    // No more unwatched, not-yet-true elements: the next trigger is unit/conflict.
    control.set(12, Some(true));
    built.propagate(12, &mut control, &registry, &literal_map).unwrap();
    assert_eq!(control.added_nogoods.len(), 1);
}
