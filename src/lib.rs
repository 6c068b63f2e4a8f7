/*!
A lazily-grounded temporal constraint theory propagator.

This crate is a library to be embedded in a CDCL-based answer set solver.
The host grounds a logic program extended with a theory of *temporal
constraints*: clauses whose literals are parameterised by a discrete time
index `t`. Rather than unrolling every clause for every time point at ground
time, the family of per-time-point clauses is lifted into a single untimed
schema plus a range `[tmin, tmax]`, and conflicts/units are discovered lazily
during search.

# Orientation

The crate is built, leaves first, from:
- A [signature registry](db::signature), numbering `(functor, arity)` pairs.
- A [literal map](db::literal_map), the bidirectional correspondence between
  solver literals and internal literals encoding `(untimed_lit, time)`.
- A [nogood engine](nogood), forming and classifying nogoods.
- A [theory constraint](constraint::TheoryConstraint), the per-constraint
  lifecycle (build watches, propagate, check, undo).
- A family of [watch strategies](constraint::strategy), differing in which
  literals are watched and how a change is mapped back to constraint-relative
  times.
- A [propagator shell](propagator::PropagatorShell), dispatching host
  callbacks to the constraints observing the literal that changed.
- A [theory handler](handler::TheoryHandler), optionally partitioning
  constraints into one propagator per declared `id`.

None of the above builds or drives a CDCL search loop; that remains the
host's job. The [host] module fixes the trait vocabulary the crate expects
of that host, and a test-only [host::mock] implements it so the propagator
can be exercised without a real ASP grounder attached.

# Guiding principles

- **Soundness over cleverness.** Every watch strategy is checked, in tests,
  against the same oracle: the set of models returned is the set returned
  from the fully expanded per-time-point clauses. No strategy is permitted
  to be merely "probably fine".
- **A closed sum of strategies**, not an open class hierarchy — see
  [constraint::strategy].
- **Cheap when unused.** Dispatch of statistics ([dispatch]) and logging are
  both a check on an optional in the hot path.
*/

#![allow(clippy::collapsible_else_if)]
#![allow(clippy::too_many_arguments)]

pub mod config;
pub mod constraint;
pub mod db;
pub mod dispatch;
pub mod handler;
pub mod host;
pub mod misc;
pub mod nogood;
pub mod propagator;
pub mod structures;
pub mod types;
