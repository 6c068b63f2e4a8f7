//! One module per watch strategy. Each exposes a `*State`
//! type holding its per-assigned-time bookkeeping and `build_watches`/
//! `propagate`/`undo` functions operating on it; `TheoryConstraint` owns the
//! dispatch (see [super::strategy]).

pub mod consequences;
pub mod counting;
pub mod meta;
pub mod naive;
pub mod one_watched;
pub mod timed_atom;
pub mod two_watched;
pub mod two_watched_map;
