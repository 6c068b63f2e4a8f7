/*!
Dispatches for external observers.

The propagator does not print anything itself; it only accumulates
[library::stat::Counters] and, should a host want to forward them through its
own reporting mechanism, can hand back a snapshot as a list of small
[Dispatch] messages.
*/

pub mod library;

pub use library::stat::Stat;

/// Dispatch types. Presently just statistics; the enum exists so a future
/// dispatch kind (e.g. a delta on constraint construction) has somewhere to
/// land without widening every call site that already matches on `Dispatch`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    Stat(Stat),
}
