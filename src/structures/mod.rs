//! The abstract elements of the temporal constraint theory and their
//! representation: literals at each of the three levels the crate
//! distinguishes, and the per-element descriptor of a theory constraint.

pub mod atom_info;
pub mod literal;

pub use atom_info::AtomInfo;
pub use literal::{InternalLiteral, SolverLiteral, Time, UntimedLiteral};
