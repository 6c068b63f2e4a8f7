//! Crate-wide types which do not belong to a single subsystem.

pub mod err;
