//! Miscellaneous items which do not belong to any particular subsystem.

pub mod log;
