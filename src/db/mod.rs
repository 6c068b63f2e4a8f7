//! The two write-once-then-read-many tables built during `init`: the
//! signature registry and the literal map.

pub mod literal_map;
pub mod signature;

pub use literal_map::LiteralMap;
pub use signature::SignatureRegistry;
