//! A single bounded, named configuration value, following the same shape
//! used throughout the host solver's own configuration surface.

/// A configuration value with a name (for CLI/log surfaces) and bounds.
#[derive(Clone, Copy, Debug)]
pub struct ConfigOption<T> {
    pub name: &'static str,
    pub min: T,
    pub max: T,
    pub value: T,
}
