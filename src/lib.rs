//! Condition Axis — rule-based procedural generation of coherent character
//! and world conditions.
//!
//! A registry declares semantic axes (physique, wealth, legitimacy, ...),
//! per-value weights, a mandatory/optional inclusion policy and exclusion
//! rules. Each generation call draws weighted values, bounds the optional
//! axes, strips incoherent combinations, and returns an ordered axis → value
//! state ready to be rendered into a prompt fragment.

pub mod core;
pub mod presets;
pub mod schema;
