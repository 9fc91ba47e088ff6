//! Runtime components: registry, selection, policy, exclusion, generation
//! and prompt rendering.

pub mod exclusion;
pub mod generator;
pub mod policy;
pub mod prompt;
pub mod registry;
pub mod selector;
