//! Plain data types shared by the registry and the generation pipeline.

pub mod axis;
pub mod exclusion;
pub mod policy;
pub mod state;
