use serde::{Deserialize, Serialize};

/// Which axes are always drawn and which may be drawn.
///
/// `max_optional` may exceed the number of optional axes; the resolver
/// clamps it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisPolicy {
    #[serde(default)]
    pub mandatory: Vec<String>,
    #[serde(default)]
    pub optional: Vec<String>,
    #[serde(default)]
    pub max_optional: usize,
}

impl AxisPolicy {
    /// Upper bound on optional axes for a single draw.
    pub fn optional_limit(&self) -> usize {
        self.max_optional.min(self.optional.len())
    }

    pub fn is_mandatory(&self, axis: &str) -> bool {
        self.mandatory.iter().any(|a| a == axis)
    }

    pub fn is_optional(&self, axis: &str) -> bool {
        self.optional.iter().any(|a| a == axis)
    }
}
