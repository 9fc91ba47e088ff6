use serde::{Deserialize, Serialize};
use std::fmt;

/// A named semantic dimension with a fixed, ordered set of mutually
/// exclusive values (e.g. `wealth: poor, modest, wealthy`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axis {
    pub name: String,
    pub values: Vec<String>,
}

impl Axis {
    pub fn new(name: &str, values: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// Returns true if `value` is part of this axis's domain.
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    /// Position of `value` in declaration order.
    pub fn position(&self, value: &str) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }
}

/// Composite `(axis, value)` key.
///
/// Serialized as a plain tuple so RON configuration can write
/// `("wealth", "decadent")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct ValueKey {
    pub axis: String,
    pub value: String,
}

impl ValueKey {
    pub fn new(axis: &str, value: &str) -> Self {
        Self {
            axis: axis.to_string(),
            value: value.to_string(),
        }
    }
}

impl From<(String, String)> for ValueKey {
    fn from((axis, value): (String, String)) -> Self {
        Self { axis, value }
    }
}

impl From<ValueKey> for (String, String) {
    fn from(key: ValueKey) -> Self {
        (key.axis, key.value)
    }
}

impl fmt::Display for ValueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.axis, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_lookup() {
        let axis = Axis::new("wealth", &["poor", "modest", "wealthy"]);
        assert!(axis.contains("modest"));
        assert!(!axis.contains("decadent"));
        assert_eq!(axis.position("wealthy"), Some(2));
        assert_eq!(axis.position("decadent"), None);
    }

    #[test]
    fn value_key_reads_as_tuple() {
        let key: ValueKey = ron::from_str(r#"("wealth", "decadent")"#).unwrap();
        assert_eq!(key, ValueKey::new("wealth", "decadent"));
        assert_eq!(key.to_string(), "wealth=decadent");
    }
}
