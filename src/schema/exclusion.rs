use serde::{Deserialize, Serialize};

use super::axis::ValueKey;

/// Values of one axis that a rule forbids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedValues {
    pub axis: String,
    pub values: Vec<String>,
}

impl BlockedValues {
    pub fn blocks(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// A coherence constraint: when `trigger` is present in a state, none of
/// the `blocked` pairs may coexist with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionRule {
    pub trigger: ValueKey,
    pub blocked: Vec<BlockedValues>,
}

impl ExclusionRule {
    pub fn new(axis: &str, value: &str) -> Self {
        Self {
            trigger: ValueKey::new(axis, value),
            blocked: Vec::new(),
        }
    }

    /// Add a blocked axis with the given forbidden values.
    pub fn block(mut self, axis: &str, values: &[&str]) -> Self {
        self.blocked.push(BlockedValues {
            axis: axis.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_builder() {
        let rule = ExclusionRule::new("wealth", "decadent")
            .block("physique", &["frail"])
            .block("health", &["sickly"]);
        assert_eq!(rule.trigger, ValueKey::new("wealth", "decadent"));
        assert_eq!(rule.blocked.len(), 2);
        assert!(rule.blocked[1].blocks("sickly"));
        assert!(!rule.blocked[1].blocks("hale"));
    }

    #[test]
    fn rule_from_ron() {
        let rule: ExclusionRule = ron::from_str(
            r#"(
                trigger: ("age", "ancient"),
                blocked: [(axis: "demeanor", values: ["timid"])],
            )"#,
        )
        .unwrap();
        assert_eq!(rule.trigger.axis, "age");
        assert_eq!(rule.blocked[0].axis, "demeanor");
    }
}
