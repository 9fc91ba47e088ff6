/// Exclusion rule engine — removes incoherent axis combinations from a
/// drawn state.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::schema::exclusion::ExclusionRule;
use crate::schema::state::ConditionState;

/// Exclusion rules in declaration order, indexed by trigger pair.
#[derive(Debug, Clone, Default)]
pub struct ExclusionEngine {
    rules: Vec<ExclusionRule>,
    /// trigger axis → trigger value → rule indices (ascending).
    by_trigger: FxHashMap<String, FxHashMap<String, Vec<usize>>>,
}

impl ExclusionEngine {
    pub fn new(rules: Vec<ExclusionRule>) -> Self {
        let mut by_trigger: FxHashMap<String, FxHashMap<String, Vec<usize>>> =
            FxHashMap::default();
        for (idx, rule) in rules.iter().enumerate() {
            by_trigger
                .entry(rule.trigger.axis.clone())
                .or_default()
                .entry(rule.trigger.value.clone())
                .or_default()
                .push(idx);
        }
        Self { rules, by_trigger }
    }

    pub fn rules(&self) -> &[ExclusionRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules triggered by `axis=value`, in declaration order.
    pub fn rules_for(&self, axis: &str, value: &str) -> impl Iterator<Item = &ExclusionRule> {
        self.trigger_indices(axis, value)
            .iter()
            .map(move |&idx| &self.rules[idx])
    }

    fn trigger_indices(&self, axis: &str, value: &str) -> &[usize] {
        self.by_trigger
            .get(axis)
            .and_then(|values| values.get(value))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Remove every axis that conflicts with a rule triggered in `state`.
    ///
    /// All triggered rules are evaluated in declaration order against the
    /// unmodified input (no cascading): a rule fires if its trigger pair is
    /// in the input, even when another rule removes the trigger axis. Axes are
    /// only ever removed, so the output never has more entries than the input
    /// and applying the engine to its own output changes nothing.
    pub fn apply(&self, state: ConditionState) -> ConditionState {
        if self.rules.is_empty() || state.is_empty() {
            return state;
        }

        let mut fired: Vec<usize> = state
            .iter()
            .flat_map(|(axis, value)| self.trigger_indices(axis, value).iter().copied())
            .collect();
        fired.sort_unstable();

        let mut result = state.clone();
        let mut removed = 0usize;

        for idx in fired {
            let rule = &self.rules[idx];
            for blocked in &rule.blocked {
                let Some(value) = state.get(&blocked.axis) else {
                    continue;
                };
                if blocked.blocks(value) && result.remove(&blocked.axis).is_some() {
                    removed += 1;
                    debug!(
                        trigger = %rule.trigger,
                        axis = %blocked.axis,
                        value,
                        "exclusion removed axis"
                    );
                }
            }
        }

        if removed > 0 {
            debug!(removed, "applied exclusion rules");
        }

        result
    }
}
