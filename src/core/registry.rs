/// Axis registry — validated, read-only generation configuration.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

use crate::core::exclusion::ExclusionEngine;
use crate::core::generator::ConditionGenerator;
use crate::core::selector::{AxisDistribution, CumulativeWeights};
use crate::schema::axis::{Axis, ValueKey};
use crate::schema::exclusion::ExclusionRule;
use crate::schema::policy::AxisPolicy;

/// Configuration errors. All of them are detected while building a registry;
/// a registry that fails validation is never handed out.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("RON serialization error: {0}")]
    RonSerialize(#[from] ron::error::Error),
    #[error("axis '{0}' has no values")]
    EmptyAxis(String),
    #[error("axis '{0}' is declared more than once")]
    DuplicateAxis(String),
    #[error("axis '{axis}' declares value '{value}' more than once")]
    DuplicateValue { axis: String, value: String },
    #[error("{context} references unknown axis '{axis}'")]
    UnknownAxis { context: String, axis: String },
    #[error("{context} references unknown value '{value}' on axis '{axis}'")]
    UnknownValue {
        context: String,
        axis: String,
        value: String,
    },
    #[error("weight for {axis}={value} must be positive and finite, got {weight}")]
    InvalidWeight {
        axis: String,
        value: String,
        weight: f64,
    },
    #[error("weights on axis '{0}' sum to a non-finite total")]
    WeightOverflow(String),
    #[error("axis '{0}' appears more than once in the policy")]
    DuplicatePolicyAxis(String),
    #[error("exclusion rule triggered by {0} blocks nothing")]
    EmptyRule(ValueKey),
}

/// Lookup failures on a valid registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("axis not found: {0}")]
    NotFound(String),
}

/// Serializable registry description, as written in RON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub axes: Vec<Axis>,
    #[serde(default)]
    pub weights: BTreeMap<String, BTreeMap<String, f64>>,
    #[serde(default)]
    pub policy: AxisPolicy,
    #[serde(default)]
    pub exclusions: Vec<ExclusionRule>,
}

impl RegistryConfig {
    /// Parse a config from RON text. No validation happens here.
    pub fn parse_ron(input: &str) -> Result<RegistryConfig, RegistryError> {
        Ok(ron::from_str(input)?)
    }

    pub fn to_ron(&self) -> Result<String, RegistryError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }
}

/// Immutable axis configuration: value domains, weights, inclusion policy
/// and exclusion rules. Built once, then shared by reference across any
/// number of concurrent generation calls.
#[derive(Debug, Clone)]
pub struct AxisRegistry {
    config: RegistryConfig,
    index: FxHashMap<String, usize>,
    /// Parallel to `config.axes`; `None` for unweighted axes.
    distributions: Vec<Option<CumulativeWeights>>,
    exclusions: ExclusionEngine,
}

impl AxisRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Parse and validate a registry from RON text.
    pub fn parse_ron(input: &str) -> Result<AxisRegistry, RegistryError> {
        Self::from_config(RegistryConfig::parse_ron(input)?)
    }

    /// Validate `config` and build the lookup indexes.
    pub fn from_config(config: RegistryConfig) -> Result<AxisRegistry, RegistryError> {
        let index = index_axes(&config.axes)?;

        // Weights
        for (axis_name, table) in &config.weights {
            let axis = lookup_axis(&config, &index, "weight table", axis_name)?;
            for (value, &weight) in table {
                require_value("weight table", axis, value)?;
                if !(weight.is_finite() && weight > 0.0) {
                    return Err(RegistryError::InvalidWeight {
                        axis: axis_name.clone(),
                        value: value.clone(),
                        weight,
                    });
                }
            }
        }

        // Policy
        let mut seen = FxHashSet::default();
        for axis in config.policy.mandatory.iter().chain(&config.policy.optional) {
            lookup_axis(&config, &index, "policy", axis)?;
            if !seen.insert(axis.as_str()) {
                return Err(RegistryError::DuplicatePolicyAxis(axis.clone()));
            }
        }

        // Exclusions
        for rule in &config.exclusions {
            let context = format!("exclusion rule {}", rule.trigger);
            let trigger_axis = lookup_axis(&config, &index, &context, &rule.trigger.axis)?;
            require_value(&context, trigger_axis, &rule.trigger.value)?;
            if rule.blocked.is_empty() {
                return Err(RegistryError::EmptyRule(rule.trigger.clone()));
            }
            for blocked in &rule.blocked {
                let blocked_axis = lookup_axis(&config, &index, &context, &blocked.axis)?;
                for value in &blocked.values {
                    require_value(&context, blocked_axis, value)?;
                }
            }
        }

        let mut distributions = Vec::with_capacity(config.axes.len());
        for axis in &config.axes {
            let weights = match config.weights.get(&axis.name) {
                Some(table) if !table.is_empty() => {
                    let weights = CumulativeWeights::new(axis, table);
                    if !weights.total().is_finite() {
                        return Err(RegistryError::WeightOverflow(axis.name.clone()));
                    }
                    Some(weights)
                }
                _ => None,
            };
            distributions.push(weights);
        }
        let exclusions = ExclusionEngine::new(config.exclusions.clone());

        debug!(
            axes = config.axes.len(),
            mandatory = config.policy.mandatory.len(),
            optional = config.policy.optional.len(),
            rules = exclusions.len(),
            "axis registry built"
        );

        Ok(AxisRegistry {
            config,
            index,
            distributions,
            exclusions,
        })
    }

    /// Declared axis names, in declaration order.
    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.config.axes.iter().map(|a| a.name.as_str())
    }

    pub fn axis(&self, name: &str) -> Option<&Axis> {
        self.index.get(name).map(|&i| &self.config.axes[i])
    }

    /// The value domain of `name`, in declaration order.
    pub fn axis_values(&self, name: &str) -> Result<&[String], LookupError> {
        self.axis(name)
            .map(|axis| axis.values.as_slice())
            .ok_or_else(|| LookupError::NotFound(name.to_string()))
    }

    /// Configured weight of `axis=value`; 1.0 when either is unweighted.
    pub fn weight(&self, axis: &str, value: &str) -> f64 {
        self.config
            .weights
            .get(axis)
            .and_then(|table| table.get(value))
            .copied()
            .unwrap_or(1.0)
    }

    /// The axis together with its precomputed weight distribution.
    pub fn distribution(&self, name: &str) -> Result<AxisDistribution<'_>, LookupError> {
        let &i = self
            .index
            .get(name)
            .ok_or_else(|| LookupError::NotFound(name.to_string()))?;
        Ok(AxisDistribution {
            axis: &self.config.axes[i],
            weights: self.distributions[i].as_ref(),
        })
    }

    pub fn policy(&self) -> &AxisPolicy {
        &self.config.policy
    }

    pub fn exclusions(&self) -> &ExclusionEngine {
        &self.exclusions
    }

    pub fn is_mandatory(&self, axis: &str) -> bool {
        self.config.policy.is_mandatory(axis)
    }

    pub fn is_optional(&self, axis: &str) -> bool {
        self.config.policy.is_optional(axis)
    }

    /// The validated configuration this registry was built from.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn generator(&self) -> ConditionGenerator<'_> {
        ConditionGenerator::new(self)
    }
}

fn lookup_axis<'a>(
    config: &'a RegistryConfig,
    index: &FxHashMap<String, usize>,
    context: &str,
    axis: &str,
) -> Result<&'a Axis, RegistryError> {
    index
        .get(axis)
        .map(|&i| &config.axes[i])
        .ok_or_else(|| RegistryError::UnknownAxis {
            context: context.to_string(),
            axis: axis.to_string(),
        })
}

fn require_value(context: &str, axis: &Axis, value: &str) -> Result<(), RegistryError> {
    if axis.contains(value) {
        Ok(())
    } else {
        Err(RegistryError::UnknownValue {
            context: context.to_string(),
            axis: axis.name.clone(),
            value: value.to_string(),
        })
    }
}

fn index_axes(axes: &[Axis]) -> Result<FxHashMap<String, usize>, RegistryError> {
    let mut index = FxHashMap::default();
    for (i, axis) in axes.iter().enumerate() {
        if axis.values.is_empty() {
            return Err(RegistryError::EmptyAxis(axis.name.clone()));
        }
        let mut values = FxHashSet::default();
        for value in &axis.values {
            if !values.insert(value.as_str()) {
                return Err(RegistryError::DuplicateValue {
                    axis: axis.name.clone(),
                    value: value.clone(),
                });
            }
        }
        if index.insert(axis.name.clone(), i).is_some() {
            return Err(RegistryError::DuplicateAxis(axis.name.clone()));
        }
    }
    Ok(index)
}

/// Builder for constructing an `AxisRegistry` in code.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    config: RegistryConfig,
}

impl RegistryBuilder {
    pub fn axis(mut self, name: &str, values: &[&str]) -> Self {
        self.config.axes.push(Axis::new(name, values));
        self
    }

    /// Set weights for values of `axis`. Unlisted values weigh 1.0.
    pub fn weights(mut self, axis: &str, weights: &[(&str, f64)]) -> Self {
        let table = self.config.weights.entry(axis.to_string()).or_default();
        for (value, weight) in weights {
            table.insert(value.to_string(), *weight);
        }
        self
    }

    pub fn mandatory(mut self, axes: &[&str]) -> Self {
        self.config
            .policy
            .mandatory
            .extend(axes.iter().map(|a| a.to_string()));
        self
    }

    pub fn optional(mut self, axes: &[&str]) -> Self {
        self.config
            .policy
            .optional
            .extend(axes.iter().map(|a| a.to_string()));
        self
    }

    pub fn max_optional(mut self, max: usize) -> Self {
        self.config.policy.max_optional = max;
        self
    }

    pub fn exclude(mut self, rule: ExclusionRule) -> Self {
        self.config.exclusions.push(rule);
        self
    }

    pub fn build(self) -> Result<AxisRegistry, RegistryError> {
        AxisRegistry::from_config(self.config)
    }
}
