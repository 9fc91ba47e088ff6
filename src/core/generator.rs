/// Condition generation: mandatory draws → optional resolution → optional
/// draws → exclusion pass.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::policy::PolicyResolver;
use crate::core::prompt::PromptBuilder;
use crate::core::registry::AxisRegistry;
use crate::core::selector::WeightedSelector;
use crate::schema::state::ConditionState;

/// Generates condition states from a registry.
///
/// Every call owns its own rng, so one generator (or many generators over one
/// registry) can be used from any number of threads at once.
///
/// Mandatory axes are *not* protected from exclusion rules: if a rule blocks
/// a mandatory axis's drawn value, that axis is missing from the result.
#[derive(Debug, Clone, Copy)]
pub struct ConditionGenerator<'r> {
    registry: &'r AxisRegistry,
}

impl<'r> ConditionGenerator<'r> {
    pub fn new(registry: &'r AxisRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r AxisRegistry {
        self.registry
    }

    /// Generate one state. A seed makes the result reproducible; without one
    /// the rng is seeded from system entropy.
    pub fn generate(&self, seed: Option<u64>) -> ConditionState {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.generate_with_rng(&mut rng)
    }

    /// Run the generation pipeline on a caller-owned rng.
    pub fn generate_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> ConditionState {
        let policy = self.registry.policy();
        let mut chosen =
            ConditionState::with_capacity(policy.mandatory.len() + policy.optional_limit());

        for axis in &policy.mandatory {
            self.draw(axis, rng, &mut chosen);
        }

        let optional = PolicyResolver::choose_optional_axes(policy, rng);
        debug!(count = optional.len(), axes = ?optional, "optional axes chosen");

        for axis in optional {
            self.draw(axis, rng, &mut chosen);
        }

        self.registry.exclusions().apply(chosen)
    }

    fn draw<R: Rng + ?Sized>(&self, axis: &str, rng: &mut R, chosen: &mut ConditionState) {
        match self.registry.distribution(axis) {
            Ok(dist) => {
                let value = WeightedSelector::select(&dist, rng);
                trace!(axis, value, "axis drawn");
                chosen.insert(axis, value);
            }
            Err(e) => warn!(axis, error = %e, "policy axis missing from registry"),
        }
    }

    /// Generate `count` states seeded `start_seed`, `start_seed + 1`, ...
    pub fn generate_batch(&self, start_seed: u64, count: usize) -> Vec<ConditionState> {
        self.generate_stream(start_seed, count).collect()
    }

    /// Lazy form of [`generate_batch`](Self::generate_batch).
    pub fn generate_stream(
        &self,
        start_seed: u64,
        count: usize,
    ) -> impl Iterator<Item = ConditionState> + 'r {
        let generator = *self;
        (0..count as u64).map(move |i| generator.generate(Some(start_seed.wrapping_add(i))))
    }
}

/// One state per named registry, all drawn from the same seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedEntity {
    pub seed: u64,
    pub conditions: Vec<(String, ConditionState)>,
}

impl GeneratedEntity {
    pub fn condition(&self, system: &str) -> Option<&ConditionState> {
        self.conditions
            .iter()
            .find(|(name, _)| name == system)
            .map(|(_, state)| state)
    }

    /// All states rendered as one prompt, in system order. Empty states are
    /// skipped.
    pub fn to_prompt(&self) -> String {
        self.conditions
            .iter()
            .fold(PromptBuilder::new(), |builder, (_, state)| builder.condition(state))
            .build()
    }
}

/// Combines several registries (character, facial, occupation, ...) into a
/// single entity generator.
///
/// Each system gets its own rng seeded with the entity seed, so adding a
/// system never changes what the others produce.
#[derive(Debug, Clone, Default)]
pub struct EntityGenerator<'r> {
    systems: Vec<(String, ConditionGenerator<'r>)>,
}

impl<'r> EntityGenerator<'r> {
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
        }
    }

    pub fn with_system(mut self, name: &str, registry: &'r AxisRegistry) -> Self {
        self.systems
            .push((name.to_string(), ConditionGenerator::new(registry)));
        self
    }

    pub fn system_names(&self) -> impl Iterator<Item = &str> {
        self.systems.iter().map(|(name, _)| name.as_str())
    }

    pub fn generate(&self, seed: u64) -> GeneratedEntity {
        let conditions = self
            .systems
            .iter()
            .map(|(name, generator)| (name.clone(), generator.generate(Some(seed))))
            .collect();
        GeneratedEntity { seed, conditions }
    }

    pub fn generate_batch(&self, start_seed: u64, count: usize) -> Vec<GeneratedEntity> {
        (0..count as u64)
            .map(|i| self.generate(start_seed.wrapping_add(i)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::selector::tests::fraction;
    use crate::schema::exclusion::ExclusionRule;

    fn test_registry() -> AxisRegistry {
        AxisRegistry::builder()
            .axis("physique", &["skinny", "wiry", "stocky", "frail", "broad"])
            .axis("wealth", &["poor", "modest", "wealthy", "decadent"])
            .axis("health", &["sickly", "weary", "hale"])
            .axis("age", &["young", "old", "ancient"])
            .axis("demeanor", &["timid", "alert", "proud"])
            .weights("wealth", &[("poor", 4.0), ("modest", 3.0), ("wealthy", 1.0), ("decadent", 0.5)])
            .mandatory(&["physique", "wealth"])
            .optional(&["health", "age", "demeanor"])
            .max_optional(2)
            .exclude(
                ExclusionRule::new("wealth", "decadent")
                    .block("physique", &["frail"])
                    .block("health", &["sickly"]),
            )
            .exclude(ExclusionRule::new("age", "ancient").block("demeanor", &["timid"]))
            .build()
            .unwrap()
    }

    #[test]
    fn generate_same_seed_same_state() {
        let registry = test_registry();
        let generator = registry.generator();
        for seed in [0, 1, 42, u64::MAX] {
            assert_eq!(generator.generate(Some(seed)), generator.generate(Some(seed)));
        }
    }

    #[test]
    fn generate_differs_across_seeds() {
        let registry = test_registry();
        let generator = registry.generator();
        let first = generator.generate(Some(1));
        assert!((2..50).any(|seed| generator.generate(Some(seed)) != first));
    }

    #[test]
    fn mandatory_axes_come_first() {
        let registry = test_registry();
        let generator = registry.generator();
        for seed in 0..200 {
            let state = generator.generate(Some(seed));
            let axes: Vec<&str> = state.axes().collect();
            // physique may be removed by wealth=decadent, wealth never is.
            assert!(state.contains_axis("wealth"));
            if state.contains_axis("physique") {
                assert_eq!(&axes[..2], &["physique", "wealth"]);
            }
        }
    }

    #[test]
    fn unseeded_generation_is_valid() {
        let registry = test_registry();
        let state = registry.generator().generate(None);
        assert!(state.len() <= 4);
        for (axis, value) in state.iter() {
            assert!(registry.axis(axis).unwrap().contains(value));
        }
    }

    #[test]
    fn generate_with_stub_rng() {
        // Fraction 0.0 picks the first value and zero optional axes.
        let registry = test_registry();
        let state = registry.generator().generate_with_rng(&mut fraction(0.0));
        let expected: ConditionState = [("physique", "skinny"), ("wealth", "poor")]
            .into_iter()
            .collect();
        assert_eq!(state, expected);
    }

    #[test]
    fn mandatory_axis_can_be_excluded() {
        let registry = AxisRegistry::builder()
            .axis("a", &["x"])
            .axis("b", &["y"])
            .mandatory(&["a", "b"])
            .exclude(ExclusionRule::new("a", "x").block("b", &["y"]))
            .build()
            .unwrap();
        let state = registry.generator().generate(Some(9));
        let expected: ConditionState = [("a", "x")].into_iter().collect();
        assert_eq!(state, expected);
    }

    #[test]
    fn batch_matches_individual_seeds() {
        let registry = test_registry();
        let generator = registry.generator();
        let batch = generator.generate_batch(100, 5);
        assert_eq!(batch.len(), 5);
        for (i, state) in batch.iter().enumerate() {
            assert_eq!(state, &generator.generate(Some(100 + i as u64)));
        }
        assert!(generator.generate_batch(0, 0).is_empty());
    }

    #[test]
    fn stream_is_lazy_batch() {
        let registry = test_registry();
        let generator = registry.generator();
        let streamed: Vec<ConditionState> = generator.generate_stream(7, 3).collect();
        assert_eq!(streamed, generator.generate_batch(7, 3));
    }

    #[test]
    fn entity_uses_same_seed_per_system() {
        let character = test_registry();
        let other = AxisRegistry::builder()
            .axis("legitimacy", &["sanctioned", "tolerated"])
            .mandatory(&["legitimacy"])
            .build()
            .unwrap();

        let entities = EntityGenerator::new()
            .with_system("character", &character)
            .with_system("occupation", &other);

        let entity = entities.generate(42);
        assert_eq!(entity.seed, 42);
        assert_eq!(
            entity.condition("character"),
            Some(&character.generator().generate(Some(42)))
        );
        assert_eq!(
            entity.condition("occupation"),
            Some(&other.generator().generate(Some(42)))
        );
        assert!(entity.condition("facial").is_none());

        let prompt = entity.to_prompt();
        let character_prompt = crate::core::prompt::to_prompt(entity.condition("character").unwrap());
        assert!(prompt.starts_with(&character_prompt));
    }

    #[test]
    fn entity_batch_seeds_increase() {
        let registry = test_registry();
        let entities = EntityGenerator::new().with_system("character", &registry);
        let batch = entities.generate_batch(10, 3);
        let seeds: Vec<u64> = batch.iter().map(|e| e.seed).collect();
        assert_eq!(seeds, vec![10, 11, 12]);
        assert_eq!(entities.system_names().collect::<Vec<_>>(), vec!["character"]);
    }
}
