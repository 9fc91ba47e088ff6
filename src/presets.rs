//! Built-in axis registries, embedded at compile time.

use crate::core::registry::{AxisRegistry, RegistryError};

mod data {
    pub const CHARACTER: &str = include_str!("../axis_data/character.ron");
    pub const FACIAL: &str = include_str!("../axis_data/facial.ron");
    pub const OCCUPATION: &str = include_str!("../axis_data/occupation.ron");
}

/// Names of the built-in registries, in the order [`all`] returns them.
pub const PRESET_NAMES: [&str; 3] = ["character", "facial", "occupation"];

/// Physical and social character state: physique and wealth always, up to
/// two of health, demeanor, age and facial signal.
pub fn character() -> Result<AxisRegistry, RegistryError> {
    AxisRegistry::parse_ron(data::CHARACTER)
}

/// A single mandatory facial signal.
pub fn facial() -> Result<AxisRegistry, RegistryError> {
    AxisRegistry::parse_ron(data::FACIAL)
}

/// Occupation profile: legitimacy and visibility always, up to two of moral
/// load, dependency and risk exposure.
pub fn occupation() -> Result<AxisRegistry, RegistryError> {
    AxisRegistry::parse_ron(data::OCCUPATION)
}

/// Look up a built-in registry by name.
pub fn by_name(name: &str) -> Option<Result<AxisRegistry, RegistryError>> {
    match name {
        "character" => Some(character()),
        "facial" => Some(facial()),
        "occupation" => Some(occupation()),
        _ => None,
    }
}

/// Every built-in registry, paired with its name.
pub fn all() -> Result<Vec<(&'static str, AxisRegistry)>, RegistryError> {
    Ok(vec![
        ("character", character()?),
        ("facial", facial()?),
        ("occupation", occupation()?),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_load() {
        let presets = all().unwrap();
        let names: Vec<&str> = presets.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, PRESET_NAMES);
    }

    #[test]
    fn character_layout() {
        let registry = character().unwrap();
        assert_eq!(
            registry.axis_names().collect::<Vec<_>>(),
            vec!["physique", "wealth", "health", "demeanor", "age", "facial_signal"]
        );
        assert_eq!(
            registry.axis_values("wealth").unwrap(),
            &["poor", "modest", "well-kept", "wealthy", "decadent"]
        );
        assert_eq!(registry.policy().max_optional, 2);
        assert_eq!(registry.exclusions().len(), 6);
        assert_eq!(registry.weight("wealth", "poor"), 4.0);
        assert_eq!(registry.weight("health", "hale"), 1.0);
    }

    #[test]
    fn facial_always_yields_one_signal() {
        let registry = facial().unwrap();
        let generator = registry.generator();
        for seed in 0..100 {
            let state = generator.generate(Some(seed));
            assert_eq!(state.len(), 1);
            assert!(state.contains_axis("facial_signal"));
        }
    }

    #[test]
    fn occupation_layout() {
        let registry = occupation().unwrap();
        assert_eq!(registry.policy().mandatory, vec!["legitimacy", "visibility"]);
        assert_eq!(registry.policy().optional.len(), 3);
        assert_eq!(registry.exclusions().len(), 6);
    }

    #[test]
    fn by_name_matches_constructors() {
        assert!(by_name("occupation").unwrap().is_ok());
        assert!(by_name("magic").is_none());
    }
}
