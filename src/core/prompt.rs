/// Prompt rendering — the only place a state becomes text.

use crate::schema::state::ConditionState;

const SEPARATOR: &str = ", ";

/// Join the state's values (never its axis names) in insertion order.
///
/// An empty state renders as the empty string.
pub fn to_prompt(state: &ConditionState) -> String {
    state.values().collect::<Vec<_>>().join(SEPARATOR)
}

/// Tags every negative prompt starts with.
pub const BASE_NEGATIVES: [&str; 6] = [
    "low quality",
    "blurry",
    "distorted",
    "deformed",
    "duplicate",
    "watermark",
];

/// Negative prompt: the base quality tags followed by `avoid`, in order.
pub fn negative_prompt(avoid: &[&str]) -> String {
    BASE_NEGATIVES
        .iter()
        .chain(avoid)
        .filter(|tag| !tag.trim().is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Assembles a full prompt from several states plus free-form parts.
///
/// Output order: style, conditions and parts in the order added, details,
/// quality tags. Empty parts are dropped so no doubled separators appear.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    style: Option<String>,
    parts: Vec<String>,
    details: Option<String>,
    quality_tags: Vec<String>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(mut self, style: &str) -> Self {
        self.style = Some(style.to_string());
        self
    }

    pub fn condition(mut self, state: &ConditionState) -> Self {
        self.parts.push(to_prompt(state));
        self
    }

    pub fn part(mut self, text: &str) -> Self {
        self.parts.push(text.to_string());
        self
    }

    pub fn details(mut self, details: &str) -> Self {
        self.details = Some(details.to_string());
        self
    }

    pub fn quality_tags(mut self, tags: &[&str]) -> Self {
        self.quality_tags.extend(tags.iter().map(|t| t.to_string()));
        self
    }

    pub fn build(self) -> String {
        self.style
            .into_iter()
            .chain(self.parts)
            .chain(self.details)
            .chain(self.quality_tags)
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    }
}
