use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The result of one generation call: axis name → selected value, in
/// insertion order, with at most one entry per axis.
///
/// A state carries no identity of its own. It serializes as an ordered map.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConditionState {
    entries: Vec<(String, String)>,
}

impl ConditionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Set `axis` to `value`. An existing entry keeps its position and
    /// its previous value is returned.
    pub fn insert(&mut self, axis: &str, value: &str) -> Option<String> {
        if let Some(entry) = self.entries.iter_mut().find(|(a, _)| a == axis) {
            return Some(std::mem::replace(&mut entry.1, value.to_string()));
        }
        self.entries.push((axis.to_string(), value.to_string()));
        None
    }

    pub fn get(&self, axis: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(a, _)| a == axis)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_axis(&self, axis: &str) -> bool {
        self.get(axis).is_some()
    }

    /// Returns true if `axis` is present with exactly `value`.
    pub fn has(&self, axis: &str, value: &str) -> bool {
        self.get(axis) == Some(value)
    }

    /// Remove `axis`, preserving the order of the remaining entries.
    pub fn remove(&mut self, axis: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(a, _)| a == axis)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(a, v)| (a.as_str(), v.as_str()))
    }

    pub fn axes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(a, _)| a.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, v)| v.as_str())
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for ConditionState {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut state = ConditionState::new();
        for (axis, value) in iter {
            state.insert(axis, value);
        }
        state
    }
}

impl Serialize for ConditionState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (axis, value) in &self.entries {
            map.serialize_entry(axis, value)?;
        }
        map.end()
    }
}

struct StateVisitor;

impl<'de> Visitor<'de> for StateVisitor {
    type Value = ConditionState;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of axis names to values")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
        let mut state = ConditionState::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((axis, value)) = access.next_entry::<String, String>()? {
            state.insert(&axis, &value);
        }
        Ok(state)
    }
}

impl<'de> Deserialize<'de> for ConditionState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(StateVisitor)
    }
}
