//! An ordered attribute bag for render nodes.
//!
//! Attribute bags hold the HTML attributes a template will serialize onto its
//! outermost tag. Only the `class` entry gets dedicated handling here, since
//! style injection merges class lists; every other entry is carried opaquely.

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// HTML attributes attached to a render node, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    entries: IndexMap<String, Value>,
}

impl Attributes {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a bag from a JSON value.
    ///
    /// Non-object values yield an empty bag; the host treats a malformed
    /// attribute property as absent rather than failing the render pass.
    pub fn from_value(value: &Value) -> Self {
        let mut entries = IndexMap::new();
        if let Value::Object(map) = value {
            for (name, entry) in map {
                entries.insert(name.clone(), entry.clone());
            }
        }
        Self { entries }
    }

    /// Serializes the bag back to a JSON object.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        for (name, entry) in &self.entries {
            map.insert(name.clone(), entry.clone());
        }
        Value::Object(map)
    }

    /// The current class list, in order. Non-string entries are skipped.
    pub fn classes(&self) -> Vec<&str> {
        match self.entries.get("class") {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            Some(Value::String(single)) => vec![single.as_str()],
            _ => Vec::new(),
        }
    }

    /// Adds a single class, keeping the list free of duplicates.
    pub fn add_class(&mut self, class: &str) {
        if class.is_empty() || self.classes().contains(&class) {
            return;
        }
        let addition = Value::String(class.to_owned());
        let entry = self
            .entries
            .entry("class".to_owned())
            .or_insert_with(|| Value::Array(Vec::new()));
        match entry {
            Value::Array(items) => items.push(addition),
            other => {
                // A scalar `class` entry is promoted to a list; anything
                // else never held classes and is replaced.
                let mut items = match other.take() {
                    Value::String(single) => vec![Value::String(single)],
                    _ => Vec::new(),
                };
                items.push(addition);
                *other = Value::Array(items);
            }
        }
    }

    /// Adds every class in `classes`, preserving order and dropping
    /// duplicates and empties.
    pub fn add_classes<'a, I>(&mut self, classes: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for class in classes {
            self.add_class(class);
        }
    }

    /// Returns `true` if the bag has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_value_ignores_non_objects() {
        assert!(Attributes::from_value(&json!("nope")).is_empty());
        assert!(Attributes::from_value(&json!(null)).is_empty());
    }

    #[test]
    fn test_add_class_deduplicates_and_skips_empty() {
        let mut attributes = Attributes::new();
        attributes.add_classes(["a", "", "b", "a"]);
        assert_eq!(attributes.classes(), vec!["a", "b"]);
    }

    #[test]
    fn test_scalar_class_entry_is_promoted() {
        let mut attributes = Attributes::from_value(&json!({"class": "solo"}));
        attributes.add_class("extra");
        assert_eq!(attributes.classes(), vec!["solo", "extra"]);
    }

    #[test]
    fn test_other_entries_survive_round_trip() {
        let value = json!({"id": "main", "class": ["x"], "data-level": 2});
        let mut attributes = Attributes::from_value(&value);
        attributes.add_class("y");
        assert_eq!(
            attributes.to_value(),
            json!({"id": "main", "class": ["x", "y"], "data-level": 2})
        );
    }
}
