//! `$ref` pointer resolution.
//!
//! Component prop schemas may point at shared type definitions through
//! `$ref`. The resolver inlines those pointers before canonicalization: the
//! referenced sub-schema's keys are merged into the host schema (host keys
//! win), the `$ref` key is removed, and resolution continues recursively.
//!
//! Where the referenced definitions live is the host's business; it supplies
//! a [`SchemaSource`]. Resolution failures never raise: the failure is
//! logged and the offending `$ref` node is left unresolved, so callers must
//! tolerate a partially-resolved schema.

use log::error;
use serde_json::{Map, Value};

/// Cap on resolution recursion, so definition cycles cannot loop forever.
const MAX_DEPTH: usize = 10;

/// Supplies referenced sub-schemas by reference string.
pub trait SchemaSource {
    /// Resolves a reference to its schema, or `None` when the target is
    /// unknown.
    fn resolve(&self, reference: &str) -> Option<Value>;
}

/// A [`SchemaSource`] backed by an in-memory definition map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDefinitions {
    definitions: indexmap::IndexMap<String, Value>,
}

impl InMemoryDefinitions {
    /// Creates an empty definition map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition under the given reference string.
    pub fn with_definition(mut self, reference: impl Into<String>, schema: Value) -> Self {
        self.definitions.insert(reference.into(), schema);
        self
    }
}

impl SchemaSource for InMemoryDefinitions {
    fn resolve(&self, reference: &str) -> Option<Value> {
        self.definitions.get(reference).cloned()
    }
}

/// Recursively inlines `$ref` pointers through a [`SchemaSource`].
pub struct ReferencesResolver<'a> {
    source: &'a dyn SchemaSource,
}

impl<'a> ReferencesResolver<'a> {
    /// Creates a resolver over the given definition source.
    pub fn new(source: &'a dyn SchemaSource) -> Self {
        Self { source }
    }

    /// Resolves every `$ref` in `schema`, to a maximum depth of 10.
    ///
    /// Beyond the depth cap the schema is returned unresolved. A `$ref`
    /// whose target the source does not know is logged and left in place.
    pub fn resolve(&self, schema: Value) -> Value {
        self.resolve_at(schema, 0)
    }

    fn resolve_at(&self, schema: Value, depth: usize) -> Value {
        if depth >= MAX_DEPTH {
            return schema;
        }
        match schema {
            Value::Object(map) => Value::Object(self.resolve_object(map, depth)),
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| self.resolve_at(item, depth + 1))
                    .collect(),
            ),
            other => other,
        }
    }

    fn resolve_object(&self, mut map: Map<String, Value>, mut depth: usize) -> Map<String, Value> {
        // Merging may surface another $ref (definitions pointing at
        // definitions); keep resolving until the cap is hit.
        while let Some(reference) = map.get("$ref").and_then(Value::as_str) {
            if depth >= MAX_DEPTH {
                break;
            }
            depth += 1;
            let reference = reference.to_owned();
            match self.source.resolve(&reference) {
                Some(Value::Object(resolved)) => {
                    map.shift_remove("$ref");
                    // Host keys win over resolved keys.
                    for (key, value) in resolved {
                        if !map.contains_key(&key) {
                            map.insert(key, value);
                        }
                    }
                }
                Some(other) => {
                    error!(reference = reference.as_str(), depth;
                        "schema reference resolved to a non-object ({other}); leaving $ref unresolved");
                    break;
                }
                None => {
                    error!(reference = reference.as_str(), depth;
                        "unable to resolve schema reference; leaving $ref unresolved");
                    break;
                }
            }
        }
        map.into_iter()
            .map(|(key, value)| (key, self.resolve_at(value, depth + 1)))
            .collect()
    }
}
