//! Compatibility-driven source offering.
//!
//! When a site builder wires a data source to a component input, only the
//! sources whose output shape satisfies the input's schema should be
//! offered. This module answers both directions of that question: which
//! sources fit a given prop, and which props of a component a given source
//! can feed.
//!
//! Schemas are `$ref`-resolved through the host's [`SchemaSource`] before
//! checking; slots carry an empty reference schema and therefore never match
//! a typed source.

use serde_json::Value;

use trellis_core::{ComponentDefinition, PropDefinition, PropKind};
use trellis_schema::{is_compatible, ReferencesResolver, SchemaSource};

/// A data-source plugin: an identifier plus the schema of what it produces.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDefinition {
    /// Source plugin identifier.
    pub id: String,
    /// Schema fragment describing the source's output.
    pub schema: Value,
}

impl SourceDefinition {
    /// Creates a source definition.
    pub fn new(id: impl Into<String>, schema: Value) -> Self {
        Self {
            id: id.into(),
            schema,
        }
    }
}

/// Matches sources against component inputs.
pub struct SourceMatcher<'a> {
    definitions: &'a dyn SchemaSource,
}

impl<'a> SourceMatcher<'a> {
    /// Creates a matcher resolving `$ref` pointers through `definitions`.
    pub fn new(definitions: &'a dyn SchemaSource) -> Self {
        Self { definitions }
    }

    /// The sources whose output satisfies the given prop, in input order.
    pub fn compatible_sources<'s>(
        &self,
        prop: &PropDefinition,
        sources: &'s [SourceDefinition],
    ) -> Vec<&'s SourceDefinition> {
        let reference = self.resolve(&prop.schema);
        sources
            .iter()
            .filter(|source| is_compatible(&self.resolve(&source.schema), &reference))
            .collect()
    }

    /// The props of `component` that the given source can feed, in
    /// declaration order. Slots are never offered to typed sources.
    pub fn compatible_props<'c>(
        &self,
        component: &'c ComponentDefinition,
        source_schema: &Value,
    ) -> Vec<(&'c str, &'c PropDefinition)> {
        let checked = self.resolve(source_schema);
        component
            .props()
            .filter(|(_, prop)| prop.kind == PropKind::Prop)
            .filter(|(_, prop)| is_compatible(&checked, &self.resolve(&prop.schema)))
            .collect()
    }

    fn resolve(&self, schema: &Value) -> Value {
        ReferencesResolver::new(self.definitions).resolve(schema.clone())
    }
}
