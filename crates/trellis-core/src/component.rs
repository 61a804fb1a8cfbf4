//! Component prop and slot definitions.
//!
//! A component declares typed inputs: *props* accept scalar or structured
//! data described by a schema fragment, *slots* accept renderable content.
//! Source plugins reference these inputs by name; resolution is either silent
//! ([`ComponentDefinition::resolve_prop`]) or a user-facing validation error
//! ([`ComponentDefinition::require_prop`]), depending on what the calling
//! context needs.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ComponentError;

/// Whether a component input takes typed data or renderable content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropKind {
    /// Typed scalar or structured data, constrained by a schema fragment.
    Prop,
    /// Renderable content; carries no schema constraint.
    Slot,
}

/// A single prop or slot declared by a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropDefinition {
    /// Data or content input.
    pub kind: PropKind,
    /// Human-readable label, when the component metadata provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Schema fragment constraining accepted values. Slots carry an empty
    /// fragment, which never matches a typed source.
    #[serde(default)]
    pub schema: Value,
}

impl PropDefinition {
    /// Declares a typed prop with the given schema fragment.
    pub fn prop(schema: Value) -> Self {
        Self {
            kind: PropKind::Prop,
            title: None,
            schema,
        }
    }

    /// Declares a slot.
    pub fn slot() -> Self {
        Self {
            kind: PropKind::Slot,
            title: None,
            schema: Value::Object(serde_json::Map::new()),
        }
    }

    /// Attaches a label.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// A component's declared inputs, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDefinition {
    id: String,
    props: IndexMap<String, PropDefinition>,
}

impl ComponentDefinition {
    /// Creates a component with no inputs.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            props: IndexMap::new(),
        }
    }

    /// Declares an input.
    pub fn with_prop(mut self, name: impl Into<String>, definition: PropDefinition) -> Self {
        self.props.insert(name.into(), definition);
        self
    }

    /// The component identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// All declared inputs, in declaration order.
    pub fn props(&self) -> impl Iterator<Item = (&str, &PropDefinition)> {
        self.props.iter().map(|(name, def)| (name.as_str(), def))
    }

    /// Resolves an input by name; unknown names are silently dropped.
    pub fn resolve_prop(&self, name: &str) -> Option<&PropDefinition> {
        self.props.get(name)
    }

    /// Resolves an input by name, raising a validation error for unknown
    /// names.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::UnknownProp`] when the component declares no
    /// input with this name.
    pub fn require_prop(&self, name: &str) -> Result<&PropDefinition, ComponentError> {
        self.resolve_prop(name)
            .ok_or_else(|| ComponentError::UnknownProp {
                component: self.id.clone(),
                name: name.to_owned(),
            })
    }
}
