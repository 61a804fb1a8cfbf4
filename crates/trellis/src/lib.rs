//! Trellis - schema compatibility and render-tree styling for composed UI
//! components.
//!
//! The engine behind a component-composition UI: deciding which data sources
//! fit which component props, normalizing authoring shorthand for render
//! values, and injecting style classes into arbitrary render trees.

pub mod sources;
pub mod stories;
pub mod styles;

mod error;

pub use trellis_core::{
    Attributes, Child, ComponentDefinition, ElementInfo, ElementRegistry, NodeKind,
    PropDefinition, PropKind, RenderNode, ThemeHookInfo, ThemeRegistry,
};
pub use trellis_schema::{
    canonicalize, is_compatible, InMemoryDefinitions, ReferencesResolver, SchemaSource,
};

pub use error::TrellisError;
pub use sources::{SourceDefinition, SourceMatcher};
pub use stories::convert_slots;
pub use styles::{StyleManager, StyleSelection};

use log::debug;
use serde_json::Value;

/// Entry point for styling host render values.
///
/// Owns the registry context and applies style selections to render values
/// in the host's prefixed-mapping convention.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use trellis::{Styler, StyleSelection};
///
/// let styler = Styler::default();
/// let selection = StyleSelection::new(["text-muted"], "");
///
/// let styled = styler
///     .apply(&json!({"#type": "container", "inner": {"#markup": "hi"}}), &selection)
///     .expect("render value");
///
/// assert_eq!(styled["#attributes"]["class"], json!(["text-muted"]));
/// ```
#[derive(Debug)]
pub struct Styler {
    themes: ThemeRegistry,
    elements: ElementRegistry,
}

impl Default for Styler {
    fn default() -> Self {
        Self::new(ThemeRegistry::with_defaults(), ElementRegistry::with_defaults())
    }
}

impl Styler {
    /// Creates a styler over the given registries.
    pub fn new(themes: ThemeRegistry, elements: ElementRegistry) -> Self {
        Self { themes, elements }
    }

    /// The theme registry in use.
    pub fn themes(&self) -> &ThemeRegistry {
        &self.themes
    }

    /// The element registry in use.
    pub fn elements(&self) -> &ElementRegistry {
        &self.elements
    }

    /// A [`StyleManager`] borrowing this styler's registries.
    pub fn manager(&self) -> StyleManager<'_> {
        StyleManager::new(&self.themes, &self.elements)
    }

    /// Applies a style selection to a host render value and returns the
    /// styled value.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Node`] when `value` is not a render object.
    pub fn apply(&self, value: &Value, selection: &StyleSelection) -> Result<Value, TrellisError> {
        let mut node = RenderNode::from_value(value)?;
        self.manager().add_classes(&mut node, selection);
        debug!("Style selection applied");
        Ok(node.to_value())
    }
}
