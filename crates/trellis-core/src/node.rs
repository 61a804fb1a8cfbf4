//! The discriminated render-node model.
//!
//! The host framework represents a piece of renderable UI as a heterogeneous
//! mapping in which keys prefixed with `#` are *properties* (configuration
//! understood by the renderer) and unprefixed keys are *children* (nested
//! render values). This module replaces that convention with an explicit
//! model:
//!
//! - [`NodeKind`] names what the node *is* (a markup leaf, a themed template,
//!   a typed element, or a plain container), lifting the `#theme`/`#type`
//!   discriminant out of the property map
//! - properties and children live in separate ordered maps, so traversal
//!   visits entries in the input's defined order and produces reproducible
//!   output
//! - [`Child`] distinguishes nested render nodes from scalar or list values
//!   that pass through the tree untouched
//!
//! [`RenderNode::from_value`] and [`RenderNode::to_value`] translate the
//! host's prefixed-mapping convention at the boundary, so all internal logic
//! can work on the typed model.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::attributes::Attributes;
use crate::error::NodeError;

/// Reserved marker that distinguishes property keys from child keys in the
/// host's mapping convention.
pub const PROPERTY_PREFIX: char = '#';

/// Delimiter separating a base theme hook from its suggestion suffix.
const SUGGESTION_DELIMITER: &str = "__";

/// What a render node fundamentally is, as determined by its discriminating
/// property in the host convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A leaf carrying `markup` or `plain_text` content.
    Markup,
    /// Rendered through a theme hook (the host's `#theme`).
    Themed(String),
    /// A typed element expanded by element info (the host's `#type`).
    Element(String),
    /// No discriminating property; the node only groups children.
    Container,
}

/// A named child of a render node.
///
/// Children are usually nested render nodes, but the host convention also
/// allows scalars and lists in child position; those pass through tree
/// transformations untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    /// A nested render node.
    Node(RenderNode),
    /// A scalar or list value kept as-is.
    Value(Value),
}

impl Child {
    /// Returns `true` if this child carries no content.
    ///
    /// A nested node is empty when it has neither properties nor children; a
    /// pass-through value is empty when it is `null`, an empty string, or an
    /// empty composite.
    pub fn is_empty(&self) -> bool {
        match self {
            Child::Node(node) => node.is_empty(),
            Child::Value(value) => value_is_empty(value),
        }
    }

    /// Borrows the nested node, if this child is one.
    pub fn as_node(&self) -> Option<&RenderNode> {
        match self {
            Child::Node(node) => Some(node),
            Child::Value(_) => None,
        }
    }

    /// Mutably borrows the nested node, if this child is one.
    pub fn as_node_mut(&mut self) -> Option<&mut RenderNode> {
        match self {
            Child::Node(node) => Some(node),
            Child::Value(_) => None,
        }
    }
}

fn value_is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// A node in a render tree.
///
/// Constructed ephemerally per render pass and discarded after output is
/// produced; nodes have no identity beyond structural equality and no
/// persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderNode {
    kind: NodeKind,
    properties: IndexMap<String, Value>,
    children: IndexMap<String, Child>,
}

impl RenderNode {
    /// Creates an empty node of the given kind.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            properties: IndexMap::new(),
            children: IndexMap::new(),
        }
    }

    /// Creates a markup leaf with the given `markup` content.
    pub fn markup(content: impl Into<String>) -> Self {
        let mut node = Self::new(NodeKind::Markup);
        node.set_property("markup", Value::String(content.into()));
        node
    }

    /// Creates a themed node for the given theme hook.
    pub fn themed(hook: impl Into<String>) -> Self {
        Self::new(NodeKind::Themed(hook.into()))
    }

    /// Creates a typed element node for the given element type.
    pub fn element(element_type: impl Into<String>) -> Self {
        Self::new(NodeKind::Element(element_type.into()))
    }

    /// Interprets a host-supplied JSON value as a render node.
    ///
    /// Keys carrying the [`PROPERTY_PREFIX`] become properties (with the
    /// prefix stripped); `#theme` and `#type` become the node kind instead.
    /// Unprefixed keys become children: objects are converted recursively,
    /// scalars and lists pass through as [`Child::Value`].
    ///
    /// When a node declares both `#theme` and `#type`, the theme hook wins
    /// the kind slot (matching lookup order in the attribute-acceptance
    /// rules) and `type` is kept as a plain property so the value round
    /// trips.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::NotAnObject`] when `value` is not a JSON object.
    pub fn from_value(value: &Value) -> Result<Self, NodeError> {
        let map = value.as_object().ok_or(NodeError::NotAnObject {
            found: json_type_name(value),
        })?;

        let mut properties = IndexMap::new();
        let mut children = IndexMap::new();
        let mut theme: Option<String> = None;
        let mut element_type: Option<String> = None;

        for (key, entry) in map {
            if let Some(name) = key.strip_prefix(PROPERTY_PREFIX) {
                match (name, entry) {
                    ("theme", Value::String(hook)) if theme.is_none() => {
                        theme = Some(hook.clone());
                    }
                    ("type", Value::String(ty)) if element_type.is_none() => {
                        element_type = Some(ty.clone());
                    }
                    _ => {
                        properties.insert(name.to_owned(), entry.clone());
                    }
                }
            } else {
                let child = match entry {
                    Value::Object(_) => Child::Node(Self::from_value(entry)?),
                    other => Child::Value(other.clone()),
                };
                children.insert(key.clone(), child);
            }
        }

        let kind = match (theme, element_type) {
            (Some(hook), ty) => {
                // Theme takes precedence; keep the element type as a plain
                // property so nothing is lost on the way back out.
                if let Some(ty) = ty {
                    properties.insert("type".to_owned(), Value::String(ty));
                }
                NodeKind::Themed(hook)
            }
            (None, Some(ty)) => NodeKind::Element(ty),
            (None, None) => {
                if properties.contains_key("markup") || properties.contains_key("plain_text") {
                    NodeKind::Markup
                } else {
                    NodeKind::Container
                }
            }
        };

        Ok(Self {
            kind,
            properties,
            children,
        })
    }

    /// Serializes this node back into the host's prefixed-mapping convention.
    ///
    /// The kind discriminant is emitted first, then properties in insertion
    /// order, then children in insertion order.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        match &self.kind {
            NodeKind::Themed(hook) => {
                map.insert("#theme".to_owned(), Value::String(hook.clone()));
            }
            NodeKind::Element(ty) => {
                map.insert("#type".to_owned(), Value::String(ty.clone()));
            }
            NodeKind::Markup | NodeKind::Container => {}
        }
        for (name, value) in &self.properties {
            map.insert(format!("{PROPERTY_PREFIX}{name}"), value.clone());
        }
        for (name, child) in &self.children {
            let value = match child {
                Child::Node(node) => node.to_value(),
                Child::Value(value) => value.clone(),
            };
            map.insert(name.clone(), value);
        }
        Value::Object(map)
    }

    /// The node's kind.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// The theme hook, if this node is themed.
    pub fn theme_hook(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Themed(hook) => Some(hook),
            _ => None,
        }
    }

    /// The theme hook with any suggestion suffix stripped.
    ///
    /// A hook of `block__branding` has the base hook `block`.
    pub fn base_theme_hook(&self) -> Option<&str> {
        self.theme_hook()
            .map(|hook| hook.split(SUGGESTION_DELIMITER).next().unwrap_or(hook))
    }

    /// The element type, if this node is a typed element.
    pub fn element_type(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element(ty) => Some(ty),
            _ => None,
        }
    }

    /// Looks up a property by its unprefixed name.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Sets a property by its unprefixed name.
    pub fn set_property(&mut self, name: impl Into<String>, value: Value) {
        self.properties.insert(name.into(), value);
    }

    /// Returns `true` if the node carries an attribute bag under the given
    /// property name.
    pub fn has_attribute_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Merges class tokens into the attribute bag stored under `property`,
    /// creating the bag when absent. Duplicate classes are dropped.
    pub fn merge_classes<'a, I>(&mut self, property: &str, classes: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut attributes = self
            .properties
            .get(property)
            .map(Attributes::from_value)
            .unwrap_or_default();
        attributes.add_classes(classes);
        self.properties
            .insert(property.to_owned(), attributes.to_value());
    }

    /// The node's children, in insertion order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Child)> {
        self.children.iter().map(|(name, child)| (name.as_str(), child))
    }

    /// The node's children, mutably, in insertion order.
    pub fn children_mut(&mut self) -> impl Iterator<Item = (&str, &mut Child)> {
        self.children
            .iter_mut()
            .map(|(name, child)| (name.as_str(), child))
    }

    /// Inserts a child under the given name.
    pub fn insert_child(&mut self, name: impl Into<String>, child: Child) {
        self.children.insert(name.into(), child);
    }

    /// Removes all children, returning them in insertion order.
    pub fn take_children(&mut self) -> IndexMap<String, Child> {
        std::mem::take(&mut self.children)
    }

    /// Number of children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if the node has neither properties nor children.
    ///
    /// The kind alone carries no content: `{"#theme": "block"}` renders
    /// nothing.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.children.is_empty()
    }

    /// Returns `true` if at least one child carries content.
    pub fn has_non_empty_child(&self) -> bool {
        self.children.values().any(|child| !child.is_empty())
    }

    /// Returns `true` if every child is empty (vacuously true for a node
    /// without children).
    pub fn has_only_empty_children(&self) -> bool {
        self.children.values().all(|child| child.is_empty())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;
    use serde_json::{Map, Value};

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn key_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-z_]{1,8}",
            "#[a-z_]{1,8}",
            Just("#theme".to_owned()),
            Just("#type".to_owned()),
            Just("#markup".to_owned()),
        ]
    }

    fn leaf_strategy() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| Value::Number(n.into())),
            "[a-z ]{0,12}".prop_map(Value::String),
        ]
    }

    /// Arbitrary render-shaped objects: nested maps with a mix of prefixed
    /// and bare keys, scalars, and lists.
    fn render_value_strategy() -> impl Strategy<Value = Value> {
        leaf_strategy().prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::vec((key_strategy(), inner), 0..4).prop_map(|entries| {
                    let mut map = Map::new();
                    for (key, value) in entries {
                        map.insert(key, value);
                    }
                    Value::Object(map)
                }),
            ]
        })
    }

    proptest! {
        /// Interpreting a host value and serializing it back never loses or
        /// invents entries.
        #[test]
        fn conversion_round_trips(value in render_value_strategy()) {
            if let Ok(node) = RenderNode::from_value(&value) {
                prop_assert_eq!(node.to_value(), value);
            }
        }
    }
}
