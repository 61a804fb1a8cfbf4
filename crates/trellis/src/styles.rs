//! Style class injection into render trees.
//!
//! A style selection (style identifiers picked in the UI plus free-text
//! extra classes) must end up on an HTML tag *somewhere* in the render tree
//! the styled thing produces, without assuming a fixed tree shape. The
//! engine walks the tree for the most appropriate attribute-accepting
//! descendants:
//!
//! - structural wrappers (`block`, `layout`, `view` holding nested render
//!   nodes) are transparent: the walk descends into their children instead
//! - the first node per branch that accepts attributes receives the classes
//! - simple leaf siblings next to richer siblings are widened into targets,
//!   so a mixed container gets styled uniformly
//! - when nothing anywhere accepts attributes, the tree (or the individual
//!   target) is wrapped in a synthetic `div`, guaranteeing classes are never
//!   silently dropped
//!
//! Whether a node accepts attributes is decided against the injected
//! [`ThemeRegistry`] and [`ElementRegistry`]; the walker holds no state of
//! its own.

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use trellis_core::{ElementRegistry, NodeKind, RenderNode, ThemeRegistry};

/// Theme hooks that only wrap other content and should be styled through
/// their children.
const WRAPPER_HOOKS: [&str; 3] = ["block", "layout", "view"];

/// Theme hooks whose templates take per-item attributes instead of a single
/// attribute bag.
const ITEM_ATTRIBUTE_HOOKS: [&str; 2] = ["field", "image"];

/// A persisted style choice: selected style identifiers plus free-text extra
/// classes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSelection {
    /// Identifiers of the selected styles.
    #[serde(default)]
    pub styles: Vec<String>,
    /// Free-text class tokens, whitespace separated.
    #[serde(default)]
    pub extra: String,
}

impl StyleSelection {
    /// Creates a selection from style identifiers and extra free text.
    pub fn new<I, S>(styles: I, extra: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            styles: styles.into_iter().map(Into::into).collect(),
            extra: extra.into(),
        }
    }

    /// The merged class token list: selected identifiers, then whitespace-
    /// split extra tokens, de-duplicated, empties dropped.
    pub fn class_tokens(&self) -> Vec<String> {
        let mut tokens: Vec<String> = Vec::new();
        let candidates = self
            .styles
            .iter()
            .map(String::as_str)
            .chain(self.extra.split_whitespace());
        for token in candidates {
            if !token.is_empty() && !tokens.iter().any(|t| t == token) {
                tokens.push(token.to_owned());
            }
        }
        tokens
    }
}

/// Walks render trees and injects style classes.
///
/// Registries are borrowed read-only context; the manager itself is
/// stateless between calls.
#[derive(Debug, Clone, Copy)]
pub struct StyleManager<'a> {
    themes: &'a ThemeRegistry,
    elements: &'a ElementRegistry,
}

impl<'a> StyleManager<'a> {
    /// Creates a manager over the given registries.
    pub fn new(themes: &'a ThemeRegistry, elements: &'a ElementRegistry) -> Self {
        Self { themes, elements }
    }

    /// Applies a style selection to a render tree.
    ///
    /// An empty selection leaves the tree unmodified. Otherwise classes end
    /// up on at least one node: if no descendant accepts attributes, the
    /// tree is wrapped in a synthetic `div` carrying them.
    pub fn add_classes(&self, node: &mut RenderNode, selection: &StyleSelection) {
        let classes = selection.class_tokens();
        if classes.is_empty() {
            return;
        }
        debug!(class_count = classes.len(); "injecting style classes into render tree");
        self.apply(node, &classes);
    }

    fn apply(&self, node: &mut RenderNode, classes: &[String]) {
        if self.is_meaningless_wrapper(node) {
            trace!("descending through structural wrapper");
            for (_, child) in node.children_mut() {
                if let Some(child_node) = child.as_node_mut() {
                    self.apply(child_node, classes);
                }
            }
            return;
        }
        if !self.inject(node, classes) {
            trace!("no attribute-accepting descendant; wrapping whole tree");
            wrap_in_div(node);
            self.merge(node, classes);
        }
    }

    /// Decides whether a node can carry HTML attributes.
    ///
    /// A node with an attribute property already does. A themed node asks
    /// the theme registry whether its template takes an attribute bag. A
    /// typed element uses the registry's static verdict when one exists,
    /// else its pre-render expansion is run and the result re-checked as a
    /// themed node. Bare markup leaves never accept attributes.
    pub fn is_accepting_attributes(&self, node: &RenderNode) -> bool {
        if node.has_attribute_property("attributes")
            || node.has_attribute_property("item_attributes")
        {
            return true;
        }
        match node.kind() {
            NodeKind::Themed(hook) => self.themes.hook_accepts_attributes(hook),
            NodeKind::Element(element_type) => {
                let Some(info) = self.elements.element(element_type) else {
                    return false;
                };
                if let Some(verdict) = info.accepts_attributes() {
                    return verdict;
                }
                match info.pre_render(node.clone()) {
                    Some(expanded) => match expanded.kind() {
                        NodeKind::Themed(hook) => self.themes.hook_accepts_attributes(hook),
                        _ => expanded.has_attribute_property("attributes"),
                    },
                    None => false,
                }
            }
            NodeKind::Markup | NodeKind::Container => false,
        }
    }

    /// A structural wrapper: a `block`/`layout`/`view` themed node that
    /// contains nested render nodes, rather than being content itself.
    ///
    /// Scalar pass-through children do not make a wrapper: there is nothing
    /// below them to delegate classes to.
    pub fn is_meaningless_wrapper(&self, node: &RenderNode) -> bool {
        node.base_theme_hook()
            .is_some_and(|hook| WRAPPER_HOOKS.contains(&hook))
            && node
                .children()
                .any(|(_, child)| child.as_node().is_some_and(|nested| !nested.is_empty()))
    }

    /// Breadth-first-per-branch search for injection targets, applying
    /// classes as they are found. Returns whether any target was found in
    /// this subtree.
    fn inject(&self, node: &mut RenderNode, classes: &[String]) -> bool {
        // Field output: the items are the content; hand classes straight to
        // the direct children.
        if node.base_theme_hook() == Some("field") {
            let mut found = false;
            for (_, child) in node.children_mut() {
                if let Some(item) = child.as_node_mut() {
                    self.apply_to_target(item, classes);
                    found = true;
                }
            }
            return found;
        }
        if !self.is_meaningless_wrapper(node) && self.is_accepting_attributes(node) {
            self.merge(node, classes);
            return true;
        }
        let mut found = false;
        for (_, child) in node.children_mut() {
            let Some(child_node) = child.as_node_mut() else {
                continue;
            };
            if self.inject(child_node, classes) {
                found = true;
                continue;
            }
            // Widen to simple leaf siblings: nothing accepting below, only
            // empty children of its own, but some content of its own.
            if child_node.has_only_empty_children() && !child_node.is_empty() {
                self.apply_to_target(child_node, classes);
                found = true;
            }
        }
        found
    }

    /// Merges classes into a target, wrapping it in a synthetic `div` first
    /// when it cannot carry attributes itself.
    fn apply_to_target(&self, target: &mut RenderNode, classes: &[String]) {
        if !self.is_accepting_attributes(target) {
            wrap_in_div(target);
        }
        self.merge(target, classes);
    }

    fn merge(&self, node: &mut RenderNode, classes: &[String]) {
        let property = if node
            .base_theme_hook()
            .is_some_and(|hook| ITEM_ATTRIBUTE_HOOKS.contains(&hook))
        {
            "item_attributes"
        } else {
            "attributes"
        };
        node.merge_classes(property, classes.iter().map(String::as_str));
    }
}

/// Replaces a node with a `div` element holding the original under the
/// `element` child key.
fn wrap_in_div(node: &mut RenderNode) {
    let original = std::mem::replace(node, RenderNode::element("html_tag"));
    node.set_property("tag", Value::String("div".to_owned()));
    node.insert_child("element", trellis_core::Child::Node(original));
}
