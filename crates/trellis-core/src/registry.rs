//! Read-only lookup context for theme hooks and element types.
//!
//! The host framework keeps this information in globally reachable
//! registries. Here it is modeled as plain value objects handed to the
//! functions that need them, so every lookup is explicit and nothing depends
//! on ambient process state.
//!
//! Two registries exist:
//!
//! - [`ThemeRegistry`]: theme hook name → declared template variables and
//!   template file, used to decide whether a themed node can carry HTML
//!   attributes
//! - [`ElementRegistry`]: element type → static attribute-acceptance verdict
//!   and optional pre-render expansion, used for typed element nodes
//!
//! Both are built once (typically from host metadata) and only read
//! afterwards.

use std::fmt;

use indexmap::IndexMap;

use crate::node::RenderNode;

/// Template variable names that mark a theme hook as attribute-accepting.
const ATTRIBUTE_VARIABLES: [&str; 2] = ["attributes", "item_attributes"];

/// What the theme layer knows about a single hook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeHookInfo {
    variables: Vec<String>,
    template: Option<String>,
}

impl ThemeHookInfo {
    /// Creates hook info with no declared variables or template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the template variables this hook's template accepts.
    pub fn with_variables<I, S>(mut self, variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variables = variables.into_iter().map(Into::into).collect();
        self
    }

    /// Names the template file this hook renders through.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// The declared template variables.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// The template file, when one is declared.
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    /// Returns `true` if the declared variables include an attribute bag.
    pub fn declares_attribute_variable(&self) -> bool {
        self.variables
            .iter()
            .any(|variable| ATTRIBUTE_VARIABLES.contains(&variable.as_str()))
    }
}

/// Theme hook metadata, keyed by hook name.
#[derive(Debug, Clone, Default)]
pub struct ThemeRegistry {
    hooks: IndexMap<String, ThemeHookInfo>,
    accepting_templates: Vec<String>,
}

impl ThemeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry seeded with the hooks the style engine
    /// special-cases, declared the way stock host metadata declares them.
    pub fn with_defaults() -> Self {
        Self::new()
            .register_hook(
                "field",
                ThemeHookInfo::new()
                    .with_variables(["attributes", "title_attributes", "content_attributes"])
                    .with_template("field"),
            )
            .register_hook(
                "block",
                ThemeHookInfo::new()
                    .with_variables(["attributes", "title_attributes"])
                    .with_template("block"),
            )
            .register_hook(
                "layout",
                ThemeHookInfo::new()
                    .with_variables(["attributes"])
                    .with_template("layout"),
            )
            .register_hook(
                "view",
                ThemeHookInfo::new()
                    .with_variables(["attributes"])
                    .with_template("views-view"),
            )
            .register_hook(
                "image",
                ThemeHookInfo::new()
                    .with_variables(["attributes"])
                    .with_template("image"),
            )
            .register_hook(
                "item_list",
                ThemeHookInfo::new()
                    .with_variables(["attributes", "items"])
                    .with_template("item-list"),
            )
    }

    /// Registers (or replaces) a hook.
    pub fn register_hook(mut self, name: impl Into<String>, info: ThemeHookInfo) -> Self {
        self.hooks.insert(name.into(), info);
        self
    }

    /// Marks a template file whose hooks accept attributes even without
    /// declared variables.
    pub fn register_accepting_template(mut self, template: impl Into<String>) -> Self {
        self.accepting_templates.push(template.into());
        self
    }

    /// Looks up a hook, falling back from `hook__suggestion` to its base
    /// hook the way the theme layer resolves suggestions.
    pub fn hook(&self, name: &str) -> Option<&ThemeHookInfo> {
        if let Some(info) = self.hooks.get(name) {
            return Some(info);
        }
        let base = name.split("__").next().unwrap_or(name);
        self.hooks.get(base)
    }

    /// Decides whether the given hook's template accepts attributes.
    ///
    /// A hook accepts attributes when its declared variables include an
    /// attribute bag, or when it renders through a template file registered
    /// as always accepting. Unknown hooks do not accept attributes.
    pub fn hook_accepts_attributes(&self, name: &str) -> bool {
        let Some(info) = self.hook(name) else {
            return false;
        };
        if info.declares_attribute_variable() {
            return true;
        }
        info.template()
            .is_some_and(|template| self.accepting_templates.iter().any(|t| t == template))
    }
}

/// Pre-render expansion declared by an element type.
///
/// The host expands some element types into concrete themed output before
/// rendering; the style engine runs the same expansion when it needs to know
/// whether the expanded form accepts attributes.
pub type PreRenderFn = Box<dyn Fn(RenderNode) -> RenderNode + Send + Sync>;

/// What the element layer knows about a single element type.
#[derive(Default)]
pub struct ElementInfo {
    accepts_attributes: Option<bool>,
    pre_render: Option<PreRenderFn>,
}

impl ElementInfo {
    /// Creates element info with no verdict and no pre-render expansion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a static attribute-acceptance verdict for this type.
    pub fn accepting(mut self, accepts: bool) -> Self {
        self.accepts_attributes = Some(accepts);
        self
    }

    /// Attaches a pre-render expansion callable.
    pub fn with_pre_render(
        mut self,
        pre_render: impl Fn(RenderNode) -> RenderNode + Send + Sync + 'static,
    ) -> Self {
        self.pre_render = Some(Box::new(pre_render));
        self
    }

    /// The static verdict, when one is recorded.
    pub fn accepts_attributes(&self) -> Option<bool> {
        self.accepts_attributes
    }

    /// Runs the pre-render expansion, when one is declared.
    pub fn pre_render(&self, node: RenderNode) -> Option<RenderNode> {
        self.pre_render.as_ref().map(|expand| expand(node))
    }
}

impl fmt::Debug for ElementInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementInfo")
            .field("accepts_attributes", &self.accepts_attributes)
            .field("pre_render", &self.pre_render.is_some())
            .finish()
    }
}

/// Element type metadata, keyed by type name.
#[derive(Debug, Default)]
pub struct ElementRegistry {
    elements: IndexMap<String, ElementInfo>,
}

impl ElementRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry seeded with static verdicts for well-known element
    /// types: markup-producing containers accept attributes, text filters
    /// and bare links do not.
    pub fn with_defaults() -> Self {
        let accepting = ["html_tag", "container", "component", "table", "dropbutton"];
        let refusing = [
            "inline_template",
            "processed_text",
            "link",
            "page_title",
            "status_messages",
        ];
        let mut registry = Self::new();
        for name in accepting {
            registry = registry.register_element(name, ElementInfo::new().accepting(true));
        }
        for name in refusing {
            registry = registry.register_element(name, ElementInfo::new().accepting(false));
        }
        registry
    }

    /// Registers (or replaces) an element type.
    pub fn register_element(mut self, name: impl Into<String>, info: ElementInfo) -> Self {
        self.elements.insert(name.into(), info);
        self
    }

    /// Looks up an element type.
    pub fn element(&self, name: &str) -> Option<&ElementInfo> {
        self.elements.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_suggestion_falls_back_to_base() {
        let registry = ThemeRegistry::with_defaults();
        assert!(registry.hook("block__system_branding").is_some());
        assert!(registry.hook("no_such_hook").is_none());
    }

    #[test]
    fn test_hook_accepts_attributes_via_variables() {
        let registry = ThemeRegistry::with_defaults();
        assert!(registry.hook_accepts_attributes("block"));
        assert!(registry.hook_accepts_attributes("field__body"));
        assert!(!registry.hook_accepts_attributes("unknown"));
    }

    #[test]
    fn test_hook_accepts_attributes_via_template() {
        let registry = ThemeRegistry::new()
            .register_hook(
                "teaser",
                ThemeHookInfo::new().with_template("node-teaser"),
            )
            .register_accepting_template("node-teaser");
        assert!(registry.hook_accepts_attributes("teaser"));

        let bare = ThemeRegistry::new()
            .register_hook("teaser", ThemeHookInfo::new().with_template("node-teaser"));
        assert!(!bare.hook_accepts_attributes("teaser"));
    }

    #[test]
    fn test_element_defaults() {
        let registry = ElementRegistry::with_defaults();
        assert_eq!(
            registry.element("html_tag").and_then(ElementInfo::accepts_attributes),
            Some(true)
        );
        assert_eq!(
            registry.element("link").and_then(ElementInfo::accepts_attributes),
            Some(false)
        );
        assert!(registry.element("custom").is_none());
    }

    #[test]
    fn test_pre_render_expansion() {
        let registry = ElementRegistry::new().register_element(
            "expander",
            ElementInfo::new().with_pre_render(|_node| RenderNode::themed("block")),
        );
        let info = registry.element("expander").unwrap();
        let expanded = info.pre_render(RenderNode::element("expander")).unwrap();
        assert_eq!(expanded.theme_hook(), Some("block"));
    }
}
