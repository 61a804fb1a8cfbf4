//! Shorthand render-value normalization.
//!
//! Story fixtures are authored in a friendly shorthand where property keys
//! omit the reserved `#` prefix:
//!
//! ```json
//! {"type": "html_tag", "tag": "p", "value": "hi"}
//! ```
//!
//! [`convert_slots`] rewrites such values, recursively, into the fully
//! prefixed form the renderer expects. Detection is conservative: a mapping
//! is treated as a render value only when exactly one render-identifying key
//! (`markup`, `plain_text`, `theme`, `type`, prefixed or not) is present with
//! a string value. Anything else, including malformed shorthand with two
//! identifying keys, passes through unconverted.
//!
//! Conversion dispatches on the element kind, because a handful of kinds
//! break the "unprefixed keys are children" convention:
//!
//! - *content-carrying* kinds hold render content under fixed property names
//!   (`component` under `slots`, `status_messages` under `message_list`,
//!   `table` under `header`/`rows`/`footer`/`empty`/`caption`); the content
//!   is converted recursively and every key is prefixed
//! - *known-normal* kinds (`html_tag`, the `layout` theme) have a closed
//!   property list; listed keys are prefixed, everything else is a genuine
//!   child and is recursed into unprefixed
//! - the *default* kind prefixes every key and recurses into composite
//!   values for nested shorthand
//!
//! Conversion is idempotent on fully prefixed input.

use serde_json::{Map, Value};

use trellis_core::PROPERTY_PREFIX;

/// Keys whose presence (with a string value) identifies a render value.
const RENDER_KEYS: [&str; 4] = ["markup", "plain_text", "theme", "type"];

/// Element kinds holding render content under fixed property names.
const CONTENT_PROPERTIES: [(&str, &[&str]); 3] = [
    ("component", &["slots"]),
    ("status_messages", &["message_list"]),
    ("table", &["header", "rows", "footer", "empty", "caption"]),
];

/// Element kinds with a closed list of property names.
const KNOWN_PROPERTIES: [(&str, &[&str]); 2] = [
    ("html_tag", &["attached", "attributes", "tag", "type", "value"]),
    ("layout", &["attached", "attributes", "theme", "settings"]),
];

/// Recursively converts shorthand render values into the prefixed form.
pub fn convert_slots(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            if is_render_value(&map) {
                convert_render_object(map)
            } else {
                Value::Object(
                    map.into_iter()
                        .map(|(key, entry)| (key, convert_slots(entry)))
                        .collect(),
                )
            }
        }
        Value::Array(items) => Value::Array(items.into_iter().map(convert_slots).collect()),
        scalar => scalar,
    }
}

/// A mapping is a render value when exactly one render-identifying key is
/// present and carries a string.
fn is_render_value(map: &Map<String, Value>) -> bool {
    let mut identifying = map.iter().filter(|(key, _)| {
        RENDER_KEYS.contains(&strip_prefix(key))
    });
    match (identifying.next(), identifying.next()) {
        (Some((_, value)), None) => value.is_string(),
        _ => false,
    }
}

fn strip_prefix(key: &str) -> &str {
    key.strip_prefix(PROPERTY_PREFIX).unwrap_or(key)
}

fn prefixed(key: &str) -> String {
    if key.starts_with(PROPERTY_PREFIX) {
        key.to_owned()
    } else {
        format!("{PROPERTY_PREFIX}{key}")
    }
}

fn convert_render_object(mut map: Map<String, Value>) -> Value {
    normalize_discriminants(&mut map);
    if let Some(kind) = dispatch_key(&map) {
        if let Some(content_names) = lookup(&CONTENT_PROPERTIES, &kind) {
            return convert_content_carrier(map, content_names);
        }
        if let Some(property_names) = lookup(&KNOWN_PROPERTIES, &kind) {
            return convert_known_normal(map, property_names);
        }
    }
    convert_default(map)
}

/// Copies a prefixed `#type`/`#theme` into its unprefixed key so the
/// dispatch below has a single detection point.
fn normalize_discriminants(map: &mut Map<String, Value>) {
    for name in ["type", "theme"] {
        if let Some(value) = map.shift_remove(&prefixed(name)) {
            map.insert(name.to_owned(), value);
        }
    }
}

/// The element kind: the `type` value, or the base theme-hook name.
fn dispatch_key(map: &Map<String, Value>) -> Option<String> {
    if let Some(element_type) = map.get("type").and_then(Value::as_str) {
        return Some(element_type.to_owned());
    }
    map.get("theme")
        .and_then(Value::as_str)
        .map(|hook| hook.split("__").next().unwrap_or(hook).to_owned())
}

fn lookup(table: &[(&str, &'static [&'static str])], kind: &str) -> Option<&'static [&'static str]> {
    table
        .iter()
        .find(|(name, _)| *name == kind)
        .map(|(_, names)| *names)
}

/// Content-carrying kinds: the listed names hold render content and are
/// converted recursively; every key is then prefixed.
fn convert_content_carrier(mut map: Map<String, Value>, content_names: &[&str]) -> Value {
    for name in content_names {
        for key in [(*name).to_owned(), prefixed(name)] {
            if let Some(entry) = map.get_mut(&key) {
                *entry = convert_slots(entry.take());
            }
        }
    }
    Value::Object(
        map.into_iter()
            .map(|(key, entry)| (prefixed(&key), entry))
            .collect(),
    )
}

/// Known-normal kinds: listed names are properties and get prefixed; any
/// other key is a genuine child, recursed into and left unprefixed.
fn convert_known_normal(map: Map<String, Value>, property_names: &[&str]) -> Value {
    Value::Object(
        map.into_iter()
            .map(|(key, entry)| {
                if property_names.contains(&strip_prefix(&key)) {
                    (prefixed(&key), entry)
                } else {
                    (key, convert_slots(entry))
                }
            })
            .collect(),
    )
}

/// Default kind: every key is a property and gets prefixed; composite values
/// are recursed into for nested shorthand.
fn convert_default(map: Map<String, Value>) -> Value {
    Value::Object(
        map.into_iter()
            .map(|(key, entry)| {
                let entry = match entry {
                    composite @ (Value::Object(_) | Value::Array(_)) => convert_slots(composite),
                    scalar => scalar,
                };
                (prefixed(&key), entry)
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_html_tag_shorthand() {
        let story = json!({"type": "html_tag", "tag": "p", "value": "hi"});
        assert_eq!(
            convert_slots(story),
            json!({"#type": "html_tag", "#tag": "p", "#value": "hi"})
        );
    }

    #[test]
    fn test_component_shorthand() {
        let story = json!({"type": "component", "component": "a:b", "slots": {"title": "x"}});
        assert_eq!(
            convert_slots(story),
            json!({"#type": "component", "#component": "a:b", "#slots": {"title": "x"}})
        );
    }

    #[test]
    fn test_component_slots_recurse_into_nested_shorthand() {
        let story = json!({
            "type": "component",
            "component": "a:card",
            "slots": {"body": {"type": "html_tag", "tag": "p", "value": "hi"}},
        });
        assert_eq!(
            convert_slots(story),
            json!({
                "#type": "component",
                "#component": "a:card",
                "#slots": {"body": {"#type": "html_tag", "#tag": "p", "#value": "hi"}},
            })
        );
    }

    #[test]
    fn test_table_content_names() {
        let story = json!({
            "type": "table",
            "caption": "People",
            "rows": [[{"markup": "cell"}]],
        });
        assert_eq!(
            convert_slots(story),
            json!({
                "#type": "table",
                "#caption": "People",
                "#rows": [[{"#markup": "cell"}]],
            })
        );
    }

    #[test]
    fn test_layout_theme_properties_and_children() {
        let story = json!({
            "theme": "layout__twocol",
            "settings": {"gap": "wide"},
            "first": {"markup": "left"},
        });
        assert_eq!(
            convert_slots(story),
            json!({
                "#theme": "layout__twocol",
                "#settings": {"gap": "wide"},
                "first": {"#markup": "left"},
            })
        );
    }

    #[test]
    fn test_default_kind_prefixes_everything() {
        let story = json!({"theme": "item_list", "items": ["a", "b"], "title": "List"});
        assert_eq!(
            convert_slots(story),
            json!({"#theme": "item_list", "#items": ["a", "b"], "#title": "List"})
        );
    }

    #[test]
    fn test_two_identifying_keys_pass_through() {
        let story = json!({"type": "html_tag", "theme": "layout", "tag": "p"});
        assert_eq!(convert_slots(story.clone()), story);
    }

    #[test]
    fn test_non_string_identifying_value_passes_through() {
        let story = json!({"type": 3, "tag": "p"});
        assert_eq!(convert_slots(story.clone()), story);
    }

    #[test]
    fn test_lists_recurse_per_item() {
        let stories = json!([
            {"markup": "one"},
            {"type": "html_tag", "tag": "i", "value": "two"},
            "scalar",
        ]);
        assert_eq!(
            convert_slots(stories),
            json!([
                {"#markup": "one"},
                {"#type": "html_tag", "#tag": "i", "#value": "two"},
                "scalar",
            ])
        );
    }

    #[test]
    fn test_idempotent_on_fully_prefixed_input() {
        let prefixed = json!({
            "#type": "component",
            "#component": "a:b",
            "#slots": {
                "body": {"#type": "html_tag", "#tag": "p", "#value": "hi"},
                "aside": {"#theme": "layout__onecol", "#settings": {}, "main": {"#markup": "x"}},
            },
        });
        let once = convert_slots(prefixed.clone());
        assert_eq!(once, prefixed);
        assert_eq!(convert_slots(once.clone()), once);
    }
}
