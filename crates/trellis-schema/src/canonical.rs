//! Schema fragment canonicalization.
//!
//! Canonicalization produces a normalized form in which two fragments that
//! constrain values identically compare equal:
//!
//! - known authoring mistakes are repaired (an `array` schema using
//!   `properties` where it meant `items`)
//! - the `"int"` alias is normalized to `"integer"`
//! - a `type` listing several type names is expanded into an `anyOf` of
//!   single-typed schemas
//! - keys irrelevant to comparison (titles, descriptions, examples, UI
//!   hints) are stripped, keeping combinators plus the constraint keys of
//!   the declared type
//! - nested `properties` values, `items`, and `anyOf` members are
//!   canonicalized recursively
//! - output keys are sorted
//!
//! The function is total: non-object input canonicalizes to the empty
//! fragment. It is also idempotent, which the property tests pin down.

use serde_json::{Map, Value};

/// Keys kept on every schema regardless of type.
const ALWAYS_USEFUL: [&str; 8] = [
    "$ref", "allOf", "anyOf", "const", "enum", "not", "oneOf", "type",
];

/// Type-specific constraint keys worth keeping for comparison.
fn useful_for_type(type_name: &str) -> &'static [&'static str] {
    match type_name {
        "string" => &["format", "maxLength", "minLength", "pattern"],
        "number" | "integer" => &[
            "exclusiveMaximum",
            "exclusiveMinimum",
            "maximum",
            "minimum",
            "multipleOf",
        ],
        "array" => &[
            "additionalItems",
            "items",
            "maxItems",
            "minItems",
            "uniqueItems",
        ],
        "object" => &[
            "additionalProperties",
            "maxProperties",
            "minProperties",
            "patternProperties",
            "properties",
            "required",
        ],
        _ => &[],
    }
}

/// Produces the canonical form of a schema fragment.
pub fn canonicalize(schema: &Value) -> Value {
    let Value::Object(map) = schema else {
        return Value::Object(Map::new());
    };
    let mut schema = map.clone();

    resolve_quirks(&mut schema);
    normalize_integer_alias(&mut schema);

    // A multi-typed schema becomes an anyOf of single-typed schemas, each
    // carrying the remaining keys and canonicalized on its own.
    if let Some(Value::Array(types)) = schema.get("type") {
        let types = types.clone();
        let mut variants = Vec::with_capacity(types.len());
        for type_name in types {
            let mut variant = schema.clone();
            variant.insert("type".to_owned(), type_name);
            variants.push(canonicalize(&Value::Object(variant)));
        }
        let mut expanded = Map::new();
        expanded.insert("anyOf".to_owned(), Value::Array(variants));
        return Value::Object(expanded);
    }

    keep_only_useful_properties(&mut schema);

    if let Some(Value::Object(properties)) = schema.get_mut("properties") {
        let mut canonical_properties: Vec<(String, Value)> = properties
            .iter()
            .map(|(name, sub)| (name.clone(), canonicalize(sub)))
            .collect();
        canonical_properties.sort_by(|(a, _), (b, _)| a.cmp(b));
        *properties = canonical_properties.into_iter().collect();
    }
    if let Some(items) = schema.get_mut("items") {
        let canonical = match &*items {
            Value::Array(tuple) => Value::Array(tuple.iter().map(canonicalize).collect()),
            single => canonicalize(single),
        };
        *items = canonical;
    }
    if let Some(Value::Array(members)) = schema.get_mut("anyOf") {
        *members = members.iter().map(canonicalize).collect();
    }

    sorted(schema)
}

/// Repairs known authoring mistakes before normalization.
///
/// An `array` schema that declares `properties` but no `items` meant `items`.
fn resolve_quirks(schema: &mut Map<String, Value>) {
    let is_array = schema.get("type").and_then(Value::as_str) == Some("array");
    if is_array && !schema.contains_key("items") {
        if let Some(mistaken) = schema.shift_remove("properties") {
            schema.insert("items".to_owned(), mistaken);
        }
    }
}

/// Rewrites the `"int"` type alias to `"integer"`, including inside a
/// multi-type list.
fn normalize_integer_alias(schema: &mut Map<String, Value>) {
    match schema.get_mut("type") {
        Some(Value::String(name)) if name == "int" => {
            *name = "integer".to_owned();
        }
        Some(Value::Array(names)) => {
            for name in names.iter_mut() {
                if name.as_str() == Some("int") {
                    *name = Value::String("integer".to_owned());
                }
            }
        }
        _ => {}
    }
}

/// Drops every key not relevant to comparison.
fn keep_only_useful_properties(schema: &mut Map<String, Value>) {
    let type_specific = schema
        .get("type")
        .and_then(Value::as_str)
        .map(useful_for_type)
        .unwrap_or(&[]);
    schema.retain(|key, _| {
        ALWAYS_USEFUL.contains(&key.as_str()) || type_specific.contains(&key.as_str())
    });
}

/// Rebuilds a map with its keys in sorted order.
fn sorted(schema: Map<String, Value>) -> Value {
    let mut entries: Vec<(String, Value)> = schema.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    Value::Object(entries.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_non_object_input_yields_empty_fragment() {
        assert_eq!(canonicalize(&json!(null)), json!({}));
        assert_eq!(canonicalize(&json!("string")), json!({}));
        assert_eq!(canonicalize(&json!([1, 2])), json!({}));
    }

    #[test]
    fn test_irrelevant_keys_are_stripped() {
        let schema = json!({
            "type": "string",
            "title": "Label",
            "description": "Free text",
            "examples": ["a"],
            "pattern": "^a",
            "minItems": 2,
        });
        assert_eq!(
            canonicalize(&schema),
            json!({"pattern": "^a", "type": "string"})
        );
    }

    #[test]
    fn test_array_properties_quirk_is_repaired() {
        let schema = json!({
            "type": "array",
            "properties": {"type": "string", "title": "item"},
        });
        assert_eq!(
            canonicalize(&schema),
            json!({"items": {"type": "string"}, "type": "array"})
        );
    }

    #[test]
    fn test_int_alias_is_normalized() {
        assert_eq!(canonicalize(&json!({"type": "int"})), json!({"type": "integer"}));
    }

    #[test]
    fn test_multi_type_expands_to_any_of() {
        let schema = json!({"type": ["string", "int"], "title": "x"});
        assert_eq!(
            canonicalize(&schema),
            json!({"anyOf": [{"type": "string"}, {"type": "integer"}]})
        );
    }

    #[test]
    fn test_nested_recursion() {
        let schema = json!({
            "type": "object",
            "properties": {
                "b": {"type": "string", "title": "drop me"},
                "a": {"type": "array", "items": {"type": "int", "description": "d"}},
            },
        });
        assert_eq!(
            canonicalize(&schema),
            json!({
                "properties": {
                    "a": {"items": {"type": "integer"}, "type": "array"},
                    "b": {"type": "string"},
                },
                "type": "object",
            })
        );
    }

    #[test]
    fn test_output_keys_are_sorted() {
        let schema = json!({"type": "string", "pattern": "^a", "format": "uri"});
        let canonical = canonicalize(&schema);
        let keys: Vec<&String> = canonical.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["format", "pattern", "type"]);
    }
}
