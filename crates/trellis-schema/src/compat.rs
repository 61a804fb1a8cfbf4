//! Reference-anchored schema compatibility.
//!
//! [`is_compatible`] decides whether a *checked* schema (what a data source
//! can produce) satisfies a *reference* schema (what a component prop
//! requires). The verdict is anchored on the reference side and deliberately
//! asymmetric: an integer producer satisfies a number requirement, never the
//! other way around.
//!
//! An empty reference is never satisfied. Component inputs whose type is
//! undeclared (slots, unknown prop types) canonicalize to the empty fragment,
//! and matching typed sources against them would be meaningless.

use serde_json::{Map, Value};

use crate::canonical::canonicalize;
use crate::scalar;

/// Decides whether `checked` satisfies `reference`.
pub fn is_compatible(checked: &Value, reference: &Value) -> bool {
    // Guard on the raw reference: undeclared requirements match nothing.
    if reference.as_object().is_none_or(Map::is_empty) {
        return false;
    }
    let checked = canonicalize(checked);
    let reference = canonicalize(reference);
    is_canonical_compatible(&checked, &reference)
}

fn is_canonical_compatible(checked: &Value, reference: &Value) -> bool {
    if checked == reference {
        return true;
    }
    let (Some(checked_map), Some(reference_map)) = (checked.as_object(), reference.as_object())
    else {
        return false;
    };

    match (checked_map.get("type"), reference_map.get("type")) {
        (Some(Value::String(checked_type)), Some(Value::String(reference_type))) => {
            return is_type_compatible(checked_map, reference_map, checked_type, reference_type);
        }
        // Array-typed `type` fields do not survive canonicalization; treat
        // a stray pair as incompatible.
        (Some(_), Some(_)) => return false,
        _ => {}
    }

    // First match wins; later members are not evaluated.
    if let Some(members) = reference_map.get("anyOf").and_then(Value::as_array) {
        if members
            .iter()
            .any(|member| guarded_compatible(checked, member))
        {
            return true;
        }
    }
    if let Some(members) = checked_map.get("anyOf").and_then(Value::as_array) {
        if members
            .iter()
            .any(|member| is_canonical_compatible(member, reference))
        {
            return true;
        }
    }
    false
}

/// Compatibility against a sub-reference (an `anyOf` member or an `items`
/// schema), with the empty-reference guard applied to it.
fn guarded_compatible(checked: &Value, reference: &Value) -> bool {
    if reference.as_object().is_none_or(Map::is_empty) {
        return false;
    }
    is_canonical_compatible(checked, reference)
}

fn is_type_compatible(
    checked: &Map<String, Value>,
    reference: &Map<String, Value>,
    checked_type: &str,
    reference_type: &str,
) -> bool {
    let type_class = if checked_type == reference_type {
        checked_type
    } else if checked_type == "integer" && reference_type == "number" {
        // Integers are numbers; the reverse does not hold.
        "number"
    } else {
        return false;
    };

    match type_class {
        "null" | "boolean" => true,
        "object" => is_object_compatible(checked, reference),
        "array" => is_array_compatible(checked, reference),
        "string" => scalar::is_string_compatible(checked, reference),
        "number" | "integer" => scalar::is_number_compatible(checked, reference),
        _ => false,
    }
}

fn is_object_compatible(checked: &Map<String, Value>, reference: &Map<String, Value>) -> bool {
    if reference.contains_key("properties") && !checked.contains_key("properties") {
        return false;
    }
    if reference.contains_key("patternProperties") && !checked.contains_key("patternProperties") {
        return false;
    }
    if let Some(required) = reference.get("required").and_then(Value::as_array) {
        let checked_required = checked.get("required").and_then(Value::as_array);
        let checked_properties = checked.get("properties").and_then(Value::as_object);
        for name in required {
            let in_required = checked_required.is_some_and(|list| list.contains(name));
            let in_properties = name
                .as_str()
                .is_some_and(|name| checked_properties.is_some_and(|map| map.contains_key(name)));
            if !in_required && !in_properties {
                return false;
            }
        }
    }
    true
}

fn is_array_compatible(checked: &Map<String, Value>, reference: &Map<String, Value>) -> bool {
    if let Some(reference_items) = reference.get("items") {
        let Some(checked_items) = checked.get("items") else {
            return false;
        };
        let items_compatible = match (checked_items, reference_items) {
            // The empty-reference guard applies to the item schemas too.
            (Value::Object(_), Value::Object(_)) => {
                guarded_compatible(checked_items, reference_items)
            }
            _ => checked_items == reference_items,
        };
        if !items_compatible {
            return false;
        }
    }
    if reference.get("uniqueItems") == Some(&Value::Bool(true))
        && checked.get("uniqueItems") != Some(&Value::Bool(true))
    {
        return false;
    }
    true
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;
    use serde_json::json;
    use serde_json::Value;

    use super::*;

    fn scalar_type_strategy() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just("string"),
            Just("integer"),
            Just("number"),
            Just("boolean"),
            Just("null"),
        ]
    }

    proptest! {
        /// A single-typed schema is always compatible with itself.
        #[test]
        fn self_compatibility(type_name in scalar_type_strategy()) {
            let schema = json!({"type": type_name});
            prop_assert!(is_compatible(&schema, &schema));
        }

        /// The empty reference rejects every checked schema.
        #[test]
        fn empty_reference_rejects(type_name in scalar_type_strategy()) {
            let schema = json!({"type": type_name});
            prop_assert!(!is_compatible(&schema, &Value::Object(serde_json::Map::new())));
        }
    }
}
