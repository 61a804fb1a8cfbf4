//! Scalar compatibility rules for string, number, and integer schemas.
//!
//! These rules assume both sides are canonical and share the type class; the
//! dispatcher in [`crate::compat`] guarantees that before calling in.

use serde_json::{Map, Value};

/// One-directional format compatibility: a producer of the key format
/// satisfies a consumer requiring any of the listed formats.
const FORMAT_COMPATIBILITY: [(&str, &[&str]); 4] = [
    ("uri", &["uri-reference", "iri-reference", "iri"]),
    ("iri", &["iri-reference"]),
    ("uri-reference", &["iri-reference"]),
    ("email", &["idn-email"]),
];

/// Decides whether a checked string schema satisfies a reference string
/// schema.
pub(crate) fn is_string_compatible(
    checked: &Map<String, Value>,
    reference: &Map<String, Value>,
) -> bool {
    if let Some(required_format) = reference.get("format").and_then(Value::as_str) {
        let Some(checked_format) = checked.get("format").and_then(Value::as_str) else {
            return false;
        };
        if !is_format_compatible(checked_format, required_format) {
            return false;
        }
    }
    if reference.contains_key("enum") && !is_enum_compatible(checked, reference) {
        return false;
    }
    if let Some(min) = reference.get("minLength").and_then(Value::as_f64) {
        match checked.get("minLength").and_then(Value::as_f64) {
            Some(checked_min) if checked_min >= min => {}
            _ => return false,
        }
    }
    if let Some(max) = reference.get("maxLength").and_then(Value::as_f64) {
        match checked.get("maxLength").and_then(Value::as_f64) {
            Some(checked_max) if checked_max <= max => {}
            _ => return false,
        }
    }
    if let Some(pattern) = reference.get("pattern") {
        // Exact pattern equality only; regex subsumption is out of scope.
        if checked.get("pattern") != Some(pattern) {
            return false;
        }
    }
    true
}

/// Decides whether a checked number or integer schema satisfies a reference
/// one.
///
/// Range and `multipleOf` constraints are not validated and always count as
/// satisfied; only enum membership is checked.
pub(crate) fn is_number_compatible(
    checked: &Map<String, Value>,
    reference: &Map<String, Value>,
) -> bool {
    if reference.contains_key("enum") {
        return is_enum_compatible(checked, reference);
    }
    true
}

fn is_format_compatible(checked: &str, required: &str) -> bool {
    if checked == required {
        return true;
    }
    FORMAT_COMPATIBILITY
        .iter()
        .any(|(producer, consumers)| *producer == checked && consumers.contains(&required))
}

/// The enum cardinality rule.
///
/// The checked schema must declare an enum. An empty reference enum accepts
/// any checked enum. At equal cardinality, every checked value must appear
/// in the reference enum. A larger checked enum is incompatible. A smaller
/// checked enum is compatible when the reference holds at least one value
/// the checked enum lacks.
pub(crate) fn is_enum_compatible(
    checked: &Map<String, Value>,
    reference: &Map<String, Value>,
) -> bool {
    let Some(checked_enum) = checked.get("enum").and_then(Value::as_array) else {
        return false;
    };
    let Some(reference_enum) = reference.get("enum").and_then(Value::as_array) else {
        return false;
    };
    if reference_enum.is_empty() {
        return true;
    }
    if checked_enum.len() == reference_enum.len() {
        return checked_enum
            .iter()
            .all(|value| reference_enum.contains(value));
    }
    if checked_enum.len() > reference_enum.len() {
        return false;
    }
    reference_enum
        .iter()
        .any(|value| !checked_enum.contains(value))
}
