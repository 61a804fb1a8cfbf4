//! Integration tests for the public Trellis API
//!
//! These tests exercise the documented end-to-end behaviors: shorthand
//! conversion, style injection, and compatibility-driven source offering.

use serde_json::json;

use trellis::{
    canonicalize, convert_slots, is_compatible, ComponentDefinition, InMemoryDefinitions,
    PropDefinition, SourceDefinition, SourceMatcher, StyleSelection, Styler,
};

#[test]
fn test_styler_api_exists() {
    // Just verify the API compiles and can be constructed
    let _styler = Styler::default();
}

#[test]
fn test_leaf_markup_is_wrapped_with_classes() {
    let styler = Styler::default();
    let styled = styler
        .apply(&json!({"#markup": "hi"}), &StyleSelection::new(["foo"], ""))
        .expect("render value");

    assert_eq!(styled["#type"], json!("html_tag"));
    assert_eq!(styled["#tag"], json!("div"));
    assert_eq!(styled["element"], json!({"#markup": "hi"}));
    let classes = styled["#attributes"]["class"]
        .as_array()
        .expect("class list");
    assert!(classes.contains(&json!("foo")));
}

#[test]
fn test_extra_free_text_classes_are_split_and_merged() {
    let styler = Styler::default();
    let styled = styler
        .apply(
            &json!({"#type": "container", "#attributes": {"class": ["base"]}}),
            &StyleSelection::new(["base"], "mt-3  mb-3"),
        )
        .expect("render value");

    assert_eq!(
        styled["#attributes"]["class"],
        json!(["base", "mt-3", "mb-3"])
    );
}

#[test]
fn test_block_wrapper_is_transparent() {
    let styler = Styler::default();
    let value = json!({
        "#theme": "block",
        "content": {"#type": "container", "inner": {"#markup": "x"}},
    });
    let styled = styler
        .apply(&value, &StyleSelection::new(["shadow"], ""))
        .expect("render value");

    assert!(styled.get("#attributes").is_none());
    assert_eq!(styled["content"]["#attributes"]["class"], json!(["shadow"]));
}

#[test]
fn test_classes_survive_scalar_wrapper_content() {
    // A block whose content is a plain string still ends up styled; classes
    // must land somewhere on every input shape.
    let styler = Styler::default();
    let styled = styler
        .apply(
            &json!({"#theme": "block", "content": "plain string"}),
            &StyleSelection::new(["foo"], ""),
        )
        .expect("render value");

    assert_eq!(styled["#attributes"]["class"], json!(["foo"]));
    assert_eq!(styled["content"], json!("plain string"));
}

#[test]
fn test_converted_story_can_be_styled() {
    let story = json!({
        "type": "component",
        "component": "theme:card",
        "slots": {"body": {"type": "html_tag", "tag": "p", "value": "hi"}},
    });
    let converted = convert_slots(story);
    assert_eq!(converted["#component"], json!("theme:card"));

    let styler = Styler::default();
    let styled = styler
        .apply(&converted, &StyleSelection::new(["card"], ""))
        .expect("render value");
    // `component` is an attribute-accepting element type; classes land on it.
    assert_eq!(styled["#attributes"]["class"], json!(["card"]));
}

#[test]
fn test_conversion_is_idempotent_on_prefixed_input() {
    let prefixed = json!({"#type": "html_tag", "#tag": "p", "#value": "hi"});
    assert_eq!(convert_slots(prefixed.clone()), prefixed);
}

#[test]
fn test_compatibility_is_reference_anchored() {
    let integer = json!({"type": "integer"});
    let number = json!({"type": "number"});
    assert!(is_compatible(&integer, &number));
    assert!(!is_compatible(&number, &integer));
    assert!(!is_compatible(&integer, &json!({})));
}

#[test]
fn test_canonicalization_is_idempotent() {
    let schema = json!({
        "type": ["string", "int"],
        "title": "name",
        "pattern": "^[a-z]+$",
    });
    let once = canonicalize(&schema);
    assert_eq!(canonicalize(&once), once);
}

#[test]
fn test_source_offering_end_to_end() {
    let definitions = InMemoryDefinitions::new()
        .with_definition("trellis://url", json!({"type": "string", "format": "uri"}));
    let matcher = SourceMatcher::new(&definitions);

    let component = ComponentDefinition::new("theme:hero")
        .with_prop(
            "link",
            PropDefinition::prop(json!({"type": "string", "format": "uri-reference"})),
        )
        .with_prop("title", PropDefinition::slot());

    let sources = vec![
        SourceDefinition::new("url_field", json!({"$ref": "trellis://url"})),
        SourceDefinition::new("count_field", json!({"type": "integer"})),
    ];

    let link = component.require_prop("link").expect("declared prop");
    let offered = matcher.compatible_sources(link, &sources);
    assert_eq!(
        offered.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
        ["url_field"]
    );

    let offered = matcher.compatible_props(&component, &json!({"type": "string", "format": "uri"}));
    assert_eq!(
        offered.iter().map(|(name, _)| *name).collect::<Vec<_>>(),
        ["link"]
    );
}
