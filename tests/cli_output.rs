//! Tests for CLI output formatting: JSON with `--json`, pretty-print otherwise.

use flair_api::{
    AnyResource, Model, PrettyPrint, Related, RelationshipMap, ResourceObject, Untyped, Vent,
    VentAttributes,
};
use serde_json::json;

fn make_test_vent() -> Vent {
    let object: ResourceObject = serde_json::from_value(json!({
        "id": "42",
        "type": "vents",
        "attributes": {"name": "Den", "percent-open": 50, "inactive": false},
        "relationships": {"room": {"data": {"id": "7", "type": "rooms"}}}
    }))
    .unwrap();
    Vent::from_object(object, None).unwrap()
}

// ============================================================================
// JSON Output Tests
// ============================================================================

#[test]
fn test_json_output_is_resource_object() {
    let vent = make_test_vent();
    let parsed = serde_json::to_value(&vent).unwrap();

    assert_eq!(parsed["id"], "42");
    assert_eq!(parsed["type"], "vents");
    assert_eq!(parsed["attributes"]["name"], "Den");
    assert_eq!(parsed["attributes"]["percent-open"], json!(50));
    assert_eq!(parsed["relationships"]["room"]["data"]["id"], "7");
}

#[test]
fn test_json_output_for_list_is_array() {
    let resources: Vec<AnyResource> = vec![make_test_vent().into(), make_test_vent().into()];
    let parsed = serde_json::to_value(&resources).unwrap();

    assert!(parsed.is_array());
    assert_eq!(parsed.as_array().unwrap().len(), 2);
}

#[test]
fn test_json_output_omits_missing_id() {
    let vent = Vent::from_attributes(VentAttributes {
        name: Some("New".into()),
        ..Default::default()
    });
    let parsed = serde_json::to_value(&vent).unwrap();

    assert!(parsed.get("id").is_none());
    assert_eq!(parsed["attributes"], json!({"name": "New"}));
}

// ============================================================================
// Pretty-Print Tests
// ============================================================================

#[test]
fn test_pretty_print_has_header_and_attributes() {
    let output = make_test_vent().pretty_print();

    assert!(output.starts_with("vents: 42"));
    assert!(output.contains("name:"));
    assert!(output.contains("Den"));
    assert!(output.contains("percent-open:"));
    assert!(output.contains("→ room:"));
    assert!(output.contains("rooms 7"));
}

#[test]
fn test_pretty_print_marks_unsaved_and_deleted() {
    let unsaved: Model<Untyped> = Model::with_type("schedules".into());
    assert!(unsaved.pretty_print().starts_with("schedules: (unsaved)"));
    assert!(!unsaved.pretty_print().contains("(deleted)"));
}

#[test]
fn test_pretty_print_counts_to_many_links() {
    let object: ResourceObject = serde_json::from_value(json!({
        "id": "7",
        "type": "rooms",
        "attributes": {"name": "Office"},
        "relationships": {
            "vents": {"data": [{"id": "1", "type": "vents"}, {"id": "2", "type": "vents"}]},
            "hvac-units": {"data": null}
        }
    }))
    .unwrap();
    let resource = AnyResource::from_object(object, &"rooms".into(), None).unwrap();
    let output = resource.pretty_print();

    assert!(output.contains("2 linked"));
    assert!(!output.contains("hvac-units"));
}

#[test]
fn test_relationship_map_from_models() {
    let vent = make_test_vent();
    let encoded = RelationshipMap::new()
        .with("vents", Related::to_many([&vent]).unwrap())
        .encode();

    assert_eq!(
        serde_json::Value::Object(encoded),
        json!({"vents": {"data": [{"id": "42", "type": "vents"}]}})
    );
}
