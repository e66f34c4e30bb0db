//! End-to-end tests: data -> schema -> form -> HTML -> form -> data.

use serde_json::{Value, json};

use super::html::{parse_html, to_html};
use super::marker::IS_OBJECT;
use super::*;
use crate::render::render_form;
use crate::schema::{convert_to_schema_object, restore_root_shape};

fn round_trip(data: &Value) -> Option<Value> {
    round_trip_with(data, None)
}

fn round_trip_with(data: &Value, schema: Option<&Value>) -> Option<Value> {
    let form = render_form(&convert_to_schema_object(data, schema));
    let mut parsed = parse_html(&to_html(&form)).unwrap();
    preprocess_form_data(&mut parsed).map(|map| restore_root_shape(data, map))
}

/// An element whose class list cannot be read.
struct Broken;

impl FormElement for Broken {
    fn has_class(&self, _class: &str) -> Result<bool, FormError> {
        Err(FormError::ClassAccess("detached element".into()))
    }
    fn label_text(&self) -> Option<&str> {
        Some("Broken")
    }
    fn object_name(&self) -> Option<&str> {
        None
    }
    fn array_name(&self) -> Option<&str> {
        None
    }
    fn value_input(&self) -> Option<&ValueInput> {
        None
    }
    fn list_items(&self) -> &[ValueInput] {
        &[]
    }
}

#[test]
fn test_html_round_trip() {
    let data = json!({
        "title": "Hello <World>",
        "draft": true,
        "count": 3,
        "published": "2024-01-02T10:00:00.000Z",
        "summary": "line one\nline two",
        "author": {"name": "Ada", "links": ["/a", "/b"]},
        "sections": [
            {"heading": "One", "tags": ["x"]},
            {"heading": "Two", "tags": []}
        ]
    });
    assert_eq!(round_trip(&data), Some(data));
}

#[test]
fn test_date_strings_keep_their_layout() {
    let data = json!({
        "version": "2024-01-15",
        "stamp": "2024-01-15T10:00:00.000Z",
        "updated": "2024-01-15T10:00:00Z",
        "local": "2024-01-15 10:00"
    });
    assert_eq!(round_trip(&data), Some(data));
}

#[test]
fn test_large_integers_survive() {
    let data = json!({"id": u64::MAX, "offset": i64::MIN, "ratio": 0.25});
    assert_eq!(round_trip(&data), Some(data));
}

#[test]
fn test_blank_list_entries_keep_position() {
    let data = json!({"tags": ["", "a", " "], "flags": [true, false]});
    assert_eq!(
        round_trip(&data),
        Some(json!({"tags": ["", "a", ""], "flags": [true, false]}))
    );
}

#[test]
fn test_explicit_label_keeps_data_key() {
    let schema = json!([
        {"name": "title", "label": "Headline"},
        {"name": "author", "label": "Written By"},
        {"name": "seo_title"}
    ]);
    let data = json!({"title": "T", "author": {"name": "Ada"}, "seo_title": "S"});
    assert_eq!(round_trip_with(&data, Some(&schema)), Some(data));
}

#[test]
fn test_duplicated_field_gets_its_own_key() {
    let data = json!({"title": "T"});
    let mut form = render_form(&convert_to_schema_object(&data, None));
    let path = form.find_by_label("Title").unwrap();
    form.duplicate(&path).unwrap();

    assert_eq!(
        preprocess_form_data(&mut form).map(Value::Object),
        Some(json!({"title": "T", "titleCopy": "T"}))
    );
}

#[test]
fn test_root_array_round_trip() {
    let data = json!([{"name": "a"}, {"name": "b"}]);
    assert_eq!(round_trip(&data), Some(data));
}

#[test]
fn test_nested_arrays() {
    let data = json!({"grid": [[{"v": 1}], [{"v": 2}, {"v": 3}]]});
    assert_eq!(round_trip(&data), Some(data));
}

#[test]
fn test_empty_containers_keep_keys() {
    let data = json!({"meta": {}, "tags": []});
    assert_eq!(round_trip(&data), Some(data));
}

#[test]
fn test_broken_element_aborts() {
    let elements = [Broken];
    assert!(transform_form_elements_to_object(elements.iter()).is_none());
    assert!(matches!(
        try_transform(elements.iter()),
        Err(FormError::ClassAccess(_))
    ));
}

#[test]
fn test_broken_element_mid_sequence() {
    let title = FormNode::leaf("Title", ValueInput::new(InputKind::Text, "T"));
    let elements: Vec<&dyn FormElement> = vec![&title, &Broken];
    assert!(transform_form_elements_to_object(elements).is_none());
}

#[test]
fn test_list_inside_object() {
    let mut doc = FormDocument::new(vec![FormNode::object(
        "Seo",
        vec![
            FormNode::leaf("Title", ValueInput::new(InputKind::Text, "T")),
            FormNode::list(
                "Keywords",
                vec![
                    ValueInput::new(InputKind::Text, "a"),
                    ValueInput::new(InputKind::Text, ""),
                ],
            ),
        ],
    )]);
    assert_eq!(
        preprocess_form_data(&mut doc).map(Value::Object),
        Some(json!({"seo": {"title": "T", "keywords": ["a", ""]}}))
    );
    assert_eq!(doc.count_terminators(), 0);
}

#[test]
fn test_unlabelled_leaf_is_skipped() {
    let mut doc = FormDocument::new(vec![
        FormNode::leaf("", ValueInput::new(InputKind::Text, "orphan")),
        FormNode::leaf("Kept", ValueInput::new(InputKind::Text, "yes")),
    ]);
    assert_eq!(
        preprocess_form_data(&mut doc).map(Value::Object),
        Some(json!({"kept": "yes"}))
    );
}

#[test]
fn test_renamed_object_changes_key() {
    let data = json!({"author": {"name": "Ada"}});
    let mut form = render_form(&convert_to_schema_object(&data, None));
    assert!(form.elements[0].classes.contains(IS_OBJECT));
    form.elements[0].set_display_name("Lead Writer");

    assert_eq!(
        preprocess_form_data(&mut form).map(Value::Object),
        Some(json!({"leadWriter": {"name": "Ada"}}))
    );
}

#[test]
fn test_invalid_date_blocks_rebuild() {
    let data = json!({"published": "2024-01-02"});
    let mut form = render_form(&convert_to_schema_object(&data, None));
    let path = form.find_by_label("Published").unwrap();
    form.set_value(&path, "not a date").unwrap();

    assert!(preprocess_form_data(&mut form).is_none());
    assert_eq!(form.count_terminators(), 0);
}
