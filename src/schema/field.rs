//! Field construction: explicit schema matching and recursive descriptors.

use serde_json::Value;

use super::{FieldDescriptor, FieldType, FieldValue, SchemaField, infer_type};
use crate::debug;
use crate::utils::title_case;

/// Find the first well-formed schema entry named `key`.
///
/// A schema that is not an array, and entries that are not objects, lack a
/// string `name` or fail to deserialize, are skipped.
pub fn match_schema_field(key: &str, schema: &Value) -> Option<SchemaField> {
    schema
        .as_array()?
        .iter()
        .filter(|entry| entry.get("name").and_then(Value::as_str) == Some(key))
        .find_map(|entry| serde_json::from_value(entry.clone()).ok())
}

/// Build the descriptor for `key: value`, recursing into containers.
///
/// A matching explicit entry overrides type, label, placeholder, options and
/// flags. The value always reflects the data, never the schema.
pub fn create_field(key: &str, value: &Value, schema: &Value) -> FieldDescriptor {
    let explicit = match_schema_field(key, schema);
    let inferred = infer_type(value);
    let field_type = resolve_type(key, explicit.as_ref(), inferred);

    let mut field = FieldDescriptor::new(title_case(key), key, field_type);
    field.value = Some(FieldValue::Data(value.clone()));

    if let Some(entry) = &explicit {
        apply_schema(&mut field, entry);
    }

    // Children match against the entry's own fields when it has them,
    // otherwise against the root schema.
    let child_schema = explicit
        .as_ref()
        .and_then(|entry| entry.fields.as_ref())
        .unwrap_or(schema);

    match (inferred, value) {
        (FieldType::Array, Value::Array(items)) => {
            field.value = Some(FieldValue::Items(create_items(items, child_schema)));
        }
        (FieldType::Object, Value::Object(map)) => {
            field.value = None;
            field.fields = map
                .iter()
                .map(|(k, v)| create_field(k, v, child_schema))
                .collect();
        }
        _ => return field,
    }

    if explicit.is_none() {
        field.no_duplication = true;
    }
    field
}

/// Descriptors for array items, labelled `Item 1..n`.
///
/// Plain objects become `object` descriptors; everything else is inferred
/// like a regular field.
pub(super) fn create_items(items: &[Value], schema: &Value) -> Vec<FieldDescriptor> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| create_item(i, item, schema))
        .collect()
}

fn create_item(index: usize, item: &Value, schema: &Value) -> FieldDescriptor {
    let display = format!("Item {}", index + 1);
    let name = format!("item{}", index + 1);

    let mut field = match item {
        Value::Object(map) => {
            let mut field = FieldDescriptor::new(display.clone(), name, FieldType::Object);
            field.fields = map
                .iter()
                .map(|(k, v)| create_field(k, v, schema))
                .collect();
            field
        }
        _ => {
            let mut field = create_field("item", item, schema);
            field.label = "item".to_string();
            field.name = name;
            field
        }
    };
    field.display_label = Some(display);
    field
}

/// Explicit type wins unless it would misrepresent the data's shape.
fn resolve_type(key: &str, explicit: Option<&SchemaField>, inferred: FieldType) -> FieldType {
    let Some(wanted) = explicit.and_then(|entry| entry.field_type) else {
        return inferred;
    };

    let compatible = match wanted {
        FieldType::Object => inferred == FieldType::Object,
        FieldType::Array => matches!(inferred, FieldType::Array | FieldType::List),
        FieldType::List => inferred == FieldType::List,
        _ => !inferred.is_container(),
    };

    if compatible {
        wanted
    } else {
        debug!("schema"; "ignoring type `{}` for `{}`: data is {}", wanted, key, inferred);
        inferred
    }
}

fn apply_schema(field: &mut FieldDescriptor, entry: &SchemaField) {
    field.is_explicit = true;
    if let Some(label) = &entry.label {
        field.label.clone_from(label);
    }
    if entry.placeholder.is_some() {
        field.placeholder.clone_from(&entry.placeholder);
    }
    if !entry.options.is_empty() {
        field.options.clone_from(&entry.options);
    }
    if let Some(flag) = entry.no_duplication {
        field.no_duplication = flag;
    }
    if let Some(flag) = entry.no_deletion {
        field.no_deletion = flag;
    }
}
