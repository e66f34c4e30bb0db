//! Top-level schema conversion.

use serde_json::Value;

use super::field::create_items;
use super::{FieldDescriptor, FieldType, FieldValue, JsonMap, SchemaObject, create_field};

/// Infer the root field list for `data`, matching against an optional
/// explicit schema.
///
/// - `null` -> no fields
/// - object -> one field per entry
/// - array -> a single synthetic `items` array field
/// - other scalars -> a single synthetic `value` field
pub fn convert_to_schema_object(data: &Value, schema: Option<&Value>) -> SchemaObject {
    let schema = schema.unwrap_or(&Value::Null);

    let fields = match data {
        Value::Null => Vec::new(),
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| create_field(key, value, schema))
            .collect(),
        Value::Array(items) => {
            let mut field = FieldDescriptor::new("Items", "items", FieldType::Array);
            field.value = Some(FieldValue::Items(create_items(items, schema)));
            field.no_duplication = true;
            vec![field]
        }
        scalar => vec![create_field("value", scalar, schema)],
    };

    SchemaObject { fields }
}

/// Undo the root wrapping applied by [`convert_to_schema_object`].
///
/// Root arrays come back as `{ items: [...] }` and root scalars as
/// `{ value: ... }`; objects are returned unchanged.
pub fn restore_root_shape(original: &Value, mut rebuilt: JsonMap) -> Value {
    match original {
        Value::Array(_) => match rebuilt.remove("items") {
            Some(Value::Array(items)) => Value::Array(items),
            // An empty array form has no entries to convert.
            _ => Value::Array(Vec::new()),
        },
        Value::Object(_) | Value::Null => Value::Object(rebuilt),
        _ => rebuilt.remove("value").unwrap_or(Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_input() {
        assert!(convert_to_schema_object(&Value::Null, None).fields.is_empty());
    }

    #[test]
    fn test_object_input() {
        let schema = convert_to_schema_object(
            &json!({"title": "T", "draft": false, "tags": ["a", "b"]}),
            None,
        );
        let kinds: Vec<_> = schema
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.field_type))
            .collect();
        assert_eq!(
            kinds,
            [
                ("title", FieldType::Text),
                ("draft", FieldType::Checkbox),
                ("tags", FieldType::List),
            ]
        );
    }

    #[test]
    fn test_array_input_wraps_items() {
        let schema = convert_to_schema_object(&json!([{"a": 1}, "b"]), None);
        assert_eq!(schema.fields.len(), 1);

        let items = &schema.fields[0];
        assert_eq!(items.label, "Items");
        assert_eq!(items.name, "items");
        assert_eq!(items.field_type, FieldType::Array);
        assert_eq!(items.items()[0].field_type, FieldType::Object);
        assert_eq!(items.items()[1].field_type, FieldType::Text);
    }

    #[test]
    fn test_simple_array_input_still_wraps_as_array() {
        let schema = convert_to_schema_object(&json!([1, 2]), None);
        assert_eq!(schema.fields[0].field_type, FieldType::Array);
        assert_eq!(schema.fields[0].items().len(), 2);
    }

    #[test]
    fn test_scalar_input() {
        let schema = convert_to_schema_object(&json!(3), None);
        assert_eq!(schema.fields.len(), 1);
        assert_eq!(schema.fields[0].name, "value");
        assert_eq!(schema.fields[0].field_type, FieldType::Number);
    }

    #[test]
    fn test_explicit_schema_passthrough() {
        let explicit = json!([{"name": "title", "type": "textarea"}]);
        let schema = convert_to_schema_object(&json!({"title": "T"}), Some(&explicit));
        assert_eq!(schema.fields[0].field_type, FieldType::Textarea);
        assert!(schema.fields[0].is_explicit);
    }

    #[test]
    fn test_to_map_rebuilds_input() {
        let data = json!({"a": 1, "b": {"c": [true]}, "d": [{"e": "f"}]});
        let schema = convert_to_schema_object(&data, None);
        assert_eq!(Value::Object(schema.to_map()), data);
    }

    #[test]
    fn test_restore_root_shape() {
        let mut rebuilt = JsonMap::new();
        rebuilt.insert("items".into(), json!([1, 2]));
        assert_eq!(restore_root_shape(&json!([0]), rebuilt), json!([1, 2]));

        let mut rebuilt = JsonMap::new();
        rebuilt.insert("value".into(), json!("x"));
        assert_eq!(restore_root_shape(&json!("y"), rebuilt), json!("x"));

        let mut rebuilt = JsonMap::new();
        rebuilt.insert("k".into(), json!(1));
        assert_eq!(restore_root_shape(&json!({}), rebuilt), json!({"k": 1}));
    }
}
