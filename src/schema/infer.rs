//! Field type inference from raw values.

use serde_json::Value;

use super::FieldType;
use crate::utils::is_date_string;

/// Classify a raw value. First matching rule wins:
///
/// | Rule                              | Type       |
/// |-----------------------------------|------------|
/// | array of scalars (no objects/null)| `list`     |
/// | `YYYY-MM-DD` or ISO ms string     | `date`     |
/// | any other array                   | `array`    |
/// | string with a newline             | `textarea` |
/// | string                            | `text`     |
/// | object                            | `object`   |
/// | boolean                           | `checkbox` |
/// | number                            | `number`   |
/// | anything else (`null`)            | `text`     |
pub fn infer_type(value: &Value) -> FieldType {
    if is_simple_list(value) {
        return FieldType::List;
    }
    if is_date_value(value) {
        return FieldType::Date;
    }
    match value {
        Value::Array(_) => FieldType::Array,
        Value::String(s) if s.contains('\n') => FieldType::Textarea,
        Value::String(_) => FieldType::Text,
        Value::Object(_) => FieldType::Object,
        Value::Bool(_) => FieldType::Checkbox,
        Value::Number(_) => FieldType::Number,
        Value::Null => FieldType::Text,
    }
}

/// An array whose items are all strings, numbers or booleans.
///
/// An empty array counts as a simple list.
pub fn is_simple_list(value: &Value) -> bool {
    value.as_array().is_some_and(|items| {
        items
            .iter()
            .all(|item| matches!(item, Value::String(_) | Value::Number(_) | Value::Bool(_)))
    })
}

/// Date scalars arrive from YAML/TOML as strings. Only the layouts a
/// date input writes back count, see [`is_date_string`].
pub fn is_date_value(value: &Value) -> bool {
    value.as_str().is_some_and(is_date_string)
}
