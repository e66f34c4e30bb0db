//! Key, name and value extraction from form elements.

use serde_json::{Number, Value};

use super::marker::{IS_ARRAY, IS_DATE, IS_NUMBER};
use super::{FormElement, FormError, InputKind, ValueInput};
use crate::utils::{DateTimeUtc, camel_case};

/// A leaf element's contribution to the rebuilt object.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValue {
    /// Data key, empty when the element has neither a name nor a label.
    pub key: String,
    pub value: Value,
}

/// Name of a structural element.
///
/// The carried data key wins. Otherwise arrays are named by their
/// `.array-name` and objects by their `.object-name` input, falling back
/// to the label text, camelCased.
pub fn get_name<E: FormElement + ?Sized>(element: &E) -> Result<String, FormError> {
    if let Some(name) = carried_name(element) {
        return Ok(name.to_string());
    }
    let raw = if element.has_class(IS_ARRAY)? {
        element.array_name()
    } else {
        element.object_name().or_else(|| element.label_text())
    };
    Ok(raw.map(camel_case).unwrap_or_default())
}

/// Key from the carried data key, else the camelCased `.element-label`;
/// value from `.element-value` with coercion.
///
/// An element without a value input yields an empty string.
pub fn get_key_value<E: FormElement + ?Sized>(element: &E) -> Result<KeyValue, FormError> {
    let key = match carried_name(element) {
        Some(name) => name.to_string(),
        None => element.label_text().map(camel_case).unwrap_or_default(),
    };

    let value = match element.value_input() {
        Some(input) => {
            let numeric = element.has_class(IS_NUMBER)?;
            let date = element.has_class(IS_DATE)?;
            coerce(input, numeric, date)?
        }
        None => Value::String(String::new()),
    };

    Ok(KeyValue { key, value })
}

fn carried_name<E: FormElement + ?Sized>(element: &E) -> Option<&str> {
    element.field_name().filter(|name| !name.is_empty())
}

/// Coerce an input on its own, as list items are.
pub fn coerce_input(input: &ValueInput) -> Result<Value, FormError> {
    coerce(input, false, false)
}

/// Coerce in order: number, checkbox, date, trimmed text. Dates keep the
/// precision they were entered with.
fn coerce(input: &ValueInput, numeric: bool, date: bool) -> Result<Value, FormError> {
    if numeric || input.classes.contains(IS_NUMBER) || input.kind == InputKind::Number {
        return Ok(to_number(&input.value));
    }
    if input.kind == InputKind::Checkbox {
        return Ok(Value::Bool(input.checked));
    }
    if date || input.classes.contains(IS_DATE) || input.kind == InputKind::Date {
        return to_iso_date(&input.value);
    }
    Ok(Value::String(input.value.trim().to_string()))
}

/// Numeric text to a JSON number. Empty stays an empty string; text that
/// is not a finite number becomes `null`.
fn to_number(raw: &str) -> Value {
    let raw = raw.trim();
    if raw.is_empty() {
        return Value::String(String::new());
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Value::Number(int.into());
    }
    if let Ok(int) = raw.parse::<u64>() {
        return Value::Number(int.into());
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map_or(Value::Null, Value::Number)
}

fn to_iso_date(raw: &str) -> Result<Value, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Value::String(String::new()));
    }
    DateTimeUtc::parse(raw)
        .map(|dt| Value::String(dt.to_string_like(raw)))
        .ok_or_else(|| FormError::InvalidDate(raw.to_string()))
}
