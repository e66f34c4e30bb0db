//! Path helpers over nested JSON objects.
//!
//! `push`, `pop` and `set_in` never modify their inputs. `get_in` is the
//! exception: it creates empty objects for missing keys along the way so
//! the caller can write into the returned slot.

use serde_json::Value;

use crate::schema::JsonMap;

/// `path` with `name` appended.
pub fn push(path: &[String], name: &str) -> Vec<String> {
    let mut next = Vec::with_capacity(path.len() + 1);
    next.extend_from_slice(path);
    next.push(name.to_string());
    next
}

/// `path` without its last segment.
pub fn pop(path: &[String]) -> Vec<String> {
    path.split_last()
        .map(|(_, rest)| rest.to_vec())
        .unwrap_or_default()
}

/// Walk `path` into `obj`, creating `{}` for missing keys (and replacing
/// non-object values that must be walked through).
pub fn get_in<'a>(obj: &'a mut Value, path: &[String]) -> &'a mut Value {
    let mut current = obj;
    for key in path {
        current = ensure_object(current)
            .entry(key.clone())
            .or_insert_with(|| Value::Object(JsonMap::new()));
    }
    current
}

/// A new value equal to `obj` with `value` placed at `path`.
///
/// Every object along `path` is rebuilt; `obj` is left untouched.
pub fn set_in(obj: &Value, path: &[String], value: Value) -> Value {
    let Some((key, rest)) = path.split_first() else {
        return value;
    };

    let mut map = obj.as_object().cloned().unwrap_or_default();
    let child = set_in(map.get(key).unwrap_or(&Value::Null), rest, value);
    map.insert(key.clone(), child);
    Value::Object(map)
}

/// Turn `value` into an object if it is not one, and borrow the map.
pub fn ensure_object(value: &mut Value) -> &mut JsonMap {
    if !value.is_object() {
        *value = Value::Object(JsonMap::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced with an object"),
    }
}
