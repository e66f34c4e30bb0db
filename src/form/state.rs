//! Traversal state and the per-element transitions of the reducer.
//!
//! Each handler consumes the state and returns the next one, so the
//! reducer is a plain fold over the element sequence.

use serde_json::{Value, json};

use super::path::{ensure_object, get_in, pop, push, set_in};
use super::value::{coerce_input, get_key_value, get_name};
use super::{FormElement, FormError};
use crate::schema::JsonMap;

/// Root segment of every path.
pub const ROOT: &str = "main";

/// Flag marking an accumulated container as a flattened list.
const LIST_FLAG: &str = "isList";

#[derive(Debug, Clone, PartialEq)]
pub struct TraversalState {
    /// Current position, `["main", ...]`.
    pub path: Vec<String>,
    /// Accumulator, `{ "main": { ... } }`.
    pub result: Value,
}

impl Default for TraversalState {
    fn default() -> Self {
        Self::new()
    }
}

impl TraversalState {
    pub fn new() -> Self {
        Self {
            path: vec![ROOT.to_string()],
            result: json!({ ROOT: {} }),
        }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Back at `["main"]`.
    pub fn is_balanced(&self) -> bool {
        self.path.len() == 1 && self.path[0] == ROOT
    }

    /// The object under `main`.
    pub fn into_main(mut self) -> JsonMap {
        match self.result.get_mut(ROOT).map(Value::take) {
            Some(Value::Object(map)) => map,
            _ => JsonMap::new(),
        }
    }

    /// Object at the current path, created if missing.
    fn current_object(&mut self) -> &mut JsonMap {
        ensure_object(get_in(&mut self.result, &self.path))
    }

    fn unbalanced(&self) -> FormError {
        FormError::Unbalanced {
            path: self.path.join("."),
        }
    }
}

/// Open an object or array: descend into its name.
pub fn handle_structural<E: FormElement + ?Sized>(
    mut state: TraversalState,
    element: &E,
) -> Result<TraversalState, FormError> {
    let name = get_name(element)?;
    state.path = push(&state.path, &name);
    // Empty containers still produce their key.
    ensure_object(get_in(&mut state.result, &state.path));
    Ok(state)
}

/// Collect `.list-item` values into an array stored under the list name
/// in the current object. Blank entries are kept as `""` so positions
/// survive.
pub fn handle_list<E: FormElement + ?Sized>(
    mut state: TraversalState,
    element: &E,
) -> Result<TraversalState, FormError> {
    let name = get_name(element)?;
    if name.is_empty() {
        return Ok(state);
    }

    let items = element
        .list_items()
        .iter()
        .map(coerce_input)
        .collect::<Result<Vec<_>, _>>()?;

    state.current_object().insert(name, Value::Array(items));
    Ok(state)
}

/// Merge a leaf's key/value into the current object. Elements without a
/// key contribute nothing.
pub fn handle_value<E: FormElement + ?Sized>(
    mut state: TraversalState,
    element: &E,
) -> Result<TraversalState, FormError> {
    let kv = get_key_value(element)?;
    if kv.key.is_empty() {
        return Ok(state);
    }

    state.current_object().insert(kv.key, kv.value);
    Ok(state)
}

/// Close an array: turn the object accumulated at the current path into
/// an array and ascend.
pub fn handle_array_conversion(mut state: TraversalState) -> Result<TraversalState, FormError> {
    if state.depth() <= 1 {
        return Err(state.unbalanced());
    }

    let container = get_in(&mut state.result, &state.path).clone();
    state.result = set_in(&state.result, &state.path, container_to_array(container));
    state.path = pop(&state.path);
    Ok(state)
}

/// Close an object: ascend without touching the data.
pub fn handle_object_end(mut state: TraversalState) -> Result<TraversalState, FormError> {
    if state.depth() <= 1 {
        return Err(state.unbalanced());
    }
    state.path = pop(&state.path);
    Ok(state)
}

/// Positional array from an accumulated container.
///
/// - `isList` containers yield their `items` array, or every other value
/// - otherwise values in insertion order; keys ending in `block` keep a
///   single-key wrapper (`{ "textBlock": ... }`) for block content entries
fn container_to_array(container: Value) -> Value {
    let map = match container {
        Value::Object(map) => map,
        Value::Array(items) => return Value::Array(items),
        Value::Null => return Value::Array(Vec::new()),
        other => return Value::Array(vec![other]),
    };

    if map.get(LIST_FLAG).and_then(Value::as_bool) == Some(true) {
        if let Some(Value::Array(items)) = map.get("items") {
            return Value::Array(items.clone());
        }
        return Value::Array(
            map.into_iter()
                .filter(|(key, _)| key != LIST_FLAG)
                .map(|(_, value)| value)
                .collect(),
        );
    }

    Value::Array(
        map.into_iter()
            .map(|(key, value)| {
                if key.to_ascii_lowercase().ends_with("block") {
                    let mut wrapper = JsonMap::new();
                    wrapper.insert(key, value);
                    Value::Object(wrapper)
                } else {
                    value
                }
            })
            .collect(),
    )
}
