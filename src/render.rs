//! Descriptor tree -> editable form document.

use serde_json::Value;

use crate::form::marker::{IS_DATE, IS_NUMBER, NO_DELETION, NO_DUPLICATION};
use crate::form::{FormDocument, FormNode, InputKind, ValueInput};
use crate::schema::{FieldDescriptor, FieldType, SchemaObject};

/// Render the root fields, in order.
pub fn render_form(schema: &SchemaObject) -> FormDocument {
    FormDocument::new(schema.fields.iter().map(render_field).collect())
}

/// Render one descriptor and everything below it.
pub fn render_field(field: &FieldDescriptor) -> FormNode {
    let label = field.shown_label();

    let mut node = match field.field_type {
        FieldType::Object => {
            FormNode::object(label, field.fields.iter().map(render_field).collect())
        }
        // An explicit `array` over plain values keeps them as raw data.
        FieldType::Array if field.data().is_some() => FormNode::list(label, list_items(field)),
        FieldType::Array => {
            FormNode::array(label, field.items().iter().map(render_field).collect())
        }
        FieldType::List => FormNode::list(label, list_items(field)),
        scalar => FormNode::leaf(label, scalar_input(field, scalar)),
    };
    // The label is for display; rebuilt data keys come from the name.
    node.name = Some(field.name.clone());

    match field.field_type {
        FieldType::Number => node.classes.add(IS_NUMBER),
        FieldType::Date => node.classes.add(IS_DATE),
        _ => {}
    }
    if field.no_duplication {
        node.classes.add(NO_DUPLICATION);
    }
    if field.no_deletion {
        node.classes.add(NO_DELETION);
    }
    node
}

fn scalar_input(field: &FieldDescriptor, field_type: FieldType) -> ValueInput {
    let data = field.data().unwrap_or(&Value::Null);

    let mut input = match field_type {
        FieldType::Checkbox => ValueInput::checkbox(data.as_bool().unwrap_or(false)),
        FieldType::Number => ValueInput::new(InputKind::Number, display(data)),
        FieldType::Date => ValueInput::new(InputKind::Date, display(data)),
        FieldType::Textarea => ValueInput::new(InputKind::Textarea, display(data)),
        FieldType::Url => ValueInput::new(InputKind::Url, display(data)),
        FieldType::Select => {
            let mut input = ValueInput::new(InputKind::Select, display(data));
            input.options.clone_from(&field.options);
            if !input.value.is_empty() && !input.options.contains(&input.value) {
                input.options.insert(0, input.value.clone());
            }
            input
        }
        _ => ValueInput::new(InputKind::Text, display(data)),
    };
    input.placeholder.clone_from(&field.placeholder);
    input
}

/// One list-item per entry; numbers and booleans keep their kinds.
fn list_items(field: &FieldDescriptor) -> Vec<ValueInput> {
    let Some(Value::Array(entries)) = field.data() else {
        return Vec::new();
    };
    entries
        .iter()
        .map(|entry| match entry {
            Value::Bool(checked) => ValueInput::checkbox(*checked),
            Value::Number(_) => ValueInput::new(InputKind::Number, display(entry)),
            _ => ValueInput::new(InputKind::Text, display(entry)),
        })
        .collect()
}

/// Text shown in an input: strings unquoted, `null` empty.
fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
