//! Schema inference: frontmatter data -> field descriptor tree.
//!
//! # Module Structure
//!
//! ```text
//! schema/
//! ├── infer.rs    # infer_type, simple list / date detection
//! ├── field.rs    # match_schema_field, create_field
//! ├── convert.rs  # convert_to_schema_object (entry point)
//! └── mod.rs      # descriptor types (this file)
//! ```
//!
//! The descriptor tree drives form rendering. Object children live in
//! `fields`, array children live in `value` as descriptors, scalars and
//! simple lists keep their raw data in `value`.

mod convert;
mod field;
mod infer;

pub use convert::{convert_to_schema_object, restore_root_shape};
pub use field::{create_field, match_schema_field};
pub use infer::{infer_type, is_date_value, is_simple_list};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A JSON object map, insertion ordered.
pub type JsonMap = serde_json::Map<String, Value>;

// ============================================================================
// FieldType
// ============================================================================

/// Field kind, decides rendering and value coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    Checkbox,
    Date,
    Select,
    Url,
    Object,
    Array,
    List,
}

impl FieldType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Number => "number",
            Self::Checkbox => "checkbox",
            Self::Date => "date",
            Self::Select => "select",
            Self::Url => "url",
            Self::Object => "object",
            Self::Array => "array",
            Self::List => "list",
        }
    }

    /// Object, array and list fields hold other values.
    #[inline]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Object | Self::Array | Self::List)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// FieldDescriptor
// ============================================================================

/// Current data carried by a descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Array children, one descriptor per item.
    Items(Vec<FieldDescriptor>),
    /// Raw data: scalars and simple lists.
    Data(Value),
}

/// One form field: metadata plus its current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Human-readable, title-cased name.
    pub label: String,
    /// Machine key, unique within its parent.
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,
    /// Children of an `object` field, in render order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Choices for `select` fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default)]
    pub no_duplication: bool,
    #[serde(default)]
    pub no_deletion: bool,
    /// Matched against a user-supplied schema entry.
    #[serde(default)]
    pub is_explicit: bool,
    /// Label shown instead of `label` (array items: `Item 1`, `Item 2`, ...).
    #[serde(
        rename = "_displayLabel",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub display_label: Option<String>,
}

impl FieldDescriptor {
    pub fn new(label: impl Into<String>, name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            label: label.into(),
            name: name.into(),
            field_type,
            value: None,
            fields: Vec::new(),
            placeholder: None,
            options: Vec::new(),
            no_duplication: false,
            no_deletion: false,
            is_explicit: false,
            display_label: None,
        }
    }

    /// The label a renderer should show.
    pub fn shown_label(&self) -> &str {
        self.display_label.as_deref().unwrap_or(&self.label)
    }

    /// Raw data value, if this descriptor carries one.
    pub fn data(&self) -> Option<&Value> {
        match &self.value {
            Some(FieldValue::Data(value)) => Some(value),
            _ => None,
        }
    }

    /// Array children, empty for non-array descriptors.
    pub fn items(&self) -> &[FieldDescriptor] {
        match &self.value {
            Some(FieldValue::Items(items)) => items,
            _ => &[],
        }
    }

    /// Rebuild the data value this descriptor (and its children) describe.
    ///
    /// Inverse of [`create_field`] for inferred fields; used to verify the
    /// descriptor tree before rendering.
    pub fn to_value(&self) -> Value {
        match self.field_type {
            FieldType::Object if self.data().is_none() => Value::Object(
                self.fields
                    .iter()
                    .map(|f| (f.name.clone(), f.to_value()))
                    .collect(),
            ),
            _ => match &self.value {
                Some(FieldValue::Items(items)) => {
                    Value::Array(items.iter().map(FieldDescriptor::to_value).collect())
                }
                Some(FieldValue::Data(value)) => value.clone(),
                None => Value::Null,
            },
        }
    }
}

/// Output of schema inference: the root field list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaObject {
    pub fields: Vec<FieldDescriptor>,
}

impl SchemaObject {
    /// Rebuild the data object described by the root fields.
    pub fn to_map(&self) -> JsonMap {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.to_value()))
            .collect()
    }
}

// ============================================================================
// SchemaField (explicit schema entry)
// ============================================================================

/// A user-authored schema entry overriding inferred metadata.
///
/// Nested `fields` stay raw JSON so malformed child entries are filtered
/// at match time rather than rejecting the whole entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaField {
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: Option<FieldType>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub fields: Option<Value>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub no_duplication: Option<bool>,
    #[serde(default)]
    pub no_deletion: Option<bool>,
}
