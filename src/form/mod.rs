//! Form -> data reconstruction.
//!
//! A rendered form is a tree of form elements; reconstruction walks it as
//! a flat, document-ordered sequence in which containers are opened by
//! `is-object` / `is-array` elements and closed by synthetic `is-last`
//! terminators. A single pass with a path stack rebuilds the nested data.
//!
//! # Module Structure
//!
//! ```text
//! form/
//! ├── node.rs        # FormDocument / FormNode tree, class lists
//! ├── value.rs       # key/name extraction and value coercion
//! ├── path.rs        # immutable path and nested-object helpers
//! ├── state.rs       # traversal state and per-element handlers
//! ├── transform.rs   # classification + fold over the sequence
//! ├── preprocess.rs  # terminator injection with guaranteed cleanup
//! ├── html.rs        # HTML read/write via `tl`
//! ├── edit.rs        # set / duplicate / remove / move
//! └── error.rs       # FormError
//! ```
//!
//! # Markers
//!
//! | Class            | Meaning                                         |
//! |------------------|-------------------------------------------------|
//! | `is-object`      | opens an object container                       |
//! | `is-array`       | opens an array container                        |
//! | `is-list`        | simple list, values in `.list-item` inputs      |
//! | `is-last`        | synthetic container terminator                  |
//! | `array-last`     | synthetic terminator that closes an array       |

mod edit;
mod error;
pub mod html;
mod node;
pub mod path;
mod preprocess;
pub mod state;
mod transform;
pub mod value;

pub use edit::NodePath;
pub use error::FormError;
pub use node::{ClassList, Dropzone, FormDocument, FormNode, InputKind, ValueInput};
pub use preprocess::{preprocess_form_data, try_preprocess_form_data};
pub use transform::{ElementKind, classify, transform_form_elements_to_object, try_transform};

#[cfg(test)]
mod tests;

/// Structural and type class names used by the form markup.
pub mod marker {
    pub const FORM: &str = "smelter-form";
    pub const FORM_ELEMENT: &str = "form-element";
    pub const IS_OBJECT: &str = "is-object";
    pub const IS_ARRAY: &str = "is-array";
    pub const IS_LIST: &str = "is-list";
    pub const IS_LAST: &str = "is-last";
    pub const ARRAY_LAST: &str = "array-last";
    pub const IS_NUMBER: &str = "is-number";
    pub const IS_DATE: &str = "is-date";
    pub const DROPZONE: &str = "js-dropzone";
    pub const ARRAY_DROPZONE: &str = "array-dropzone";
    pub const NO_DUPLICATION: &str = "no-duplication";
    pub const NO_DELETION: &str = "no-deletion";

    pub const ELEMENT_LABEL: &str = "element-label";
    pub const ELEMENT_VALUE: &str = "element-value";
    pub const OBJECT_NAME: &str = "object-name";
    pub const ARRAY_NAME: &str = "array-name";
    pub const LIST_ITEM: &str = "list-item";
}

/// Read access to one form element, as the reducer sees it.
///
/// Only class checks are fallible: a broken element surfaces as an error
/// that aborts the whole reconstruction.
pub trait FormElement {
    fn has_class(&self, class: &str) -> Result<bool, FormError>;

    /// The data key carried by the element, if it was rendered with one.
    fn field_name(&self) -> Option<&str> {
        None
    }

    /// Text of the `.element-label` sub-node.
    fn label_text(&self) -> Option<&str>;

    /// Value of the `.object-name` input.
    fn object_name(&self) -> Option<&str>;

    /// Text of the `.array-name` sub-node.
    fn array_name(&self) -> Option<&str>;

    /// The `.element-value` input.
    fn value_input(&self) -> Option<&ValueInput>;

    /// `.list-item` inputs in order.
    fn list_items(&self) -> &[ValueInput];
}
