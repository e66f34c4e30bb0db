//! The form document tree.
//!
//! Stands in for the live DOM: every `FormNode` is one `.form-element`,
//! containers own a `Dropzone` with their children.

use smallvec::SmallVec;
use std::fmt;

use super::marker::{
    ARRAY_DROPZONE, ARRAY_LAST, DROPZONE, FORM_ELEMENT, IS_ARRAY, IS_LAST, IS_LIST, IS_OBJECT,
};
use super::{FormElement, FormError};

// ============================================================================
// ClassList
// ============================================================================

/// Ordered, duplicate-free set of class names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(SmallVec<[String; 4]>);

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whitespace-separated `class` attribute.
    pub fn parse(s: &str) -> Self {
        s.split_whitespace().collect()
    }

    #[inline]
    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    pub fn add(&mut self, class: &str) {
        if !self.contains(class) {
            self.0.push(class.to_string());
        }
    }

    pub fn remove(&mut self, class: &str) {
        self.0.retain(|c| c != class);
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for ClassList {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut list = Self::new();
        for class in iter {
            list.add(class);
        }
        list
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, class) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(class)?;
        }
        Ok(())
    }
}

// ============================================================================
// ValueInput
// ============================================================================

/// Kind of `.element-value` / `.list-item` control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputKind {
    #[default]
    Text,
    Textarea,
    Number,
    Checkbox,
    Date,
    Url,
    Select,
}

impl InputKind {
    /// The `type` attribute of an `<input>`; textarea and select are tags.
    pub const fn input_type(self) -> &'static str {
        match self {
            Self::Text | Self::Textarea | Self::Select => "text",
            Self::Number => "number",
            Self::Checkbox => "checkbox",
            Self::Date => "date",
            Self::Url => "url",
        }
    }

    pub fn from_input_type(ty: &str) -> Self {
        match ty.trim().to_ascii_lowercase().as_str() {
            "number" | "range" => Self::Number,
            "checkbox" => Self::Checkbox,
            "date" | "datetime-local" => Self::Date,
            "url" => Self::Url,
            _ => Self::Text,
        }
    }
}

/// An editable control holding one value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueInput {
    pub kind: InputKind,
    pub value: String,
    pub checked: bool,
    pub classes: ClassList,
    /// Choices of a select control.
    pub options: Vec<String>,
    pub placeholder: Option<String>,
}

impl ValueInput {
    pub fn new(kind: InputKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn checkbox(checked: bool) -> Self {
        Self {
            kind: InputKind::Checkbox,
            checked,
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.add(class);
        self
    }
}

// ============================================================================
// FormNode / Dropzone
// ============================================================================

/// Drop target holding one nesting level of container content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dropzone {
    pub classes: ClassList,
    pub children: Vec<FormNode>,
}

impl Dropzone {
    pub fn new(is_array: bool, children: Vec<FormNode>) -> Self {
        let mut classes = ClassList::from_iter([DROPZONE]);
        if is_array {
            classes.add(ARRAY_DROPZONE);
        }
        Self { classes, children }
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        self.classes.contains(ARRAY_DROPZONE)
    }
}

/// One `.form-element`.
#[derive(Debug, Clone, PartialEq)]
pub struct FormNode {
    pub classes: ClassList,
    /// Data key the element was rendered from (`data-name`). Rebuilt keys
    /// come from here, so a display label never renames the data.
    pub name: Option<String>,
    pub label: Option<String>,
    pub object_name: Option<String>,
    pub array_name: Option<String>,
    pub value: Option<ValueInput>,
    pub list_items: Vec<ValueInput>,
    pub dropzone: Option<Dropzone>,
}

impl Default for FormNode {
    fn default() -> Self {
        Self {
            classes: ClassList::from_iter([FORM_ELEMENT]),
            name: None,
            label: None,
            object_name: None,
            array_name: None,
            value: None,
            list_items: Vec::new(),
            dropzone: None,
        }
    }
}

impl FormNode {
    pub fn leaf(label: impl Into<String>, input: ValueInput) -> Self {
        Self {
            label: Some(label.into()),
            value: Some(input),
            ..Self::default()
        }
    }

    pub fn object(name: impl Into<String>, children: Vec<FormNode>) -> Self {
        let mut node = Self {
            object_name: Some(name.into()),
            dropzone: Some(Dropzone::new(false, children)),
            ..Self::default()
        };
        node.classes.add(IS_OBJECT);
        node
    }

    pub fn array(name: impl Into<String>, children: Vec<FormNode>) -> Self {
        let mut node = Self {
            array_name: Some(name.into()),
            dropzone: Some(Dropzone::new(true, children)),
            ..Self::default()
        };
        node.classes.add(IS_ARRAY);
        node
    }

    pub fn list(label: impl Into<String>, items: Vec<ValueInput>) -> Self {
        let mut node = Self {
            label: Some(label.into()),
            list_items: items,
            ..Self::default()
        };
        node.classes.add(IS_LIST);
        node
    }

    /// Synthetic container terminator.
    pub fn terminator(closes_array: bool) -> Self {
        let mut node = Self::default();
        node.classes.add(IS_LAST);
        if closes_array {
            node.classes.add(ARRAY_LAST);
        }
        node
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.add(class);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[inline]
    pub fn is_terminator(&self) -> bool {
        self.classes.contains(IS_LAST)
    }

    #[inline]
    pub fn is_container(&self) -> bool {
        self.classes.contains(IS_OBJECT) || self.classes.contains(IS_ARRAY)
    }

    /// The name shown for this element, whichever sub-node carries it.
    pub fn display_name(&self) -> &str {
        self.object_name
            .as_deref()
            .or(self.array_name.as_deref())
            .or(self.label.as_deref())
            .unwrap_or_default()
    }

    /// Rename through whichever sub-node carries the name. The data key
    /// follows the new name from then on.
    pub fn set_display_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.name = None;
        if self.object_name.is_some() {
            self.object_name = Some(name);
        } else if self.array_name.is_some() {
            self.array_name = Some(name);
        } else {
            self.label = Some(name);
        }
    }

    /// Children of this node's dropzone.
    pub fn children(&self) -> &[FormNode] {
        self.dropzone
            .as_ref()
            .map_or(&[][..], |zone| zone.children.as_slice())
    }
}

impl FormElement for FormNode {
    fn has_class(&self, class: &str) -> Result<bool, FormError> {
        Ok(self.classes.contains(class))
    }

    fn field_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn label_text(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn object_name(&self) -> Option<&str> {
        self.object_name.as_deref()
    }

    fn array_name(&self) -> Option<&str> {
        self.array_name.as_deref()
    }

    fn value_input(&self) -> Option<&ValueInput> {
        self.value.as_ref()
    }

    fn list_items(&self) -> &[ValueInput] {
        &self.list_items
    }
}

// ============================================================================
// FormDocument
// ============================================================================

/// A whole form: the top-level elements in render order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormDocument {
    pub elements: Vec<FormNode>,
}

impl FormDocument {
    pub fn new(elements: Vec<FormNode>) -> Self {
        Self { elements }
    }

    /// All form elements in document order: each element, then the
    /// contents of its dropzone.
    pub fn form_elements(&self) -> Vec<&FormNode> {
        let mut out = Vec::new();
        collect(&self.elements, &mut out);
        out
    }

    /// Append a terminator to every dropzone, marking array terminators.
    pub(super) fn inject_terminators(&mut self) {
        self.remove_terminators();
        inject(&mut self.elements);
    }

    /// Remove every synthetic terminator.
    pub(super) fn remove_terminators(&mut self) {
        remove(&mut self.elements);
    }

    pub fn count_terminators(&self) -> usize {
        self.form_elements()
            .iter()
            .filter(|node| node.is_terminator())
            .count()
    }
}

fn collect<'a>(nodes: &'a [FormNode], out: &mut Vec<&'a FormNode>) {
    for node in nodes {
        out.push(node);
        if let Some(zone) = &node.dropzone {
            collect(&zone.children, out);
        }
    }
}

fn inject(nodes: &mut [FormNode]) {
    for node in nodes {
        let is_array = node.classes.contains(IS_ARRAY);
        let Some(zone) = node.dropzone.as_mut() else {
            continue;
        };

        inject(&mut zone.children);
        zone.children.push(FormNode::terminator(zone.is_array()));

        // Arrays close with `array-last` even when the dropzone lost its
        // array class.
        if is_array && let Some(last) = zone.children.last_mut() {
            last.classes.add(ARRAY_LAST);
        }
    }
}

fn remove(nodes: &mut Vec<FormNode>) {
    nodes.retain(|node| !node.is_terminator());
    for node in nodes {
        if let Some(zone) = node.dropzone.as_mut() {
            remove(&mut zone.children);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FormDocument {
        FormDocument::new(vec![
            FormNode::leaf("Title", ValueInput::new(InputKind::Text, "T")),
            FormNode::object(
                "Author",
                vec![FormNode::leaf("Name", ValueInput::new(InputKind::Text, "A"))],
            ),
            FormNode::array(
                "Links",
                vec![FormNode::leaf("Item 1", ValueInput::new(InputKind::Url, "/"))],
            ),
        ])
    }

    #[test]
    fn test_class_list() {
        let mut classes = ClassList::parse("form-element  is-object form-element");
        assert_eq!(classes.to_string(), "form-element is-object");
        classes.add("is-last");
        classes.remove("is-object");
        assert!(classes.contains("is-last"));
        assert!(!classes.contains("is-object"));
    }

    #[test]
    fn test_form_elements_document_order() {
        let doc = sample();
        let names: Vec<_> = doc.form_elements().iter().map(|n| n.display_name()).collect();
        assert_eq!(names, ["Title", "Author", "Name", "Links", "Item 1"]);
    }

    #[test]
    fn test_inject_and_remove_terminators() {
        let mut doc = sample();
        doc.inject_terminators();
        assert_eq!(doc.count_terminators(), 2);

        let author = &doc.elements[1];
        let last = author.children().last().unwrap();
        assert!(last.is_terminator());
        assert!(!last.classes.contains(ARRAY_LAST));

        let links = &doc.elements[2];
        assert!(links.children().last().unwrap().classes.contains(ARRAY_LAST));

        doc.remove_terminators();
        assert_eq!(doc, sample());
    }

    #[test]
    fn test_inject_is_idempotent() {
        let mut doc = sample();
        doc.inject_terminators();
        doc.inject_terminators();
        assert_eq!(doc.count_terminators(), 2);
    }

    #[test]
    fn test_array_without_array_dropzone_still_closes_as_array() {
        let mut node = FormNode::array("Tags", Vec::new());
        if let Some(zone) = node.dropzone.as_mut() {
            zone.classes.remove(ARRAY_DROPZONE);
        }
        let mut doc = FormDocument::new(vec![node]);
        doc.inject_terminators();
        let terminator = doc.elements[0].children().last().unwrap();
        assert!(terminator.classes.contains(ARRAY_LAST));
    }

    #[test]
    fn test_set_display_name() {
        let mut object = FormNode::object("Author", Vec::new());
        object.set_display_name("Item 2");
        assert_eq!(object.object_name.as_deref(), Some("Item 2"));

        let mut leaf = FormNode::leaf("Title", ValueInput::default());
        leaf.set_display_name("Item 1");
        assert_eq!(leaf.label.as_deref(), Some("Item 1"));
    }
}
