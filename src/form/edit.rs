//! Structural edits on a form document.
//!
//! Elements are addressed by [`NodePath`]: the index among the top-level
//! elements, then the index inside each dropzone on the way down. Edits
//! honour the `no-duplication` / `no-deletion` flags and keep the
//! `Item n` labels of array items sequential.

use std::fmt;

use super::marker::{NO_DELETION, NO_DUPLICATION};
use super::{FormDocument, FormError, FormNode, InputKind};

/// Position of an element in a [`FormDocument`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn new(indices: impl Into<Vec<usize>>) -> Self {
        Self(indices.into())
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Path of the `index`-th child inside this element's dropzone.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Parent indices and the index within the parent.
    fn split(&self) -> Option<(&[usize], usize)> {
        self.0.split_last().map(|(last, parent)| (parent, *last))
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for index in &self.0 {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

impl FormDocument {
    pub fn node(&self, path: &NodePath) -> Option<&FormNode> {
        let (first, rest) = path.0.split_first()?;
        let mut node = self.elements.get(*first)?;
        for &index in rest {
            node = node.dropzone.as_ref()?.children.get(index)?;
        }
        Some(node)
    }

    pub fn node_mut(&mut self, path: &NodePath) -> Option<&mut FormNode> {
        let (first, rest) = path.0.split_first()?;
        let mut node = self.elements.get_mut(*first)?;
        for &index in rest {
            node = node.dropzone.as_mut()?.children.get_mut(index)?;
        }
        Some(node)
    }

    /// First element, in document order, whose shown name is `label`.
    pub fn find_by_label(&self, label: &str) -> Option<NodePath> {
        find_in(&self.elements, label, &mut Vec::new())
    }

    /// Replace the value of a leaf. Checkboxes accept `true`, `on` or `1`.
    pub fn set_value(&mut self, path: &NodePath, value: &str) -> Result<(), FormError> {
        let input = self
            .node_mut(path)
            .and_then(|node| node.value.as_mut())
            .ok_or_else(|| FormError::InvalidPath(path.clone()))?;

        if input.kind == InputKind::Checkbox {
            input.checked = matches!(value.trim(), "true" | "on" | "1");
        } else {
            input.value = value.to_string();
        }
        Ok(())
    }

    /// Insert a copy of the element right after it and return the copy's
    /// path. Copies outside arrays get a ` Copy` suffix.
    pub fn duplicate(&mut self, path: &NodePath) -> Result<NodePath, FormError> {
        let node = self
            .node(path)
            .ok_or_else(|| FormError::InvalidPath(path.clone()))?;
        refuse_if(node, NO_DUPLICATION, "duplication")?;

        let mut copy = node.clone();
        let (parent, index) = path.split().ok_or_else(|| FormError::InvalidPath(path.clone()))?;
        let (siblings, in_array) = self
            .siblings_mut(parent)
            .ok_or_else(|| FormError::InvalidPath(path.clone()))?;

        if !in_array {
            let name = format!("{} Copy", copy.display_name());
            copy.set_display_name(name);
        }
        siblings.insert(index + 1, copy);
        if in_array {
            renumber(siblings);
        }

        Ok(NodePath::new(parent.to_vec()).child(index + 1))
    }

    /// Remove the element and return it.
    pub fn remove(&mut self, path: &NodePath) -> Result<FormNode, FormError> {
        let node = self
            .node(path)
            .ok_or_else(|| FormError::InvalidPath(path.clone()))?;
        refuse_if(node, NO_DELETION, "deletion")?;

        let (parent, index) = path.split().ok_or_else(|| FormError::InvalidPath(path.clone()))?;
        let (siblings, in_array) = self
            .siblings_mut(parent)
            .ok_or_else(|| FormError::InvalidPath(path.clone()))?;
        let removed = siblings.remove(index);
        if in_array {
            renumber(siblings);
        }
        Ok(removed)
    }

    /// Move the element at `from` so that it ends up at `to`, where `to`
    /// is read against the document before the move. Returns the final
    /// path of the moved element.
    pub fn move_node(&mut self, from: &NodePath, to: &NodePath) -> Result<NodePath, FormError> {
        if self.node(from).is_none() {
            return Err(FormError::InvalidPath(from.clone()));
        }
        if to.0.starts_with(&from.0) {
            return Err(FormError::InvalidPath(to.clone()));
        }

        let (from_parent, from_index) =
            from.split().ok_or_else(|| FormError::InvalidPath(from.clone()))?;
        let target = shift_after_removal(from, to);
        let (to_parent, to_index) = target
            .split()
            .ok_or_else(|| FormError::InvalidPath(to.clone()))?;

        let (siblings, in_array) = self
            .siblings_mut(from_parent)
            .ok_or_else(|| FormError::InvalidPath(from.clone()))?;
        let node = siblings.remove(from_index);
        if in_array {
            renumber(siblings);
        }

        match self.siblings_mut(to_parent) {
            Some((siblings, in_array)) if to_index <= siblings.len() => {
                siblings.insert(to_index, node);
                if in_array {
                    renumber(siblings);
                }
                Ok(target)
            }
            _ => {
                // Put it back where it was.
                if let Some((siblings, in_array)) = self.siblings_mut(from_parent) {
                    siblings.insert(from_index, node);
                    if in_array {
                        renumber(siblings);
                    }
                }
                Err(FormError::InvalidPath(to.clone()))
            }
        }
    }

    /// The sibling list under `parent`, and whether it is an array dropzone.
    fn siblings_mut(&mut self, parent: &[usize]) -> Option<(&mut Vec<FormNode>, bool)> {
        if parent.is_empty() {
            return Some((&mut self.elements, false));
        }
        let zone = self.node_mut(&NodePath::new(parent.to_vec()))?.dropzone.as_mut()?;
        let in_array = zone.is_array();
        Some((&mut zone.children, in_array))
    }
}

fn refuse_if(node: &FormNode, class: &str, action: &'static str) -> Result<(), FormError> {
    if node.classes.contains(class) {
        return Err(FormError::Refused {
            label: node.display_name().to_string(),
            action,
        });
    }
    Ok(())
}

fn find_in(nodes: &[FormNode], label: &str, trail: &mut Vec<usize>) -> Option<NodePath> {
    for (index, node) in nodes.iter().enumerate() {
        trail.push(index);
        if node.display_name() == label {
            return Some(NodePath::new(trail.clone()));
        }
        if let Some(found) = find_in(node.children(), label, trail) {
            return Some(found);
        }
        trail.pop();
    }
    None
}

/// `to` adjusted for the removal of `from`: a later sibling of `from` (or
/// anything below one) moves up by one.
fn shift_after_removal(from: &NodePath, to: &NodePath) -> NodePath {
    let Some((parent, index)) = from.split() else {
        return to.clone();
    };
    let depth = parent.len();
    let mut shifted = to.0.clone();
    if shifted.len() > depth && shifted[..depth] == *parent && shifted[depth] > index {
        shifted[depth] -= 1;
    }
    NodePath(shifted)
}

/// Relabel array items `Item 1..n`, leaving custom names alone.
fn renumber(items: &mut [FormNode]) {
    for (i, item) in items.iter_mut().enumerate() {
        if is_item_label(item.display_name()) {
            item.set_display_name(format!("Item {}", i + 1));
        }
    }
}

fn is_item_label(name: &str) -> bool {
    name.strip_prefix("Item ")
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::ValueInput;

    fn text(label: &str, value: &str) -> FormNode {
        FormNode::leaf(label, ValueInput::new(InputKind::Text, value))
    }

    fn sample() -> FormDocument {
        FormDocument::new(vec![
            text("Title", "T").with_class(NO_DELETION),
            FormNode::array(
                "Links",
                vec![text("Item 1", "/a"), text("Item 2", "/b"), text("Item 3", "/c")],
            )
            .with_class(NO_DUPLICATION),
            FormNode::object("Author", vec![text("Name", "Ada")]),
        ])
    }

    fn labels(doc: &FormDocument, path: &[usize]) -> Vec<String> {
        doc.node(&NodePath::new(path.to_vec()))
            .unwrap()
            .children()
            .iter()
            .map(|n| n.display_name().to_string())
            .collect()
    }

    #[test]
    fn test_node_path_display() {
        assert_eq!(NodePath::default().to_string(), "/");
        assert_eq!(NodePath::new(vec![1, 0]).to_string(), "/1/0");
    }

    #[test]
    fn test_find_by_label() {
        let doc = sample();
        assert_eq!(doc.find_by_label("Name"), Some(NodePath::new(vec![2, 0])));
        assert_eq!(doc.find_by_label("Item 2"), Some(NodePath::new(vec![1, 1])));
        assert_eq!(doc.find_by_label("Missing"), None);
    }

    #[test]
    fn test_set_value() {
        let mut doc = sample();
        let path = doc.find_by_label("Name").unwrap();
        doc.set_value(&path, "Grace").unwrap();
        assert_eq!(doc.node(&path).unwrap().value.as_ref().unwrap().value, "Grace");

        let links = NodePath::new(vec![1]);
        assert!(matches!(
            doc.set_value(&links, "x"),
            Err(FormError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_set_checkbox_value() {
        let mut doc = FormDocument::new(vec![FormNode::leaf("Draft", ValueInput::checkbox(false))]);
        let path = NodePath::new(vec![0]);
        doc.set_value(&path, "on").unwrap();
        assert!(doc.node(&path).unwrap().value.as_ref().unwrap().checked);
    }

    #[test]
    fn test_duplicate_array_item_renumbers() {
        let mut doc = sample();
        let copy = doc.duplicate(&NodePath::new(vec![1, 0])).unwrap();
        assert_eq!(copy, NodePath::new(vec![1, 1]));
        assert_eq!(labels(&doc, &[1]), ["Item 1", "Item 2", "Item 3", "Item 4"]);
        assert_eq!(doc.node(&copy).unwrap().value.as_ref().unwrap().value, "/a");
    }

    #[test]
    fn test_duplicate_outside_array_adds_suffix() {
        let mut doc = sample();
        let copy = doc.duplicate(&NodePath::new(vec![2, 0])).unwrap();
        assert_eq!(doc.node(&copy).unwrap().display_name(), "Name Copy");
    }

    #[test]
    fn test_flags_refuse_edits() {
        let mut doc = sample();
        assert!(matches!(
            doc.duplicate(&NodePath::new(vec![1])),
            Err(FormError::Refused { action: "duplication", .. })
        ));
        assert!(matches!(
            doc.remove(&NodePath::new(vec![0])),
            Err(FormError::Refused { action: "deletion", .. })
        ));
        assert_eq!(doc, sample());
    }

    #[test]
    fn test_remove_renumbers() {
        let mut doc = sample();
        let removed = doc.remove(&NodePath::new(vec![1, 0])).unwrap();
        assert_eq!(removed.value.unwrap().value, "/a");
        assert_eq!(labels(&doc, &[1]), ["Item 1", "Item 2"]);
    }

    #[test]
    fn test_move_within_array() {
        let mut doc = sample();
        let moved = doc
            .move_node(&NodePath::new(vec![1, 0]), &NodePath::new(vec![1, 3]))
            .unwrap();
        assert_eq!(moved, NodePath::new(vec![1, 2]));
        let values: Vec<_> = doc.node(&NodePath::new(vec![1])).unwrap().children()
            .iter()
            .map(|n| n.value.as_ref().unwrap().value.clone())
            .collect();
        assert_eq!(values, ["/b", "/c", "/a"]);
        assert_eq!(labels(&doc, &[1]), ["Item 1", "Item 2", "Item 3"]);
    }

    #[test]
    fn test_move_across_containers() {
        let mut doc = sample();
        let moved = doc
            .move_node(&NodePath::new(vec![0]), &NodePath::new(vec![2, 1]))
            .unwrap();
        assert_eq!(moved, NodePath::new(vec![1, 1]));
        assert_eq!(doc.elements.len(), 2);
        assert_eq!(labels(&doc, &[1]), ["Name", "Title"]);
    }

    #[test]
    fn test_move_into_itself_is_rejected() {
        let mut doc = sample();
        assert!(doc
            .move_node(&NodePath::new(vec![2]), &NodePath::new(vec![2, 0]))
            .is_err());
        assert_eq!(doc, sample());
    }

    #[test]
    fn test_move_to_missing_parent_restores() {
        let mut doc = sample();
        assert!(doc
            .move_node(&NodePath::new(vec![1, 2]), &NodePath::new(vec![0, 0]))
            .is_err());
        assert_eq!(doc, sample());
    }
}
