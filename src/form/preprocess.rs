//! Terminator injection around the reducer.
//!
//! The reducer has no lookahead, so every dropzone gets a synthetic
//! `is-last` child (plus `array-last` for arrays) before the walk. The
//! markers are owned by a guard and removed when it drops, on success and
//! on failure alike.

use super::{FormDocument, FormError, try_transform};
use crate::log;
use crate::schema::JsonMap;

/// Holds a document with terminators injected; removes them on drop.
struct TerminatorGuard<'a> {
    document: &'a mut FormDocument,
}

impl<'a> TerminatorGuard<'a> {
    fn inject(document: &'a mut FormDocument) -> Self {
        document.inject_terminators();
        Self { document }
    }

    fn document(&self) -> &FormDocument {
        self.document
    }
}

impl Drop for TerminatorGuard<'_> {
    fn drop(&mut self) {
        self.document.remove_terminators();
    }
}

/// Terminate, walk and clean up, returning the reason on failure.
pub fn try_preprocess_form_data(document: &mut FormDocument) -> Result<JsonMap, FormError> {
    let guard = TerminatorGuard::inject(document);
    let result = try_transform(guard.document().form_elements());
    drop(guard);
    result
}

/// Rebuild the data object behind `document`, or `None` after logging.
///
/// The document is left exactly as it was passed in.
pub fn preprocess_form_data(document: &mut FormDocument) -> Option<JsonMap> {
    match try_preprocess_form_data(document) {
        Ok(map) => Some(map),
        Err(err) => {
            log!("error"; "form data could not be processed: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FormNode, InputKind, ValueInput};
    use serde_json::{Value, json};

    #[test]
    fn test_preprocess_nested() {
        let mut doc = FormDocument::new(vec![
            FormNode::leaf("Title", ValueInput::new(InputKind::Text, "T")),
            FormNode::object(
                "Seo",
                vec![
                    FormNode::leaf("Description", ValueInput::new(InputKind::Textarea, "d")),
                    FormNode::array(
                        "Images",
                        vec![FormNode::leaf("Item 1", ValueInput::new(InputKind::Url, "/i.png"))],
                    ),
                ],
            ),
            FormNode::leaf("Draft", ValueInput::checkbox(false)),
        ]);
        let before = doc.clone();

        let result = preprocess_form_data(&mut doc).unwrap();
        assert_eq!(
            Value::Object(result),
            json!({
                "title": "T",
                "seo": {"description": "d", "images": ["/i.png"]},
                "draft": false
            })
        );
        assert_eq!(doc, before);
        assert_eq!(doc.count_terminators(), 0);
    }

    #[test]
    fn test_cleanup_after_failure() {
        let mut doc = FormDocument::new(vec![FormNode::object(
            "Event",
            vec![FormNode::leaf("When", ValueInput::new(InputKind::Date, "not a date"))],
        )]);
        let before = doc.clone();

        assert!(matches!(
            try_preprocess_form_data(&mut doc),
            Err(FormError::InvalidDate(_))
        ));
        assert!(preprocess_form_data(&mut doc).is_none());
        assert_eq!(doc, before);
        assert_eq!(doc.count_terminators(), 0);
    }

    #[test]
    fn test_repeated_runs_do_not_accumulate_markers() {
        let mut doc = FormDocument::new(vec![FormNode::array("Tags", Vec::new())]);
        for _ in 0..3 {
            let result = preprocess_form_data(&mut doc).unwrap();
            assert_eq!(Value::Object(result), json!({"tags": []}));
        }
        assert_eq!(doc.count_terminators(), 0);
    }

    #[test]
    fn test_empty_object_keeps_key() {
        let mut doc = FormDocument::new(vec![FormNode::object("Extra", Vec::new())]);
        let result = preprocess_form_data(&mut doc).unwrap();
        assert_eq!(Value::Object(result), json!({"extra": {}}));
    }
}
