//! The reconstruction reducer: classify each element, dispatch to its
//! handler, fold.

use super::marker::{ARRAY_LAST, IS_ARRAY, IS_LAST, IS_LIST, IS_OBJECT};
use super::state::{
    TraversalState, handle_array_conversion, handle_list, handle_object_end, handle_structural,
    handle_value,
};
use super::{FormElement, FormError};
use crate::schema::JsonMap;
use crate::{debug, log};

/// What an element does to the traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `array-last` terminator.
    ArrayEnd,
    /// Plain `is-last` terminator.
    ObjectEnd,
    /// `is-object` / `is-array` opening element.
    Open,
    /// `is-list` element.
    List,
    /// Leaf directly under `main`.
    RootLeaf,
    /// Leaf inside a container.
    Leaf,
}

/// Classify `element` at the given path depth.
pub fn classify<E: FormElement + ?Sized>(
    element: &E,
    depth: usize,
) -> Result<ElementKind, FormError> {
    if element.has_class(ARRAY_LAST)? {
        return Ok(ElementKind::ArrayEnd);
    }
    if element.has_class(IS_LAST)? {
        return Ok(ElementKind::ObjectEnd);
    }
    if element.has_class(IS_OBJECT)? || element.has_class(IS_ARRAY)? {
        return Ok(ElementKind::Open);
    }
    if element.has_class(IS_LIST)? {
        return Ok(ElementKind::List);
    }
    if depth == 1 {
        Ok(ElementKind::RootLeaf)
    } else {
        Ok(ElementKind::Leaf)
    }
}

fn step<E: FormElement + ?Sized>(
    state: TraversalState,
    element: &E,
) -> Result<TraversalState, FormError> {
    match classify(element, state.depth())? {
        ElementKind::ArrayEnd => handle_array_conversion(state),
        ElementKind::ObjectEnd => handle_object_end(state),
        ElementKind::Open => handle_structural(state, element),
        ElementKind::List => handle_list(state, element),
        ElementKind::RootLeaf | ElementKind::Leaf => handle_value(state, element),
    }
}

/// Rebuild the data object from a terminated element sequence.
///
/// Fails on the first broken element, and when the sequence does not
/// return to the root.
pub fn try_transform<'a, E, I>(elements: I) -> Result<JsonMap, FormError>
where
    E: FormElement + ?Sized + 'a,
    I: IntoIterator<Item = &'a E>,
{
    let state = elements
        .into_iter()
        .try_fold(TraversalState::new(), |state, element| step(state, element))?;

    if !state.is_balanced() {
        return Err(FormError::Unbalanced {
            path: state.path.join("."),
        });
    }

    debug!("form"; "rebuilt {} top-level keys", state.result["main"].as_object().map_or(0, |m| m.len()));
    Ok(state.into_main())
}

/// Rebuild the data object, or `None` when the form cannot be read.
///
/// Errors are logged here; `None` means "do not persist".
pub fn transform_form_elements_to_object<'a, E, I>(elements: I) -> Option<JsonMap>
where
    E: FormElement + ?Sized + 'a,
    I: IntoIterator<Item = &'a E>,
{
    match try_transform(elements) {
        Ok(map) => Some(map),
        Err(err) => {
            log!("error"; "could not rebuild data from form: {}", err);
            None
        }
    }
}
