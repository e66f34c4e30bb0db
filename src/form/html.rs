//! Form markup: write a `FormDocument` as HTML and read it back with `tl`.
//!
//! The markup is the contract with whatever edits the form in a browser.
//! Every element is a `div.form-element`; its parts are found by class:
//!
//! ```text
//! div.form-element.is-object[data-name]
//! ├── input.object-name[value]
//! └── div.js-dropzone
//!     └── div.form-element[data-name]
//!         ├── label.element-label
//!         └── input.element-value[type][value]
//! ```
//!
//! `data-name` carries the data key, so relabelling never renames data.

use std::borrow::Cow;
use std::fmt::Write;

use super::marker::{
    ARRAY_NAME, DROPZONE, ELEMENT_LABEL, ELEMENT_VALUE, FORM, FORM_ELEMENT, IS_ARRAY, LIST_ITEM,
    OBJECT_NAME,
};
use super::{ClassList, Dropzone, FormDocument, FormError, FormNode, InputKind, ValueInput};
use crate::utils::html::{escape, escape_attr, unescape};

// ============================================================================
// Writing
// ============================================================================

/// Render `document` as a `<form class="smelter-form">` fragment.
pub fn to_html(document: &FormDocument) -> String {
    let mut out = String::with_capacity(1024);
    let _ = writeln!(out, r#"<form class="{FORM}">"#);
    for node in &document.elements {
        write_node(&mut out, node, 1);
    }
    out.push_str("</form>\n");
    out
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn write_node(out: &mut String, node: &FormNode, depth: usize) {
    indent(out, depth);
    let name = node
        .name
        .as_deref()
        .map(|n| format!(r#" data-name="{}""#, escape_attr(n)))
        .unwrap_or_default();
    let _ = writeln!(
        out,
        r#"<div class="{}"{name}>"#,
        escape_attr(&node.classes.to_string())
    );
    let inner = depth + 1;

    if let Some(label) = &node.label {
        indent(out, inner);
        let _ = writeln!(out, r#"<label class="{ELEMENT_LABEL}">{}</label>"#, escape(label));
    }
    if let Some(name) = &node.object_name {
        indent(out, inner);
        let _ = writeln!(
            out,
            r#"<input class="{OBJECT_NAME}" type="text" value="{}" />"#,
            escape_attr(name)
        );
    }
    if let Some(name) = &node.array_name {
        indent(out, inner);
        let _ = writeln!(out, r#"<span class="{ARRAY_NAME}">{}</span>"#, escape(name));
    }
    if let Some(input) = &node.value {
        indent(out, inner);
        write_input(out, input, ELEMENT_VALUE);
    }
    if !node.list_items.is_empty() {
        indent(out, inner);
        out.push_str("<ul class=\"list\">\n");
        for item in &node.list_items {
            indent(out, inner + 1);
            out.push_str("<li>");
            write_input(out, item, LIST_ITEM);
        }
        indent(out, inner);
        out.push_str("</ul>\n");
    }
    if let Some(zone) = &node.dropzone {
        indent(out, inner);
        let _ = writeln!(out, r#"<div class="{}">"#, escape_attr(&zone.classes.to_string()));
        for child in &zone.children {
            write_node(out, child, inner + 1);
        }
        indent(out, inner);
        out.push_str("</div>\n");
    }

    indent(out, depth);
    out.push_str("</div>\n");
}

/// One control; `role` is `element-value` or `list-item`. List items are
/// closed with `</li>` on the same line.
fn write_input(out: &mut String, input: &ValueInput, role: &str) {
    let mut classes = ClassList::from_iter([role]);
    for class in input.classes.iter() {
        classes.add(class);
    }
    let classes = escape_attr(&classes.to_string()).into_owned();
    let placeholder = input
        .placeholder
        .as_deref()
        .map(|p| format!(r#" placeholder="{}""#, escape_attr(p)))
        .unwrap_or_default();

    match input.kind {
        InputKind::Textarea => {
            let _ = write!(
                out,
                r#"<textarea class="{classes}"{placeholder}>{}</textarea>"#,
                escape(&input.value)
            );
        }
        InputKind::Select => {
            let _ = write!(out, r#"<select class="{classes}">"#);
            for option in &input.options {
                let selected = if *option == input.value { " selected" } else { "" };
                let _ = write!(
                    out,
                    r#"<option value="{}"{selected}>{}</option>"#,
                    escape_attr(option),
                    escape(option)
                );
            }
            out.push_str("</select>");
        }
        kind => {
            let checked = if input.checked { " checked" } else { "" };
            let _ = write!(
                out,
                r#"<input class="{classes}" type="{}" value="{}"{placeholder}{checked} />"#,
                kind.input_type(),
                escape_attr(&input.value)
            );
        }
    }

    if role == LIST_ITEM {
        out.push_str("</li>\n");
    } else {
        out.push('\n');
    }
}

// ============================================================================
// Reading
// ============================================================================

/// Parse form markup produced by [`to_html`] (or edited in a browser).
///
/// Elements are located by class; whitespace and unknown tags are ignored.
/// A container without a dropzone gets an empty one.
pub fn parse_html(html: &str) -> Result<FormDocument, FormError> {
    let dom = tl::parse(html, tl::ParserOptions::default())
        .map_err(|err| FormError::Html(format!("{err:?}")))?;
    let parser = dom.parser();

    let mut elements = Vec::new();
    for handle in dom.children() {
        collect_elements(*handle, parser, &mut elements);
    }
    Ok(FormDocument::new(elements))
}

/// Attribute value; `Some("")` for a bare attribute such as `checked`.
fn attr(tag: &tl::HTMLTag<'_>, name: &'static str) -> Option<String> {
    tag.attributes().get(name).map(|value| {
        value
            .map(|v| unescape(&v.as_utf8_str()).into_owned())
            .unwrap_or_default()
    })
}

fn classes_of(tag: &tl::HTMLTag<'_>) -> ClassList {
    attr(tag, "class").map(|c| ClassList::parse(&c)).unwrap_or_default()
}

fn text_of(tag: &tl::HTMLTag<'_>, parser: &tl::Parser<'_>) -> String {
    let raw: Cow<'_, str> = tag.inner_text(parser);
    unescape(&raw).into_owned()
}

fn tag_name(tag: &tl::HTMLTag<'_>) -> String {
    tag.name().as_utf8_str().to_ascii_lowercase()
}

/// Collect the outermost `.form-element` nodes under `handle`.
fn collect_elements(handle: tl::NodeHandle, parser: &tl::Parser<'_>, out: &mut Vec<FormNode>) {
    let Some(tl::Node::Tag(tag)) = handle.get(parser) else {
        return;
    };

    if classes_of(tag).contains(FORM_ELEMENT) {
        out.push(read_node(tag, parser));
        return;
    }
    for child in tag.children().top().iter() {
        collect_elements(*child, parser, out);
    }
}

fn read_node(tag: &tl::HTMLTag<'_>, parser: &tl::Parser<'_>) -> FormNode {
    let mut node = FormNode {
        classes: classes_of(tag),
        name: attr(tag, "data-name"),
        ..FormNode::default()
    };

    for child in tag.children().top().iter() {
        read_parts(*child, parser, &mut node);
    }

    if node.is_container() && node.dropzone.is_none() {
        node.dropzone = Some(Dropzone::new(node.classes.contains(IS_ARRAY), Vec::new()));
    }
    node
}

/// Fill `node` from the parts found under `handle`, without entering
/// nested form elements or the dropzone's content.
fn read_parts(handle: tl::NodeHandle, parser: &tl::Parser<'_>, node: &mut FormNode) {
    let Some(tl::Node::Tag(tag)) = handle.get(parser) else {
        return;
    };
    let classes = classes_of(tag);

    if classes.contains(FORM_ELEMENT) {
        return;
    }
    if classes.contains(DROPZONE) {
        if node.dropzone.is_none() {
            let mut children = Vec::new();
            for child in tag.children().top().iter() {
                collect_elements(*child, parser, &mut children);
            }
            node.dropzone = Some(Dropzone { classes, children });
        }
        return;
    }

    if classes.contains(ELEMENT_LABEL) {
        node.label = Some(text_of(tag, parser).trim().to_string());
    } else if classes.contains(OBJECT_NAME) {
        node.object_name = Some(attr(tag, "value").unwrap_or_default());
    } else if classes.contains(ARRAY_NAME) {
        node.array_name = Some(text_of(tag, parser).trim().to_string());
    } else if classes.contains(ELEMENT_VALUE) {
        node.value = Some(read_input(tag, parser, classes, ELEMENT_VALUE));
    } else if classes.contains(LIST_ITEM) {
        node.list_items.push(read_input(tag, parser, classes, LIST_ITEM));
    } else {
        for child in tag.children().top().iter() {
            read_parts(*child, parser, node);
        }
    }
}

fn read_input(
    tag: &tl::HTMLTag<'_>,
    parser: &tl::Parser<'_>,
    mut classes: ClassList,
    role: &str,
) -> ValueInput {
    classes.remove(role);
    let mut input = ValueInput {
        classes,
        placeholder: attr(tag, "placeholder"),
        ..ValueInput::default()
    };

    match tag_name(tag).as_str() {
        "textarea" => {
            input.kind = InputKind::Textarea;
            input.value = text_of(tag, parser);
        }
        "select" => {
            input.kind = InputKind::Select;
            for child in tag.children().top().iter() {
                let Some(tl::Node::Tag(option)) = child.get(parser) else {
                    continue;
                };
                if tag_name(option) != "option" {
                    continue;
                }
                let value = attr(option, "value").unwrap_or_else(|| text_of(option, parser));
                if attr(option, "selected").is_some() {
                    input.value.clone_from(&value);
                }
                input.options.push(value);
            }
        }
        _ => {
            input.kind = InputKind::from_input_type(&attr(tag, "type").unwrap_or_default());
            input.value = attr(tag, "value").unwrap_or_default();
            input.checked = attr(tag, "checked").is_some();
        }
    }
    input
}
