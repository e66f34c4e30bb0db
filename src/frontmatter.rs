//! Frontmatter I/O: the data behind a form, read from and written back to
//! its source file.
//!
//! | File               | Data                               |
//! |--------------------|------------------------------------|
//! | `*.json`           | the whole file                     |
//! | `---` fenced       | YAML frontmatter, rest is the body |
//! | `+++` fenced       | TOML frontmatter, rest is the body |
//! | anything else      | `{}`, whole file is the body       |

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::schema::JsonMap;

/// Serialization of the data part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Yaml,
    Toml,
    Json,
}

/// A parsed source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub data: Value,
    /// Content after the frontmatter; empty for JSON files.
    pub body: String,
    pub format: Format,
    /// The whole file is data (`*.json`).
    pub standalone: bool,
}

impl Document {
    /// Same file with new data.
    pub fn with_data(&self, data: Value) -> Self {
        Self {
            data,
            ..self.clone()
        }
    }
}

pub fn read_document(path: &Path) -> Result<Document> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_document(path, &content).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn write_document(path: &Path, document: &Document) -> Result<()> {
    let content = serialize_document(document)?;
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

/// Parse `content`; `path` only decides whether the file is plain JSON.
pub fn parse_document(path: &Path, content: &str) -> Result<Document> {
    if is_json_path(path) {
        let data = serde_json::from_str(content).context("invalid JSON")?;
        return Ok(Document {
            data,
            body: String::new(),
            format: Format::Json,
            standalone: true,
        });
    }

    let Some((format, raw, body)) = split_frontmatter(content) else {
        return Ok(Document {
            data: Value::Object(JsonMap::new()),
            body: content.to_string(),
            format: Format::Yaml,
            standalone: false,
        });
    };

    let data = if raw.trim().is_empty() {
        Value::Null
    } else {
        match format {
            Format::Toml => toml_to_json(toml::from_str(raw).context("invalid TOML frontmatter")?),
            _ => serde_yaml::from_str(raw).context("invalid YAML frontmatter")?,
        }
    };

    Ok(Document {
        data: if data.is_null() { Value::Object(JsonMap::new()) } else { data },
        body: body.to_string(),
        format,
        standalone: false,
    })
}

/// Render a document back to file content.
///
/// JSON files stay JSON. Frontmatter uses `document.format`; JSON there is
/// written between `---` fences, where it reads back as YAML.
pub fn serialize_document(document: &Document) -> Result<String> {
    if document.standalone {
        let mut out = serde_json::to_string_pretty(&document.data)?;
        out.push('\n');
        return Ok(out);
    }

    let (fence, data) = match document.format {
        Format::Yaml => ("---", serde_yaml::to_string(&document.data)?),
        Format::Toml => (
            "+++",
            toml::to_string(&strip_nulls(document.data.clone()))
                .context("data cannot be written as TOML")?,
        ),
        Format::Json => {
            let mut json = serde_json::to_string_pretty(&document.data)?;
            json.push('\n');
            ("---", json)
        }
    };

    let mut out = String::with_capacity(data.len() + document.body.len() + 8);
    out.push_str(fence);
    out.push('\n');
    out.push_str(&data);
    if !data.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(fence);
    out.push('\n');
    out.push_str(&document.body);
    Ok(out)
}

fn is_json_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// `(format, frontmatter, body)` when `content` opens with a fence.
fn split_frontmatter(content: &str) -> Option<(Format, &str, &str)> {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();
    let (fence, format) = if trimmed.starts_with("---") {
        ("---", Format::Yaml)
    } else if trimmed.starts_with("+++") {
        ("+++", Format::Toml)
    } else {
        return None;
    };

    let rest = &trimmed[3..];
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let end = if rest.starts_with(fence) {
        0
    } else {
        rest.find(&format!("\n{fence}"))? + 1
    };

    let after = &rest[end + fence.len()..];
    let body = after.find('\n').map_or("", |i| &after[i + 1..]);
    Some((format, &rest[..end], body))
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

/// TOML has no null: drop null entries and array items.
fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|v| !v.is_null())
                .map(strip_nulls)
                .collect(),
        ),
        other => other,
    }
}
