//! `smelter check`: verify files survive infer -> render -> rebuild.
//!
//! The rebuilt data is compared against what a faithful round trip must
//! produce: the input data with text trimmed and `null` scalars as `""`.
//! Numbers compare by value, so `1` and `1.0` match.

use anyhow::{Result, bail};
use serde_json::{Number, Value};
use std::path::{Path, PathBuf};

use super::common::{load, rebuild};
use crate::config::SmelterConfig;
use crate::logger::{self, status_error, status_success};
use crate::schema::{FieldDescriptor, FieldType, JsonMap, SchemaObject, restore_root_shape};
use crate::{debug, log};

pub fn check_files(config: &SmelterConfig, files: &[PathBuf]) -> Result<()> {
    for file in files {
        match check_file(config, file) {
            Ok(None) => status_success(&file.display().to_string()),
            Ok(Some(detail)) => status_error(&file.display().to_string(), &detail),
            Err(err) => status_error(&file.display().to_string(), &format!("{err:#}")),
        }
    }

    let tally = logger::tally();
    log!("check"; "{}", tally.summary());
    if tally.failed > 0 {
        bail!("{} of {} files do not round-trip", tally.failed, files.len());
    }
    Ok(())
}

/// `None` when the file round-trips, otherwise what went wrong.
fn check_file(config: &SmelterConfig, file: &Path) -> Result<Option<String>> {
    let mut loaded = load(config, file)?;
    let expected = restore_root_shape(&loaded.document.data, expected_data(&loaded.schema));

    let Some(actual) = rebuild(&loaded.document.data, &mut loaded.form) else {
        return Ok(Some("form data could not be rebuilt".to_string()));
    };
    debug!("check"; "{}: {}", file.display(), actual);

    let mut diffs = Vec::new();
    diff("", &expected, &actual, &mut diffs);
    Ok((!diffs.is_empty()).then(|| diffs.join("\n")))
}

/// The data a lossless round trip of `schema` yields.
pub fn expected_data(schema: &SchemaObject) -> JsonMap {
    expected_fields(&schema.fields)
}

fn expected_fields(fields: &[FieldDescriptor]) -> JsonMap {
    fields
        .iter()
        .map(|field| (field.name.clone(), expected_value(field)))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

fn expected_value(field: &FieldDescriptor) -> Value {
    let data = field.data().unwrap_or(&Value::Null);
    match field.field_type {
        FieldType::Object => Value::Object(expected_fields(&field.fields)),
        FieldType::Array if field.data().is_none() => {
            Value::Array(field.items().iter().map(expected_value).collect())
        }
        FieldType::Array | FieldType::List => Value::Array(
            data.as_array()
                .into_iter()
                .flatten()
                .map(expected_list_entry)
                .collect(),
        ),
        FieldType::Checkbox => Value::Bool(data.as_bool().unwrap_or(false)),
        FieldType::Number => match data {
            Value::Number(_) => data.clone(),
            Value::Null => Value::String(String::new()),
            other => text(other)
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map_or(Value::Null, Value::Number),
        },
        _ => Value::String(text(data).trim().to_string()),
    }
}

fn expected_list_entry(entry: &Value) -> Value {
    match entry {
        Value::Bool(_) | Value::Number(_) => entry.clone(),
        other => Value::String(text(other).trim().to_string()),
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Collect human-readable differences between `expected` and `actual`.
fn diff(path: &str, expected: &Value, actual: &Value, out: &mut Vec<String>) {
    let at = if path.is_empty() { "(root)" } else { path };
    match (expected, actual) {
        (Value::Number(a), Value::Number(b)) => {
            if a.as_f64() != b.as_f64() {
                out.push(format!("{at}: {a} != {b}"));
            }
        }
        (Value::Object(a), Value::Object(b)) => {
            for (key, value) in a {
                let child = join(path, key);
                match b.get(key) {
                    Some(other) => diff(&child, value, other, out),
                    None => out.push(format!("{child}: missing")),
                }
            }
            for key in b.keys().filter(|key| !a.contains_key(*key)) {
                out.push(format!("{}: unexpected", join(path, key)));
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            if a.len() != b.len() {
                out.push(format!("{at}: {} items != {} items", a.len(), b.len()));
                return;
            }
            for (i, (x, y)) in a.iter().zip(b).enumerate() {
                diff(&join(path, &i.to_string()), x, y, out);
            }
        }
        (a, b) if a == b => {}
        (a, b) => out.push(format!("{at}: {a} != {b}")),
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}
