//! Steps shared by the commands: load, infer, rebuild, persist.

use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::io::Write;
use std::path::Path;

use crate::config::SmelterConfig;
use crate::form::{FormDocument, preprocess_form_data};
use crate::frontmatter::{Document, read_document, serialize_document, write_document};
use crate::log;
use crate::render::render_form;
use crate::schema::{SchemaObject, convert_to_schema_object, restore_root_shape};

/// A source file with its inferred schema and rendered form.
pub struct Loaded {
    pub document: Document,
    pub schema: SchemaObject,
    pub form: FormDocument,
}

/// Read `file`, infer its schema against the configured explicit schema,
/// and render the form.
pub fn load(config: &SmelterConfig, file: &Path) -> Result<Loaded> {
    let document = read_document(file)?;
    let explicit = config
        .load_schema()
        .with_context(|| format!("failed to load schema for {}", file.display()))?;

    let schema = convert_to_schema_object(&document.data, explicit.as_ref());
    let form = render_form(&schema);
    Ok(Loaded {
        document,
        schema,
        form,
    })
}

/// Rebuild data from `form` in the shape of the original data, or `None`
/// when the form cannot be read (already logged).
pub fn rebuild(original: &Value, form: &mut FormDocument) -> Option<Value> {
    preprocess_form_data(form).map(|map| restore_root_shape(original, map))
}

/// Write `data` back into `file`, or print it with `dry`.
pub fn persist(
    config: &SmelterConfig,
    file: &Path,
    document: &Document,
    data: Option<Value>,
    dry: bool,
) -> Result<()> {
    let Some(data) = data else {
        bail!("could not save {}: form data is invalid", file.display());
    };

    let mut updated = document.with_data(data);
    if !updated.standalone {
        updated.format = config.output.format.resolve(document.format);
    }

    if dry {
        let content = serialize_document(&updated)?;
        let mut out = std::io::stdout().lock();
        out.write_all(content.as_bytes())?;
        out.flush()?;
        return Ok(());
    }

    write_document(file, &updated)?;
    log!("apply"; "wrote {}", file.display());
    Ok(())
}
