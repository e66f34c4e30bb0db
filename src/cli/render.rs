//! `smelter render`: write the editable form.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::common::load;
use crate::config::SmelterConfig;
use crate::form::html::to_html;
use crate::log;

pub fn render_file(config: &SmelterConfig, file: &Path, output: Option<&Path>) -> Result<()> {
    let loaded = load(config, file)?;
    let html = to_html(&loaded.form);

    match output {
        Some(out) => {
            fs::write(out, html).with_context(|| format!("failed to write {}", out.display()))?;
            log!("render"; "{} -> {}", file.display(), out.display());
        }
        None => print!("{html}"),
    }
    Ok(())
}
