//! `smelter schema`: print the inferred field schema.

use anyhow::Result;
use std::path::Path;

use super::common::load;
use crate::config::SmelterConfig;
use crate::debug;

pub fn print_schema(config: &SmelterConfig, file: &Path, pretty: bool) -> Result<()> {
    let loaded = load(config, file)?;
    debug!("schema"; "{} root fields in {}", loaded.schema.fields.len(), file.display());

    let json = if pretty {
        serde_json::to_string_pretty(&loaded.schema)?
    } else {
        serde_json::to_string(&loaded.schema)?
    };
    println!("{json}");
    Ok(())
}
