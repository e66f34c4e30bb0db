//! `[schema]`, `[form]` and `[output]` sections.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::frontmatter::Format;

/// `[schema]`: where the explicit field schema lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaSection {
    /// Relative to the directory of `smelter.toml`.
    pub path: PathBuf,
}

impl Default for SchemaSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from("smelter.schema.json"),
        }
    }
}

/// `[form]`: editing behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSection {
    /// Undo/redo depth, 0 for unbounded.
    pub history_limit: usize,
}

impl Default for FormSection {
    fn default() -> Self {
        Self { history_limit: 100 }
    }
}

/// `[output]`: how data is written back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub format: OutputFormat,
}

/// Frontmatter format for written files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Keep whatever the file was read with.
    #[default]
    Auto,
    Yaml,
    Toml,
    Json,
}

impl OutputFormat {
    pub fn resolve(self, detected: Format) -> Format {
        match self {
            Self::Auto => detected,
            Self::Yaml => Format::Yaml,
            Self::Toml => Format::Toml,
            Self::Json => Format::Json,
        }
    }
}
