//! Project configuration from `smelter.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section.rs   # [schema], [form], [output]
//! ├── error.rs     # ConfigError
//! ├── util.rs      # config file discovery
//! └── mod.rs       # SmelterConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[schema]`  | Path of the explicit field schema (JSON)         |
//! | `[form]`    | Undo/redo depth                                  |
//! | `[output]`  | Frontmatter format for written files             |

mod error;
mod section;
mod util;

pub use error::ConfigError;
pub use section::{FormSection, OutputFormat, OutputSection, SchemaSection};

use util::find_config_file;

use crate::log;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing smelter.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SmelterConfig {
    /// Absolute path to the config file, if one was found
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Directory relative paths resolve against
    #[serde(skip)]
    pub root: PathBuf,

    pub schema: SchemaSection,
    pub form: FormSection,
    pub output: OutputSection,
}

impl SmelterConfig {
    /// Search upward from the working directory for `config_name`.
    ///
    /// No config file means defaults rooted at the working directory.
    pub fn load(config_name: &Path) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        Self::load_from(&cwd, config_name)
    }

    pub fn load_from(start: &Path, config_name: &Path) -> Result<Self> {
        let Some(path) = find_config_file(start, config_name) else {
            return Ok(Self {
                root: start.to_path_buf(),
                ..Self::default()
            });
        };

        let mut config = Self::from_path(&path)?;
        config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        config.config_path = Some(path);
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring: {}", display_path, fields.join(", "));
    }

    /// Path of the explicit schema file.
    pub fn schema_path(&self) -> PathBuf {
        self.root.join(&self.schema.path)
    }

    /// The explicit schema as a JSON array of entries, or `None` when the
    /// file does not exist.
    ///
    /// Accepts either a bare array or `{ "fields": [...] }`.
    pub fn load_schema(&self) -> Result<Option<Value>, ConfigError> {
        let path = self.schema_path();
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).map_err(|err| ConfigError::Io(path.clone(), err))?;
        let value: Value = serde_json::from_str(&content)
            .map_err(|err| ConfigError::Schema(path.clone(), err.to_string()))?;

        match value {
            Value::Array(_) => Ok(Some(value)),
            Value::Object(mut map) => match map.remove("fields") {
                Some(fields @ Value::Array(_)) => Ok(Some(fields)),
                _ => Err(ConfigError::Schema(path, "`fields` must be an array".into())),
            },
            _ => Err(ConfigError::Schema(
                path,
                "expected an array of fields or { \"fields\": [...] }".into(),
            )),
        }
    }
}
