//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    /// The explicit schema file is not a field list.
    #[error("invalid schema file `{0}`: {1}")]
    Schema(PathBuf, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_display() {
        let err = ConfigError::Schema(PathBuf::from("smelter.schema.json"), "expected an array".into());
        assert_eq!(
            err.to_string(),
            "invalid schema file `smelter.schema.json`: expected an array"
        );
    }
}
