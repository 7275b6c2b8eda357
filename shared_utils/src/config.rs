//! TOML configuration loading.
//!
//! Every binary in the workspace reads its settings from a single TOML file.
//! The helpers here only deal with reading and deserializing; validation of
//! the resulting values is left to the owning crate.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors related to application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not valid TOML for the expected shape.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration parsed but holds a value the application rejects.
    #[error("invalid config value for `{field}`: {message}")]
    Invalid { field: String, message: String },
}

impl ConfigError {
    /// Shorthand for [`ConfigError::Invalid`].
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Deserialize a configuration value from a TOML string.
pub fn load_toml_str<T: DeserializeOwned>(text: &str) -> Result<T, ConfigError> {
    Ok(toml::from_str(text)?)
}

/// Read a TOML file from disk and deserialize it.
pub fn load_toml_path<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_toml_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        name: String,
        #[serde(default)]
        count: u32,
    }

    #[test]
    fn parses_with_defaults() {
        let s: Sample = load_toml_str("name = \"vn30\"").unwrap();
        assert_eq!(
            s,
            Sample {
                name: "vn30".into(),
                count: 0
            }
        );
    }

    #[test]
    fn reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"hpg\"\ncount = 3").unwrap();
        let s: Sample = load_toml_path(file.path()).unwrap();
        assert_eq!(s.count, 3);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_toml_path::<Sample>("/definitely/not/here.toml").unwrap_err();
        match err {
            ConfigError::Read { path, .. } => {
                assert_eq!(path, PathBuf::from("/definitely/not/here.toml"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = load_toml_str::<Sample>("name = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
