use std::{io, path::PathBuf};

use thiserror::Error;

/// Failure to load, override, validate or export configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Failed to read {path}: {source}")]
  Read {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to write {path}: {source}")]
  Write {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to parse JSON config {path}: {source}")]
  Json {
    path:   PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("Failed to parse TOML config {path}: {source}")]
  Toml {
    path:   PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error("Invalid config {path}: {source}")]
  Invalid {
    path:   PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("Unsupported config file {0}: expected a .toml or .json extension")]
  UnsupportedFormat(PathBuf),

  #[error("Unsupported config format '{0}': expected toml or json")]
  UnsupportedTemplate(String),

  #[error("Invalid config override '{0}'. Expected KEY=VALUE")]
  OverrideSyntax(String),

  #[error("Unknown configuration key '{key}'. Known keys: {known}")]
  UnknownKey { key: String, known: String },

  #[error("Invalid value '{value}' for '{key}': expected {expected}")]
  InvalidValue {
    key:      String,
    value:    String,
    expected: &'static str,
  },

  #[error("A definitions directory must be configured (definitions_dir)")]
  MissingDefinitionsDir,

  #[error("Configured paths are invalid:\n{}", .0.join("\n"))]
  InvalidPaths(Vec<String>),
}

impl ConfigError {
  /// Qualify the key of an override error with the table it was applied to.
  #[must_use]
  pub fn within(self, prefix: &str) -> Self {
    match self {
      Self::UnknownKey { key, known } => {
        Self::UnknownKey {
          key: format!("{prefix}{key}"),
          known,
        }
      },
      Self::InvalidValue {
        key,
        value,
        expected,
      } => {
        Self::InvalidValue {
          key: format!("{prefix}{key}"),
          value,
          expected,
        }
      },
      other => other,
    }
  }
}
