use std::{io, path::PathBuf};

use thiserror::Error;

/// Failure to produce part of the output. Always fatal for a run.
#[derive(Debug, Error)]
pub enum OutputError {
  #[error("Failed to create directory {path}: {source}")]
  CreateDir {
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

  #[error("Failed to copy {from} to {to}: {source}")]
  Copy {
    from:   PathBuf,
    to:     PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to read {path}: {source}")]
  Read {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to compile SCSS stylesheet {path}: {message}")]
  Stylesheet { path: PathBuf, message: String },
}
