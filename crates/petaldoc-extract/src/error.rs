use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while collecting source files for extraction.
///
/// Individual files that fail to parse never produce an error; extraction
/// simply yields nothing for them.
#[derive(Debug, Error)]
pub enum ExtractError {
  /// A source file could not be read or was not valid UTF-8.
  #[error("failed to read `{path}`: {source}")]
  ReadFile {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The input directory itself could not be walked.
  #[error("failed to walk `{path}`: {source}")]
  Walk {
    path:   PathBuf,
    #[source]
    source: walkdir::Error,
  },
}
