use std::path::PathBuf;

use petaldoc_config::ConfigError;
use petaldoc_extract::ExtractError;
use petaldoc_utils::OutputError;
use thiserror::Error;

/// Errors that stop a petaldoc run.
#[derive(Debug, Error)]
pub enum PetaldocError {
  #[error(
    "Configuration file already exists: {}. Use --force to overwrite.",
    .0.display()
  )]
  ConfigExists(PathBuf),

  #[error("Configuration error: {0}")]
  Config(#[from] ConfigError),

  #[error("Extraction error: {0}")]
  Extract(#[from] ExtractError),

  #[error(transparent)]
  Output(#[from] OutputError),
}
