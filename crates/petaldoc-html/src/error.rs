use petaldoc_utils::OutputError;
use thiserror::Error;

/// Errors that stop site assembly.
#[derive(Debug, Error)]
pub enum SiteError {
  #[error("Template error: {0}")]
  Template(#[from] tera::Error),

  #[error(transparent)]
  Output(#[from] OutputError),
}
