//! Error type for the bake entry points.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by configuration validation and result writing.
///
/// Stages themselves are total: out-of-grid lookups use a sentinel and empty
/// inputs are no-ops.
#[derive(Debug, Error)]
pub enum BakeError {
  #[error("invalid bake configuration: {0}")]
  InvalidConfig(String),

  #[error("failed to write {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

impl BakeError {
  pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io {
      path: path.into(),
      source,
    }
  }
}

pub type Result<T, E = BakeError> = std::result::Result<T, E>;
