//! Error types for `askdata-core`.

use serde::Serialize;
use strum::{AsRefStr, Display};
use thiserror::Error;

use crate::validate::Rejection;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{0}")]
  Rejected(#[from] Rejection),

  #[error("{0}")]
  Execution(#[from] ExecutionError),

  #[error("invalid configuration: {0}")]
  InvalidConfig(String),

  #[error("row has {found} values but the result has {expected} columns")]
  RowWidth { expected: usize, found: usize },
}

impl Error {
  /// A neutral description that is safe to show to the person who asked the
  /// question. Never contains SQL text or store diagnostics.
  pub fn user_message(&self) -> &'static str {
    match self {
      Error::Rejected(r) => r.kind().user_message(),
      Error::Execution(e) => e.kind.user_message(),
      Error::InvalidConfig(_) | Error::RowWidth { .. } => {
        "The query could not be completed."
      }
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// ─── Execution ───────────────────────────────────────────────────────────────

/// Broad class of a store-level failure.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExecutionErrorKind {
  Syntax,
  Type,
  Timeout,
  Other,
}

impl ExecutionErrorKind {
  pub fn user_message(self) -> &'static str {
    match self {
      ExecutionErrorKind::Syntax => {
        "The database could not understand the generated query."
      }
      ExecutionErrorKind::Type => {
        "The generated query mixed incompatible value types."
      }
      ExecutionErrorKind::Timeout => "The query took too long to run.",
      ExecutionErrorKind::Other => "The database failed to run the query.",
    }
  }
}

/// A failure reported by the store while running an approved plan.
///
/// `detail` is the store's own diagnostic. It is logged but never sent to
/// the caller.
#[derive(Debug, Clone, Error)]
#[error("{kind} error: {detail}")]
pub struct ExecutionError {
  pub kind:   ExecutionErrorKind,
  pub detail: String,
}

impl ExecutionError {
  pub fn new(kind: ExecutionErrorKind, detail: impl Into<String>) -> Self {
    Self { kind, detail: detail.into() }
  }
}
