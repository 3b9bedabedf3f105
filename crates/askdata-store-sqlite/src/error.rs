//! Error type for `askdata-store-sqlite`.

use askdata_core::{ExecutionError, ExecutionErrorKind};
use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("sqlite error: {0}")]
  Sqlite(#[from] rusqlite::Error),

  #[error("result error: {0}")]
  Result(#[from] askdata_core::Error),

  /// The store refused a statement that would modify data.
  #[error("statement is not read-only")]
  NotReadOnly,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
  /// Classify the failure for the caller-facing taxonomy.
  pub fn kind(&self) -> ExecutionErrorKind {
    match self {
      Error::Database(tokio_rusqlite::Error::Rusqlite(e)) | Error::Sqlite(e) => {
        classify(e)
      }
      Error::NotReadOnly => ExecutionErrorKind::Syntax,
      Error::Database(_) | Error::Result(_) => ExecutionErrorKind::Other,
    }
  }
}

fn classify(e: &rusqlite::Error) -> ExecutionErrorKind {
  match e {
    rusqlite::Error::SqliteFailure(ffi, msg) => match ffi.code {
      ErrorCode::DatabaseBusy
      | ErrorCode::DatabaseLocked
      | ErrorCode::OperationInterrupted => ExecutionErrorKind::Timeout,
      ErrorCode::TypeMismatch => ExecutionErrorKind::Type,
      _ => {
        let msg = msg.as_deref().unwrap_or_default();
        if msg.contains("syntax error")
          || msg.contains("no such")
          || msg.contains("ambiguous column")
          || msg.contains("misuse of")
          || msg.contains("wrong number of arguments")
        {
          ExecutionErrorKind::Syntax
        } else if msg.contains("datatype mismatch") {
          ExecutionErrorKind::Type
        } else {
          ExecutionErrorKind::Other
        }
      }
    },
    rusqlite::Error::InvalidColumnType(..)
    | rusqlite::Error::FromSqlConversionFailure(..)
    | rusqlite::Error::IntegralValueOutOfRange(..) => ExecutionErrorKind::Type,
    rusqlite::Error::MultipleStatement
    | rusqlite::Error::InvalidParameterCount(..) => ExecutionErrorKind::Syntax,
    _ => ExecutionErrorKind::Other,
  }
}

impl From<Error> for ExecutionError {
  fn from(e: Error) -> Self { ExecutionError::new(e.kind(), e.to_string()) }
}
