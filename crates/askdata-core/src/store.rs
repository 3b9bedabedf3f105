//! The `QueryStore` trait, the seam between the pipeline and a relational
//! backend.
//!
//! Implemented by storage backends (e.g. `askdata-store-sqlite`). The
//! pipeline depends on this abstraction, not on any concrete store.

use std::future::Future;

use crate::{
  error::ExecutionError, plan::QueryPlan, result::ResultSet,
  schema::SchemaDescriptor,
};

/// Rows materialised from one plan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Execution {
  pub result:    ResultSet,
  /// More rows were available than the cap allowed.
  pub truncated: bool,
}

/// A read-only relational store.
///
/// Implementations must return either every row up to the cap or an error,
/// never a partial result. All methods return `Send` futures so the trait
/// can be used behind a multi-threaded async runtime.
pub trait QueryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static + Into<ExecutionError>;

  /// Run `plan`, keeping at most `max_rows` rows.
  fn execute<'a>(
    &'a self,
    plan: &'a QueryPlan,
    max_rows: usize,
  ) -> impl Future<Output = Result<Execution, Self::Error>> + Send + 'a;

  /// Describe every user table the store exposes.
  fn describe(
    &self,
  ) -> impl Future<Output = Result<SchemaDescriptor, Self::Error>> + Send + '_;
}
