//! JSON HTTP API for askdata.
//!
//! Exposes an axum [`Router`] backed by a shared [`Pipeline`]. Auth, TLS,
//! and rate limiting are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", askdata_api::api_router(pipeline.clone()))
//! ```

pub mod chat;
pub mod error;
pub mod schema;

use std::sync::Arc;

use askdata_core::{pipeline::Pipeline, store::QueryStore};
use axum::{
  Router,
  routing::{get, post},
};

pub use error::ApiError;

/// Build a fully-materialised API router for `pipeline`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(pipeline: Arc<Pipeline<S>>) -> Router<()>
where
  S: QueryStore + 'static,
{
  Router::new()
    .route("/chat", post(chat::handler::<S>))
    .route("/schema", get(schema::describe::<S>))
    .route("/schema/prompt", get(schema::prompt::<S>))
    .with_state(pipeline)
}
