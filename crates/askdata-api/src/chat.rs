//! Handler for `POST /chat`.
//!
//! Body: `{"sql": "<candidate statement>"}`. The candidate usually comes
//! from a language model and is treated as untrusted.

use std::sync::Arc;

use askdata_core::{compose::ChatResponse, pipeline::Pipeline, store::QueryStore};
use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ChatBody {
  pub sql: String,
}

/// `POST /chat`
pub async fn handler<S>(
  State(pipeline): State<Arc<Pipeline<S>>>,
  body: Result<Json<ChatBody>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError>
where
  S: QueryStore,
{
  let Json(body) = body?;
  if body.sql.trim().is_empty() {
    return Err(ApiError::BadRequest("`sql` must not be empty".into()));
  }

  let span = tracing::info_span!("chat", request_id = %Uuid::new_v4());
  let response = pipeline.answer(&body.sql).instrument(span).await;
  Ok(Json(response))
}
