//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
///
/// Pipeline failures are not errors at this layer: they are answered with a
/// `200` and an explanatory message. Only malformed requests end up here.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("invalid body: {0}")]
  Body(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Body(r) => (r.status(), r.body_text()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
