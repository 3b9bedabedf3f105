//! Handlers for `/schema` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/schema` | JSON descriptor |
//! | `GET`  | `/schema/prompt` | Plain-text rendering for generator prompts |

use std::sync::Arc;

use askdata_core::{pipeline::Pipeline, schema::SchemaDescriptor, store::QueryStore};
use axum::{Json, extract::State};

/// `GET /schema`
pub async fn describe<S>(
  State(pipeline): State<Arc<Pipeline<S>>>,
) -> Json<SchemaDescriptor>
where
  S: QueryStore,
{
  Json(pipeline.schema().as_ref().clone())
}

/// `GET /schema/prompt`
pub async fn prompt<S>(State(pipeline): State<Arc<Pipeline<S>>>) -> String
where
  S: QueryStore,
{
  pipeline.schema().to_string()
}
