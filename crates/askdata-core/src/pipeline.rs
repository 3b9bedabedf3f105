//! [`Pipeline`]: candidate text in, [`ChatResponse`] out.
//!
//! ```text
//! candidate ─ strip fences ─ validate ─┬─ Accepted ──────────────┐
//!                                      ├─ Fixable ─ correct ─────┤
//!                                      └─ Rejected ─ (message)   │
//!                         execute ◄──────────────────────────────┘
//!                            └─ profile ─┬─ insight ─┐
//!                                        └─ anomaly ─┴─ compose
//! ```
//!
//! Every stage is synchronous except the store call. Nothing is shared
//! between requests besides the read-only schema, so one `Pipeline` can
//! serve any number of concurrent callers.

use std::sync::Arc;

use crate::{
  Error, Result,
  anomaly,
  compose::{ChatResponse, compose},
  config::PipelineConfig,
  correct::{Substitution, correct},
  error::ExecutionError,
  insight,
  plan::QueryPlan,
  profile::profile,
  schema::SchemaDescriptor,
  store::QueryStore,
  validate::{Rejection, ValidationVerdict, validate},
};

/// Remove a surrounding markdown code fence (```` ```sql ... ``` ````) that
/// generators often wrap their output in. Only the fence is removed; any
/// other surrounding prose is left for the validator to reject.
pub fn strip_code_fence(text: &str) -> &str {
  let trimmed = text.trim();
  let Some(rest) = trimmed.strip_prefix("```") else {
    return trimmed;
  };
  let rest = rest.strip_suffix("```").unwrap_or(rest);
  let rest = match rest.find('\n') {
    Some(n) if rest[..n].trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
      &rest[n + 1..]
    }
    _ => rest,
  };
  rest.trim()
}

pub struct Pipeline<S> {
  store:  S,
  schema: Arc<SchemaDescriptor>,
  config: PipelineConfig,
}

impl<S: QueryStore> Pipeline<S> {
  pub fn new(
    store: S,
    schema: Arc<SchemaDescriptor>,
    config: PipelineConfig,
  ) -> Result<Self> {
    config.validate()?;
    Ok(Self { store, schema, config })
  }

  /// Build a pipeline whose schema is read from the store itself.
  pub async fn from_store(store: S, config: PipelineConfig) -> Result<Self> {
    let schema = store
      .describe()
      .await
      .map_err(|e| Error::Execution(e.into()))?;
    tracing::debug!(tables = schema.tables().count(), "schema loaded");
    Self::new(store, Arc::new(schema), config)
  }

  pub fn schema(&self) -> &Arc<SchemaDescriptor> { &self.schema }

  pub fn config(&self) -> &PipelineConfig { &self.config }

  pub fn store(&self) -> &S { &self.store }

  /// Run the whole pipeline. Never fails: every error becomes a response
  /// with a neutral message and no data.
  pub async fn answer(&self, candidate: &str) -> ChatResponse {
    match self.run(candidate).await {
      Ok(response) => response,
      Err(e) => ChatResponse::failure(e.user_message()),
    }
  }

  /// Run the whole pipeline, surfacing the failure cause.
  pub async fn run(&self, candidate: &str) -> Result<ChatResponse> {
    let (plan, substitutions) = self.approve(candidate)?;

    let execution = self
      .store
      .execute(&plan, self.config.max_rows)
      .await
      .map_err(|e| {
        let e: ExecutionError = e.into();
        tracing::warn!(kind = %e.kind, detail = %e.detail, "execution failed");
        Error::Execution(e)
      })?;
    let result = execution.result;
    tracing::info!(rows = result.len(), truncated = execution.truncated, "query executed");

    let prof = profile(&result, &self.schema, plan.tables());
    let insight = insight::generate(&result, &prof, &self.config.insight_thresholds);
    let anomaly = anomaly::detect(&result, &prof, self.config.anomaly_z_threshold);

    let mut notes = Vec::new();
    if execution.truncated {
      notes.push(format!(
        "Results were truncated to the first {} rows.",
        self.config.max_rows
      ));
    }
    match substitutions.len() {
      0 => {}
      1 => notes.push("One unknown column name was corrected before running the query.".into()),
      n => notes.push(format!(
        "{n} unknown column names were corrected before running the query."
      )),
    }

    Ok(compose(result, insight, anomaly, &notes))
  }

  /// Validate, and if needed correct, `candidate` into an executable plan.
  pub fn approve(
    &self,
    candidate: &str,
  ) -> Result<(QueryPlan, Vec<Substitution>), Rejection> {
    let candidate = strip_code_fence(candidate);
    let verdict = validate(candidate, &self.schema, &self.config);

    let outcome = match verdict {
      ValidationVerdict::Accepted(plan) => {
        tracing::debug!("candidate accepted");
        Ok((plan, Vec::new()))
      }
      ValidationVerdict::Fixable(statement, violations) => {
        tracing::debug!(violations = violations.len(), "candidate fixable");
        correct(&statement, &violations, &self.schema, &self.config).map(|c| {
          for s in &c.substitutions {
            tracing::info!(from = %s.from, to = %s.to, distance = s.distance, "column corrected");
          }
          (c.plan, c.substitutions)
        })
      }
      ValidationVerdict::Rejected(rejection) => Err(rejection),
    };

    if let Err(rejection) = &outcome {
      tracing::warn!(kind = %rejection.kind(), "candidate rejected");
    }
    outcome
  }
}
