//! Pipeline policy knobs.
//!
//! Every threshold the validator, insight generator and anomaly detector use
//! lives here so deployments can tune them without code changes.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Percent-delta bands for insight text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightThresholds {
  /// Below this absolute percent change no insight is reported.
  pub moderate:    f64,
  /// Above this absolute percent change the change is "significant".
  pub significant: f64,
}

impl Default for InsightThresholds {
  fn default() -> Self { Self { moderate: 5.0, significant: 20.0 } }
}

/// Runtime configuration for a [`Pipeline`](crate::pipeline::Pipeline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
  /// Maximum number of rows materialised from a single query.
  pub max_rows:            usize,
  /// Largest edit distance the corrector will accept for a column fix.
  pub edit_distance_limit: usize,
  pub insight_thresholds:  InsightThresholds,
  /// Minimum absolute z-score for a row to be flagged as anomalous.
  pub anomaly_z_threshold: f64,
}

impl Default for PipelineConfig {
  fn default() -> Self {
    Self {
      max_rows:            500,
      edit_distance_limit: 2,
      insight_thresholds:  InsightThresholds::default(),
      anomaly_z_threshold: 2.0,
    }
  }
}

impl PipelineConfig {
  /// Reject settings that would make the pipeline meaningless.
  pub fn validate(&self) -> Result<()> {
    if self.max_rows == 0 {
      return Err(Error::InvalidConfig("max_rows must be at least 1".into()));
    }
    let t = &self.insight_thresholds;
    if !(t.moderate >= 0.0 && t.significant >= 0.0) {
      return Err(Error::InvalidConfig(
        "insight thresholds must be non-negative".into(),
      ));
    }
    if t.moderate > t.significant {
      return Err(Error::InvalidConfig(format!(
        "moderate insight threshold ({}) exceeds significant threshold ({})",
        t.moderate, t.significant
      )));
    }
    if !(self.anomaly_z_threshold > 0.0) {
      return Err(Error::InvalidConfig(
        "anomaly_z_threshold must be positive".into(),
      ));
    }
    Ok(())
  }
}
