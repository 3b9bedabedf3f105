//! Anomaly detector: flags rows whose measure lies far from the mean in
//! units of population standard deviation.

use serde::Serialize;
use strum::{AsRefStr, Display};

use crate::{
  profile::{Profile, row_label},
  result::ResultSet,
};

/// Smallest sample for which a deviation estimate means anything.
pub const MIN_SAMPLE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AnomalyMethod {
  ZScore,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlaggedRow {
  pub index: usize,
  pub label: String,
  pub value: f64,
  pub z:     f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyReport {
  /// Row indices in original row order.
  pub flagged_row_indices: Vec<usize>,
  pub flagged:             Vec<FlaggedRow>,
  pub method:              AnomalyMethod,
  pub threshold:           f64,
  pub text:                String,
}

/// Flag rows with `|z| >= z_threshold`, or `None` when no measure exists,
/// fewer than [`MIN_SAMPLE`] values are present, the values do not vary, or
/// nothing clears the threshold.
pub fn detect(
  result: &ResultSet,
  profile: &Profile,
  z_threshold: f64,
) -> Option<AnomalyReport> {
  let measure = profile.measure?;
  let values: Vec<(usize, f64)> = result
    .column_values(measure)
    .enumerate()
    .filter_map(|(i, v)| v.as_f64().map(|x| (i, x)))
    .collect();
  if values.len() < MIN_SAMPLE {
    return None;
  }

  let n = values.len() as f64;
  let mean = values.iter().map(|(_, x)| x).sum::<f64>() / n;
  let variance = values.iter().map(|(_, x)| (x - mean).powi(2)).sum::<f64>() / n;
  let sigma = variance.sqrt();
  // Rounding noise on identical values must not count as spread.
  if !sigma.is_finite() || sigma <= 1e-12 * mean.abs().max(1.0) {
    return None;
  }

  let flagged: Vec<FlaggedRow> = values
    .iter()
    .map(|&(index, value)| (index, value, (value - mean) / sigma))
    .filter(|&(_, _, z)| z.abs() >= z_threshold)
    .map(|(index, value, z)| FlaggedRow {
      index,
      label: row_label(result, profile, index),
      value,
      z,
    })
    .collect();
  if flagged.is_empty() {
    return None;
  }

  let metric = &result.columns()[measure];
  let items: Vec<String> = flagged
    .iter()
    .map(|f| {
      let kind = if f.z > 0.0 { "spike" } else { "drop" };
      format!("a {kind} at {} ({:.2}, z = {:+.2})", f.label, f.value, f.z)
    })
    .collect();
  let text = format!(
    "Unusual {metric} detected: {} (mean {mean:.2}, std dev {sigma:.2}).",
    items.join("; ")
  );

  Some(AnomalyReport {
    flagged_row_indices: flagged.iter().map(|f| f.index).collect(),
    flagged,
    method: AnomalyMethod::ZScore,
    threshold: z_threshold,
    text,
  })
}
