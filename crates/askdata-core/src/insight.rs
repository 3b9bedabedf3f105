//! Insight generator: compares the latest period of a measure with the
//! average of the periods before it.

use serde::Serialize;
use strum::{AsRefStr, Display};

use crate::{
  config::InsightThresholds,
  profile::{Profile, row_label, time_order},
  result::ResultSet,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
  Higher,
  Lower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Magnitude {
  Moderately,
  Significantly,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightReport {
  pub metric_column:  String,
  pub baseline_value: f64,
  pub current_value:  f64,
  pub percent_delta:  f64,
  pub direction:      Direction,
  pub magnitude:      Magnitude,
  pub text:           String,
}

/// Produce a trend insight, or `None` when there is no time/measure pair,
/// fewer than two usable rows, a zero baseline, or a change inside the
/// moderate band.
pub fn generate(
  result: &ResultSet,
  profile: &Profile,
  thresholds: &InsightThresholds,
) -> Option<InsightReport> {
  let (time, measure) = (profile.time?, profile.measure?);

  let series: Vec<(usize, f64)> = time_order(result, time)
    .into_iter()
    .filter_map(|i| result.rows()[i][measure].as_f64().map(|v| (i, v)))
    .collect();
  let ((last_row, current), history) = series.split_last()?;
  if history.is_empty() {
    return None;
  }

  let baseline = history.iter().map(|(_, v)| v).sum::<f64>() / history.len() as f64;
  if baseline == 0.0 {
    return None;
  }
  let delta = (current - baseline) / baseline * 100.0;
  if !delta.is_finite() || delta.abs() < thresholds.moderate {
    return None;
  }

  let direction = if delta >= 0.0 { Direction::Higher } else { Direction::Lower };
  let magnitude = if delta.abs() > thresholds.significant {
    Magnitude::Significantly
  } else {
    Magnitude::Moderately
  };

  let metric = result.columns()[measure].clone();
  let periods = match history.len() {
    1 => "the previous period".to_owned(),
    n => format!("the average of the previous {n} periods"),
  };
  let text = format!(
    "{metric} for {label} ({current:.2}) is {magnitude} {direction} than {periods} \
     ({baseline:.2}), a change of {delta:+.2}%.",
    label = row_label(result, profile, *last_row),
  );

  Some(InsightReport {
    metric_column: metric,
    baseline_value: baseline,
    current_value: *current,
    percent_delta: delta,
    direction,
    magnitude,
    text,
  })
}
