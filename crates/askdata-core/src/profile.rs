//! Column profiling shared by the insight generator and anomaly detector.
//!
//! Result columns carry no table qualifier, so roles are recovered by name
//! from the schema (preferring the plan's own tables). Columns the schema
//! does not know, typically aggregates like `SUM(amount) AS revenue`, fall
//! back to name and value heuristics.

use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime};

use crate::{
  result::{ResultSet, Value},
  schema::{ColumnRole, SchemaDescriptor},
};

/// Substrings that mark an unmapped column as time-like.
const TIME_HINTS: &[&str] = &["month", "date"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Profile {
  /// Ordering axis.
  pub time:    Option<usize>,
  /// Quantity of interest.
  pub measure: Option<usize>,
  /// Column used to name rows in commentary.
  pub label:   Option<usize>,
}

/// Pick time, measure and label columns for `result`.
pub fn profile(
  result: &ResultSet,
  schema: &SchemaDescriptor,
  tables: &[String],
) -> Profile {
  let roles: Vec<Option<ColumnRole>> = result
    .columns()
    .iter()
    .map(|c| schema.find_column(tables.iter().map(String::as_str), c).map(|d| d.role))
    .collect();

  let time = result.columns().iter().enumerate().position(|(i, name)| match roles[i] {
    Some(role) => role == ColumnRole::Time,
    None => {
      let lower = name.to_ascii_lowercase();
      TIME_HINTS.iter().any(|h| lower.contains(h))
    }
  });

  let numeric = |i: usize| Some(i) != time && result.is_numeric_column(i);
  let measure = (0..roles.len())
    .find(|&i| roles[i] == Some(ColumnRole::Measure) && numeric(i))
    .or_else(|| (0..roles.len()).find(|&i| roles[i].is_none() && numeric(i)));

  let label = time.or_else(|| {
    (0..roles.len()).find(|&i| {
      Some(i) != measure
        && result.column_values(i).any(|v| matches!(v, Value::Text(_)))
    })
  });

  Profile { time, measure, label }
}

// ─── Time ordering ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, PartialOrd)]
enum TimeKey {
  Number(f64),
  Instant(NaiveDateTime),
  Text(String),
}

fn parse_instant(s: &str) -> Option<NaiveDateTime> {
  let s = s.trim();
  for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
      return Some(dt);
    }
  }
  if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
    return d.and_hms_opt(0, 0, 0);
  }
  // `strftime('%Y-%m', ...)` buckets.
  NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
    .ok()
    .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn time_key(v: &Value) -> Option<TimeKey> {
  match v {
    Value::Null => None,
    Value::Integer(i) => Some(TimeKey::Number(*i as f64)),
    Value::Real(r) => Some(TimeKey::Number(*r)),
    Value::Text(s) => {
      Some(parse_instant(s).map_or_else(|| TimeKey::Text(s.clone()), TimeKey::Instant))
    }
  }
}

/// Indices of rows with a non-null time value, in ascending time order.
///
/// Dates are compared as dates, numbers as numbers; if the column mixes
/// kinds every value is compared as text. The sort is stable, so rows that
/// share a time keep execution order.
pub fn time_order(result: &ResultSet, time: usize) -> Vec<usize> {
  let mut keyed: Vec<(usize, TimeKey)> = result
    .column_values(time)
    .enumerate()
    .filter_map(|(i, v)| time_key(v).map(|k| (i, k)))
    .collect();

  let uniform = keyed.windows(2).all(|w| {
    std::mem::discriminant(&w[0].1) == std::mem::discriminant(&w[1].1)
  });
  if !uniform {
    for (i, key) in &mut keyed {
      *key = TimeKey::Text(result.rows()[*i][time].to_string());
    }
  }

  keyed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
  keyed.into_iter().map(|(i, _)| i).collect()
}

/// Human-readable name for row `index`.
pub fn row_label(result: &ResultSet, profile: &Profile, index: usize) -> String {
  profile
    .label
    .map(|c| &result.rows()[index][c])
    .filter(|v| !v.is_null())
    .map_or_else(|| format!("row {}", index + 1), Value::to_string)
}


#[cfg(test)]
mod tests {
  use super::{fixtures::*, *};
  use crate::schema::fixtures::demo_schema;

  #[test]
  fn aggregated_month_and_revenue() {
    let rs = monthly_revenue();
    let p = profile(&rs, &demo_schema(), &["orders".into()]);
    assert_eq!(p, Profile { time: Some(0), measure: Some(1), label: Some(0) });
  }

  #[test]
  fn schema_roles_win_over_position() {
    let rs = rows(&["customer_id", "order_date", "amount"], vec![vec![
      Value::Integer(101),
      Value::Text("2025-06-12".into()),
      Value::Real(299.99),
    ]]);
    let p = profile(&rs, &demo_schema(), &["orders".into()]);
    assert_eq!(p.time, Some(1));
    assert_eq!(p.measure, Some(2));
  }

  #[test]
  fn key_columns_are_not_measures() {
    let rs = rows(&["customer_id", "total_tax"], vec![
      vec![Value::Integer(103), Value::Real(28.0)],
      vec![Value::Integer(105), Value::Real(24.0)],
    ]);
    let p = profile(&rs, &demo_schema(), &["orders".into(), "summary".into()]);
    assert_eq!(p.time, None);
    assert_eq!(p.measure, Some(1));
    assert_eq!(p.label, None);
  }

  #[test]
  fn text_column_labels_rows_without_time() {
    let rs = rows(&["period", "revenue"], vec![
      vec![Value::Text("this_month".into()), Value::Real(1.0)],
    ]);
    let p = profile(&rs, &demo_schema(), &[]);
    assert_eq!(p.label, Some(0));
    assert_eq!(row_label(&rs, &p, 0), "this_month");
  }

  #[test]
  fn time_order_sorts_dates_and_skips_nulls() {
    let rs = rows(&["order_date"], vec![
      vec![Value::Text("2025-11-02".into())],
      vec![Value::Null],
      vec![Value::Text("2025-06-12".into())],
      vec![Value::Text("2025-08".into())],
    ]);
    assert_eq!(time_order(&rs, 0), vec![2, 3, 0]);
  }

  #[test]
  fn time_order_numeric_years() {
    let rs = rows(&["year"], vec![
      vec![Value::Integer(2024)],
      vec![Value::Integer(2023)],
    ]);
    assert_eq!(time_order(&rs, 0), vec![1, 0]);
  }

  #[test]
  fn time_order_is_stable_for_ties() {
    let rs = rows(&["month"], vec![
      vec![Value::Text("2025-01".into())],
      vec![Value::Text("2025-01".into())],
    ]);
    assert_eq!(time_order(&rs, 0), vec![0, 1]);
  }

  #[test]
  fn unlabeled_rows_fall_back_to_position() {
    let rs = rows(&["total"], vec![vec![Value::Real(1.0)]]);
    let p = Profile { time: None, measure: Some(0), label: None };
    assert_eq!(row_label(&rs, &p, 0), "row 1");
  }
}
