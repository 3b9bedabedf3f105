//! [`ResultSet`]: the materialised rows of an executed plan.

use serde::{
  Deserialize, Serialize, Serializer,
  ser::{SerializeMap, SerializeStruct},
};

use crate::{Error, Result};

// ─── Scalar values ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
  Null,
  Integer(i64),
  Real(f64),
  Text(String),
}

impl Value {
  /// Numeric view of the value; text is never coerced.
  pub fn as_f64(&self) -> Option<f64> {
    match self {
      Value::Integer(i) => Some(*i as f64),
      Value::Real(r) => Some(*r),
      Value::Null | Value::Text(_) => None,
    }
  }

  pub fn is_null(&self) -> bool { matches!(self, Value::Null) }
}

impl std::fmt::Display for Value {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Value::Null => f.write_str("null"),
      Value::Integer(i) => write!(f, "{i}"),
      Value::Real(r) => write!(f, "{r}"),
      Value::Text(s) => f.write_str(s),
    }
  }
}

// ─── Result set ──────────────────────────────────────────────────────────────

/// Ordered, uniquely named columns and rows in execution order.
///
/// Serialises as `{"columns": [...], "rows": [{column: value, ...}]}` with
/// each row object keyed in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
  columns: Vec<String>,
  rows:    Vec<Vec<Value>>,
}

impl ResultSet {
  /// Create an empty result. Duplicate column names (e.g. `SELECT a, a`) get
  /// a numeric suffix so every column stays addressable.
  pub fn new(columns: impl IntoIterator<Item = String>) -> Self {
    let mut unique: Vec<String> = Vec::new();
    for name in columns {
      let mut candidate = name.clone();
      let mut n = 2;
      while unique.iter().any(|u| u == &candidate) {
        candidate = format!("{name}_{n}");
        n += 1;
      }
      unique.push(candidate);
    }
    Self { columns: unique, rows: Vec::new() }
  }

  pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
    if row.len() != self.columns.len() {
      return Err(Error::RowWidth { expected: self.columns.len(), found: row.len() });
    }
    self.rows.push(row);
    Ok(())
  }

  pub fn columns(&self) -> &[String] { &self.columns }

  pub fn rows(&self) -> &[Vec<Value>] { &self.rows }

  pub fn len(&self) -> usize { self.rows.len() }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }

  /// All values of column `index`, in row order.
  pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Value> {
    self.rows.iter().map(move |r| &r[index])
  }

  /// Whether every non-null value in the column is numeric and at least one
  /// value is present.
  pub fn is_numeric_column(&self, index: usize) -> bool {
    let mut seen = false;
    for v in self.column_values(index) {
      match v {
        Value::Null => {}
        Value::Integer(_) | Value::Real(_) => seen = true,
        Value::Text(_) => return false,
      }
    }
    seen
  }
}

struct RowRef<'a> {
  columns: &'a [String],
  values:  &'a [Value],
}

impl Serialize for RowRef<'_> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.columns.len()))?;
    for (c, v) in self.columns.iter().zip(self.values) {
      map.serialize_entry(c, v)?;
    }
    map.end()
  }
}

impl Serialize for ResultSet {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let rows: Vec<RowRef<'_>> = self
      .rows
      .iter()
      .map(|values| RowRef { columns: &self.columns, values })
      .collect();
    let mut s = serializer.serialize_struct("ResultSet", 2)?;
    s.serialize_field("columns", &self.columns)?;
    s.serialize_field("rows", &rows)?;
    s.end()
  }
}
