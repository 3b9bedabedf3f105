//! Decoding helpers between SQLite storage classes and askdata values.

use askdata_core::{
  result::Value,
  schema::{ColumnDescriptor, ColumnRole, SemanticType},
};
use rusqlite::types::ValueRef;

// ─── Values ──────────────────────────────────────────────────────────────────

pub fn decode_value(v: ValueRef<'_>) -> Value {
  match v {
    ValueRef::Null => Value::Null,
    ValueRef::Integer(i) => Value::Integer(i),
    ValueRef::Real(r) => Value::Real(r),
    ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
    // Blobs have no scalar representation in a chat response.
    ValueRef::Blob(b) => Value::Text(format!("<{} bytes>", b.len())),
  }
}

// ─── Columns ─────────────────────────────────────────────────────────────────

/// One row of `pragma_table_info`.
pub struct RawColumn {
  pub name:        String,
  pub declared:    String,
  pub primary_key: bool,
}

impl RawColumn {
  pub fn into_descriptor(self) -> ColumnDescriptor {
    let ty = SemanticType::from_declared(&self.declared);
    let role = ColumnRole::infer(&self.name, ty, self.primary_key);
    ColumnDescriptor::new(self.name, ty, role)
  }
}
