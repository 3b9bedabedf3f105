//! Schema descriptor: the static model of the tables a query may touch.
//!
//! Built once at startup from the store's own metadata and shared read-only
//! (behind an `Arc`) by every request. Lookups are ASCII case-insensitive,
//! matching SQL identifier semantics.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

// ─── Column metadata ─────────────────────────────────────────────────────────

/// Storage-independent value type of a column.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SemanticType {
  Integer,
  Real,
  Text,
  Date,
}

impl SemanticType {
  /// Map a declared SQL column type to a semantic type using SQLite's
  /// affinity rules, with date-like declarations split out.
  pub fn from_declared(declared: &str) -> Self {
    let d = declared.to_ascii_uppercase();
    if d.contains("DATE") || d.contains("TIME") {
      SemanticType::Date
    } else if d.contains("INT") {
      SemanticType::Integer
    } else if d.contains("CHAR") || d.contains("CLOB") || d.contains("TEXT") {
      SemanticType::Text
    } else if ["REAL", "FLOA", "DOUB", "NUM", "DEC"]
      .iter()
      .any(|k| d.contains(k))
    {
      SemanticType::Real
    } else {
      SemanticType::Text
    }
  }

  pub fn is_numeric(self) -> bool {
    matches!(self, SemanticType::Integer | SemanticType::Real)
  }
}

/// Analytical role a column plays in a result.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ColumnRole {
  Key,
  Dimension,
  Measure,
  Time,
}

impl ColumnRole {
  /// Infer a role from a column's name, type and primary-key flag.
  pub fn infer(name: &str, ty: SemanticType, primary_key: bool) -> Self {
    let lower = name.to_ascii_lowercase();
    if primary_key || lower == "id" || lower.ends_with("_id") {
      ColumnRole::Key
    } else if ty == SemanticType::Date {
      ColumnRole::Time
    } else if ty.is_numeric() {
      ColumnRole::Measure
    } else {
      ColumnRole::Dimension
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
  pub name:          String,
  pub semantic_type: SemanticType,
  pub role:          ColumnRole,
}

impl ColumnDescriptor {
  pub fn new(name: impl Into<String>, semantic_type: SemanticType, role: ColumnRole) -> Self {
    Self { name: name.into(), semantic_type, role }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
  pub name:    String,
  pub columns: Vec<ColumnDescriptor>,
}

impl TableDescriptor {
  pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
    self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name))
  }
}

// ─── Descriptor ──────────────────────────────────────────────────────────────

/// Table name → ordered column list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
  /// Keyed by lowercase table name.
  tables: BTreeMap<String, TableDescriptor>,
}

impl SchemaDescriptor {
  pub fn new() -> Self { Self::default() }

  /// Builder-style insert; a later table with the same name replaces the
  /// earlier one.
  pub fn with_table(
    mut self,
    name: impl Into<String>,
    columns: Vec<ColumnDescriptor>,
  ) -> Self {
    let name = name.into();
    self
      .tables
      .insert(name.to_ascii_lowercase(), TableDescriptor { name, columns });
    self
  }

  pub fn table(&self, name: &str) -> Option<&TableDescriptor> {
    self.tables.get(&name.to_ascii_lowercase())
  }

  pub fn tables(&self) -> impl Iterator<Item = &TableDescriptor> {
    self.tables.values()
  }

  pub fn is_empty(&self) -> bool { self.tables.is_empty() }

  /// Find a column by bare name, searching `preferred` tables first and then
  /// the whole schema. Result columns produced by a query carry no table
  /// qualifier, so this is how analytics recover their roles.
  pub fn find_column<'a>(
    &'a self,
    preferred: impl IntoIterator<Item = &'a str>,
    column: &str,
  ) -> Option<&'a ColumnDescriptor> {
    preferred
      .into_iter()
      .filter_map(|t| self.table(t))
      .chain(self.tables.values())
      .find_map(|t| t.column(column))
  }
}

/// Plain-text rendering suitable for embedding in a generator prompt.
impl fmt::Display for SchemaDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, table) in self.tables.values().enumerate() {
      if i > 0 {
        writeln!(f)?;
      }
      writeln!(f, "TABLE {}:", table.name)?;
      for c in &table.columns {
        writeln!(f, "- {} ({}, {})", c.name, c.semantic_type, c.role)?;
      }
    }
    Ok(())
  }
}

#[cfg(test)]
pub(crate) mod fixtures {
  use super::*;

  /// The `orders` / `summary` demo schema.
  pub fn demo_schema() -> SchemaDescriptor {
    use ColumnRole::*;
    use SemanticType::*;
    SchemaDescriptor::new()
      .with_table("orders", vec![
        ColumnDescriptor::new("order_id", Integer, Key),
        ColumnDescriptor::new("customer_id", Integer, Key),
        ColumnDescriptor::new("product_id", Integer, Key),
        ColumnDescriptor::new("order_date", Date, Time),
        ColumnDescriptor::new("amount", Real, Measure),
      ])
      .with_table("summary", vec![
        ColumnDescriptor::new("order_id", Integer, Key),
        ColumnDescriptor::new("quantity", Integer, Measure),
        ColumnDescriptor::new("discount", Real, Measure),
        ColumnDescriptor::new("tax", Real, Measure),
      ])
  }
}
