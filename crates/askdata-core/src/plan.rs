//! [`QueryPlan`]: a statement that has passed validation.

use std::collections::BTreeSet;

/// A `(table, column)` pair referenced by a plan, using schema spelling.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnRef {
  pub table:  String,
  pub column: String,
}

/// A single, read-only `SELECT` whose every referenced table and column is
/// known to the schema.
///
/// Only the validator can construct one, so a [`QueryStore`] can never be
/// handed an unchecked statement.
///
/// [`QueryStore`]: crate::store::QueryStore
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
  statement:  String,
  tables:     Vec<String>,
  references: BTreeSet<ColumnRef>,
}

impl QueryPlan {
  pub(crate) fn new(
    statement: String,
    tables: Vec<String>,
    references: BTreeSet<ColumnRef>,
  ) -> Self {
    Self { statement, tables, references }
  }

  /// The SQL to execute, without a trailing terminator.
  pub fn statement(&self) -> &str { &self.statement }

  /// Tables named in `FROM` / `JOIN` clauses, in order of appearance.
  pub fn tables(&self) -> &[String] { &self.tables }

  pub fn references(&self) -> &BTreeSet<ColumnRef> { &self.references }
}
