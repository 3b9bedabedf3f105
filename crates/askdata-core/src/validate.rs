//! SQL validator: gates untrusted candidate text against a read-only,
//! schema-bound policy.
//!
//! The check is keyword- and token-based rather than a full parse. Comments
//! and string literals are removed by the [lexer](crate::lexer) first, so
//! neither can hide or forge keywords. Whenever the scan is unsure the
//! candidate is rejected.
//!
//! Only plain (non-keyword) words can be reported as unknown columns. A
//! keyword in a column position is checked against the schema and skipped
//! when it does not resolve.

use std::{
  collections::{BTreeSet, HashMap, HashSet},
  fmt,
  ops::Range,
};

use strum::{AsRefStr, Display};

use crate::{
  config::PipelineConfig,
  correct::{self, Suggestion},
  lexer::{Keyword, Token, TokenKind, tokenize},
  plan::{ColumnRef, QueryPlan},
  schema::{SchemaDescriptor, TableDescriptor},
};

// ─── Violations ──────────────────────────────────────────────────────────────

/// What is wrong with a candidate. Declaration order is severity order: the
/// first kind present in a rejection is the one reported to the caller.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Display,
  AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum ViolationKind {
  UnsafeStatement,
  MultiStatement,
  UnknownTable,
  UnknownColumn,
  AmbiguousCorrection,
  UncorrectableStatement,
}

impl ViolationKind {
  pub fn user_message(self) -> &'static str {
    match self {
      ViolationKind::UnsafeStatement => {
        "Only read-only SELECT queries can be run."
      }
      ViolationKind::MultiStatement => "Only a single query can be run at a time.",
      ViolationKind::UnknownTable => {
        "The query refers to a table that does not exist in this database."
      }
      ViolationKind::UnknownColumn => {
        "The query refers to a column that does not exist and could not be corrected."
      }
      ViolationKind::AmbiguousCorrection => {
        "The query refers to an unknown column that matches more than one real column."
      }
      ViolationKind::UncorrectableStatement => {
        "The query could not be repaired into a valid statement."
      }
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
  pub kind:     ViolationKind,
  /// The offending token as written. Never shown to the caller.
  pub token:    String,
  /// Byte range of `token` in the validated text.
  pub location: Range<usize>,
  /// Tables whose columns are plausible replacements for `token`.
  pub tables:   Vec<String>,
}

impl Violation {
  pub fn new(kind: ViolationKind, token: &Token<'_>) -> Self {
    Self {
      kind,
      token: token.text.to_owned(),
      location: token.span.clone(),
      tables: Vec::new(),
    }
  }

  /// A violation about the statement as a whole rather than one token.
  pub fn statement(kind: ViolationKind) -> Self {
    Self { kind, token: String::new(), location: 0..0, tables: Vec::new() }
  }

  fn with_tables(mut self, tables: Vec<String>) -> Self {
    self.tables = tables;
    self
  }
}

/// A terminal refusal to run a candidate. Always holds at least one
/// violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
  violations: Vec<Violation>,
}

impl fmt::Display for Rejection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "statement rejected: {}", self.kind())
  }
}

impl std::error::Error for Rejection {}

impl Rejection {
  pub fn new(violations: Vec<Violation>) -> Self {
    if violations.is_empty() {
      return Self::from(Violation::statement(ViolationKind::UncorrectableStatement));
    }
    Self { violations }
  }

  /// The most severe violation kind present.
  pub fn kind(&self) -> ViolationKind {
    self
      .violations
      .iter()
      .map(|v| v.kind)
      .min()
      .unwrap_or(ViolationKind::UncorrectableStatement)
  }

  pub fn has(&self, kind: ViolationKind) -> bool {
    self.violations.iter().any(|v| v.kind == kind)
  }

  pub fn violations(&self) -> &[Violation] { &self.violations }
}

impl From<Violation> for Rejection {
  fn from(v: Violation) -> Self { Self { violations: vec![v] } }
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationVerdict {
  Accepted(QueryPlan),
  /// The statement (verbatim candidate text, so violation locations stay
  /// valid) plus the unknown columns the corrector may repair.
  Fixable(String, Vec<Violation>),
  Rejected(Rejection),
}

// ─── Policy tables ───────────────────────────────────────────────────────────

/// Statement keywords that may never appear outside literals and comments.
const BLOCKED: &[&str] = &[
  "INSERT",
  "UPDATE",
  "DELETE",
  "DROP",
  "ALTER",
  "TRUNCATE",
  "CREATE",
  "ATTACH",
  "DETACH",
  "PRAGMA",
  "VACUUM",
  "REINDEX",
  "LOAD_EXTENSION",
  "REPLACE",
];

/// Columns SQLite provides on every rowid table.
const IMPLICIT_COLUMNS: &[&str] = &["rowid", "oid", "_rowid_"];

/// `REPLACE` is also SQLite's `replace(x, y, z)` string function.
fn is_blocked(tokens: &[Token<'_>], i: usize) -> bool {
  let tok = &tokens[i];
  if !matches!(tok.kind, TokenKind::Word(_)) {
    return false;
  }
  if tok.is_word("REPLACE") {
    return !tokens.get(i + 1).is_some_and(|t| t.is_punct('('));
  }
  BLOCKED.iter().any(|b| tok.is_word(b))
}

// ─── Entry point ─────────────────────────────────────────────────────────────

/// Classify `candidate` against `schema`.
///
/// Pure: the result depends only on the arguments.
pub fn validate(
  candidate: &str,
  schema: &SchemaDescriptor,
  policy: &PipelineConfig,
) -> ValidationVerdict {
  let tokens = match tokenize(candidate) {
    Ok(t) => t,
    Err(_) => {
      return ValidationVerdict::Rejected(
        Violation::statement(ViolationKind::UnsafeStatement).into(),
      );
    }
  };

  if let Err(rejection) = check_shape(&tokens) {
    return ValidationVerdict::Rejected(rejection);
  }

  // Everything before the optional trailing terminator.
  let body = match tokens.last() {
    Some(t) if t.kind == TokenKind::Terminator => &tokens[..tokens.len() - 1],
    _ => &tokens[..],
  };

  let scope = Scope::collect(body, schema);
  let mut violations = scope.violations.clone();
  let mut references = BTreeSet::new();
  resolve_columns(body, &scope, &mut references, &mut violations);

  if violations.iter().any(|v| v.kind != ViolationKind::UnknownColumn) {
    return ValidationVerdict::Rejected(Rejection::new(violations));
  }

  if !violations.is_empty() {
    let unfixable: Vec<Violation> = violations
      .iter()
      .filter(|v| {
        matches!(
          correct::suggest(&v.token, &v.tables, schema, policy.edit_distance_limit),
          Suggestion::NoMatch
        )
      })
      .cloned()
      .collect();
    if !unfixable.is_empty() {
      return ValidationVerdict::Rejected(Rejection::new(unfixable));
    }
    return ValidationVerdict::Fixable(candidate.to_owned(), violations);
  }

  let end = body.last().map_or(0, |t| {
    // Keep the closing quote of a trailing quoted identifier.
    if t.kind == TokenKind::QuotedIdent { t.span.end + 1 } else { t.span.end }
  });
  let statement = candidate[..end].trim().to_owned();
  let tables = scope.tables.iter().map(|t| t.name.clone()).collect();
  ValidationVerdict::Accepted(QueryPlan::new(statement, tables, references))
}

/// Single statement, leading `SELECT`, no blocked keywords.
fn check_shape(tokens: &[Token<'_>]) -> Result<(), Rejection> {
  let Some(first) = tokens.first() else {
    return Err(Violation::statement(ViolationKind::UnsafeStatement).into());
  };

  let mut violations = Vec::new();

  if let Some(pos) = tokens.iter().position(|t| t.kind == TokenKind::Terminator)
    && pos + 1 != tokens.len()
  {
    violations.push(Violation::new(ViolationKind::MultiStatement, &tokens[pos]));
  }

  if !first.is_keyword(Keyword::SELECT) {
    violations.push(Violation::new(ViolationKind::UnsafeStatement, first));
  }

  for i in 0..tokens.len() {
    if is_blocked(tokens, i) {
      violations.push(Violation::new(ViolationKind::UnsafeStatement, &tokens[i]));
    }
  }

  if violations.is_empty() { Ok(()) } else { Err(Rejection::new(violations)) }
}

// ─── Scope ───────────────────────────────────────────────────────────────────

/// Tables and aliases visible to column references.
struct Scope<'s> {
  /// Tables named in `FROM` / `JOIN`, deduplicated.
  tables:       Vec<&'s TableDescriptor>,
  /// Lowercase table name or alias → table.
  bindings:     HashMap<String, &'s TableDescriptor>,
  /// Lowercase column aliases and derived-table aliases.
  free_aliases: HashSet<String>,
  /// Token indices already classified as not being column references.
  consumed:     Vec<bool>,
  violations:   Vec<Violation>,
}

impl<'s> Scope<'s> {
  fn collect(body: &[Token<'_>], schema: &'s SchemaDescriptor) -> Self {
    let mut scope = Scope {
      tables:       Vec::new(),
      bindings:     HashMap::new(),
      free_aliases: HashSet::new(),
      consumed:     vec![false; body.len()],
      violations:   Vec::new(),
    };

    for i in 0..body.len() {
      let introduces_tables = body[i].is_keyword(Keyword::JOIN)
        || (body[i].is_keyword(Keyword::FROM) && !is_distinct_from(body, i));
      if !introduces_tables {
        continue;
      }
      let mut j = i + 1;
      loop {
        j = scope.table_ref(body, j, schema);
        if body[i].is_keyword(Keyword::FROM) && body.get(j).is_some_and(|t| t.is_punct(',')) {
          j += 1;
          continue;
        }
        break;
      }
    }

    scope.collect_aliases(body);
    scope
  }

  /// Parse `name [AS alias]` or `main.name [alias]` at `j`; returns the index
  /// after it. A `(` starts a subquery, which the outer scan handles.
  fn table_ref(
    &mut self,
    body: &[Token<'_>],
    j: usize,
    schema: &'s SchemaDescriptor,
  ) -> usize {
    let Some(first) = body.get(j) else { return j };
    if !first.is_identifier() {
      return j;
    }
    let qualified = body.get(j + 1).is_some_and(|t| t.is_punct('.'));
    self.consumed[j] = true;
    let mut name = first;
    let mut k = j + 1;

    if qualified && let Some(member) = body.get(k + 1).filter(|t| t.is_identifier()) {
      self.consumed[k] = true;
      self.consumed[k + 1] = true;
      if !first.text.eq_ignore_ascii_case("main") {
        self.violations.push(Violation::new(ViolationKind::UnknownTable, first));
      }
      name = member;
      k += 2;
    }

    let table = schema.table(name.text);
    match table {
      Some(t) => {
        if !self.tables.iter().any(|x| std::ptr::eq(*x, t)) {
          self.tables.push(t);
        }
        self.bindings.insert(t.name.to_ascii_lowercase(), t);
      }
      None => {
        self.violations.push(Violation::new(ViolationKind::UnknownTable, name));
      }
    }

    let alias = if body.get(k).is_some_and(|t| t.is_keyword(Keyword::AS)) {
      self.consumed[k] = true;
      k += 1;
      body.get(k).filter(|t| t.is_identifier())
    } else {
      body.get(k).filter(|t| t.is_identifier() && t.keyword().is_none())
    };
    if let Some(alias) = alias {
      self.consumed[k] = true;
      k += 1;
      if let Some(t) = table {
        self.bindings.insert(alias.text.to_ascii_lowercase(), t);
      }
    }
    k
  }

  /// Column and derived-table aliases (`expr AS name`, `expr name`) and
  /// collation names.
  fn collect_aliases(&mut self, body: &[Token<'_>]) {
    for i in 0..body.len() {
      if self.consumed[i] || !body[i].is_identifier() {
        continue;
      }
      let prev = i.checked_sub(1).map(|p| &body[p]);
      if prev.is_some_and(|p| p.is_keyword(Keyword::COLLATE)) {
        self.consumed[i] = true;
        continue;
      }
      let next = body.get(i + 1);
      if next.is_some_and(|t| t.is_punct('(') || t.is_punct('.')) {
        continue;
      }
      let explicit = prev.is_some_and(|p| p.is_keyword(Keyword::AS));
      let implicit = body[i].keyword().is_none() && prev.is_some_and(ends_expression);
      if explicit || implicit {
        self.consumed[i] = true;
        self.free_aliases.insert(body[i].text.to_ascii_lowercase());
      }
    }
  }

  fn table_names(&self) -> Vec<String> {
    self.tables.iter().map(|t| t.name.clone()).collect()
  }
}

/// `a IS [NOT] DISTINCT FROM b` is a comparison, not a table clause.
fn is_distinct_from(body: &[Token<'_>], from: usize) -> bool {
  from > 1 && body[from - 1].is_keyword(Keyword::DISTINCT) && {
    let before = &body[from - 2];
    before.is_keyword(Keyword::IS) || before.is_keyword(Keyword::NOT)
  }
}

/// Whether an identifier right after `tok` can only be an implicit alias.
fn ends_expression(tok: &Token<'_>) -> bool {
  match tok.kind {
    TokenKind::Word(Keyword::NoKeyword | Keyword::END) => true,
    TokenKind::QuotedIdent | TokenKind::Str | TokenKind::Number => true,
    TokenKind::Punct(c) => c == ')',
    TokenKind::Word(_) | TokenKind::Terminator | TokenKind::Operator => false,
  }
}

// ─── Column resolution ───────────────────────────────────────────────────────

fn resolve_columns(
  body: &[Token<'_>],
  scope: &Scope<'_>,
  references: &mut BTreeSet<ColumnRef>,
  violations: &mut Vec<Violation>,
) {
  let mut skip = vec![false; body.len()];

  for i in 0..body.len() {
    let tok = &body[i];
    if scope.consumed[i] || skip[i] || !tok.is_identifier() {
      continue;
    }
    let next = body.get(i + 1);
    if next.is_some_and(|t| t.is_punct('(')) {
      continue;
    }

    if next.is_some_and(|t| t.is_punct('.')) {
      let member = body.get(i + 2);
      if member.is_some() {
        skip[i + 2] = true;
      }
      let qualifier = tok.text.to_ascii_lowercase();
      let table = scope.bindings.get(&qualifier).copied();
      match (table, member) {
        (Some(t), Some(m)) if m.is_identifier() => match t.column(m.text) {
          Some(c) => {
            references.insert(ColumnRef { table: t.name.clone(), column: c.name.clone() });
          }
          None => violations.push(
            Violation::new(ViolationKind::UnknownColumn, m)
              .with_tables(vec![t.name.clone()]),
          ),
        },
        (Some(_), _) => {}
        (None, _) if scope.free_aliases.contains(&qualifier) => {}
        (None, _) => {
          violations.push(Violation::new(ViolationKind::UnknownTable, tok));
        }
      }
      continue;
    }

    let mut resolved = false;
    for t in &scope.tables {
      if let Some(c) = t.column(tok.text) {
        references.insert(ColumnRef { table: t.name.clone(), column: c.name.clone() });
        resolved = true;
      }
    }
    let known = resolved
      || tok.keyword().is_some()
      || scope.free_aliases.contains(&tok.text.to_ascii_lowercase())
      || (!scope.tables.is_empty()
        && IMPLICIT_COLUMNS.iter().any(|c| tok.text.eq_ignore_ascii_case(c)));
    if !known {
      violations.push(
        Violation::new(ViolationKind::UnknownColumn, tok).with_tables(scope.table_names()),
      );
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::schema::fixtures::demo_schema;

  fn check(sql: &str) -> ValidationVerdict {
    validate(sql, &demo_schema(), &PipelineConfig::default())
  }

  fn rejected_with(sql: &str, kind: ViolationKind) {
    match check(sql) {
      ValidationVerdict::Rejected(r) => {
        assert!(r.has(kind), "{sql:?}: expected {kind}, got {:?}", r.violations())
      }
      other => panic!("{sql:?}: expected rejection, got {other:?}"),
    }
  }

  fn accepted(sql: &str) -> QueryPlan {
    match check(sql) {
      ValidationVerdict::Accepted(plan) => plan,
      other => panic!("{sql:?}: expected acceptance, got {other:?}"),
    }
  }

  // ── Acceptance ─────────────────────────────────────────────────────────────

  #[test]
  fn accepts_join_with_aggregate_and_alias() {
    let plan = accepted(
      "SELECT orders.customer_id, SUM(summary.tax) AS total_tax \
       FROM summary JOIN orders ON summary.order_id = orders.order_id \
       GROUP BY orders.customer_id ORDER BY total_tax DESC;",
    );
    assert!(!plan.statement().ends_with(';'));
    assert_eq!(plan.tables(), ["summary", "orders"]);
    assert!(plan.references().contains(&ColumnRef {
      table:  "summary".into(),
      column: "tax".into(),
    }));
  }

  #[test]
  fn accepts_monthly_trend_with_functions_and_strings() {
    let plan = accepted(
      "select strftime('%Y-%m', order_date) as month, sum(amount) as revenue \
       from orders group by month order by month",
    );
    assert_eq!(plan.references().len(), 2);
  }

  #[test]
  fn accepts_table_aliases_and_implicit_column_alias() {
    accepted(
      "SELECT o.customer_id, s.tax t FROM orders o JOIN summary AS s \
       ON o.order_id = s.order_id WHERE t > 1 AND o.amount IS NOT NULL",
    );
  }

  #[test]
  fn accepts_trailing_comment_after_terminator() {
    let plan = accepted("SELECT amount FROM orders; -- done");
    assert_eq!(plan.statement(), "SELECT amount FROM orders");
  }

  #[test]
  fn accepts_replace_function_and_subquery() {
    accepted(
      "SELECT replace(order_date, '-', '/') FROM orders \
       WHERE amount > (SELECT AVG(amount) FROM orders)",
    );
    accepted("SELECT x.total FROM (SELECT SUM(amount) AS total FROM orders) AS x");
  }

  #[test]
  fn accepts_empty_sentinel_query() { accepted("SELECT NULL WHERE 0"); }

  #[test]
  fn case_expression_alias_is_not_a_column() {
    // `amounts` is one edit from `amount`; it must stay an alias.
    let plan = accepted(
      "SELECT order_date, CASE WHEN amount > 200 THEN 1 ELSE 0 END amounts \
       FROM orders ORDER BY order_date",
    );
    assert!(plan.statement().contains("END amounts"));
    accepted("SELECT CASE WHEN amount > 200 THEN 'big' ELSE 'small' END size FROM orders");
    accepted("SELECT CASE amount WHEN 0 THEN 0 ELSE 1 END AS flag FROM orders WHERE flag = 1");
  }

  #[test]
  fn collation_names_are_not_columns() {
    accepted("SELECT order_date FROM orders ORDER BY order_date COLLATE BINARY");
    accepted("SELECT order_date FROM orders ORDER BY order_date COLLATE NOCASE DESC");
    accepted("SELECT amount FROM orders WHERE order_date = '2025-06-12' COLLATE RTRIM");
  }

  #[test]
  fn keyword_named_aliases_and_rowid_resolve() {
    accepted(
      "SELECT strftime('%Y', order_date) AS year, COUNT(*) AS count \
       FROM orders GROUP BY year ORDER BY count DESC",
    );
    let plan = accepted("SELECT rowid, amount FROM orders");
    assert_eq!(plan.references().len(), 1);
  }

  #[test]
  fn keyword_named_unknown_table_rejected() {
    rejected_with("SELECT * FROM user", ViolationKind::UnknownTable);
    rejected_with("SELECT amount FROM orders JOIN data ON 1", ViolationKind::UnknownTable);
  }

  // ── Safety ─────────────────────────────────────────────────────────────────

  #[test]
  fn blocked_keywords_reject_in_any_case_or_position() {
    for sql in [
      "DROP TABLE orders",
      "delete from orders",
      "SELECT * FROM orders WHERE 1 = (UpDaTe orders SET amount = 0)",
      "SELECT 1 /* harmless */ INSERT",
      "SELECT amount FROM orders -- x\n DROP",
      "PRAGMA table_info(orders)",
      "SELECT load_extension('evil')",
      "ATTACH DATABASE 'x' AS y",
      "REPLACE INTO orders VALUES (1)",
      "DETACH DATABASE y",
      "VACUUM",
      "SELECT amount FROM orders WHERE 0 OR ReIndex",
      "REINDEX orders",
      "SELECT/**/amount/**/FROM/**/orders/**/WHERE/**/0/**/OR/**/TRUNCATE",
    ] {
      rejected_with(sql, ViolationKind::UnsafeStatement);
    }
  }

  #[test]
  fn keywords_inside_literals_and_comments_are_ignored() {
    accepted("SELECT amount FROM orders WHERE order_date <> 'DROP TABLE orders'");
    accepted("SELECT amount /* DELETE FROM orders */ FROM orders");
  }

  #[test]
  fn non_select_leading_keyword_is_unsafe() {
    rejected_with("WITH x AS (SELECT 1) SELECT * FROM x", ViolationKind::UnsafeStatement);
    rejected_with("EXPLAIN SELECT 1", ViolationKind::UnsafeStatement);
    rejected_with("", ViolationKind::UnsafeStatement);
    rejected_with("   -- only a comment", ViolationKind::UnsafeStatement);
  }

  #[test]
  fn ambiguous_lexing_is_unsafe() {
    rejected_with("SELECT 'unterminated", ViolationKind::UnsafeStatement);
    rejected_with("SELECT 1 /*! DROP */", ViolationKind::UnsafeStatement);
    rejected_with(
      "SELECT amount FROM orders /* a /* b */ DELETE FROM orders */",
      ViolationKind::UnsafeStatement,
    );
  }

  #[test]
  fn second_statement_is_multi_statement() {
    rejected_with("SELECT 1; SELECT 2", ViolationKind::MultiStatement);
    rejected_with("SELECT 1;;", ViolationKind::MultiStatement);
    rejected_with("SELECT amount FROM orders; DROP TABLE orders", ViolationKind::MultiStatement);
  }

  #[test]
  fn multi_statement_with_blocked_keyword_reports_both() {
    let ValidationVerdict::Rejected(r) = check("SELECT 1; DROP TABLE orders") else {
      panic!("expected rejection");
    };
    assert!(r.has(ViolationKind::MultiStatement));
    assert!(r.has(ViolationKind::UnsafeStatement));
    assert_eq!(r.kind(), ViolationKind::UnsafeStatement);
  }

  #[test]
  fn terminator_inside_string_is_not_a_second_statement() {
    accepted("SELECT amount FROM orders WHERE order_date = '2025-01-01; DROP'");
  }

  // ── Schema resolution ──────────────────────────────────────────────────────

  #[test]
  fn unknown_table_rejected() {
    rejected_with("SELECT name FROM customers", ViolationKind::UnknownTable);
    rejected_with("SELECT * FROM sqlite_master", ViolationKind::UnknownTable);
    rejected_with("SELECT * FROM other.orders", ViolationKind::UnknownTable);
    rejected_with("SELECT c.amount FROM orders", ViolationKind::UnknownTable);
  }

  #[test]
  fn close_unknown_column_is_fixable() {
    match check("SELECT rroducts_id FROM orders") {
      ValidationVerdict::Fixable(stmt, v) => {
        assert_eq!(stmt, "SELECT rroducts_id FROM orders");
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].kind, ViolationKind::UnknownColumn);
        assert_eq!(v[0].token, "rroducts_id");
        assert_eq!(v[0].location, 7..18);
        assert_eq!(v[0].tables, ["orders"]);
      }
      other => panic!("expected fixable, got {other:?}"),
    }
  }

  #[test]
  fn qualified_unknown_column_scoped_to_its_table() {
    match check("SELECT o.amout FROM orders o JOIN summary s ON o.order_id = s.order_id") {
      ValidationVerdict::Fixable(_, v) => assert_eq!(v[0].tables, ["orders"]),
      other => panic!("expected fixable, got {other:?}"),
    }
  }

  #[test]
  fn distant_unknown_column_rejected() {
    rejected_with("SELECT xyz_totally_unknown FROM orders", ViolationKind::UnknownColumn);
  }

  #[test]
  fn column_without_any_table_rejected() {
    rejected_with("SELECT amount", ViolationKind::UnknownColumn);
  }

  #[test]
  fn quoted_identifiers_resolve() {
    let plan = accepted(r#"SELECT "amount" FROM "orders""#);
    assert_eq!(plan.statement(), r#"SELECT "amount" FROM "orders""#);
  }

  #[test]
  fn validation_is_pure() {
    let sql = "SELECT amont FROM orders";
    assert_eq!(check(sql), check(sql));
  }
}
