//! SQL corrector: deterministic, single-pass repair of misspelled columns.
//!
//! Each unknown column is matched by edit distance against the columns of
//! the tables it could belong to. A fix is applied only when one column is
//! clearly closest; ties are refused rather than guessed. The corrected text
//! is validated once more and any remaining problem is terminal.

use crate::{
  config::PipelineConfig,
  plan::QueryPlan,
  schema::SchemaDescriptor,
  validate::{Rejection, ValidationVerdict, Violation, ViolationKind, validate},
};

// ─── Edit distance ───────────────────────────────────────────────────────────

/// Levenshtein distance over Unicode scalar values, ignoring ASCII case.
pub fn edit_distance(a: &str, b: &str) -> usize {
  let a: Vec<char> = a.chars().map(|c| c.to_ascii_lowercase()).collect();
  let b: Vec<char> = b.chars().map(|c| c.to_ascii_lowercase()).collect();
  if a.is_empty() {
    return b.len();
  }

  let mut prev: Vec<usize> = (0..=b.len()).collect();
  let mut curr = vec![0; b.len() + 1];
  for (i, ca) in a.iter().enumerate() {
    curr[0] = i + 1;
    for (j, cb) in b.iter().enumerate() {
      let cost = usize::from(ca != cb);
      curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
    }
    std::mem::swap(&mut prev, &mut curr);
  }
  prev[b.len()]
}

// ─── Suggestions ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
  /// Exactly one column at the minimum distance, within the limit.
  Unique { column: String, distance: usize },
  /// Two or more columns tie at the minimum distance, within the limit.
  Ambiguous,
  /// Nothing within the limit.
  NoMatch,
}

/// Best replacement for `token` among the columns of `tables`.
///
/// Columns shared by several tables (join keys) count once.
pub fn suggest(
  token: &str,
  tables: &[String],
  schema: &SchemaDescriptor,
  limit: usize,
) -> Suggestion {
  let mut names: Vec<&str> = Vec::new();
  for column in tables
    .iter()
    .filter_map(|t| schema.table(t))
    .flat_map(|t| t.columns.iter())
  {
    if !names.iter().any(|n| n.eq_ignore_ascii_case(&column.name)) {
      names.push(&column.name);
    }
  }

  let mut best: Option<(usize, &str)> = None;
  let mut tied = false;
  for name in names {
    let d = edit_distance(token, name);
    match best {
      Some((bd, _)) if d > bd => {}
      Some((bd, _)) if d == bd => tied = true,
      _ => {
        best = Some((d, name));
        tied = false;
      }
    }
  }

  match best {
    Some((d, _)) if d > limit => Suggestion::NoMatch,
    Some(_) if tied => Suggestion::Ambiguous,
    Some((distance, column)) => Suggestion::Unique { column: column.to_owned(), distance },
    None => Suggestion::NoMatch,
  }
}

// ─── Correction ──────────────────────────────────────────────────────────────

/// One applied replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
  pub from:     String,
  pub to:       String,
  pub distance: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
  pub plan:          QueryPlan,
  pub substitutions: Vec<Substitution>,
}

/// Repair every unknown-column violation in `statement` and re-validate.
///
/// `violations` must come from validating `statement`; their locations are
/// byte ranges into it.
pub fn correct(
  statement: &str,
  violations: &[Violation],
  schema: &SchemaDescriptor,
  policy: &PipelineConfig,
) -> Result<Correction, Rejection> {
  let mut failures = Vec::new();
  let mut edits: Vec<(&Violation, String, usize)> = Vec::new();

  for v in violations {
    if v.kind != ViolationKind::UnknownColumn {
      failures.push(v.clone());
      continue;
    }
    match suggest(&v.token, &v.tables, schema, policy.edit_distance_limit) {
      Suggestion::Unique { column, distance } => edits.push((v, column, distance)),
      Suggestion::Ambiguous => failures.push(Violation {
        kind: ViolationKind::AmbiguousCorrection,
        ..v.clone()
      }),
      Suggestion::NoMatch => failures.push(v.clone()),
    }
  }
  if !failures.is_empty() {
    return Err(Rejection::new(failures));
  }

  // Rewrite back to front so earlier locations stay valid.
  edits.sort_by(|a, b| b.0.location.start.cmp(&a.0.location.start));
  let mut text = statement.to_owned();
  for (v, column, _) in &edits {
    let in_bounds = v.location.start <= v.location.end
      && v.location.end <= text.len()
      && text.is_char_boundary(v.location.start)
      && text.is_char_boundary(v.location.end);
    if !in_bounds {
      return Err(Violation::statement(ViolationKind::UncorrectableStatement).into());
    }
    text.replace_range(v.location.clone(), column);
  }

  match validate(&text, schema, policy) {
    ValidationVerdict::Accepted(plan) => {
      let mut substitutions: Vec<Substitution> = edits
        .into_iter()
        .map(|(v, to, distance)| Substitution { from: v.token.clone(), to, distance })
        .collect();
      substitutions.reverse();
      Ok(Correction { plan, substitutions })
    }
    ValidationVerdict::Fixable(..) | ValidationVerdict::Rejected(_) => {
      Err(Violation::statement(ViolationKind::UncorrectableStatement).into())
    }
  }
}
