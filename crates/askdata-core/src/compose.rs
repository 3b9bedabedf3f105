//! Response composer: assembles the outbound [`ChatResponse`].
//!
//! Reports serialise as their text only, and absent reports are omitted
//! entirely so callers can tell "nothing found" from an empty string.

use serde::{Serialize, Serializer};

use crate::{anomaly::AnomalyReport, insight::InsightReport, result::ResultSet};

/// Anything with a one-line narrative for the caller.
pub trait Narrative {
  fn text(&self) -> &str;
}

impl Narrative for InsightReport {
  fn text(&self) -> &str { &self.text }
}

impl Narrative for AnomalyReport {
  fn text(&self) -> &str { &self.text }
}

fn narrative<R: Narrative, S: Serializer>(
  report: &Option<R>,
  serializer: S,
) -> Result<S::Ok, S::Error> {
  match report {
    Some(r) => serializer.serialize_str(r.text()),
    None => serializer.serialize_none(),
  }
}

/// The only entity exposed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatResponse {
  pub message: String,
  pub data:    ResultSet,
  #[serde(skip_serializing_if = "Option::is_none", serialize_with = "narrative")]
  pub insight: Option<InsightReport>,
  #[serde(skip_serializing_if = "Option::is_none", serialize_with = "narrative")]
  pub anomaly: Option<AnomalyReport>,
}

impl ChatResponse {
  /// A failed request: explanatory message, no data, no commentary.
  pub fn failure(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
      data:    ResultSet::default(),
      insight: None,
      anomaly: None,
    }
  }
}

/// Merge a result and its optional commentary. `notes` are appended to the
/// message in order.
pub fn compose(
  result: ResultSet,
  insight: Option<InsightReport>,
  anomaly: Option<AnomalyReport>,
  notes: &[String],
) -> ChatResponse {
  let mut message = match result.len() {
    0 => "The query returned no rows.".to_owned(),
    1 => "The query returned 1 row.".to_owned(),
    n => format!("The query returned {n} rows."),
  };
  for note in notes {
    message.push(' ');
    message.push_str(note);
  }
  ChatResponse { message, data: result, insight, anomaly }
}
