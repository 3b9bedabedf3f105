//! Integration tests for `SqliteStore` against the seeded demo database.

use std::time::Duration;

use askdata_core::{
  Error as CoreError, ExecutionErrorKind,
  config::PipelineConfig,
  pipeline::Pipeline,
  result::Value,
  schema::{ColumnRole, SemanticType},
  store::QueryStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_demo().await.expect("demo store")
}

async fn pipeline(config: PipelineConfig) -> Pipeline<SqliteStore> {
  Pipeline::from_store(store().await, config)
    .await
    .expect("pipeline")
}

// ─── Schema ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn describe_lists_seeded_tables() {
  let schema = store().await.describe().await.unwrap();

  let names: Vec<_> = schema.tables().map(|t| t.name.as_str()).collect();
  assert_eq!(names, ["orders", "summary"]);

  let orders = schema.table("orders").unwrap();
  let columns: Vec<_> = orders.columns.iter().map(|c| c.name.as_str()).collect();
  assert_eq!(
    columns,
    ["order_id", "customer_id", "product_id", "order_date", "amount"]
  );

  let date = orders.column("order_date").unwrap();
  assert_eq!(date.semantic_type, SemanticType::Date);
  assert_eq!(date.role, ColumnRole::Time);
  assert_eq!(orders.column("amount").unwrap().role, ColumnRole::Measure);
  assert_eq!(orders.column("order_id").unwrap().role, ColumnRole::Key);
  assert_eq!(orders.column("customer_id").unwrap().role, ColumnRole::Key);

  let summary = schema.table("summary").unwrap();
  assert_eq!(summary.column("tax").unwrap().semantic_type, SemanticType::Real);
  assert_eq!(summary.column("quantity").unwrap().role, ColumnRole::Measure);
}

#[tokio::test]
async fn open_missing_file_fails() {
  let result = SqliteStore::open(
    "/nonexistent/askdata/does-not-exist.sqlite",
    Duration::from_millis(100),
  )
  .await;
  assert!(result.is_err());
}

// ─── Execution ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn top_tax_contributors() {
  let p = pipeline(PipelineConfig::default()).await;
  let response = p
    .run(
      "SELECT o.customer_id, SUM(s.tax) AS total_tax \
       FROM orders o JOIN summary s ON o.order_id = s.order_id \
       GROUP BY o.customer_id ORDER BY total_tax DESC",
    )
    .await
    .unwrap();

  assert_eq!(response.data.columns(), ["customer_id", "total_tax"]);
  let rows: Vec<(i64, f64)> = response
    .data
    .rows()
    .iter()
    .map(|r| match (&r[0], &r[1]) {
      (Value::Integer(c), Value::Real(t)) => (*c, *t),
      other => panic!("unexpected row {other:?}"),
    })
    .collect();
  assert_eq!(
    rows,
    [(103, 28.0), (105, 24.0), (101, 23.5), (104, 15.0), (102, 7.5)]
  );
  assert!(response.message.starts_with("The query returned 5 rows."));
}

#[tokio::test]
async fn monthly_revenue_trend_reports_insight_only() {
  let p = pipeline(PipelineConfig::default()).await;
  let response = p
    .run(
      "SELECT strftime('%Y-%m', order_date) AS month, SUM(amount) AS revenue \
       FROM orders GROUP BY month ORDER BY month",
    )
    .await
    .unwrap();

  assert_eq!(response.data.len(), 6);
  assert_eq!(response.data.rows()[0][0], Value::Text("2025-06".into()));
  assert_eq!(response.data.rows()[0][1], Value::Real(299.99));
  assert_eq!(response.data.rows()[5][1], Value::Real(349.75));

  let insight = response.insight.expect("insight");
  assert_eq!(insight.metric_column, "revenue");
  assert!(insight.text.contains("significantly higher"), "{}", insight.text);
  assert!((insight.percent_delta - 42.35).abs() < 0.01);

  // Largest |z| on this series is about 1.7.
  assert!(response.anomaly.is_none());
}

#[tokio::test]
async fn lower_threshold_flags_the_peak_month() {
  let p = pipeline(PipelineConfig { anomaly_z_threshold: 1.5, ..Default::default() }).await;
  let response = p
    .run(
      "SELECT strftime('%Y-%m', order_date) AS month, SUM(amount) AS revenue \
       FROM orders GROUP BY month ORDER BY month",
    )
    .await
    .unwrap();

  let anomaly = response.anomaly.expect("anomaly");
  assert_eq!(anomaly.flagged_row_indices, [2]);
  assert!(anomaly.text.contains("2025-08"), "{}", anomaly.text);
}

#[tokio::test]
async fn misspelled_column_is_corrected_and_run() {
  let p = pipeline(PipelineConfig::default()).await;
  let response = p
    .run("SELECT rroducts_id, amount FROM orders ORDER BY order_id")
    .await
    .unwrap();

  assert_eq!(response.data.columns(), ["product_id", "amount"]);
  assert_eq!(response.data.rows()[0][0], Value::Integer(201));
  assert!(
    response.message.contains("One unknown column name was corrected"),
    "{}",
    response.message
  );
}

#[tokio::test]
async fn unknown_column_never_reaches_the_store() {
  let p = pipeline(PipelineConfig::default()).await;
  let response = p.answer("SELECT xyz_totally_unknown FROM orders").await;
  assert!(response.data.is_empty());
  assert!(response.insight.is_none());
  assert!(response.anomaly.is_none());
  assert!(response.message.to_lowercase().contains("column"), "{}", response.message);
}

#[tokio::test]
async fn row_cap_truncates_and_notes_it() {
  let p = pipeline(PipelineConfig { max_rows: 2, ..Default::default() }).await;
  let response = p.run("SELECT order_id FROM orders ORDER BY order_id").await.unwrap();

  assert_eq!(response.data.len(), 2);
  assert!(response.message.contains("truncated to the first 2 rows"), "{}", response.message);
}

#[tokio::test]
async fn execute_reports_truncation_flag() {
  let p = pipeline(PipelineConfig::default()).await;
  let (plan, _) = p.approve("SELECT amount FROM orders").unwrap();

  let capped = p.store().execute(&plan, 6).await.unwrap();
  assert_eq!(capped.result.len(), 6);
  assert!(!capped.truncated);

  let capped = p.store().execute(&plan, 5).await.unwrap();
  assert_eq!(capped.result.len(), 5);
  assert!(capped.truncated);
}

#[tokio::test]
async fn empty_result_keeps_columns() {
  let p = pipeline(PipelineConfig::default()).await;
  let response = p
    .run("SELECT order_id, amount FROM orders WHERE amount > 10000")
    .await
    .unwrap();
  assert!(response.data.is_empty());
  assert_eq!(response.data.columns(), ["order_id", "amount"]);
  assert!(response.insight.is_none());
  assert!(response.anomaly.is_none());
}

// ─── Failures ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ambiguous_column_is_a_syntax_failure() {
  let p = pipeline(PipelineConfig::default()).await;
  let err = p
    .run("SELECT order_id FROM orders JOIN summary ON orders.order_id = summary.order_id")
    .await
    .unwrap_err();

  match err {
    CoreError::Execution(e) => assert_eq!(e.kind, ExecutionErrorKind::Syntax),
    other => panic!("expected execution error, got {other:?}"),
  }
}

#[tokio::test]
async fn execution_failure_yields_no_data() {
  let p = pipeline(PipelineConfig::default()).await;
  let response = p
    .answer("SELECT order_id FROM orders JOIN summary ON orders.order_id = summary.order_id")
    .await;
  assert!(response.data.is_empty());
  assert!(response.data.columns().is_empty());
  assert_eq!(response.message, ExecutionErrorKind::Syntax.user_message());
}
