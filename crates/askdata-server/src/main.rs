//! askdata server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! store read-only, and serves the chat API over HTTP.
//!
//! Without a `store_path` the server runs against an in-memory copy of the
//! demo `orders` / `summary` data:
//!
//! ```text
//! cargo run -p askdata-server
//! curl -s localhost:8080/chat -H 'content-type: application/json' \
//!   -d '{"sql":"SELECT customer_id, amount FROM orders"}'
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use askdata_core::pipeline::Pipeline;
use askdata_server::load_config;
use askdata_store_sqlite::SqliteStore;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Guarded SQL answering service")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = load_config(&cli.config)?;

  // Open SQLite store.
  let store = match server_cfg.store_path() {
    Some(path) => SqliteStore::open(&path, server_cfg.busy_timeout())
      .await
      .with_context(|| format!("failed to open store at {path:?}"))?,
    None => {
      tracing::warn!("no store_path configured, serving the demo dataset");
      SqliteStore::open_demo()
        .await
        .context("failed to seed demo store")?
    }
  };

  let pipeline = Pipeline::from_store(store, server_cfg.pipeline.clone())
    .await
    .context("failed to load schema")?;
  if pipeline.schema().is_empty() {
    tracing::warn!("store has no tables; every query will be rejected");
  }

  let app = askdata_server::app(Arc::new(pipeline));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
