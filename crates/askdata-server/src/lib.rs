//! Configuration and router assembly for the askdata server binary.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use anyhow::Context as _;
use askdata_core::{config::PipelineConfig, pipeline::Pipeline, store::QueryStore};
use axum::Router;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ASKDATA__*` environment variables.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  /// SQLite database to open read-only. The seeded demo data is served
  /// from memory when unset.
  pub store_path:      Option<PathBuf>,
  pub busy_timeout_ms: u64,
  pub pipeline:        PipelineConfig,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:            "127.0.0.1".into(),
      port:            8080,
      store_path:      None,
      busy_timeout_ms: 5_000,
      pipeline:        PipelineConfig::default(),
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn busy_timeout(&self) -> Duration { Duration::from_millis(self.busy_timeout_ms) }

  /// `store_path` with a leading `~` expanded.
  pub fn store_path(&self) -> Option<PathBuf> {
    self.store_path.as_deref().map(expand_tilde)
  }
}

/// Load configuration from `path` (optional) layered under the environment.
pub fn load_config(path: &Path) -> anyhow::Result<ServerConfig> {
  from_sources(
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("ASKDATA")
          .separator("__")
          .try_parsing(true),
      ),
  )
}

fn from_sources(
  builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> anyhow::Result<ServerConfig> {
  let settings = builder.build().context("failed to read configuration")?;
  let cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;
  cfg.pipeline.validate().context("invalid pipeline configuration")?;
  Ok(cfg)
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: the JSON API with HTTP request tracing.
pub fn app<S>(pipeline: Arc<Pipeline<S>>) -> Router
where
  S: QueryStore + 'static,
{
  askdata_api::api_router(pipeline).layer(TraceLayer::new_for_http())
}
