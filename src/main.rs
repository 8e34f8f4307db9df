mod app;
mod cache;
mod commands;
mod config;
mod event;
mod filter;
mod query;
mod search;
mod section;
mod tmdb;
mod ui;

use cache::{CacheLayer, CacheStorage, NoopStorage, SqliteStorage};
use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flicks")]
#[command(about = "A terminal UI for movie and TV discovery, powered by TMDB")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/flicks/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Route to open at startup (home, movies, tv)
  #[arg(short, long, default_value = "home")]
  route: String,

  /// Disable the response cache for this session
  #[arg(long)]
  no_cache: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  // Log to a file; stdout belongs to the TUI
  let _log_guard = init_tracing()?;

  // Load configuration
  let config = config::Config::load(args.config.as_deref())?;

  let storage: Arc<dyn CacheStorage> = if args.no_cache {
    Arc::new(NoopStorage)
  } else {
    Arc::new(SqliteStorage::open()?)
  };
  let cache = CacheLayer::new(storage);
  let tmdb = tmdb::CachedTmdbClient::new(&config, cache)?;

  // Initialize and run the app
  let mut app = app::App::new(config, tmdb, args.route);
  app.run().await?;

  Ok(())
}

/// Set up file logging. The returned guard must stay alive for the whole
/// session or buffered log lines are lost.
fn init_tracing() -> Result<tracing_appender::non_blocking::WorkerGuard> {
  let log_dir = dirs::data_dir()
    .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
    .map(|p| p.join("flicks"))
    .unwrap_or_else(|| PathBuf::from("."));
  std::fs::create_dir_all(&log_dir)?;

  let appender = tracing_appender::rolling::never(log_dir, "flicks.log");
  let (writer, guard) = tracing_appender::non_blocking(appender);

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "flicks=info".into()))
    .with_writer(writer)
    .with_ansi(false)
    .init();

  Ok(guard)
}
