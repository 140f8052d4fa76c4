//! parabens sweeper binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the
//! SQLite directory store, runs one birthday sweep for the target date,
//! and drains the resulting jobs to completion. Intended to be invoked
//! once per day by an external scheduler (cron or equivalent).

use std::path::PathBuf;

use anyhow::Context as _;
use chrono::{NaiveDate, Utc};
use clap::Parser;
use parabens_notify::{
  ChannelSet, EmailNotifier, TemplateEngine, WhatsAppStub,
};
use parabens_store_sqlite::SqliteStore;
use parabens_sweeper::{
  AppConfig, dispatch::run_worker, queue::job_queue,
  sweep::run_birthday_sweep,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "parabens birthday sweeper")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Sweep this date instead of today (UTC). Format: YYYY-MM-DD.
  #[arg(long)]
  date: Option<NaiveDate>,
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

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(
      config::Environment::with_prefix("PARABENS").separator("__"),
    )
    .build()
    .context("failed to read config file")?;

  let app_cfg: AppConfig = settings
    .try_deserialize()
    .context("failed to deserialise AppConfig")?;

  // Open the directory store.
  let store = SqliteStore::open(&app_cfg.store_path)
    .await
    .with_context(|| {
      format!("failed to open store at {:?}", app_cfg.store_path)
    })?;

  // Build the channel backends. Missing email credentials fail here,
  // before any user is scanned.
  let templates = TemplateEngine::from_dir(&app_cfg.templates_dir)
    .with_context(|| {
      format!("failed to load templates from {:?}", app_cfg.templates_dir)
    })?;
  let email = EmailNotifier::new(app_cfg.email, templates)
    .context("failed to build email notifier")?;
  let channels = ChannelSet { email, whatsapp: WhatsAppStub };

  let today = cli.date.unwrap_or_else(|| Utc::now().date_naive());
  tracing::info!(%today, "starting birthday sweep");

  let (queue, receiver) = job_queue();
  run_birthday_sweep(&store, &queue, today)
    .await
    .context("birthday sweep failed")?;

  // Dropping the sender lets the worker stop once the buffer is drained.
  drop(queue);

  let report = run_worker(&store, &channels, receiver).await;
  tracing::info!(
    sent = report.sent,
    skipped = report.skipped,
    failed = report.failed,
    "dispatch complete"
  );

  Ok(())
}
