//! Sweep and dispatch orchestration for parabens birthday notifications.
//!
//! The sweep scans the directory for today's birthdays and enqueues one
//! typed job per eligible channel; the worker drains the queue and executes
//! each job against the channel backends. The two sides share nothing but
//! the queue, so either can be replaced independently.

pub mod dispatch;
pub mod queue;
pub mod sweep;

use std::path::PathBuf;

use parabens_notify::EmailConfig;
use serde::Deserialize;


/// Runtime configuration, deserialised from `config.toml` plus
/// `PARABENS_*` environment overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// SQLite database file holding users and contacts.
  pub store_path:    PathBuf,
  /// Directory the notification templates are loaded from.
  pub templates_dir: PathBuf,
  pub email:         EmailConfig,
}
