//! Error types for `parabens-notify`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A required channel-client setting is empty or absent. Raised at
  /// construction time, never per call.
  #[error("email notifier configuration missing required value: {0}")]
  Config(&'static str),

  #[error("template error: {0}")]
  Template(#[from] tera::Error),

  #[error("transport error: {0}")]
  Transport(#[from] reqwest::Error),

  /// The provider rejected the delivery. Carries the raw HTTP status and
  /// response body so callers can log or match on them.
  #[error("provider rejected delivery: {status} - {body}")]
  Delivery { status: u16, body: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
