//! Error type for `parabens-store-sqlite`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] parabens_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// The CPF is already registered to another user.
  #[error("CPF {0} is already registered")]
  CpfTaken(String),

  #[error("user not found: {0}")]
  UserNotFound(Uuid),

  #[error("contact not found: {0}")]
  ContactNotFound(Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
