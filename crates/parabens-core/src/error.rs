//! Error types for `parabens-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid CPF {0:?}: expected exactly 11 digits")]
  InvalidCpf(String),

  #[error("unknown channel: {0:?}")]
  UnknownChannel(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
