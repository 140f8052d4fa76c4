//! User — the directory account the birthday sweep scans.
//!
//! Accounts are long-lived and mutated through the administrative surface.
//! The notification subsystem only ever reads them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Gender ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
  Male,
  Female,
  Other,
}

// ─── Cpf ─────────────────────────────────────────────────────────────────────

/// Brazilian legal id (Cadastro de Pessoa Física), digits only.
///
/// The newtype guarantees the shape (exactly 11 ASCII digits); uniqueness
/// across users is enforced by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cpf(String);

impl Cpf {
  /// Parse from a string of exactly 11 ASCII digits. No punctuation is
  /// accepted; callers strip formatting before parsing.
  pub fn parse(s: &str) -> Result<Self> {
    if s.len() == 11 && s.bytes().all(|b| b.is_ascii_digit()) {
      Ok(Self(s.to_owned()))
    } else {
      Err(Error::InvalidCpf(s.to_owned()))
    }
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl TryFrom<String> for Cpf {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> { Self::parse(&s) }
}

impl From<Cpf> for String {
  fn from(cpf: Cpf) -> Self { cpf.0 }
}

impl std::fmt::Display for Cpf {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── User ────────────────────────────────────────────────────────────────────

/// A directory account. Reachable addresses live in separate
/// [`Contact`](crate::contact::Contact) records owned by the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub user_id:    Uuid,
  pub username:   String,
  pub cpf:        Option<Cpf>,
  pub first_name: String,
  pub last_name:  String,
  pub date_birth: Option<NaiveDate>,
  pub gender:     Option<Gender>,
  pub is_active:  bool,
  /// Server-assigned; never changes after creation.
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl User {
  /// The name used when addressing the user in a notification: the full
  /// name when any part is present, otherwise the username.
  pub fn display_name(&self) -> String {
    let full = format!("{} {}", self.first_name, self.last_name);
    let full = full.trim();
    if full.is_empty() {
      self.username.clone()
    } else {
      full.to_owned()
    }
  }
}

// ─── NewUser ─────────────────────────────────────────────────────────────────

/// Input to [`crate::store::DirectoryStore::add_user`].
/// The id and both timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub username:   String,
  pub cpf:        Option<Cpf>,
  pub first_name: String,
  pub last_name:  String,
  pub date_birth: Option<NaiveDate>,
  pub gender:     Option<Gender>,
  pub is_active:  bool,
}

impl NewUser {
  /// Convenience constructor: an active account with every optional field
  /// unset.
  pub fn new(username: impl Into<String>) -> Self {
    Self {
      username:   username.into(),
      cpf:        None,
      first_name: String::new(),
      last_name:  String::new(),
      date_birth: None,
      gender:     None,
      is_active:  true,
    }
  }
}
