//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings, birth dates as
//! `YYYY-MM-DD`, UUIDs as hyphenated lowercase strings, and enums as their
//! lowercase discriminants.

use chrono::{DateTime, NaiveDate, Utc};
use parabens_core::{
  contact::{Channel, Contact},
  user::{Cpf, Gender, User},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Gender ──────────────────────────────────────────────────────────────────

pub fn encode_gender(g: Gender) -> &'static str {
  match g {
    Gender::Male => "male",
    Gender::Female => "female",
    Gender::Other => "other",
  }
}

pub fn decode_gender(s: &str) -> Result<Gender> {
  match s {
    "male" => Ok(Gender::Male),
    "female" => Ok(Gender::Female),
    "other" => Ok(Gender::Other),
    other => Err(Error::DateParse(format!("unknown gender: {other:?}"))),
  }
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

/// A `users` row as read from SQLite, before decoding.
pub struct RawUser {
  pub user_id:    String,
  pub username:   String,
  pub cpf:        Option<String>,
  pub first_name: String,
  pub last_name:  String,
  pub date_birth: Option<String>,
  pub gender:     Option<String>,
  pub is_active:  bool,
  pub created_at: String,
  pub updated_at: String,
}

impl RawUser {
  pub fn decode(self) -> Result<User> {
    Ok(User {
      user_id:    decode_uuid(&self.user_id)?,
      username:   self.username,
      cpf:        self.cpf.map(|s| Cpf::parse(&s)).transpose()?,
      first_name: self.first_name,
      last_name:  self.last_name,
      date_birth: self.date_birth.map(|s| decode_date(&s)).transpose()?,
      gender:     self.gender.map(|s| decode_gender(&s)).transpose()?,
      is_active:  self.is_active,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// A `contacts` row as read from SQLite, before decoding.
pub struct RawContact {
  pub contact_id: String,
  pub user_id:    String,
  pub channel:    String,
  pub value:      String,
  pub is_active:  bool,
  pub created_at: String,
  pub updated_at: String,
}

impl RawContact {
  pub fn decode(self) -> Result<Contact> {
    Ok(Contact {
      contact_id: decode_uuid(&self.contact_id)?,
      user_id:    decode_uuid(&self.user_id)?,
      channel:    self.channel.parse::<Channel>().map_err(Error::Core)?,
      value:      self.value,
      is_active:  self.is_active,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}
