//! Contact — a user's reachable address on one delivery channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

// ─── Channel ─────────────────────────────────────────────────────────────────

/// A notification delivery mechanism.
///
/// `Phone` contacts are stored and resolved but never dispatched — there is
/// no SMS path.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
  Email,
  Phone,
  WhatsApp,
}

impl Channel {
  /// The discriminant string stored in the `channel` column and used in
  /// log output. Must match the `rename_all = "lowercase"` serde tags.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Email => "email",
      Self::Phone => "phone",
      Self::WhatsApp => "whatsapp",
    }
  }
}

impl std::str::FromStr for Channel {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "email" => Ok(Self::Email),
      "phone" => Ok(Self::Phone),
      "whatsapp" => Ok(Self::WhatsApp),
      other => Err(Error::UnknownChannel(other.to_owned())),
    }
  }
}

impl std::fmt::Display for Channel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A reachable address for a user on a single channel.
///
/// A user may hold any number of contacts per channel; resolution picks the
/// first active one in store order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
  pub contact_id: Uuid,
  pub user_id:    Uuid,
  pub channel:    Channel,
  /// The address itself — an email address, a phone number in whatever
  /// format the administrative surface accepted.
  pub value:      String,
  pub is_active:  bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

// ─── NewContact ──────────────────────────────────────────────────────────────

/// Input to [`crate::store::DirectoryStore::add_contact`].
/// The id and both timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewContact {
  pub user_id:   Uuid,
  pub channel:   Channel,
  pub value:     String,
  pub is_active: bool,
}

impl NewContact {
  /// Convenience constructor for an active contact.
  pub fn new(user_id: Uuid, channel: Channel, value: impl Into<String>) -> Self {
    Self { user_id, channel, value: value.into(), is_active: true }
  }
}
