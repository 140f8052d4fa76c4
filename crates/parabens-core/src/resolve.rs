//! Contact resolution — which of a user's contacts can actually be
//! notified, and over which channels.
//!
//! Pure functions over an already-loaded contact list; no I/O. Callers load
//! contacts through [`crate::store::DirectoryStore::contacts_for`], which
//! returns them in stable order (creation time, then id), so resolution is
//! deterministic.

use std::collections::BTreeSet;

use crate::contact::{Channel, Contact};

/// The first active contact on `channel`, in the order given.
///
/// `None` is the "nothing to notify" outcome, not an error — callers skip
/// gracefully.
pub fn resolve_contact(
  contacts: &[Contact],
  channel: Channel,
) -> Option<&Contact> {
  contacts.iter().find(|c| c.channel == channel && c.is_active)
}

/// The set of channels on which the user has at least one active contact.
pub fn eligible_channels(contacts: &[Contact]) -> BTreeSet<Channel> {
  contacts
    .iter()
    .filter(|c| c.is_active)
    .map(|c| c.channel)
    .collect()
}
