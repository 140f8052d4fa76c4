//! The `DirectoryStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `parabens-store-sqlite`). The sweep and dispatch layers depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
  contact::{Contact, NewContact},
  user::{NewUser, User},
};

/// Abstraction over the user/contact directory backend.
///
/// The notification subsystem is read-only against this store; the write
/// operations exist for the administrative surface and for tests.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait DirectoryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Create and persist a new user.
  ///
  /// Returns an error if the CPF, when present, is already registered to
  /// another user.
  fn add_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Retrieve a user by id. Returns `None` if not found.
  fn get_user(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Persist changes to an existing user and bump `updated_at`.
  ///
  /// CPF uniqueness is re-validated, excluding the user itself so an
  /// unchanged CPF does not conflict with its own row.
  fn update_user(
    &self,
    user: User,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Delete a user and, transitively, every contact they own.
  fn delete_user(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Active users whose stored birth date equals `on`.
  ///
  /// Equality covers the full calendar date, year included — this is a
  /// literal match on the stored value, not a month/day recurrence.
  fn users_with_birthday(
    &self,
    on: NaiveDate,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;

  // ── Contacts ──────────────────────────────────────────────────────────

  /// Attach a new contact to an existing user.
  fn add_contact(
    &self,
    input: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// All contacts for a user, active or not, ordered by creation time and
  /// then by contact id. Resolution relies on this order being stable.
  fn contacts_for(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Mark a contact inactive. Returns an error if the contact does not
  /// exist.
  fn deactivate_contact(
    &self,
    contact_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
