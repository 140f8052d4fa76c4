//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use parabens_core::{
  contact::{Channel, NewContact},
  store::DirectoryStore,
  user::{Cpf, NewUser},
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn birthday_user(username: &str, date: NaiveDate) -> NewUser {
  let mut input = NewUser::new(username);
  input.first_name = "Ana".into();
  input.last_name = "Souza".into();
  input.date_birth = Some(date);
  input
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_user() {
  let s = store().await;

  let mut input = NewUser::new("asouza");
  input.first_name = "Ana".into();
  input.cpf = Some(Cpf::parse("12345678901").unwrap());
  let user = s.add_user(input).await.unwrap();

  let fetched = s.get_user(user.user_id).await.unwrap().unwrap();
  assert_eq!(fetched.user_id, user.user_id);
  assert_eq!(fetched.username, "asouza");
  assert_eq!(fetched.cpf.as_ref().unwrap().as_str(), "12345678901");
  assert!(fetched.is_active);
}

#[tokio::test]
async fn get_user_missing_returns_none() {
  let s = store().await;
  let result = s.get_user(Uuid::new_v4()).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn cpf_is_unique_across_users() {
  let s = store().await;

  let mut first = NewUser::new("first");
  first.cpf = Some(Cpf::parse("12345678901").unwrap());
  s.add_user(first).await.unwrap();

  let mut second = NewUser::new("second");
  second.cpf = Some(Cpf::parse("12345678901").unwrap());
  let err = s.add_user(second).await.unwrap_err();
  assert!(matches!(err, Error::CpfTaken(_)));
}

#[tokio::test]
async fn users_without_cpf_do_not_collide() {
  let s = store().await;
  s.add_user(NewUser::new("first")).await.unwrap();
  s.add_user(NewUser::new("second")).await.unwrap();
}

#[tokio::test]
async fn update_user_keeps_own_cpf() {
  let s = store().await;

  let mut input = NewUser::new("asouza");
  input.cpf = Some(Cpf::parse("12345678901").unwrap());
  let mut user = s.add_user(input).await.unwrap();

  // Re-saving with the same CPF must not conflict with the user's own row.
  user.first_name = "Ana Clara".into();
  let updated = s.update_user(user).await.unwrap();
  assert_eq!(updated.first_name, "Ana Clara");
}

#[tokio::test]
async fn update_user_rejects_taken_cpf() {
  let s = store().await;

  let mut first = NewUser::new("first");
  first.cpf = Some(Cpf::parse("12345678901").unwrap());
  s.add_user(first).await.unwrap();

  let mut user = s.add_user(NewUser::new("second")).await.unwrap();
  user.cpf = Some(Cpf::parse("12345678901").unwrap());
  let err = s.update_user(user).await.unwrap_err();
  assert!(matches!(err, Error::CpfTaken(_)));
}

#[tokio::test]
async fn update_user_bumps_updated_at() {
  let s = store().await;
  let user = s.add_user(NewUser::new("asouza")).await.unwrap();
  let created = user.updated_at;

  let updated = s.update_user(user).await.unwrap();
  assert!(updated.updated_at >= created);
}

#[tokio::test]
async fn delete_user_cascades_to_contacts() {
  let s = store().await;
  let user = s.add_user(NewUser::new("asouza")).await.unwrap();
  let contact = s
    .add_contact(NewContact::new(user.user_id, Channel::Email, "a@b.com"))
    .await
    .unwrap();

  s.delete_user(user.user_id).await.unwrap();

  assert!(s.get_user(user.user_id).await.unwrap().is_none());
  // The contact died with its owner.
  let err = s.deactivate_contact(contact.contact_id).await.unwrap_err();
  assert!(matches!(err, Error::ContactNotFound(_)));
}

#[tokio::test]
async fn delete_user_missing_errors() {
  let s = store().await;
  let err = s.delete_user(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::UserNotFound(_)));
}

// ─── Birthday query ──────────────────────────────────────────────────────────

#[tokio::test]
async fn birthday_query_matches_exact_date() {
  let s = store().await;
  let date = NaiveDate::from_ymd_opt(1990, 3, 14).unwrap();

  let user = s.add_user(birthday_user("match", date)).await.unwrap();
  s.add_user(NewUser::new("no-birthday")).await.unwrap();

  let matched = s.users_with_birthday(date).await.unwrap();
  assert_eq!(matched.len(), 1);
  assert_eq!(matched[0].user_id, user.user_id);
}

#[tokio::test]
async fn birthday_query_is_year_sensitive() {
  let s = store().await;
  let born = NaiveDate::from_ymd_opt(1990, 3, 14).unwrap();
  s.add_user(birthday_user("match", born)).await.unwrap();

  // Same month and day, different year: the literal date match misses it.
  let other_year = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
  let matched = s.users_with_birthday(other_year).await.unwrap();
  assert!(matched.is_empty());
}

#[tokio::test]
async fn birthday_query_skips_inactive_users() {
  let s = store().await;
  let date = NaiveDate::from_ymd_opt(1990, 3, 14).unwrap();

  let mut input = birthday_user("inactive", date);
  input.is_active = false;
  s.add_user(input).await.unwrap();

  let matched = s.users_with_birthday(date).await.unwrap();
  assert!(matched.is_empty());
}

// ─── Contacts ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_contact_requires_existing_user() {
  let s = store().await;
  let err = s
    .add_contact(NewContact::new(Uuid::new_v4(), Channel::Email, "a@b.com"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::UserNotFound(_)));
}

#[tokio::test]
async fn contacts_for_returns_creation_order() {
  let s = store().await;
  let user = s.add_user(NewUser::new("asouza")).await.unwrap();

  for value in ["first@b.com", "second@b.com", "third@b.com"] {
    s.add_contact(NewContact::new(user.user_id, Channel::Email, value))
      .await
      .unwrap();
  }

  let contacts = s.contacts_for(user.user_id).await.unwrap();
  let values: Vec<&str> = contacts.iter().map(|c| c.value.as_str()).collect();
  assert_eq!(values, ["first@b.com", "second@b.com", "third@b.com"]);
}

#[tokio::test]
async fn contacts_for_includes_inactive() {
  let s = store().await;
  let user = s.add_user(NewUser::new("asouza")).await.unwrap();
  let contact = s
    .add_contact(NewContact::new(user.user_id, Channel::WhatsApp, "+55 11 0"))
    .await
    .unwrap();

  s.deactivate_contact(contact.contact_id).await.unwrap();

  let contacts = s.contacts_for(user.user_id).await.unwrap();
  assert_eq!(contacts.len(), 1);
  assert!(!contacts[0].is_active);
}

#[tokio::test]
async fn deactivate_contact_missing_errors() {
  let s = store().await;
  let err = s.deactivate_contact(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::ContactNotFound(_)));
}

#[tokio::test]
async fn channel_roundtrips_through_storage() {
  let s = store().await;
  let user = s.add_user(NewUser::new("asouza")).await.unwrap();

  for channel in [Channel::Email, Channel::Phone, Channel::WhatsApp] {
    s.add_contact(NewContact::new(user.user_id, channel, "value"))
      .await
      .unwrap();
  }

  let contacts = s.contacts_for(user.user_id).await.unwrap();
  let channels: Vec<Channel> = contacts.iter().map(|c| c.channel).collect();
  assert_eq!(channels, [Channel::Email, Channel::Phone, Channel::WhatsApp]);
}
