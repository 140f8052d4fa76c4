//! [`SqliteStore`] — the SQLite implementation of [`DirectoryStore`].

use std::path::Path;

use chrono::{NaiveDate, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use parabens_core::{
  contact::{Contact, NewContact},
  store::DirectoryStore,
  user::{Cpf, NewUser, User},
};

use crate::{
  Error, Result,
  encode::{
    RawContact, RawUser, encode_date, encode_dt, encode_gender, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Row mapping ─────────────────────────────────────────────────────────────

const USER_COLUMNS: &str = "user_id, username, cpf, first_name, last_name, \
                            date_birth, gender, is_active, created_at, \
                            updated_at";

fn raw_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawUser> {
  Ok(RawUser {
    user_id:    row.get(0)?,
    username:   row.get(1)?,
    cpf:        row.get(2)?,
    first_name: row.get(3)?,
    last_name:  row.get(4)?,
    date_birth: row.get(5)?,
    gender:     row.get(6)?,
    is_active:  row.get(7)?,
    created_at: row.get(8)?,
    updated_at: row.get(9)?,
  })
}

fn raw_contact(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawContact> {
  Ok(RawContact {
    contact_id: row.get(0)?,
    user_id:    row.get(1)?,
    channel:    row.get(2)?,
    value:      row.get(3)?,
    is_active:  row.get(4)?,
    created_at: row.get(5)?,
    updated_at: row.get(6)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A parabens user directory backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// The user currently holding `cpf`, if any. Used by `add_user` and
  /// `update_user` to surface a typed conflict before hitting the UNIQUE
  /// index.
  async fn cpf_owner(&self, cpf: &Cpf) -> Result<Option<Uuid>> {
    let cpf_str = cpf.as_str().to_owned();

    let owner: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT user_id FROM users WHERE cpf = ?1",
              rusqlite::params![cpf_str],
              |r| r.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    owner.map(|s| Uuid::parse_str(&s)).transpose().map_err(Error::Uuid)
  }

  /// Insert a fully-built [`User`] into the `users` table.
  async fn insert_user(&self, user: &User) -> Result<()> {
    let user_id_str    = encode_uuid(user.user_id);
    let username       = user.username.clone();
    let cpf_str        = user.cpf.as_ref().map(|c| c.as_str().to_owned());
    let first_name     = user.first_name.clone();
    let last_name      = user.last_name.clone();
    let date_birth_str = user.date_birth.map(encode_date);
    let gender_str     = user.gender.map(encode_gender).map(str::to_owned);
    let is_active      = user.is_active;
    let created_at_str = encode_dt(user.created_at);
    let updated_at_str = encode_dt(user.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (
             user_id, username, cpf, first_name, last_name,
             date_birth, gender, is_active, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            user_id_str,
            username,
            cpf_str,
            first_name,
            last_name,
            date_birth_str,
            gender_str,
            is_active,
            created_at_str,
            updated_at_str,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── DirectoryStore impl ─────────────────────────────────────────────────────

impl DirectoryStore for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn add_user(&self, input: NewUser) -> Result<User> {
    if let Some(cpf) = &input.cpf {
      if self.cpf_owner(cpf).await?.is_some() {
        return Err(Error::CpfTaken(cpf.as_str().to_owned()));
      }
    }

    let now = Utc::now();
    let user = User {
      user_id:    Uuid::new_v4(),
      username:   input.username,
      cpf:        input.cpf,
      first_name: input.first_name,
      last_name:  input.last_name,
      date_birth: input.date_birth,
      gender:     input.gender,
      is_active:  input.is_active,
      created_at: now,
      updated_at: now,
    };

    self.insert_user(&user).await?;
    Ok(user)
  }

  async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
    let id_str = encode_uuid(id);
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = ?1");

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id_str], raw_user)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::decode).transpose()
  }

  async fn update_user(&self, mut user: User) -> Result<User> {
    if let Some(cpf) = &user.cpf {
      if let Some(owner) = self.cpf_owner(cpf).await? {
        if owner != user.user_id {
          return Err(Error::CpfTaken(cpf.as_str().to_owned()));
        }
      }
    }

    user.updated_at = Utc::now();

    let user_id_str    = encode_uuid(user.user_id);
    let username       = user.username.clone();
    let cpf_str        = user.cpf.as_ref().map(|c| c.as_str().to_owned());
    let first_name     = user.first_name.clone();
    let last_name      = user.last_name.clone();
    let date_birth_str = user.date_birth.map(encode_date);
    let gender_str     = user.gender.map(encode_gender).map(str::to_owned);
    let is_active      = user.is_active;
    let updated_at_str = encode_dt(user.updated_at);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE users SET
             username = ?2, cpf = ?3, first_name = ?4, last_name = ?5,
             date_birth = ?6, gender = ?7, is_active = ?8, updated_at = ?9
           WHERE user_id = ?1",
          rusqlite::params![
            user_id_str,
            username,
            cpf_str,
            first_name,
            last_name,
            date_birth_str,
            gender_str,
            is_active,
            updated_at_str,
          ],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::UserNotFound(user.user_id));
    }
    Ok(user)
  }

  async fn delete_user(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM users WHERE user_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if deleted == 0 {
      return Err(Error::UserNotFound(id));
    }
    Ok(())
  }

  async fn users_with_birthday(&self, on: NaiveDate) -> Result<Vec<User>> {
    let on_str = encode_date(on);
    let sql = format!(
      "SELECT {USER_COLUMNS} FROM users
       WHERE date_birth = ?1 AND is_active = 1
       ORDER BY created_at, user_id"
    );

    let raws: Vec<RawUser> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![on_str], raw_user)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUser::decode).collect()
  }

  // ── Contacts ──────────────────────────────────────────────────────────────

  async fn add_contact(&self, input: NewContact) -> Result<Contact> {
    // Surface a typed error instead of the raw FK violation.
    if self.get_user(input.user_id).await?.is_none() {
      return Err(Error::UserNotFound(input.user_id));
    }

    let now = Utc::now();
    let contact = Contact {
      contact_id: Uuid::new_v4(),
      user_id:    input.user_id,
      channel:    input.channel,
      value:      input.value,
      is_active:  input.is_active,
      created_at: now,
      updated_at: now,
    };

    let contact_id_str = encode_uuid(contact.contact_id);
    let user_id_str    = encode_uuid(contact.user_id);
    let channel_str    = contact.channel.as_str().to_owned();
    let value          = contact.value.clone();
    let is_active      = contact.is_active;
    let created_at_str = encode_dt(contact.created_at);
    let updated_at_str = encode_dt(contact.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contacts (
             contact_id, user_id, channel, value,
             is_active, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            contact_id_str,
            user_id_str,
            channel_str,
            value,
            is_active,
            created_at_str,
            updated_at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(contact)
  }

  async fn contacts_for(&self, user_id: Uuid) -> Result<Vec<Contact>> {
    let id_str = encode_uuid(user_id);

    let raws: Vec<RawContact> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT contact_id, user_id, channel, value,
                  is_active, created_at, updated_at
           FROM contacts
           WHERE user_id = ?1
           ORDER BY created_at, contact_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], raw_contact)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::decode).collect()
  }

  async fn deactivate_contact(&self, contact_id: Uuid) -> Result<()> {
    let id_str = encode_uuid(contact_id);
    let updated_at_str = encode_dt(Utc::now());

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE contacts SET is_active = 0, updated_at = ?2
           WHERE contact_id = ?1",
          rusqlite::params![id_str, updated_at_str],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::ContactNotFound(contact_id));
    }
    Ok(())
  }
}
