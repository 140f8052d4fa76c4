//! SQL schema for the parabens SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `user_version` pragma.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    user_id     TEXT PRIMARY KEY,
    username    TEXT NOT NULL UNIQUE,
    cpf         TEXT,            -- 11 digits, no punctuation
    first_name  TEXT NOT NULL DEFAULT '',
    last_name   TEXT NOT NULL DEFAULT '',
    date_birth  TEXT,            -- ISO calendar date, YYYY-MM-DD
    gender      TEXT,            -- 'male' | 'female' | 'other'
    is_active   INTEGER NOT NULL DEFAULT 1,
    created_at  TEXT NOT NULL,   -- ISO 8601 UTC; server-assigned
    updated_at  TEXT NOT NULL
);

-- CPF is unique across users when present; rows without one don't collide.
CREATE UNIQUE INDEX IF NOT EXISTS users_cpf_idx
    ON users(cpf) WHERE cpf IS NOT NULL;

-- Contacts belong to exactly one user and die with them.
CREATE TABLE IF NOT EXISTS contacts (
    contact_id  TEXT PRIMARY KEY,
    user_id     TEXT NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
    channel     TEXT NOT NULL,   -- 'email' | 'phone' | 'whatsapp'
    value       TEXT NOT NULL,
    is_active   INTEGER NOT NULL DEFAULT 1,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS contacts_user_idx   ON contacts(user_id);
CREATE INDEX IF NOT EXISTS users_birthday_idx  ON users(date_birth);

PRAGMA user_version = 1;
";
