//! Core types and trait definitions for the parabens user directory and
//! its birthday-notification subsystem.
//!
//! This crate is deliberately free of HTTP and database dependencies;
//! every other crate in the workspace builds on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod contact;
pub mod error;
pub mod queue;
pub mod resolve;
pub mod store;
pub mod user;

pub use error::{Error, Result};
