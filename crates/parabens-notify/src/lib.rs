//! Notification channel backends for parabens.
//!
//! One concrete type per delivery channel: the transactional-email client
//! ([`EmailNotifier`]) and the WhatsApp stub ([`WhatsAppStub`]). Dispatch
//! code selects a backend by matching on
//! [`Channel`](parabens_core::contact::Channel) — no reflection, no
//! registry.

pub mod email;
pub mod error;
pub mod template;
pub mod whatsapp;

pub use email::{EmailConfig, EmailNotifier, SendReceipt};
pub use error::{Error, Result};
pub use template::{RenderedEmail, TemplateEngine};
// Re-exported so callers can build render contexts without naming tera.
pub use tera::Context;
pub use whatsapp::WhatsAppStub;


/// The set of concrete delivery backends available to a dispatcher.
///
/// Holds no mutable state; cheap to clone and safe to share across
/// concurrent dispatches.
#[derive(Clone)]
pub struct ChannelSet {
  pub email:    EmailNotifier,
  pub whatsapp: WhatsAppStub,
}
