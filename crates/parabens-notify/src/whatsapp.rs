//! WhatsApp delivery backend — currently a stub.
//!
//! Records the intent in the log and reports success without any external
//! call. It lives behind its own type so a real integration can replace it
//! without touching sweep or dispatch code.

use parabens_core::contact::Contact;

use crate::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct WhatsAppStub;

impl WhatsAppStub {
  /// "Deliver" `message` to the contact. Always succeeds.
  pub async fn send(&self, contact: &Contact, message: &str) -> Result<()> {
    tracing::info!(to = %contact.value, text = message, "whatsapp delivery stubbed");
    Ok(())
  }
}
