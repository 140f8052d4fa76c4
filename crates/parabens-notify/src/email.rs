//! Transactional email client.
//!
//! Wraps a Mailgun-style HTTP API: one authenticated form-encoded POST to
//! `{base_url}/{domain}/messages` per message, HTTP Basic auth with the
//! fixed username `api` and the secret key as password.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tera::Context;

use parabens_core::contact::Contact;

use crate::{Error, Result, template::TemplateEngine};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Settings for [`EmailNotifier`]. Deserialised from the application
/// config; `base_url`, `domain`, and `api_key` are required.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
  /// Provider API root, e.g. `https://api.mailgun.net/v3`.
  pub base_url:     String,
  /// Sending domain registered with the provider.
  pub domain:       String,
  /// Provider secret key; the password half of HTTP Basic auth.
  pub api_key:      String,
  /// Envelope sender override. Defaults to `no-reply@{domain}`.
  #[serde(default)]
  pub from:         Option<String>,
  /// Request timeout in seconds.
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 { 100 }

// ─── Receipt ─────────────────────────────────────────────────────────────────

/// The provider's response to an accepted message.
#[derive(Debug, Clone, Deserialize)]
pub struct SendReceipt {
  /// Provider-assigned message id, when the provider returns one.
  #[serde(default)]
  pub id:      Option<String>,
  /// Human-readable status line, e.g. `"Queued. Thank you."`.
  #[serde(default)]
  pub message: String,
}

// ─── Notifier ────────────────────────────────────────────────────────────────

/// Email delivery backend.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based and the
/// template engine is immutable after construction.
#[derive(Clone, Debug)]
pub struct EmailNotifier {
  client:    Client,
  templates: TemplateEngine,
  base_url:  String,
  domain:    String,
  api_key:   String,
  from:      String,
}

impl EmailNotifier {
  /// Validate `config` and build the HTTP client.
  ///
  /// Fails with [`Error::Config`] if any required setting is empty; this
  /// is a startup-time check, not a per-call one.
  pub fn new(config: EmailConfig, templates: TemplateEngine) -> Result<Self> {
    if config.base_url.is_empty() {
      return Err(Error::Config("base_url"));
    }
    if config.domain.is_empty() {
      return Err(Error::Config("domain"));
    }
    if config.api_key.is_empty() {
      return Err(Error::Config("api_key"));
    }

    let from = config
      .from
      .filter(|f| !f.is_empty())
      .unwrap_or_else(|| format!("no-reply@{}", config.domain));

    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()?;

    Ok(Self {
      client,
      templates,
      base_url: config.base_url.trim_end_matches('/').to_owned(),
      domain: config.domain,
      api_key: config.api_key,
      from,
    })
  }

  /// Render the `{template}.txt` / `{template}.html` pair with `context`
  /// and post the message to the provider.
  ///
  /// `contact` must be an email contact; its `value` becomes the sole
  /// recipient. A status below 400 yields the parsed [`SendReceipt`];
  /// anything else surfaces as [`Error::Delivery`] with the raw status and
  /// body.
  pub async fn send(
    &self,
    contact: &Contact,
    subject: &str,
    template: &str,
    context: &Context,
  ) -> Result<SendReceipt> {
    let body = self.templates.render_pair(template, context)?;
    let url = format!("{}/{}/messages", self.base_url, self.domain);

    let form = [
      ("from", self.from.as_str()),
      ("to", contact.value.as_str()),
      ("subject", subject),
      ("text", body.text.as_str()),
      ("html", body.html.as_str()),
    ];

    let response = self
      .client
      .post(&url)
      .basic_auth("api", Some(&self.api_key))
      .form(&form)
      .send()
      .await?;

    let status = response.status();
    if status.as_u16() >= 400 {
      return Err(Error::Delivery {
        status: status.as_u16(),
        body:   response.text().await?,
      });
    }

    Ok(response.json().await?)
  }
}
