//! Template rendering for notification bodies.
//!
//! Every email is rendered twice from the same context: a plain-text body
//! from `{name}.txt` and an HTML body from `{name}.html`.

use std::path::Path;

use tera::{Context, Tera};

use crate::Result;

/// The text/HTML body pair produced for one email.
#[derive(Debug, Clone)]
pub struct RenderedEmail {
  pub text: String,
  pub html: String,
}

/// A loaded set of notification templates.
///
/// Cheap to clone; holds no mutable state after construction.
#[derive(Clone, Debug)]
pub struct TemplateEngine {
  tera: Tera,
}

impl TemplateEngine {
  /// Load every template file under `dir`, keyed by its path relative to
  /// `dir` (so `templates/emails/birthday.txt` becomes
  /// `emails/birthday.txt`).
  pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
    let glob = format!("{}/**/*", dir.as_ref().display());
    Ok(Self { tera: Tera::new(&glob)? })
  }

  /// Build from in-memory `(name, source)` pairs — useful for testing.
  pub fn from_raw<'a>(
    templates: impl IntoIterator<Item = (&'a str, &'a str)>,
  ) -> Result<Self> {
    let mut tera = Tera::default();
    tera.add_raw_templates(templates)?;
    Ok(Self { tera })
  }

  /// Render the `{name}.txt` / `{name}.html` pair with `context`.
  pub fn render_pair(
    &self,
    name: &str,
    context: &Context,
  ) -> Result<RenderedEmail> {
    Ok(RenderedEmail {
      text: self.tera.render(&format!("{name}.txt"), context)?,
      html: self.tera.render(&format!("{name}.html"), context)?,
    })
  }
}
