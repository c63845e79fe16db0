//! Tera rendering of content pages and the outer shell.
//!
//! Templates are registered without an extension so tera does not
//! autoescape; callers pass text through [`encode_text`] themselves and
//! hand pre-rendered HTML fragments in as-is.

use html_escape::encode_text;
use petaldoc_config::Config;
use petaldoc_templates as templates;
use petaldoc_utils::read_override;
use tera::{Context, Tera};

use crate::error::SiteError;

const PAGE: &str = "page";
const SHELL: &str = "shell";

/// A content page: everything shown inside the viewer frame.
#[derive(Debug, Clone, Copy)]
pub struct PageParts<'a> {
  pub title:       &'a str,
  /// Directories between the page and the site root.
  pub depth:       usize,
  pub breadcrumbs: &'a str,
  pub content:     &'a str,
  pub doc_nav:     &'a str,
}

/// The loaded page and shell templates.
pub struct Templates {
  tera: Tera,
}

impl Templates {
  /// Load templates, preferring `page.html` and `shell.html` from the
  /// configured template directory.
  ///
  /// # Errors
  ///
  /// Returns an error if an override cannot be read or fails to parse.
  pub fn new(config: &Config) -> Result<Self, SiteError> {
    let page = read_override(
      config.get_template_file("page.html").as_deref(),
      templates::PAGE_TEMPLATE,
    )?;
    let shell = read_override(
      config.get_template_file("shell.html").as_deref(),
      templates::SHELL_TEMPLATE,
    )?;

    let mut tera = Tera::default();
    tera.add_raw_template(PAGE, &page)?;
    tera.add_raw_template(SHELL, &shell)?;
    Ok(Self { tera })
  }

  /// # Errors
  ///
  /// Returns an error if the template fails to render.
  pub fn render_page(&self, parts: &PageParts<'_>) -> Result<String, SiteError> {
    let mut context = Context::new();
    context.insert("title", &encode_text(parts.title));
    context.insert("root_prefix", &petaldoc_utils::root_prefix(parts.depth));
    context.insert("breadcrumbs", parts.breadcrumbs);
    context.insert("content", parts.content);
    context.insert("doc_nav", parts.doc_nav);
    Ok(self.tera.render(PAGE, &context)?)
  }

  /// # Errors
  ///
  /// Returns an error if the template fails to render.
  pub fn render_shell(
    &self,
    config: &Config,
    sidebar: &str,
  ) -> Result<String, SiteError> {
    let mut context = Context::new();
    context.insert("site_title", &encode_text(&config.title));
    context.insert("type_prefix", &encode_text(&config.type_prefix));
    context.insert("subtitle", &encode_text(&config.subtitle));
    context.insert(
      "repository_url",
      &config
        .repository_url
        .as_deref()
        .map(|url| html_escape::encode_double_quoted_attribute(url).into_owned()),
    );
    context.insert("sidebar", sidebar);
    Ok(self.tera.render(SHELL, &context)?)
  }
}
