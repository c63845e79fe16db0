//! Breadcrumbs, previous/next links and the shared sidebar.

use std::{collections::BTreeSet, fmt::Write};

use html_escape::encode_text;
use petaldoc_docs::{Category, CategoryDoc};

use crate::source::ResolvedDoc;

/// `MigrationExample` becomes `Migration Example`.
#[must_use]
pub fn split_camel_case(name: &str) -> String {
  let mut words = String::with_capacity(name.len() + 4);
  for (i, c) in name.chars().enumerate() {
    if i > 0 && c.is_uppercase() {
      words.push(' ');
    }
    words.push(c);
  }
  words
}

/// Navigation facts for definition pages.
pub struct Navigation<'a> {
  type_prefix: &'a str,
  /// Categories that have a page, in display order.
  categories:  Vec<&'a Category>,
  /// Names of every resolved page.
  known:       BTreeSet<&'a str>,
  /// Non-helper pages in name order.
  primary:     Vec<&'a str>,
}

impl<'a> Navigation<'a> {
  #[must_use]
  pub fn new(
    type_prefix: &'a str,
    docs: &'a [ResolvedDoc],
    categories: &'a [Category],
    category_docs: &[CategoryDoc],
  ) -> Self {
    let categories = categories
      .iter()
      .filter(|c| category_docs.iter().any(|doc| doc.slug == c.slug))
      .collect();
    let known = docs.iter().map(|d| d.name.as_str()).collect();
    let mut primary: Vec<&str> = docs
      .iter()
      .filter(|d| !d.is_helper)
      .map(|d| d.name.as_str())
      .collect();
    primary.sort_unstable();

    Self {
      type_prefix,
      categories,
      known,
      primary,
    }
  }

  fn short<'n>(&self, name: &'n str) -> &'n str {
    name.strip_prefix(self.type_prefix).unwrap_or(name)
  }

  /// First category, in display order, that lists `name`.
  #[must_use]
  pub fn category_of(&self, name: &str) -> Option<&'a Category> {
    self.categories.iter().copied().find(|c| c.contains(name))
  }

  /// Breadcrumb trail for a page one level below the site root.
  #[must_use]
  pub fn breadcrumbs(&self, name: &str) -> String {
    match self.category_of(name) {
      Some(category) => {
        format!(
          "<div class=\"breadcrumbs\"><a href=\"../home.html\">Home</a> &gt; \
           <a href=\"../categories/{}.html\">{}</a></div>",
          category.slug,
          encode_text(&category.name)
        )
      },
      None => {
        "<div class=\"breadcrumbs\"><a href=\"../home.html\">Home</a></div>"
          .to_string()
      },
    }
  }

  /// Pages adjacent to `name`: its category's pages in name order when it
  /// has a category, else every non-helper page in name order.
  #[must_use]
  pub fn neighbours(&self, name: &str) -> (Option<&'a str>, Option<&'a str>) {
    let siblings: Vec<&str> = match self.category_of(name) {
      Some(category) => {
        let mut members: Vec<&str> = category
          .members
          .iter()
          .filter_map(|m| self.known.get(m.as_str()).copied())
          .collect();
        members.sort_unstable();
        members.dedup();
        members
      },
      None => self.primary.clone(),
    };

    let Some(idx) = siblings.iter().position(|s| *s == name) else {
      return (None, None);
    };
    let prev = idx.checked_sub(1).and_then(|i| siblings.get(i)).copied();
    let next = siblings.get(idx + 1).copied();
    (prev, next)
  }

  /// Previous/next footer for `name`, empty when it has no neighbours.
  #[must_use]
  pub fn doc_nav(&self, name: &str) -> String {
    let (prev, next) = self.neighbours(name);
    if prev.is_none() && next.is_none() {
      return String::new();
    }

    let prev = prev.map_or_else(String::new, |p| {
      format!("<a href=\"{p}.html\">← {}</a>", self.short(p))
    });
    let next = next.map_or_else(String::new, |n| {
      format!("<a href=\"{n}.html\">{} →</a>", self.short(n))
    });
    format!(
      "<div class=\"doc-nav\">\n  <div class=\"nav-left\">{prev}</div>\n  <div \
       class=\"nav-right\">{next}</div>\n</div>"
    )
  }
}

/// Inputs for the sidebar shared by every page.
pub struct SidebarInputs<'a> {
  pub type_prefix:     &'a str,
  pub custom_prefixes: &'a [String],
  /// Guides that have a page, in configured order.
  pub guides:          &'a [String],
  pub categories:      &'a [CategoryDoc],
  pub docs:            &'a [ResolvedDoc],
}

/// Sidebar list items: Home, Guides, Categories, Controls, Helpers.
#[must_use]
pub fn render_sidebar(inputs: &SidebarInputs<'_>) -> String {
  let display = |name: &str| {
    name
      .strip_prefix(inputs.type_prefix)
      .unwrap_or(name)
      .to_string()
  };

  let mut items: Vec<String> = vec![
    "<li><a href=\"home.html\" target=\"viewer\" class=\"active\">Home</a></li>"
      .to_string(),
  ];

  if !inputs.guides.is_empty() {
    items.push("<li><h2>Guides</h2></li>".to_string());
    for guide in inputs.guides {
      items.push(format!(
        "<li><a href=\"{guide}.html\" target=\"viewer\">{}</a></li>",
        encode_text(&split_camel_case(guide))
      ));
    }
  }

  if !inputs.categories.is_empty() {
    items.push("<li><h2>Categories</h2></li>".to_string());
    for category in inputs.categories {
      items.push(format!(
        "<li><a href=\"categories/{}.html\" target=\"viewer\">{}</a></li>",
        category.slug,
        encode_text(&category.name)
      ));
    }
  }

  items.push("<li><h2>Controls</h2></li>".to_string());
  for doc in inputs.docs.iter().filter(|d| !d.is_helper) {
    let short = display(&doc.name);
    let badge = if inputs
      .custom_prefixes
      .iter()
      .any(|p| short.starts_with(p.as_str()))
    {
      "<sup class=\"custom-badge\">✦</sup>"
    } else {
      ""
    };
    items.push(format!(
      "<li><a href=\"controls/{}.html\" target=\"viewer\">{}{badge}</a></li>",
      doc.name,
      encode_text(&short)
    ));
  }

  let mut helpers: Vec<(String, &str)> = inputs
    .docs
    .iter()
    .filter(|d| d.is_helper)
    .map(|d| (display(&d.name), d.name.as_str()))
    .collect();
  if !helpers.is_empty() {
    helpers.sort();
    items.push("<li><h2 class=\"helpers-header\">Helpers</h2></li>".to_string());
    for (short, name) in helpers {
      let mut item = String::new();
      let _ = write!(
        item,
        "<li><a href=\"controls/{name}.html\" target=\"viewer\">{}</a></li>",
        encode_text(&short)
      );
      items.push(item);
    }
  }

  items.join("\n")
}
