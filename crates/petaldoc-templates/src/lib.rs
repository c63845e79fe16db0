use std::collections::BTreeMap;

/// Content page rendered into the viewer frame.
pub const PAGE_TEMPLATE: &str = include_str!("../templates/page.html");
/// Outer shell with the sidebar and viewer frame.
pub const SHELL_TEMPLATE: &str = include_str!("../templates/shell.html");

pub const STYLE_CSS: &str = include_str!("../templates/style.css");
pub const SHELL_JS: &str = include_str!("../templates/shell.js");
pub const CONTENT_JS: &str = include_str!("../templates/content.js");

/// Every embedded template by file name, in name order.
#[must_use]
pub fn all_templates() -> BTreeMap<&'static str, &'static str> {
  let mut templates = BTreeMap::new();
  templates.insert("page.html", PAGE_TEMPLATE);
  templates.insert("shell.html", SHELL_TEMPLATE);
  templates.insert("style.css", STYLE_CSS);
  templates.insert("shell.js", SHELL_JS);
  templates.insert("content.js", CONTENT_JS);
  templates
}
