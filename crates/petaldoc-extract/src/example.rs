//! Splitting gallery markup files into titled, labelled example snippets.

use std::sync::LazyLock;

use log::{error, trace};
use petaldoc_markup::utils::{
  collapse_whitespace,
  never_matching_regex,
  truncate_chars,
};
use regex::Regex;

use crate::types::{ExampleSection, ExtractLimits, SubExample};

/// Namespace prefix used for every element in emitted snippets.
pub const CANONICAL_NAMESPACE: &str = "controls";

/// Label given to examples that have no label of their own.
pub const DEFAULT_LABEL: &str = "Example";

const CONTENT_PLACEHOLDER: &str = "<!-- Content -->";

static SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)<local:SectionHeader\b([^>]*)>").unwrap_or_else(|e| {
    error!("Failed to compile SECTION_RE regex: {e}");
    never_matching_regex()
  })
});

static SECTION_ID_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"(?i)\bSectionId="([^"]+)""#).unwrap_or_else(|e| {
    error!("Failed to compile SECTION_ID_ATTR_RE regex: {e}");
    never_matching_regex()
  })
});

static TITLE_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"(?i)\bTitle="([^"]+)""#).unwrap_or_else(|e| {
    error!("Failed to compile TITLE_ATTR_RE regex: {e}");
    never_matching_regex()
  })
});

static BARE_ELEMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"<\w+:(\w+)\s*/?>").unwrap_or_else(|e| {
    error!("Failed to compile BARE_ELEMENT_RE regex: {e}");
    never_matching_regex()
  })
});

static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"(?i)<TextBlock\s+Text="([^"]+)"[^>]*FontWeight="SemiBold"[^>]*/?>"#)
    .unwrap_or_else(|e| {
      error!("Failed to compile LABEL_RE regex: {e}");
      never_matching_regex()
    })
});

static ELEMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"<(\w+):(\w+)([^>]*?)(/?)>").unwrap_or_else(|e| {
    error!("Failed to compile ELEMENT_RE regex: {e}");
    never_matching_regex()
  })
});

static NAMESPACED_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"<\w+:(\w+)").unwrap_or_else(|e| {
    error!("Failed to compile NAMESPACED_NAME_RE regex: {e}");
    never_matching_regex()
  })
});

static LAYOUT_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r#"\s+(?:Margin|HorizontalAlignment|VerticalAlignment|Click|x:Name|Tag|ToolTip\.Tip)="[^"]*""#,
  )
  .unwrap_or_else(|e| {
    error!("Failed to compile LAYOUT_ATTR_RE regex: {e}");
    never_matching_regex()
  })
});

static SIZE_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"\s+(?:Width|Height)="\d+""#).unwrap_or_else(|e| {
    error!("Failed to compile SIZE_ATTR_RE regex: {e}");
    never_matching_regex()
  })
});

static PATH_ICON_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"<PathIcon[^>]*?Data="([^"]*)"[^>]*/>"#).unwrap_or_else(|e| {
    error!("Failed to compile PATH_ICON_RE regex: {e}");
    never_matching_regex()
  })
});

/// Extracts [`ExampleSection`]s from one gallery markup file.
#[derive(Debug, Clone)]
pub struct ExampleExtractor {
  type_prefix: String,
  separator:   String,
  limits:      ExtractLimits,
}

impl ExampleExtractor {
  /// Create an extractor for elements whose names start with `type_prefix`.
  /// The separator element is `{type_prefix}Divider`.
  #[must_use]
  pub fn new(type_prefix: impl Into<String>, limits: ExtractLimits) -> Self {
    let type_prefix = type_prefix.into();
    let separator = format!("{type_prefix}Divider");
    Self {
      type_prefix,
      separator,
      limits,
    }
  }

  #[must_use]
  pub fn type_prefix(&self) -> &str {
    &self.type_prefix
  }

  /// Parse a markup document into sections, in source order.
  ///
  /// Sections that contain no usable custom element are dropped.
  #[must_use]
  pub fn parse(&self, text: &str) -> Vec<ExampleSection> {
    let markers: Vec<(usize, usize, String, String)> = SECTION_RE
      .captures_iter(text)
      .filter_map(|caps| {
        let whole = caps.get(0)?;
        let attrs = &caps[1];
        let title = TITLE_ATTR_RE.captures(attrs)?[1].to_string();
        let section_id = SECTION_ID_ATTR_RE
          .captures(attrs)
          .map_or_else(|| id_from_title(&title), |c| c[1].to_string());
        Some((whole.start(), whole.end(), section_id, title))
      })
      .collect();

    let mut sections = Vec::new();
    for (idx, (_, content_start, section_id, title)) in
      markers.iter().enumerate()
    {
      let next_marker = markers.get(idx + 1).map_or(text.len(), |m| m.0);
      let end = self
        .find_separator(text, *content_start)
        .filter(|&pos| pos < next_marker)
        .unwrap_or(next_marker);

      let sub_examples = self.sub_examples(&text[*content_start..end]);
      if sub_examples.is_empty() {
        trace!("Dropping section '{section_id}' without usable elements");
        continue;
      }

      sections.push(ExampleSection {
        section_id: section_id.clone(),
        title: title.clone(),
        sub_examples,
      });
    }

    sections
  }

  /// Offset of the first bare separator element at or after `from`.
  fn find_separator(&self, text: &str, from: usize) -> Option<usize> {
    BARE_ELEMENT_RE
      .captures_iter(&text[from..])
      .find(|caps| caps[1] == self.separator)
      .and_then(|caps| caps.get(0))
      .map(|m| from + m.start())
  }

  fn sub_examples(&self, content: &str) -> Vec<SubExample> {
    let labels: Vec<_> = LABEL_RE.captures_iter(content).collect();
    let mut result = Vec::new();

    for (idx, caps) in labels.iter().enumerate() {
      let Some(whole) = caps.get(0) else {
        continue;
      };
      let end = labels
        .get(idx + 1)
        .and_then(|next| next.get(0))
        .map_or(content.len(), |m| m.start());
      let snippet = self.elements(&content[whole.end()..end]);
      if !snippet.is_empty() {
        result.push(SubExample {
          label: caps[1].to_string(),
          snippet,
        });
      }
    }

    if result.is_empty() {
      let snippet = self.elements(content);
      if !snippet.is_empty() {
        result.push(SubExample {
          label: DEFAULT_LABEL.to_string(),
          snippet,
        });
      }
    }

    result
  }

  /// Collect up to the configured number of custom elements from `span`,
  /// formatted canonically and joined by newlines.
  fn elements(&self, span: &str) -> String {
    let mut found: Vec<String> = Vec::new();
    let mut cursor = 0;

    while found.len() < self.limits.max_elements_per_example {
      let Some(caps) = ELEMENT_RE.captures_at(span, cursor) else {
        break;
      };
      let Some(whole) = caps.get(0) else {
        break;
      };
      cursor = whole.end();

      let namespace = &caps[1];
      let name = &caps[2];
      if !name.starts_with(&self.type_prefix) || name == self.separator {
        continue;
      }

      let attrs = clean_attrs(&caps[3]);
      let self_closing = !caps[4].is_empty();

      let formatted = if self_closing {
        format_element(name, &attrs, None)
      } else {
        let qualified = format!("{namespace}:{name}");
        let Some((inner_end, close_end)) =
          find_matching_close(span, whole.end(), &qualified)
        else {
          continue;
        };
        cursor = close_end;
        let inner = self.simplify_inner(&span[whole.end()..inner_end]);
        format_element(name, &attrs, Some(&inner))
      };

      if !found.contains(&formatted) {
        found.push(formatted);
      }
    }

    found.join("\n")
  }

  /// Reduce nested content to a single short line.
  fn simplify_inner(&self, inner: &str) -> String {
    let mut normalized = collapse_whitespace(inner);
    if normalized.chars().count() > self.limits.max_normalized_length {
      normalized = format!(
        "{}...",
        truncate_chars(
          &normalized,
          self.limits.max_normalized_length.saturating_sub(3)
        )
      );
    }

    let has_custom = NAMESPACED_NAME_RE
      .captures_iter(&normalized)
      .any(|caps| caps[1].starts_with(&self.type_prefix));
    if has_custom
      || normalized.contains("<StackPanel")
      || normalized.contains("<Grid")
    {
      return self
        .icon_preview(&normalized)
        .unwrap_or_else(|| CONTENT_PLACEHOLDER.to_string());
    }

    if normalized.chars().count() > self.limits.max_inner_content_length {
      return format!(
        "{}...",
        truncate_chars(&normalized, self.limits.max_inner_content_length)
      );
    }
    normalized
  }

  fn icon_preview(&self, content: &str) -> Option<String> {
    let caps = PATH_ICON_RE.captures(content)?;
    let data = &caps[1];
    if data.is_empty() {
      return None;
    }
    if data.starts_with('{') {
      return caps.get(0).map(|m| m.as_str().to_string());
    }
    Some(format!(
      "<PathIcon Data=\"{}...\"/>",
      truncate_chars(data, self.limits.max_icon_data_length)
    ))
  }
}

/// Section id derived from a title: lower-cased, spaces and slashes turned
/// into hyphens.
fn id_from_title(title: &str) -> String {
  title.to_lowercase().replace([' ', '/'], "-")
}

/// Strip sizing, positioning, naming, tooltip and event attributes.
fn clean_attrs(attrs: &str) -> String {
  let attrs = LAYOUT_ATTR_RE.replace_all(attrs, "");
  let attrs = SIZE_ATTR_RE.replace_all(&attrs, "");
  let attrs = collapse_whitespace(&attrs);
  if attrs.is_empty() {
    attrs
  } else {
    format!(" {attrs}")
  }
}

fn format_element(name: &str, attrs: &str, inner: Option<&str>) -> String {
  match inner {
    Some(inner) if !inner.trim().is_empty() => {
      format!(
        "<{CANONICAL_NAMESPACE}:{name}{attrs}>\n    \
         {inner}\n</{CANONICAL_NAMESPACE}:{name}>"
      )
    },
    _ => format!("<{CANONICAL_NAMESPACE}:{name}{attrs}/>"),
  }
}

/// Locate the closing tag for an element opened just before `from`,
/// accounting for nested elements of the same name.
///
/// Returns the offsets of the start and end of the closing tag.
fn find_matching_close(
  text: &str,
  from: usize,
  qualified: &str,
) -> Option<(usize, usize)> {
  let open = format!("<{qualified}");
  let close = format!("</{qualified}>");
  let mut depth = 1usize;
  let mut cursor = from;

  while cursor < text.len() {
    let close_at = cursor + text[cursor..].find(&close)?;
    let nested_open = text[cursor..close_at]
      .find(&open)
      .map(|offset| cursor + offset);

    match nested_open {
      Some(open_at) => {
        let after = open_at + open.len();
        let tag_end = after + text[after..].find('>')?;
        let is_element = text[after..]
          .starts_with(|c: char| c.is_whitespace() || c == '/' || c == '>');
        if is_element && !text[..tag_end].ends_with('/') {
          depth += 1;
        }
        cursor = tag_end + 1;
      },
      None => {
        depth -= 1;
        if depth == 0 {
          return Some((close_at, close_at + close.len()));
        }
        cursor = close_at + close.len();
      },
    }
  }

  None
}
