//! Text helpers shared by the extraction, rendering and site crates.

use std::sync::LazyLock;

use log::error;
use regex::Regex;

/// Matches a complete single-line HTML comment.
static INLINE_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"<!--.*?-->").unwrap_or_else(|e| {
    error!("Failed to compile INLINE_COMMENT_RE regex: {e}");
    never_matching_regex()
  })
});

/// Remove HTML comments (`<!-- ... -->`) from markdown, leaving anything
/// inside fenced code blocks untouched.
///
/// Lines that consisted only of a comment are dropped entirely, while lines
/// that were blank to begin with are kept so paragraph breaks survive. A
/// comment opened on one line and closed on a later one is removed as a
/// whole.
#[must_use]
pub fn strip_html_comments_outside_code(content: &str) -> String {
  let mut result: Vec<String> = Vec::new();
  let mut in_code_block = false;
  let mut in_comment = false;

  for line in content.split('\n') {
    if !in_comment && line.trim().starts_with("```") {
      in_code_block = !in_code_block;
      result.push(line.to_string());
      continue;
    }

    if in_code_block {
      result.push(line.to_string());
      continue;
    }

    let mut rest = line;
    if in_comment {
      match rest.find("-->") {
        Some(end) => {
          in_comment = false;
          rest = &rest[end + 3..];
        },
        None => continue,
      }
    }

    let mut cleaned = INLINE_COMMENT_RE.replace_all(rest, "").into_owned();
    if let Some(open) = cleaned.find("<!--") {
      cleaned.truncate(open);
      in_comment = true;
    }

    if !cleaned.trim().is_empty() || line.trim().is_empty() {
      result.push(cleaned);
    }
  }

  result.join("\n")
}

/// Return at most `max_chars` characters of `text`, never splitting a UTF-8
/// sequence.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
  match text.char_indices().nth(max_chars) {
    Some((idx, _)) => &text[..idx],
    None => text,
  }
}

/// Shorten `text` to `max_len` characters, replacing the tail with `...`
/// when it is too long.
#[must_use]
pub fn ellipsize(text: &str, max_len: usize) -> String {
  if text.chars().count() <= max_len {
    return text.to_string();
  }
  format!("{}...", truncate_chars(text, max_len.saturating_sub(3)))
}

/// Collapse every run of whitespace (including newlines) into one space.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
  text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Create a regex that never matches anything.
///
/// Stands in for a static pattern that failed to compile. Unlike `^$` it
/// does not match the empty string.
#[must_use]
#[allow(
  clippy::unwrap_used,
  reason = "Both patterns are literals that always compile"
)]
pub fn never_matching_regex() -> Regex {
  Regex::new(r"[^\s\S]").unwrap_or_else(|_| Regex::new(r"^\b$").unwrap())
}
