//! Regex-driven conversion from the markdown dialect produced by the doc
//! renderer into HTML fragments.
//!
//! The conversion is a fixed sequence of passes over the whole document.
//! Fenced code blocks are lifted out first and replaced by placeholder tokens
//! so that none of the later passes (tables in particular) can see their
//! contents; they are put back as the very last step.

use std::sync::LazyLock;

use log::error;
use regex::{Captures, Regex};

use crate::utils::never_matching_regex;

/// Inline style applied to every content image.
pub const IMAGE_STYLE: &str = "max-width:800px;width:100%;height:auto;\
                               border-radius:8px;box-shadow:0 2px 8px \
                               rgba(0,0,0,0.15);";

const PLACEHOLDER_PREFIX: &str = "@@PETALDOC_CODE_BLOCK_";
const PLACEHOLDER_SUFFIX: &str = "@@";

static CODE_FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?s)```([\w#+-]+)?[^\S\n]*\n(.*?)```").unwrap_or_else(|e| {
    error!("Failed to compile CODE_FENCE_RE regex: {e}");
    never_matching_regex()
  })
});

static INLINE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"`([^`]+)`").unwrap_or_else(|e| {
    error!("Failed to compile INLINE_CODE_RE regex: {e}");
    never_matching_regex()
  })
});

static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap_or_else(|e| {
    error!("Failed to compile IMAGE_RE regex: {e}");
    never_matching_regex()
  })
});

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap_or_else(|e| {
    error!("Failed to compile LINK_RE regex: {e}");
    never_matching_regex()
  })
});

static H3_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?m)^### (.+)$").unwrap_or_else(|e| {
    error!("Failed to compile H3_RE regex: {e}");
    never_matching_regex()
  })
});

static H2_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?m)^## (.+)$").unwrap_or_else(|e| {
    error!("Failed to compile H2_RE regex: {e}");
    never_matching_regex()
  })
});

static H1_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?m)^# (.+)$").unwrap_or_else(|e| {
    error!("Failed to compile H1_RE regex: {e}");
    never_matching_regex()
  })
});

static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\*\*(.+?)\*\*").unwrap_or_else(|e| {
    error!("Failed to compile BOLD_RE regex: {e}");
    never_matching_regex()
  })
});

static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\*(.+?)\*").unwrap_or_else(|e| {
    error!("Failed to compile ITALIC_RE regex: {e}");
    never_matching_regex()
  })
});

static LIST_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?m)^- (.+)$").unwrap_or_else(|e| {
    error!("Failed to compile LIST_ITEM_RE regex: {e}");
    never_matching_regex()
  })
});

static LIST_RUN_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?:<li>.*</li>\n?)+").unwrap_or_else(|e| {
    error!("Failed to compile LIST_RUN_RE regex: {e}");
    never_matching_regex()
  })
});

static EMPTY_PARAGRAPH_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"<p>\s*</p>").unwrap_or_else(|e| {
    error!("Failed to compile EMPTY_PARAGRAPH_RE regex: {e}");
    never_matching_regex()
  })
});

/// Convert a markdown document into an HTML fragment.
///
/// `depth` is the number of directories between the page and the site root;
/// relative image paths are prefixed with one `../` per level.
///
/// # Example
///
/// ```
/// let html = petaldoc_markup::convert("See [Button](DaisyButton.md).", 1);
/// assert_eq!(html, r#"<p>See <a href="DaisyButton.html">Button</a>.</p>"#);
/// ```
#[must_use]
pub fn convert(markdown: &str, depth: usize) -> String {
  let path_prefix = "../".repeat(depth);

  let mut code_blocks: Vec<String> = Vec::new();
  let html = CODE_FENCE_RE.replace_all(markdown, |caps: &Captures| {
    let lang = caps.get(1).map_or("text", |m| m.as_str());
    let code = clean_code_block(&caps[2]);
    code_blocks.push(format!(
      "<pre><code class=\"language-{lang}\">{}</code></pre>",
      html_escape::encode_text(&code)
    ));
    placeholder(code_blocks.len() - 1)
  });

  let html = INLINE_CODE_RE.replace_all(&html, "<code>${1}</code>");

  let html = IMAGE_RE.replace_all(&html, |caps: &Captures| {
    let alt = &caps[1];
    let src = &caps[2];
    let src = if is_external(src) || src.starts_with('/') {
      src.to_string()
    } else {
      format!("{path_prefix}{src}")
    };
    format!("<img src=\"{src}\" alt=\"{alt}\" style=\"{IMAGE_STYLE}\">")
  });

  let html = LINK_RE.replace_all(&html, |caps: &Captures| {
    let text = &caps[1];
    let url = &caps[2];
    if is_external(url) {
      format!("<a href=\"{url}\" target=\"_blank\" rel=\"noopener\">{text}</a>")
    } else {
      format!("<a href=\"{}\">{text}</a>", rewrite_markdown_link(url))
    }
  });

  let html = H3_RE.replace_all(&html, "<h3>${1}</h3>");
  let html = H2_RE.replace_all(&html, "<h2>${1}</h2>");
  let html = H1_RE.replace_all(&html, "<h1>${1}</h1>");

  let html = BOLD_RE.replace_all(&html, "<strong>${1}</strong>");
  let html = ITALIC_RE.replace_all(&html, "<em>${1}</em>");

  let html = convert_tables(&html);

  let html = LIST_ITEM_RE.replace_all(&html, "<li>${1}</li>");
  let html = LIST_RUN_RE.replace_all(&html, "<ul>${0}</ul>");

  let html = wrap_paragraphs(&html);
  let mut html = EMPTY_PARAGRAPH_RE.replace_all(&html, "").into_owned();

  for (i, block) in code_blocks.iter().enumerate() {
    html = html.replacen(&placeholder(i), block, 1);
  }

  html
}

fn placeholder(index: usize) -> String {
  format!("{PLACEHOLDER_PREFIX}{index}{PLACEHOLDER_SUFFIX}")
}

fn is_external(url: &str) -> bool {
  url.starts_with("http://") || url.starts_with("https://")
}

/// Rewrite a local `.md` link target to its `.html` page, keeping any
/// fragment.
fn rewrite_markdown_link(url: &str) -> String {
  let (path, fragment) = match url.split_once('#') {
    Some((path, fragment)) => (path, Some(fragment)),
    None => (url, None),
  };

  let Some(stem) = path.strip_suffix(".md") else {
    return url.to_string();
  };

  match fragment {
    Some(fragment) => format!("{stem}.html#{fragment}"),
    None => format!("{stem}.html"),
  }
}

/// Trim blank lines from both ends of a code block and collapse runs of
/// blank lines into one.
fn clean_code_block(code: &str) -> String {
  let lines: Vec<&str> = code.split('\n').collect();
  let start = lines
    .iter()
    .position(|l| !l.trim().is_empty())
    .unwrap_or(lines.len());
  let end = lines
    .iter()
    .rposition(|l| !l.trim().is_empty())
    .map_or(start, |i| i + 1);

  let mut result: Vec<&str> = Vec::new();
  let mut prev_blank = false;
  for line in lines.get(start..end).unwrap_or_default() {
    let blank = line.trim().is_empty();
    if blank {
      if !prev_blank {
        result.push("");
      }
    } else {
      result.push(line);
    }
    prev_blank = blank;
  }

  result.join("\n")
}

fn is_table_line(line: &str) -> bool {
  line.trim_start().starts_with('|')
}

fn convert_tables(html: &str) -> String {
  let mut result: Vec<String> = Vec::new();
  let mut table_lines: Vec<&str> = Vec::new();

  for line in html.split('\n') {
    if is_table_line(line) {
      table_lines.push(line);
      continue;
    }
    if !table_lines.is_empty() {
      result.push(build_table(&table_lines));
      table_lines.clear();
    }
    result.push(line.to_string());
  }

  if !table_lines.is_empty() {
    result.push(build_table(&table_lines));
  }

  result.join("\n")
}

fn split_cells(line: &str) -> Vec<&str> {
  let trimmed = line.trim();
  let trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
  let trimmed = trimmed.strip_suffix('|').unwrap_or(trimmed);
  trimmed.split('|').map(str::trim).collect()
}

fn build_table(lines: &[&str]) -> String {
  if lines.len() < 2 {
    return lines.join("\n");
  }

  let mut html = vec![
    "<div class=\"table-wrapper\"><table>".to_string(),
    "<thead><tr>".to_string(),
  ];
  for cell in split_cells(lines[0]) {
    html.push(format!("<th>{cell}</th>"));
  }
  html.push("</tr></thead>".to_string());

  html.push("<tbody>".to_string());
  for line in &lines[2..] {
    html.push("<tr>".to_string());
    for cell in split_cells(line) {
      let cell = INLINE_CODE_RE.replace_all(cell, "<code>${1}</code>");
      html.push(format!("<td>{cell}</td>"));
    }
    html.push("</tr>".to_string());
  }
  html.push("</tbody>".to_string());
  html.push("</table></div>".to_string());

  html.join("\n")
}

fn wrap_paragraphs(html: &str) -> String {
  html
    .split('\n')
    .map(|line| {
      let stripped = line.trim();
      if stripped.is_empty()
        || stripped.starts_with('<')
        || stripped.starts_with(PLACEHOLDER_PREFIX)
      {
        line.to_string()
      } else {
        format!("<p>{stripped}</p>")
      }
    })
    .collect::<Vec<_>>()
    .join("\n")
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]
  use super::*;

  #[test]
  fn converts_headings_and_emphasis() {
    let html = convert("# Title\n\n## Sub\n\nSome **bold** and *soft* text", 0);
    assert!(html.contains("<h1>Title</h1>"));
    assert!(html.contains("<h2>Sub</h2>"));
    assert!(
      html.contains("<p>Some <strong>bold</strong> and <em>soft</em> text</p>")
    );
  }

  #[test]
  fn code_block_is_escaped_and_cleaned() {
    let html = convert("```xml\n\n<controls:DaisyButton/>\n\n\n\nx\n\n```", 1);
    assert_eq!(
      html,
      "<pre><code class=\"language-xml\">&lt;controls:DaisyButton/&gt;\n\nx</code></pre>"
    );
  }

  #[test]
  fn code_block_without_language_is_text() {
    let html = convert("```\nplain\n```", 0);
    assert!(html.contains("class=\"language-text\""));
  }

  #[test]
  fn image_paths_follow_depth() {
    let root = convert("![Shot](images/a.png)", 0);
    assert!(root.contains("src=\"images/a.png\""));

    let nested = convert("![Shot](images/a.png)", 1);
    assert!(nested.contains("src=\"../images/a.png\""));

    let absolute = convert("![Shot](https://example.com/a.png)", 1);
    assert!(absolute.contains("src=\"https://example.com/a.png\""));
  }

  #[test]
  fn markdown_links_become_html_links() {
    let html = convert("[Card](DaisyCard.md#usage)", 0);
    assert!(html.contains("<a href=\"DaisyCard.html#usage\">Card</a>"));

    let external = convert("[Docs](https://example.com/readme.md)", 0);
    assert!(external.contains(
      "<a href=\"https://example.com/readme.md\" target=\"_blank\" \
       rel=\"noopener\">Docs</a>"
    ));
  }

  #[test]
  fn builds_tables() {
    let html = convert("| A | B |\n|---|---|\n| `x` | y |", 0);
    assert!(html.starts_with("<div class=\"table-wrapper\"><table>"));
    assert!(html.contains("<th>A</th>"));
    assert!(html.contains("<td><code>x</code></td>"));
    assert!(html.contains("<td>y</td>"));
    assert!(html.ends_with("</table></div>"));
  }

  #[test]
  fn wraps_list_runs() {
    let html = convert("- one\n- two\n\nafter", 0);
    assert!(html.contains("<ul><li>one</li>\n<li>two</li>\n</ul>"));
    assert!(html.contains("<p>after</p>"));
  }

  #[test]
  fn clean_code_block_trims_and_collapses() {
    assert_eq!(clean_code_block("\n\na\n\n\nb\n\n"), "a\n\nb");
    assert_eq!(clean_code_block("\n \n"), "");
  }
}
