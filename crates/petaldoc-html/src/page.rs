//! Markdown preparation for definition pages: image injection, tabbed
//! galleries and heading fix-ups.

use std::{fmt::Write, sync::LazyLock};

use log::{debug, error};
use petaldoc_markup::{
  converter::IMAGE_STYLE,
  utils::{never_matching_regex, strip_html_comments_outside_code},
};
use regex::Regex;

static MD_IMAGE_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"!\[[^\]]*\]\(\.{0,2}/?images/").unwrap_or_else(|e| {
    error!("Failed to compile MD_IMAGE_REF_RE regex: {e}");
    never_matching_regex()
  })
});

static HTML_IMAGE_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"<img[^>]+src=["']\.{0,2}/?images/"#).unwrap_or_else(|e| {
    error!("Failed to compile HTML_IMAGE_REF_RE regex: {e}");
    never_matching_regex()
  })
});

/// A line holding nothing but one image from the image directory.
static IMAGE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^!\[[^\]]*\]\((?:\.{1,2}/)?(images/[^)\s]+)\)$").unwrap_or_else(
    |e| {
      error!("Failed to compile IMAGE_LINE_RE regex: {e}");
      never_matching_regex()
    },
  )
});

static OVERVIEW_H2_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"## Overview[^\n]*\n").unwrap_or_else(|e| {
    error!("Failed to compile OVERVIEW_H2_RE regex: {e}");
    never_matching_regex()
  })
});

static OVERVIEW_H1_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"# Overview[^\n]*\n").unwrap_or_else(|e| {
    error!("Failed to compile OVERVIEW_H1_RE regex: {e}");
    never_matching_regex()
  })
});

static ANY_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?m)^#+ [^\n]+\n").unwrap_or_else(|e| {
    error!("Failed to compile ANY_HEADING_RE regex: {e}");
    never_matching_regex()
  })
});

/// Whether the markdown already shows an image from the image directory.
#[must_use]
pub fn has_image_reference(markdown: &str) -> bool {
  MD_IMAGE_REF_RE.is_match(markdown) || HTML_IMAGE_REF_RE.is_match(markdown)
}

/// Element id fragment for the gallery of `name`.
#[must_use]
pub fn gallery_id(name: &str) -> String {
  name
    .chars()
    .map(|c| {
      if c.is_ascii_alphanumeric() {
        c.to_ascii_lowercase()
      } else {
        '_'
      }
    })
    .collect()
}

/// Radio-button driven gallery with one tab per image. The first tab is
/// selected; `root_prefix` leads from the page back to the site root.
#[must_use]
pub fn tabbed_gallery(name: &str, images: &[String], root_prefix: &str) -> String {
  let id = gallery_id(name);
  let alt_name = html_escape::encode_double_quoted_attribute(name);

  let mut html = format!("\n<div class=\"tabbed-gallery\" id=\"gallery_{id}\">\n");
  let _ = writeln!(html, "  <style>{}</style>", gallery_rules(&id, images.len()));
  for i in 0..images.len() {
    let checked = if i == 0 { " checked" } else { "" };
    let _ = writeln!(
      html,
      "  <input type=\"radio\" name=\"{id}_tabs\" id=\"{id}_tab{i}\" \
       class=\"tab-radio\"{checked}>"
    );
  }

  html.push_str("  <div class=\"image-tabs\">\n");
  for i in 0..images.len() {
    let _ = writeln!(
      html,
      "    <label for=\"{id}_tab{i}\" class=\"tab-label\">Part {}</label>",
      i + 1
    );
  }
  html.push_str("  </div>\n");

  html.push_str("  <div class=\"image-panels\">\n");
  for (i, path) in images.iter().enumerate() {
    html.push_str("    <div class=\"image-panel\">\n");
    let _ = writeln!(
      html,
      "      <img src=\"{root_prefix}{path}\" alt=\"{alt_name} - Part {}\" \
       style=\"{IMAGE_STYLE}\">",
      i + 1
    );
    html.push_str("    </div>\n");
  }
  html.push_str("  </div>\n");
  html.push_str("</div>\n");
  html
}

/// Selectors showing the panel and highlighting the label of the checked
/// tab, one pair per image. Kept on one line so page conversion passes it
/// through untouched.
fn gallery_rules(id: &str, count: usize) -> String {
  let checked = |n: usize| {
    format!("#gallery_{id} > .tab-radio:nth-of-type({n}):checked")
  };
  let panels: Vec<String> = (1..=count)
    .map(|n| format!("{} ~ .image-panels .image-panel:nth-child({n})", checked(n)))
    .collect();
  let labels: Vec<String> = (1..=count)
    .map(|n| format!("{} ~ .image-tabs label:nth-child({n})", checked(n)))
    .collect();
  format!(
    "{} {{ display: block; }} {} {{ background: var(--accent); color: \
     #ffffff; }}",
    panels.join(", "),
    labels.join(", ")
  )
}

/// Replace the first run of two or more consecutive image lines with a
/// tabbed gallery of the same images.
fn fold_image_run(name: &str, markdown: &str, root_prefix: &str) -> String {
  let lines: Vec<&str> = markdown.split('\n').collect();
  let image_path = |line: &str| {
    IMAGE_LINE_RE
      .captures(line.trim())
      .and_then(|caps| caps.get(1))
      .map(|m| m.as_str().to_string())
  };

  let mut start = 0;
  while start < lines.len() {
    let mut end = start;
    let mut paths = Vec::new();
    while let Some(path) = lines.get(end).and_then(|l| image_path(l)) {
      paths.push(path);
      end += 1;
    }

    if paths.len() >= 2 {
      debug!("Folding {} images of {name} into a gallery", paths.len());
      let mut folded: Vec<String> =
        lines[..start].iter().map(ToString::to_string).collect();
      folded.push(tabbed_gallery(name, &paths, root_prefix));
      folded.extend(lines[end..].iter().map(ToString::to_string));
      return folded.join("\n");
    }
    start = end + 1;
  }

  markdown.to_string()
}

fn insert_images(
  name: &str,
  markdown: &str,
  images: &[String],
  root_prefix: &str,
) -> String {
  let image_md = match images {
    [single] => format!("\n![{name}]({single})\n"),
    many => tabbed_gallery(name, many, root_prefix),
  };

  let at = |pos: usize, insert: &str| {
    let mut out = String::with_capacity(markdown.len() + insert.len());
    out.push_str(&markdown[..pos]);
    out.push_str(insert);
    out.push_str(&markdown[pos..]);
    out
  };

  if let Some(m) = OVERVIEW_H2_RE.find(markdown) {
    return at(m.end(), &image_md);
  }
  if let Some(m) = OVERVIEW_H1_RE.find(markdown) {
    return at(m.end(), &image_md);
  }
  if let Some(m) = ANY_HEADING_RE.find(markdown) {
    let heading_end = m.end();
    return match markdown[heading_end..].find("\n\n") {
      Some(para_end) if para_end > 0 => {
        at(heading_end + para_end, &format!("\n{image_md}"))
      },
      _ => at(heading_end, &image_md),
    };
  }

  format!("{image_md}\n{markdown}")
}

/// Prepare the markdown of a definition page that lives `depth` levels
/// below the site root.
///
/// HTML comments outside code are removed, a run of images becomes a
/// gallery, the discovered `images` are injected unless the page already
/// shows one, and the page is given a `# {name}` heading when it lacks one.
#[must_use]
pub fn prepare_page(
  name: &str,
  markdown: &str,
  images: &[String],
  root_prefix: &str,
) -> String {
  let mut md = strip_html_comments_outside_code(markdown);
  md = fold_image_run(name, &md, root_prefix);

  if !images.is_empty() && !has_image_reference(&md) {
    md = insert_images(name, &md, images, root_prefix);
  }

  let stripped = md.trim();
  if stripped.starts_with("# Overview") {
    md = md.replacen("# Overview", &format!("# {name}\n\n## Overview"), 1);
  } else if !stripped.starts_with("# ") {
    md = format!("# {name}\n\n{md}");
  }

  md
}
