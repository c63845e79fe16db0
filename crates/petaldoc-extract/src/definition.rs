//! Recovery of class, property and enum metadata from control source files.
//!
//! This is deliberately not a parser. Declarations are located with a handful
//! of patterns, and documentation comments are attached by proximity: a
//! `<summary>` block belongs to the declaration that follows it within a
//! fixed character or line window.

use std::{path::Path, sync::LazyLock};

use log::{debug, error, trace};
use petaldoc_markup::utils::{collapse_whitespace, never_matching_regex};
use regex::{Captures, Regex};

use crate::types::{Definition, EnumGroup, ExtractLimits, Property};

static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"public\s+(?:(?:static|sealed|partial|abstract)\s+)*class\s+(\w+)(?:\s*:\s*([\w.]+))?",
  )
  .unwrap_or_else(|e| {
    error!("Failed to compile CLASS_RE regex: {e}");
    never_matching_regex()
  })
});

static SUMMARY_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?s)///\s*<summary>\s*(.*?)\s*</summary>").unwrap_or_else(|e| {
    error!("Failed to compile SUMMARY_RE regex: {e}");
    never_matching_regex()
  })
});

static SUMMARY_BODY_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?s)<summary>\s*(.*?)\s*</summary>").unwrap_or_else(|e| {
    error!("Failed to compile SUMMARY_BODY_RE regex: {e}");
    never_matching_regex()
  })
});

static CREF_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"<(?:see|seealso)\s+(?:cref|langword)="(?:\w:)?([^"]+)"\s*/>"#)
    .unwrap_or_else(|e| {
      error!("Failed to compile CREF_RE regex: {e}");
      never_matching_regex()
    })
});

static XML_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"<[^>]+>").unwrap_or_else(|e| {
    error!("Failed to compile XML_TAG_RE regex: {e}");
    never_matching_regex()
  })
});

static PROPERTY_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"public\s+static\s+readonly\s+StyledProperty<(.+?)>\s+(\w+)Property\b",
  )
  .unwrap_or_else(|e| {
    error!("Failed to compile PROPERTY_RE regex: {e}");
    never_matching_regex()
  })
});

static NAMEOF_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"nameof\(\s*(\w+)\s*\)").unwrap_or_else(|e| {
    error!("Failed to compile NAMEOF_RE regex: {e}");
    never_matching_regex()
  })
});

static LITERAL_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"Register\w*\s*(?:<[^(]*>)?\s*\(\s*"(\w+)""#).unwrap_or_else(
    |e| {
      error!("Failed to compile LITERAL_NAME_RE regex: {e}");
      never_matching_regex()
    },
  )
});

static NAMED_ARG_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(\w+)\s*:([^:].*)$").unwrap_or_else(|e| {
    error!("Failed to compile NAMED_ARG_RE regex: {e}");
    never_matching_regex()
  })
});

static CONSTRUCTOR_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^new\s+(\w+)\s*\((.*)\)$").unwrap_or_else(|e| {
    error!("Failed to compile CONSTRUCTOR_RE regex: {e}");
    never_matching_regex()
  })
});

static QUALIFIED_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[A-Za-z_]\w*(?:\.[A-Za-z_]\w*)*\.([A-Za-z_]\w*)$")
    .unwrap_or_else(|e| {
      error!("Failed to compile QUALIFIED_RE regex: {e}");
      never_matching_regex()
    })
});

static ENUM_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?s)public\s+enum\s+(\w+)(?:\s*:\s*\w+)?\s*\{([^}]*)\}")
    .unwrap_or_else(|e| {
      error!("Failed to compile ENUM_RE regex: {e}");
      never_matching_regex()
    })
});

static ENUM_MEMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^([A-Za-z_]\w*)").unwrap_or_else(|e| {
    error!("Failed to compile ENUM_MEMBER_RE regex: {e}");
    never_matching_regex()
  })
});

/// Extracts a [`Definition`] from one control source file.
#[derive(Debug, Clone)]
pub struct DefinitionExtractor {
  type_prefix: String,
  limits:      ExtractLimits,
}

impl DefinitionExtractor {
  /// Create an extractor. `type_prefix` is the naming convention used to
  /// pick a declaration when none matches the file name.
  #[must_use]
  pub fn new(type_prefix: impl Into<String>, limits: ExtractLimits) -> Self {
    Self {
      type_prefix: type_prefix.into(),
      limits,
    }
  }

  #[must_use]
  pub fn type_prefix(&self) -> &str {
    &self.type_prefix
  }

  /// Parse `text`, the contents of the file called `file_name`.
  ///
  /// Returns `None` when no declaration matches the file stem or the type
  /// prefix.
  #[must_use]
  pub fn parse(&self, text: &str, file_name: &str) -> Option<Definition> {
    let stem = Path::new(file_name)
      .file_stem()
      .and_then(|s| s.to_str())
      .unwrap_or(file_name);

    let declarations: Vec<Captures> = CLASS_RE.captures_iter(text).collect();
    let selected = declarations
      .iter()
      .find(|caps| &caps[1] == stem)
      .or_else(|| {
        declarations
          .iter()
          .find(|caps| caps[1].starts_with(&self.type_prefix))
      });

    let Some(selected) = selected else {
      debug!("No matching type declaration in {file_name}");
      return None;
    };

    let whole = selected.get(0)?;
    let name = selected[1].to_string();
    let base_name = selected
      .get(2)
      .map_or_else(|| "Object".to_string(), |m| m.as_str().to_string());
    let summary = self.preceding_summary(text, whole.start());

    trace!("Selected declaration {name} : {base_name} in {file_name}");

    Some(Definition {
      name,
      base_name,
      summary,
      properties: self.extract_properties(text),
      enums: self.extract_enums(text),
    })
  }

  /// Find the closest `<summary>` block ending before `offset`.
  ///
  /// The block is only used when it ends within the proximity window. Other
  /// doc elements such as `<example>` may sit in between.
  fn preceding_summary(&self, text: &str, offset: usize) -> String {
    self
      .summary_with_gap(text, offset)
      .map(|(summary, _)| summary)
      .unwrap_or_default()
  }

  fn summary_with_gap<'t>(
    &self,
    text: &'t str,
    offset: usize,
  ) -> Option<(String, &'t str)> {
    let before = &text[..offset];
    let caps = SUMMARY_RE.captures_iter(before).last()?;
    let gap = &before[caps.get(0)?.end()..];
    (gap.len() < self.limits.summary_proximity_chars)
      .then(|| (clean_summary(&caps[1]), gap))
  }

  fn extract_properties(&self, text: &str) -> Vec<Property> {
    let lines: Vec<&str> = text.lines().collect();
    let mut properties: Vec<Property> = Vec::new();

    for (i, line) in lines.iter().enumerate() {
      let Some(caps) = PROPERTY_RE.captures(line) else {
        continue;
      };
      let declared_type = caps[1].trim().to_string();
      let field_name = caps[2].to_string();

      let statement = self.collect_statement(&lines, i);
      let name_match = NAMEOF_RE
        .captures(&statement)
        .or_else(|| LITERAL_NAME_RE.captures(&statement));
      let (name, after_name) = match &name_match {
        Some(caps) => {
          (
            caps[1].to_string(),
            caps.get(0).map_or(statement.len(), |m| m.end()),
          )
        },
        None => (field_name, statement.len()),
      };

      if properties.iter().any(|p| p.name == name) {
        trace!("Skipping duplicate property registration for {name}");
        continue;
      }

      let raw_default = default_argument(&statement[after_name..]);
      let default_value = clean_default(&raw_default, &declared_type);
      let summary = self.property_summary(&lines, i);

      properties.push(Property {
        name,
        declared_type,
        default_value,
        summary,
      });
    }

    properties
  }

  /// Join lines starting at `start` until parentheses balance and the
  /// statement terminator has been seen.
  fn collect_statement(&self, lines: &[&str], start: usize) -> String {
    let mut statement = String::new();
    let mut depth: i64 = 0;

    for line in lines.iter().skip(start).take(self.limits.statement_max_lines)
    {
      statement.push_str(line);
      statement.push('\n');
      for ch in line.chars() {
        match ch {
          '(' => depth += 1,
          ')' => depth -= 1,
          _ => {},
        }
      }
      if depth <= 0 && line.contains(';') {
        break;
      }
    }

    statement
  }

  /// Summary from `///` comments directly above the line at `index`.
  ///
  /// Blank lines and attribute lines may sit between the comment and the
  /// registration; any other code line ends the search.
  fn property_summary(&self, lines: &[&str], index: usize) -> String {
    let window_start = index.saturating_sub(self.limits.summary_lookback_lines);

    for k in (window_start..index).rev() {
      let line = lines[k].trim();
      if line.starts_with("///") && line.contains("<summary>") {
        let block: Vec<&str> = lines[k..index]
          .iter()
          .take(self.limits.summary_lookback_lines)
          .copied()
          .collect();
        let end = block
          .iter()
          .position(|l| l.contains("</summary>"))
          .map_or(block.len(), |p| p + 1);
        let joined = block[..end].join("\n");
        return SUMMARY_BODY_RE
          .captures(&joined)
          .map(|caps| clean_summary(&caps[1]))
          .unwrap_or_default();
      }
      if !(line.is_empty() || line.starts_with("///") || line.starts_with('['))
      {
        break;
      }
    }

    String::new()
  }

  fn extract_enums(&self, text: &str) -> Vec<EnumGroup> {
    ENUM_RE
      .captures_iter(text)
      .filter_map(|caps| {
        let whole = caps.get(0)?;
        let values = enum_members(&caps[2]);
        if values.is_empty() {
          return None;
        }
        Some(EnumGroup {
          name: caps[1].to_string(),
          values,
          summary: self.enum_summary(text, whole.start()),
        })
      })
      .collect()
  }

  /// Like [`Self::preceding_summary`], but enums declared back to back must
  /// not share one comment, so any code outside doc comments in the gap
  /// drops the summary.
  fn enum_summary(&self, text: &str, offset: usize) -> String {
    self
      .summary_with_gap(text, offset)
      .filter(|(_, gap)| {
        gap
          .lines()
          .filter(|line| !line.trim_start().starts_with("///"))
          .all(|line| !line.contains(['{', '}', ';']))
      })
      .map(|(summary, _)| summary)
      .unwrap_or_default()
  }
}

/// Turn the raw inside of a `<summary>` element into plain text.
fn clean_summary(raw: &str) -> String {
  let text = raw.replace("///", " ");
  let text = CREF_RE.replace_all(&text, |caps: &Captures| {
    caps[1].rsplit('.').next().unwrap_or_default().to_string()
  });
  let text = XML_TAG_RE.replace_all(&text, "");
  collapse_whitespace(&text)
}

/// Pull the default-value argument out of the text that follows the property
/// name expression.
///
/// Characters are copied verbatim while tracking parenthesis depth, so nested
/// calls such as `new Thickness(32)` stay intact; the first unmatched `)` or
/// a top-level `,` ends the argument.
fn default_argument(rest: &str) -> String {
  let Some(rest) = rest.trim_start().strip_prefix(',') else {
    return String::new();
  };

  let mut value = String::new();
  let mut depth = 0usize;
  let mut in_string = false;
  let mut escaped = false;

  for ch in rest.chars() {
    if in_string {
      value.push(ch);
      if escaped {
        escaped = false;
      } else if ch == '\\' {
        escaped = true;
      } else if ch == '"' {
        in_string = false;
      }
      continue;
    }

    match ch {
      '"' => in_string = true,
      '(' => depth += 1,
      ')' if depth == 0 => break,
      ')' => depth -= 1,
      ',' | ';' if depth == 0 => break,
      _ => {},
    }
    value.push(ch);
  }

  let value = collapse_whitespace(&value);
  match NAMED_ARG_RE.captures(&value) {
    Some(caps) if &caps[1] == "defaultValue" => caps[2].trim().to_string(),
    Some(_) => String::new(),
    None => value,
  }
}

/// Simplify a default-value expression for display.
fn clean_default(raw: &str, declared_type: &str) -> String {
  let value = raw.trim().trim_end_matches(',').trim();

  if value.is_empty() {
    return if declared_type.contains('?') {
      "null".to_string()
    } else {
      "-".to_string()
    };
  }

  if value.contains("Color.FromArgb") {
    return "Color(semitransparent)".to_string();
  }

  if let Some(caps) = CONSTRUCTOR_RE.captures(value) {
    return format!("{}({})", &caps[1], caps[2].trim());
  }

  if value == "string.Empty" || value == "String.Empty" {
    return "\"\"".to_string();
  }

  if let Some(color) = value.strip_prefix("Colors.") {
    return color.to_string();
  }

  if let Some(caps) = QUALIFIED_RE.captures(value) {
    return caps[1].to_string();
  }

  value.to_string()
}

/// Member identifiers of an enum body, in order.
fn enum_members(body: &str) -> Vec<String> {
  let mut values = Vec::new();

  for line in body.lines() {
    let line = line.trim();
    if line.is_empty() || line.starts_with("//") || line.starts_with('[') {
      continue;
    }
    let code = line.split("//").next().unwrap_or_default();
    for piece in code.split(',') {
      let piece = piece.trim();
      if piece.starts_with("/*") || piece.starts_with('*') {
        continue;
      }
      if let Some(caps) = ENUM_MEMBER_RE.captures(piece) {
        values.push(caps[1].to_string());
      }
    }
  }

  values
}
