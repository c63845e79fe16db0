//! The machine-readable `llms.txt` shipped with the site.

use petaldoc_markup::utils::strip_html_comments_outside_code;

use crate::source::ResolvedDoc;

/// Project facts printed at the top of the index.
#[derive(Debug, Clone, Copy)]
pub struct IndexHeader<'a> {
  pub title:                 &'a str,
  pub description:           &'a str,
  pub namespace_declaration: &'a str,
  pub type_prefix:           &'a str,
  pub custom_prefixes:       &'a [String],
}

/// First line of `body` that is not a heading, table row, list item or tag.
#[must_use]
pub fn first_description_line(body: &str) -> Option<String> {
  strip_html_comments_outside_code(body)
    .lines()
    .map(str::trim)
    .find(|line| {
      !line.is_empty()
        && !line.starts_with('#')
        && !line.starts_with('|')
        && !line.starts_with('-')
        && !line.starts_with('<')
    })
    .map(|line| line.replace('|', "&#124;"))
}

/// Render the index over every resolved page.
#[must_use]
pub fn render_machine_index(header: &IndexHeader<'_>, docs: &[ResolvedDoc]) -> String {
  let short = |name: &str| {
    name
      .strip_prefix(header.type_prefix)
      .unwrap_or(name)
      .to_string()
  };

  let mut lines: Vec<String> = vec![
    format!("# {}", header.title),
    String::new(),
    header.description.to_string(),
    String::new(),
    "## Quick Start".to_string(),
    String::new(),
    "Add the namespace to your AXAML:".to_string(),
    "```xml".to_string(),
    header.namespace_declaration.to_string(),
    "```".to_string(),
    String::new(),
    "## Controls Overview".to_string(),
    String::new(),
    "| Control | Description |".to_string(),
    "|---------|-------------|".to_string(),
  ];

  for doc in docs.iter().filter(|d| !d.is_helper) {
    let display = short(&doc.name);
    let badge = if header
      .custom_prefixes
      .iter()
      .any(|p| display.starts_with(p.as_str()))
    {
      " <sup>✦</sup>"
    } else {
      ""
    };
    let desc = first_description_line(&doc.body)
      .unwrap_or_else(|| format!("{display} control"));
    lines.push(format!(
      "| [{name}](controls/{name}.html){badge} | {desc} |",
      name = doc.name
    ));
  }

  let helpers: Vec<&ResolvedDoc> = docs.iter().filter(|d| d.is_helper).collect();
  if !helpers.is_empty() {
    lines.extend([
      String::new(),
      "### Helper Classes".to_string(),
      String::new(),
      "| Class | Description |".to_string(),
      "|-------|-------------|".to_string(),
    ]);
    for doc in helpers {
      let desc = first_description_line(&doc.body)
        .unwrap_or_else(|| format!("{} helper", short(&doc.name)));
      lines.push(format!(
        "| [{name}](controls/{name}.html) | {desc} |",
        name = doc.name
      ));
    }
  }

  lines.push(String::new());
  lines.join("\n")
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::source::Origin;

  fn doc(name: &str, body: &str, is_helper: bool) -> ResolvedDoc {
    ResolvedDoc {
      name: name.to_string(),
      body: body.to_string(),
      is_helper,
      origin: Origin::Curated,
    }
  }

  #[test]
  fn description_skips_structure() {
    let body = "<!-- description: hidden -->\n# DaisyButton\n\n<img src=\"x\">\n- \
                item\n| a | b |\nButtons trigger actions.\nMore.";
    assert_eq!(
      first_description_line(body).as_deref(),
      Some("Buttons trigger actions.")
    );
    assert_eq!(first_description_line("# Only\n\n## Headings"), None);
  }

  #[test]
  fn tables_with_fallbacks_and_badges() {
    let prefixes = vec!["Weather".to_string()];
    let header = IndexHeader {
      title:                 "Flowery.NET",
      description:           "Controls for Avalonia.",
      namespace_declaration: "xmlns:controls=\"clr-namespace:Flowery.Controls\"",
      type_prefix:           "Daisy",
      custom_prefixes:       &prefixes,
    };
    let docs = vec![
      doc("DaisyButton", "# DaisyButton\n\nClick me | now.", false),
      doc("DaisyWeatherCard", "# DaisyWeatherCard", false),
      doc("HslColor", "## Overview", true),
    ];

    let index = render_machine_index(&header, &docs);
    assert!(index.starts_with("# Flowery.NET\n\nControls for Avalonia.\n"));
    assert!(index.contains(
      "```xml\nxmlns:controls=\"clr-namespace:Flowery.Controls\"\n```"
    ));
    assert!(index.contains(
      "| [DaisyButton](controls/DaisyButton.html) | Click me &#124; now. |"
    ));
    assert!(index.contains(
      "| [DaisyWeatherCard](controls/DaisyWeatherCard.html) <sup>✦</sup> | \
       WeatherCard control |"
    ));
    assert!(index.contains("### Helper Classes"));
    assert!(
      index.contains("| [HslColor](controls/HslColor.html) | HslColor helper |")
    );
  }

  #[test]
  fn no_helper_table_without_helpers() {
    let header = IndexHeader {
      title:                 "T",
      description:           "D",
      namespace_declaration: "ns",
      type_prefix:           "Daisy",
      custom_prefixes:       &[],
    };
    let index = render_machine_index(&header, &[doc("DaisyKbd", "Keys.", false)]);
    assert!(!index.contains("Helper Classes"));
    assert!(index.ends_with("| [DaisyKbd](controls/DaisyKbd.html) | Keys. |\n"));
  }
}
