//! Markdown rendering of definition pages, category pages and the master
//! index.

use std::{collections::HashSet, fmt::Write as _, sync::LazyLock};

use log::error;
use petaldoc_extract::{DEFAULT_LABEL, Definition, ExampleSection};
use petaldoc_markup::utils::{
  ellipsize,
  never_matching_regex,
  strip_html_comments_outside_code,
};
use regex::Regex;

use crate::category::Category;

static DESCRIPTION_META_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?s)<!--\s*description:\s*(.*?)\s*-->").unwrap_or_else(|e| {
    error!("Failed to compile DESCRIPTION_META_RE regex: {e}");
    never_matching_regex()
  })
});

static OVERVIEW_H1_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?m)^# Overview\b").unwrap_or_else(|e| {
    error!("Failed to compile OVERVIEW_H1_RE regex: {e}");
    never_matching_regex()
  })
});

static TAG_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"</?(?:\w+:)?(\w+)").unwrap_or_else(|e| {
    error!("Failed to compile TAG_NAME_RE regex: {e}");
    never_matching_regex()
  })
});

/// Hand-written markdown that accompanies a definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Supplement {
  /// Value of a `<!-- description: ... -->` metadata comment.
  pub description: Option<String>,
  /// Body with comments removed and `# Overview` demoted.
  pub body:        String,
}

impl Supplement {
  #[must_use]
  pub fn parse(raw: &str) -> Self {
    let description = DESCRIPTION_META_RE
      .captures(raw)
      .map(|caps| caps[1].trim().to_string())
      .filter(|d| !d.is_empty());
    let body = strip_html_comments_outside_code(raw);
    let body = OVERVIEW_H1_RE.replace_all(&body, "## Overview");
    Self {
      description,
      body: body.trim().to_string(),
    }
  }
}

/// Output caps for rendered markdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderLimits {
  pub max_examples_per_definition:  usize,
  pub max_description_length:       usize,
  pub max_index_description_length: usize,
  pub max_index_properties:         usize,
  /// All-uppercase labels longer than this are treated as bound data.
  pub min_uppercase_label_length:   usize,
}

impl Default for RenderLimits {
  fn default() -> Self {
    Self {
      max_examples_per_definition:  5,
      max_description_length:       80,
      max_index_description_length: 50,
      max_index_properties:         3,
      min_uppercase_label_length:   3,
    }
  }
}

/// Project-level text used by the master index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
  pub title:                 String,
  pub description:           String,
  pub namespace_declaration: String,
  /// Directory name of the markdown tree, as shown to readers.
  pub docs_dir:              String,
}

/// Renders the markdown documentation tree.
#[derive(Debug, Clone)]
pub struct DocRenderer {
  type_prefix: String,
  extended:    bool,
  limits:      RenderLimits,
}

impl DocRenderer {
  /// `extended` adds the generated Properties, Enum Values and Usage
  /// Examples sections to every definition page.
  #[must_use]
  pub fn new(
    type_prefix: impl Into<String>,
    extended: bool,
    limits: RenderLimits,
  ) -> Self {
    Self {
      type_prefix: type_prefix.into(),
      extended,
      limits,
    }
  }

  #[must_use]
  pub fn type_prefix(&self) -> &str {
    &self.type_prefix
  }

  #[must_use]
  pub fn short_name<'a>(&self, name: &'a str) -> &'a str {
    name.strip_prefix(&self.type_prefix).unwrap_or(name)
  }

  /// Description for `definition`: the supplement's override, then the doc
  /// summary, then a generated sentence.
  #[must_use]
  pub fn description(
    &self,
    definition: &Definition,
    supplement: Option<&Supplement>,
  ) -> String {
    supplement
      .and_then(|s| s.description.clone())
      .or_else(|| {
        (!definition.summary.is_empty()).then(|| definition.summary.clone())
      })
      .unwrap_or_else(|| {
        format!(
          "A {} control styled after DaisyUI.",
          self.short_name(&definition.name)
        )
      })
  }

  /// Render the page for one definition.
  #[must_use]
  pub fn render(
    &self,
    definition: &Definition,
    sections: &[ExampleSection],
    supplement: Option<&Supplement>,
    images: &[String],
  ) -> String {
    let name = &definition.name;
    let mut lines: Vec<String> = vec![
      format!("# {name}"),
      String::new(),
      self.description(definition, supplement),
      String::new(),
      format!("**Inherits from:** `{}`", definition.base_name),
      String::new(),
    ];

    match images {
      [] => {},
      [single] => {
        lines.push(format!("![{name}]({single})"));
        lines.push(String::new());
      },
      many => {
        for (i, path) in many.iter().enumerate() {
          lines.push(format!("![{name} - Part {}]({path})", i + 1));
        }
        lines.push(String::new());
      },
    }

    if let Some(supplement) = supplement
      && !supplement.body.is_empty()
    {
      lines.push(supplement.body.clone());
      lines.push(String::new());
    }

    if self.extended {
      self.push_properties(&mut lines, definition);
      push_enums(&mut lines, definition);
      self.push_examples(&mut lines, sections);
    }

    lines.join("\n")
  }

  fn push_properties(&self, lines: &mut Vec<String>, definition: &Definition) {
    if definition.properties.is_empty() {
      return;
    }
    lines.push("## Properties".to_string());
    lines.push(String::new());
    lines.push("| Property | Type | Default | Description |".to_string());
    lines.push("|----------|------|---------|-------------|".to_string());
    for prop in &definition.properties {
      let desc = if prop.summary.is_empty() {
        "-".to_string()
      } else {
        ellipsize(&prop.summary, self.limits.max_description_length)
      };
      lines.push(format!(
        "| {} | `{}` | {} | {} |",
        prop.name,
        table_cell(&prop.declared_type),
        table_cell(&prop.default_value),
        table_cell(&desc),
      ));
    }
    lines.push(String::new());
  }

  fn push_examples(&self, lines: &mut Vec<String>, sections: &[ExampleSection]) {
    if sections.is_empty() {
      return;
    }
    lines.push("## Usage Examples".to_string());
    lines.push(String::new());

    let mut seen: HashSet<String> = HashSet::new();
    let mut count = 0;
    let examples = sections.iter().flat_map(|s| &s.sub_examples);
    for example in examples {
      if count >= self.limits.max_examples_per_definition {
        break;
      }
      if !seen.insert(structure_key(&example.snippet)) {
        continue;
      }

      let label = if self.is_data_label(&example.label) {
        DEFAULT_LABEL
      } else {
        example.label.as_str()
      };
      lines.push(format!("### {label}"));
      lines.push(String::new());
      lines.push("```xml".to_string());
      lines.push(example.snippet.clone());
      lines.push("```".to_string());
      lines.push(String::new());
      count += 1;
    }
  }

  /// Labels that are binding expressions, shouting data values or quoted
  /// strings rather than descriptions.
  fn is_data_label(&self, label: &str) -> bool {
    if label.starts_with('{') || label.starts_with("Binding") {
      return true;
    }
    let all_upper = label.chars().any(char::is_alphabetic)
      && !label.chars().any(char::is_lowercase);
    if all_upper
      && label.chars().count() > self.limits.min_uppercase_label_length
    {
      return true;
    }
    label.contains(['"', '\''])
  }

  /// Render a category overview linking to each member page.
  #[must_use]
  pub fn render_category(
    &self,
    category: &Category,
    members: &[(&Definition, String)],
  ) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", category.name);
    let _ = writeln!(
      out,
      "This category contains {} controls:\n",
      members.len()
    );
    for (definition, description) in members {
      let name = &definition.name;
      let _ = writeln!(out, "- **[{name}](../controls/{name}.md)**: {description}");
    }
    out.push_str("\nSee individual control documentation for detailed usage.\n");
    out
  }

  /// Render the `llms.txt` master index for the markdown tree.
  ///
  /// `descriptions` yields the resolved description for a definition name.
  #[must_use]
  pub fn render_master_index<'a>(
    &self,
    project: &ProjectInfo,
    definitions: impl IntoIterator<Item = &'a Definition>,
    descriptions: impl Fn(&Definition) -> String,
    categories: &[Category],
  ) -> String {
    let docs_dir = &project.docs_dir;
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", project.title);
    if !project.description.is_empty() {
      let _ = writeln!(out, "{}\n", project.description);
    }

    out.push_str("## Documentation Structure\n\n");
    let _ = writeln!(
      out,
      "- `{docs_dir}/llms.txt` - This file (overview and quick reference)"
    );
    let _ = writeln!(
      out,
      "- `{docs_dir}/controls/*.md` - Per-control documentation with \
       properties, enums, and examples"
    );
    let _ = writeln!(
      out,
      "- `{docs_dir}/categories/*.md` - Category overviews grouping related \
       controls\n"
    );

    out.push_str("## Quick Start\n\nAdd the namespace to your markup:\n");
    let _ = writeln!(out, "```xml\n{}\n```\n", project.namespace_declaration);

    out.push_str("## Controls Overview\n\n");
    out.push_str("| Control | Description | Key Properties |\n");
    out.push_str("|---------|-------------|----------------|\n");
    for definition in definitions {
      let name = &definition.name;
      if !name.starts_with(&self.type_prefix) {
        continue;
      }
      let desc = ellipsize(
        &descriptions(definition),
        self.limits.max_index_description_length,
      );
      let mut props = definition
        .properties
        .iter()
        .take(self.limits.max_index_properties)
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
      if definition.properties.len() > self.limits.max_index_properties {
        props.push_str(", ...");
      }
      let _ = writeln!(out, "| [{name}](controls/{name}.md) | {desc} | {props} |");
    }

    let listed: Vec<(&Category, Vec<&str>)> = categories
      .iter()
      .map(|c| {
        let members: Vec<&str> = c
          .members
          .iter()
          .map(String::as_str)
          .filter(|m| m.starts_with(&self.type_prefix))
          .collect();
        (c, members)
      })
      .filter(|(_, members)| !members.is_empty())
      .collect();
    if !listed.is_empty() {
      out.push_str("\n## Categories\n");
      for (category, members) in listed {
        let _ = write!(out, "\n### {}\n{}\n", category.name, members.join(", "));
      }
    }

    out
  }
}

/// Sequence of element names in a snippet, ignoring attributes and content.
fn structure_key(snippet: &str) -> String {
  TAG_NAME_RE
    .captures_iter(snippet)
    .map(|caps| caps[1].to_string())
    .collect::<Vec<_>>()
    .join(" ")
}

fn push_enums(lines: &mut Vec<String>, definition: &Definition) {
  if definition.enums.is_empty() {
    return;
  }
  lines.push("## Enum Values".to_string());
  lines.push(String::new());
  for group in &definition.enums {
    lines.push(format!("### {}", group.name));
    lines.push(String::new());
    if !group.summary.is_empty() {
      lines.push(group.summary.clone());
      lines.push(String::new());
    }
    lines.push(format!("`{}`", group.values.join(", ")));
    lines.push(String::new());
  }
}

/// Keep a pipe inside a table cell from starting a new column.
fn table_cell(text: &str) -> String {
  text.replace('|', "&#124;")
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]
  use petaldoc_extract::{EnumGroup, Property, SubExample};

  use super::*;

  fn button() -> Definition {
    Definition {
      name:       "DaisyButton".to_string(),
      base_name:  "Button".to_string(),
      summary:    "A clickable button.".to_string(),
      properties: vec![
        Property {
          name:          "Variant".to_string(),
          declared_type: "DaisyButtonVariant".to_string(),
          default_value: "Default".to_string(),
          summary:       "The colour variant applied to the button background \
                          and its border in every visual state."
            .to_string(),
        },
        Property {
          name:          "Size".to_string(),
          declared_type: "DaisySize".to_string(),
          default_value: "Medium".to_string(),
          summary:       String::new(),
        },
      ],
      enums:      vec![EnumGroup {
        name:    "DaisyButtonVariant".to_string(),
        values:  vec!["Default".to_string(), "Primary".to_string()],
        summary: "Colour variants.".to_string(),
      }],
    }
  }

  fn section(examples: &[(&str, &str)]) -> ExampleSection {
    ExampleSection {
      section_id:   "button".to_string(),
      title:        "Button".to_string(),
      sub_examples: examples
        .iter()
        .map(|(label, snippet)| {
          SubExample {
            label:   (*label).to_string(),
            snippet: (*snippet).to_string(),
          }
        })
        .collect(),
    }
  }

  #[test]
  fn basic_page_structure() {
    let renderer = DocRenderer::new("Daisy", false, RenderLimits::default());
    let page = renderer.render(&button(), &[], None, &[]);
    assert_eq!(
      page,
      "# DaisyButton\n\nA clickable button.\n\n**Inherits from:** `Button`\n"
    );
  }

  #[test]
  fn description_precedence() {
    let renderer = DocRenderer::new("Daisy", false, RenderLimits::default());
    let mut def = button();
    let supplement = Supplement::parse(
      "<!-- description: Curated text -->\n# Overview\n\nBody text.",
    );
    assert_eq!(supplement.description.as_deref(), Some("Curated text"));
    assert_eq!(supplement.body, "## Overview\n\nBody text.");
    assert_eq!(renderer.description(&def, Some(&supplement)), "Curated text");
    assert_eq!(renderer.description(&def, None), "A clickable button.");
    def.summary.clear();
    assert_eq!(
      renderer.description(&def, None),
      "A Button control styled after DaisyUI."
    );
  }

  #[test]
  fn images_and_supplement_body() {
    let renderer = DocRenderer::new("Daisy", false, RenderLimits::default());
    let supplement = Supplement::parse("# Overview\n\nCurated.");
    let page = renderer.render(
      &button(),
      &[],
      Some(&supplement),
      &["images/DaisyButton_a.png".into(), "images/DaisyButton_b.png".into()],
    );
    assert!(page.contains(
      "![DaisyButton - Part 1](images/DaisyButton_a.png)\n![DaisyButton - \
       Part 2](images/DaisyButton_b.png)\n\n## Overview\n\nCurated."
    ));

    let single =
      renderer.render(&button(), &[], None, &["images/DaisyButton.png".into()]);
    assert!(single.contains("![DaisyButton](images/DaisyButton.png)"));
  }

  #[test]
  fn extended_sections() {
    let renderer = DocRenderer::new("Daisy", true, RenderLimits::default());
    let page = renderer.render(
      &button(),
      &[section(&[
        ("Colors", "<controls:DaisyButton Variant=\"Primary\"/>"),
        ("Again", "<controls:DaisyButton Variant=\"Accent\"/>"),
        ("PRIMARY", "<controls:DaisyButton/>\n<controls:DaisyBadge/>"),
      ])],
      None,
      &[],
    );

    assert!(page.contains("| Property | Type | Default | Description |"));
    assert!(page.contains(
      "| Variant | `DaisyButtonVariant` | Default | The colour variant \
       applied to the button background and its border in every v... |"
    ));
    assert!(page.contains("| Size | `DaisySize` | Medium | - |"));
    assert!(page.contains(
      "### DaisyButtonVariant\n\nColour variants.\n\n`Default, Primary`"
    ));
    assert!(page.contains("### Colors\n\n```xml\n<controls:DaisyButton"));
    assert!(!page.contains("### Again"));
    assert!(page.contains("### Example\n\n```xml\n<controls:DaisyButton/>"));
  }

  #[test]
  fn pipes_in_property_cells_are_escaped() {
    let renderer = DocRenderer::new("Daisy", true, RenderLimits::default());
    let mut def = button();
    def.properties[0].default_value = "Left | Right".to_string();
    def.properties[0].summary = "Sides, e.g. Left | Right.".to_string();
    let page = renderer.render(&def, &[], None, &[]);
    assert!(page.contains(
      "| Variant | `DaisyButtonVariant` | Left &#124; Right | Sides, e.g. \
       Left &#124; Right. |"
    ));
  }

  #[test]
  fn example_cap() {
    let limits = RenderLimits {
      max_examples_per_definition: 2,
      ..RenderLimits::default()
    };
    let renderer = DocRenderer::new("Daisy", true, limits);
    let page = renderer.render(
      &button(),
      &[section(&[
        ("One", "<controls:DaisyA/>"),
        ("Two", "<controls:DaisyB/>"),
        ("Three", "<controls:DaisyC/>"),
      ])],
      None,
      &[],
    );
    assert!(page.contains("### Two"));
    assert!(!page.contains("### Three"));
  }

  #[test]
  fn data_labels() {
    let renderer = DocRenderer::new("Daisy", true, RenderLimits::default());
    assert!(renderer.is_data_label("{Binding Name}"));
    assert!(renderer.is_data_label("WARN"));
    assert!(!renderer.is_data_label("ABC"));
    assert!(renderer.is_data_label("\"quoted\""));
    assert!(!renderer.is_data_label("Sizes"));
  }

  #[test]
  fn category_page() {
    let renderer = DocRenderer::new("Daisy", false, RenderLimits::default());
    let mut category = Category::new("Actions");
    category.members.push("DaisyButton".to_string());
    let def = button();
    let page =
      renderer.render_category(&category, &[(&def, "A clickable button.".into())]);
    assert_eq!(
      page,
      "# Actions\n\nThis category contains 1 controls:\n\n- \
       **[DaisyButton](../controls/DaisyButton.md)**: A clickable button.\n\nSee \
       individual control documentation for detailed usage.\n"
    );
  }

  #[test]
  fn master_index() {
    let renderer = DocRenderer::new("Daisy", false, RenderLimits {
      max_index_properties: 1,
      ..RenderLimits::default()
    });
    let project = ProjectInfo {
      title:                 "Flowery".to_string(),
      description:           "Components.".to_string(),
      namespace_declaration: "xmlns:controls=\"x\"".to_string(),
      docs_dir:              "llms".to_string(),
    };
    let def = button();
    let mut helper = button();
    helper.name = "FloweryHelper".to_string();
    let mut category = Category::new("Actions");
    category.members = vec!["DaisyButton".into(), "FloweryHelper".into()];

    let index = renderer.render_master_index(
      &project,
      [&def, &helper],
      |d| d.summary.clone(),
      &[category],
    );
    assert!(index.starts_with("# Flowery\n\nComponents.\n\n"));
    assert!(index.contains("- `llms/controls/*.md`"));
    assert!(index.contains("```xml\nxmlns:controls=\"x\"\n```"));
    assert!(index.contains(
      "| [DaisyButton](controls/DaisyButton.md) | A clickable button. | \
       Variant, ... |"
    ));
    assert!(!index.contains("FloweryHelper"));
    assert!(index.ends_with("### Actions\nDaisyButton\n"));
  }
}
