//! Grouping definitions into display categories by gallery source file.

use std::path::Path;

use indexmap::IndexMap;
use log::{debug, warn};
use petaldoc_extract::{ExampleExtractor, extract_examples_from_file};

use crate::index::SectionMap;

/// A display category and its members in first-appearance order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
  pub name:    String,
  /// File-name-safe form of `name`.
  pub slug:    String,
  pub members: Vec<String>,
}

impl Category {
  #[must_use]
  pub fn new(name: impl Into<String>) -> Self {
    let name = name.into();
    let slug = category_slug(&name);
    Self {
      name,
      slug,
      members: Vec::new(),
    }
  }

  #[must_use]
  pub fn contains(&self, member: &str) -> bool {
    self.members.iter().any(|m| m == member)
  }
}

/// `Cards & Layout` becomes `cards-and-layout`.
#[must_use]
pub fn category_slug(name: &str) -> String {
  name.to_lowercase().replace(' ', "-").replace('&', "and")
}

/// Categories in display order plus the number of unreadable source files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Categories {
  pub categories:    Vec<Category>,
  pub read_failures: usize,
}

impl Categories {
  /// Build categories by parsing `{examples_dir}/{stem}.axaml` for every
  /// `(stem, category)` pair and resolving each section to a definition.
  ///
  /// Several stems may feed one category. Missing files are skipped;
  /// categories that end up empty are omitted.
  #[must_use]
  pub fn group(
    extractor: &ExampleExtractor,
    examples_dir: &Path,
    mapping: &IndexMap<String, String>,
    sections: &SectionMap,
  ) -> Self {
    let mut grouped: IndexMap<String, Category> = IndexMap::new();
    let mut read_failures = 0;

    for (stem, category_name) in mapping {
      let path = examples_dir.join(format!("{stem}.axaml"));
      if !path.is_file() {
        debug!("No gallery file for category source {}", path.display());
        continue;
      }

      let parsed = match extract_examples_from_file(extractor, &path) {
        Ok(parsed) => parsed,
        Err(e) => {
          warn!("Skipping category source: {e}");
          read_failures += 1;
          continue;
        },
      };

      for section in parsed {
        let Some(member) = sections.resolve(&section.section_id) else {
          continue;
        };
        let category = grouped
          .entry(category_name.clone())
          .or_insert_with(|| Category::new(category_name.as_str()));
        if !category.contains(member) {
          category.members.push(member.to_string());
        }
      }
    }

    Self {
      categories: grouped.into_values().collect(),
      read_failures,
    }
  }

  /// The first category that lists `member`.
  #[must_use]
  pub fn category_of(&self, member: &str) -> Option<&Category> {
    self.categories.iter().find(|c| c.contains(member))
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Category> {
    self.categories.iter()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.categories.is_empty()
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]
  use std::fs;

  use petaldoc_extract::ExtractLimits;

  use super::*;

  #[test]
  fn slug_rules() {
    assert_eq!(category_slug("Cards & Layout"), "cards-and-layout");
    assert_eq!(category_slug("Data Input"), "data-input");
  }

  #[test]
  fn stems_merge_into_one_category() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
      dir.path().join("LayoutExamples.axaml"),
      r#"<local:SectionHeader SectionId="stack" Title="Stack"/>
<controls:DaisyStack/>
<local:SectionHeader SectionId="nope" Title="Nope"/>
<controls:DaisyNope/>"#,
    )
    .unwrap();
    fs::write(
      dir.path().join("DividerExamples.axaml"),
      r#"<local:SectionHeader SectionId="divider" Title="Divider"/>
<controls:DaisyDivider Orientation="Vertical"/>
<controls:DaisyStackLike/>
<local:SectionHeader SectionId="stack" Title="Stack again"/>
<controls:DaisyStack/>"#,
    )
    .unwrap();

    let mapping: IndexMap<String, String> = [
      ("LayoutExamples", "Layout"),
      ("MissingExamples", "Ghost"),
      ("DividerExamples", "Layout"),
    ]
    .into_iter()
    .map(|(a, b)| (a.to_string(), b.to_string()))
    .collect();
    let sections =
      SectionMap::new([("stack", "DaisyStack"), ("divider", "DaisyDivider")]);
    let extractor = ExampleExtractor::new("Daisy", ExtractLimits::default());

    let grouped = Categories::group(&extractor, dir.path(), &mapping, &sections);
    assert_eq!(grouped.categories.len(), 1);
    let layout = &grouped.categories[0];
    assert_eq!(layout.slug, "layout");
    assert_eq!(layout.members, vec!["DaisyStack", "DaisyDivider"]);
    assert_eq!(grouped.category_of("DaisyDivider").unwrap().name, "Layout");
    assert!(grouped.category_of("DaisyNope").is_none());
  }
}
