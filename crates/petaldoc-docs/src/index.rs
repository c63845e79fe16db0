//! The run-wide index of definitions and the example sections attached to
//! them.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use log::{debug, warn};
use petaldoc_extract::{Definition, ExampleSection, SourcedDefinition};

/// Normalize a section id for lookup: lower-case, with `-` and `_` removed.
#[must_use]
pub fn normalize_section_id(section_id: &str) -> String {
  section_id
    .chars()
    .filter(|c| *c != '-' && *c != '_')
    .flat_map(char::to_lowercase)
    .collect()
}

/// Lookup table from normalized section ids to definition names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
  entries: IndexMap<String, String>,
}

impl SectionMap {
  /// Build a map from `(section id, definition name)` pairs. Keys are
  /// normalized; the first pair for a key wins.
  pub fn new<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
  where
    K: AsRef<str>,
    V: Into<String>,
  {
    let mut entries = IndexMap::new();
    for (key, value) in pairs {
      entries
        .entry(normalize_section_id(key.as_ref()))
        .or_insert_with(|| value.into());
    }
    Self { entries }
  }

  /// Definition name for `section_id`, if one is mapped.
  #[must_use]
  pub fn resolve(&self, section_id: &str) -> Option<&str> {
    self
      .entries
      .get(&normalize_section_id(section_id))
      .map(String::as_str)
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

/// Counters describing how an index was assembled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
  /// Definitions dropped because an earlier file declared the same name.
  pub duplicate_definitions: usize,
  /// Sections whose id maps to no definition.
  pub reference_misses:      usize,
}

/// Every definition of a run, keyed and iterated by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataIndex {
  definitions: BTreeMap<String, Definition>,
  examples:    BTreeMap<String, Vec<ExampleSection>>,
}

impl MetadataIndex {
  /// Assemble the index from extracted definitions and example sections.
  ///
  /// Definitions are expected in source-path order; the first one for a
  /// name is kept. Sections are attached through `sections` and keep their
  /// source order per definition.
  #[must_use]
  pub fn build(
    definitions: Vec<SourcedDefinition>,
    examples: Vec<ExampleSection>,
    sections: &SectionMap,
  ) -> (Self, IndexStats) {
    let mut index = Self::default();
    let mut stats = IndexStats::default();

    for sourced in definitions {
      let name = sourced.definition.name.clone();
      if index.definitions.contains_key(&name) {
        warn!(
          "Duplicate definition {name} in {}, keeping the first one",
          sourced.path.display()
        );
        stats.duplicate_definitions += 1;
        continue;
      }
      index.definitions.insert(name, sourced.definition);
    }

    for section in examples {
      match sections.resolve(&section.section_id) {
        Some(name) => {
          index
            .examples
            .entry(name.to_string())
            .or_default()
            .push(section);
        },
        None => {
          debug!("No definition for example section '{}'", section.section_id);
          stats.reference_misses += 1;
        },
      }
    }

    (index, stats)
  }

  /// Definitions in name order.
  pub fn definitions(&self) -> impl Iterator<Item = &Definition> {
    self.definitions.values()
  }

  #[must_use]
  pub fn get(&self, name: &str) -> Option<&Definition> {
    self.definitions.get(name)
  }

  #[must_use]
  pub fn contains(&self, name: &str) -> bool {
    self.definitions.contains_key(name)
  }

  /// Example sections attached to `name`, in source order.
  #[must_use]
  pub fn examples_for(&self, name: &str) -> &[ExampleSection] {
    self.examples.get(name).map_or(&[], Vec::as_slice)
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.definitions.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.definitions.is_empty()
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]
  use std::path::PathBuf;

  use petaldoc_extract::SubExample;

  use super::*;

  fn definition(name: &str, summary: &str) -> SourcedDefinition {
    SourcedDefinition {
      path:       PathBuf::from(format!("{name}.cs")),
      definition: Definition {
        name:       name.to_string(),
        base_name:  "Object".to_string(),
        summary:    summary.to_string(),
        properties: Vec::new(),
        enums:      Vec::new(),
      },
    }
  }

  fn section(id: &str) -> ExampleSection {
    ExampleSection {
      section_id:   id.to_string(),
      title:        id.to_string(),
      sub_examples: vec![SubExample {
        label:   "Example".to_string(),
        snippet: "<controls:DaisyX/>".to_string(),
      }],
    }
  }

  #[test]
  fn normalization_drops_separators() {
    assert_eq!(normalize_section_id("Copy-Button"), "copybutton");
    assert_eq!(normalize_section_id("status_dot"), "statusdot");
  }

  #[test]
  fn first_duplicate_wins() {
    let (index, stats) = MetadataIndex::build(
      vec![definition("DaisyA", "first"), definition("DaisyA", "second")],
      Vec::new(),
      &SectionMap::default(),
    );
    assert_eq!(index.len(), 1);
    assert_eq!(index.get("DaisyA").unwrap().summary, "first");
    assert_eq!(stats.duplicate_definitions, 1);
  }

  #[test]
  fn sections_resolve_through_map() {
    let map = SectionMap::new([
      ("button", "DaisyButton"),
      ("copy-button", "DaisyCopyButton"),
    ]);
    let (index, stats) = MetadataIndex::build(
      vec![definition("DaisyButton", ""), definition("DaisyCopyButton", "")],
      vec![section("button"), section("CopyButton"), section("unknown")],
      &map,
    );
    assert_eq!(index.examples_for("DaisyButton").len(), 1);
    assert_eq!(index.examples_for("DaisyCopyButton").len(), 1);
    assert!(index.examples_for("DaisyOther").is_empty());
    assert_eq!(stats.reference_misses, 1);
  }

  #[test]
  fn definitions_iterate_by_name() {
    let (index, _) = MetadataIndex::build(
      vec![definition("DaisyZ", ""), definition("DaisyA", "")],
      Vec::new(),
      &SectionMap::default(),
    );
    let names: Vec<_> = index.definitions().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["DaisyA", "DaisyZ"]);
  }
}
