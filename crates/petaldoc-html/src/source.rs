//! Where page bodies come from.
//!
//! A site is built from two document sources: hand-curated markdown and the
//! tree generated in the same run. [`DocResolver`] merges them by name so the
//! assembler never looks at the file system for content on its own.

use std::{
  collections::{BTreeMap, BTreeSet},
  fs,
  io,
  path::{Path, PathBuf},
};

use log::{debug, warn};
use walkdir::WalkDir;

/// A named collection of markdown documents.
pub trait DocSource {
  /// Names of all documents, sorted.
  fn names(&self) -> Vec<String>;

  /// Markdown body of `name`.
  ///
  /// # Errors
  ///
  /// Returns an error if the document is missing or unreadable.
  fn read(&self, name: &str) -> io::Result<String>;

  fn contains(&self, name: &str) -> bool {
    self.names().iter().any(|n| n == name)
  }
}

/// `{dir}/{name}.md` files directly inside a directory.
#[derive(Debug, Clone)]
pub struct DirSource {
  dir: PathBuf,
}

impl DirSource {
  #[must_use]
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  #[must_use]
  pub fn dir(&self) -> &Path {
    &self.dir
  }

  fn path_of(&self, name: &str) -> PathBuf {
    self.dir.join(format!("{name}.md"))
  }
}

impl DocSource for DirSource {
  fn names(&self) -> Vec<String> {
    if !self.dir.is_dir() {
      debug!("No document directory at {}", self.dir.display());
      return Vec::new();
    }

    WalkDir::new(&self.dir)
      .min_depth(1)
      .max_depth(1)
      .sort_by_file_name()
      .into_iter()
      .filter_map(Result::ok)
      .filter(|entry| entry.file_type().is_file())
      .filter_map(|entry| {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "md") {
          path.file_stem()?.to_str().map(ToString::to_string)
        } else {
          None
        }
      })
      .collect()
  }

  fn read(&self, name: &str) -> io::Result<String> {
    fs::read_to_string(self.path_of(name))
  }

  fn contains(&self, name: &str) -> bool {
    self.path_of(name).is_file()
  }
}

/// Documents held in memory, such as the markdown tree of the current run.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
  docs: BTreeMap<String, String>,
}

impl MemorySource {
  #[must_use]
  pub const fn new(docs: BTreeMap<String, String>) -> Self {
    Self { docs }
  }

  pub fn insert(&mut self, name: impl Into<String>, body: impl Into<String>) {
    self.docs.insert(name.into(), body.into());
  }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemorySource {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self {
      docs: iter
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect(),
    }
  }
}

impl DocSource for MemorySource {
  fn names(&self) -> Vec<String> {
    self.docs.keys().cloned().collect()
  }

  fn read(&self, name: &str) -> io::Result<String> {
    self.docs.get(name).cloned().ok_or_else(|| {
      io::Error::new(io::ErrorKind::NotFound, format!("no document {name}"))
    })
  }

  fn contains(&self, name: &str) -> bool {
    self.docs.contains_key(name)
  }
}

/// Which source a resolved page came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
  Curated,
  Generated,
}

/// One page of the site with its markdown body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDoc {
  pub name:      String,
  pub body:      String,
  /// Listed under Helpers instead of Controls.
  pub is_helper: bool,
  pub origin:    Origin,
}

/// Resolved pages sorted by name, plus the documents that failed to load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
  pub docs:          Vec<ResolvedDoc>,
  pub read_failures: usize,
}

/// Merges curated and generated documents by name.
pub struct DocResolver<'a> {
  curated:     Option<&'a dyn DocSource>,
  generated:   &'a dyn DocSource,
  type_prefix: &'a str,
  helpers:     &'a [String],
}

impl<'a> DocResolver<'a> {
  /// Without a curated source only generated pages are used.
  #[must_use]
  pub fn new(
    curated: Option<&'a dyn DocSource>,
    generated: &'a dyn DocSource,
    type_prefix: &'a str,
    helpers: &'a [String],
  ) -> Self {
    Self {
      curated,
      generated,
      type_prefix,
      helpers,
    }
  }

  fn is_helper(&self, name: &str) -> bool {
    self.helpers.iter().any(|h| h == name)
  }

  /// Curated documents whose names carry the type prefix come first, then
  /// curated helper documents, then generated documents not already seen.
  #[must_use]
  pub fn resolve(&self) -> Resolution {
    let mut wanted: Vec<(String, Origin)> = Vec::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();

    if let Some(curated) = self.curated {
      for name in curated.names() {
        if name.starts_with(self.type_prefix) && seen.insert(name.clone()) {
          wanted.push((name, Origin::Curated));
        }
      }
      for helper in self.helpers {
        if !seen.contains(helper) && curated.contains(helper) {
          seen.insert(helper.clone());
          wanted.push((helper.clone(), Origin::Curated));
        }
      }
    }

    for name in self.generated.names() {
      if name.starts_with(self.type_prefix) && seen.insert(name.clone()) {
        wanted.push((name, Origin::Generated));
      }
    }

    let mut resolution = Resolution::default();
    for (name, origin) in wanted {
      let source = match origin {
        Origin::Curated => self.curated.unwrap_or(self.generated),
        Origin::Generated => self.generated,
      };
      match source.read(&name) {
        Ok(body) => {
          resolution.docs.push(ResolvedDoc {
            is_helper: self.is_helper(&name),
            name,
            body,
            origin,
          });
        },
        Err(e) => {
          warn!("Skipping page {name}: {e}");
          resolution.read_failures += 1;
        },
      }
    }

    resolution.docs.sort_by(|a, b| a.name.cmp(&b.name));
    resolution
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]

  use super::*;

  fn helpers() -> Vec<String> {
    vec!["HslColor".to_string(), "DaisyAccessibility".to_string()]
  }

  #[test]
  fn curated_wins_by_name() {
    let curated: MemorySource = [
      ("DaisyButton", "curated button"),
      ("HslColor", "colour helper"),
      ("Effects", "a guide"),
    ]
    .into_iter()
    .collect();
    let generated: MemorySource = [
      ("DaisyButton", "generated button"),
      ("DaisyBadge", "generated badge"),
    ]
    .into_iter()
    .collect();
    let helpers = helpers();

    let resolution =
      DocResolver::new(Some(&curated), &generated, "Daisy", &helpers).resolve();
    let names: Vec<&str> =
      resolution.docs.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["DaisyBadge", "DaisyButton", "HslColor"]);

    let button = &resolution.docs[1];
    assert_eq!(button.body, "curated button");
    assert_eq!(button.origin, Origin::Curated);
    assert!(resolution.docs[2].is_helper);
    assert_eq!(resolution.docs[0].origin, Origin::Generated);
  }

  #[test]
  fn generated_only() {
    let generated: MemorySource =
      [("DaisyBadge", "b"), ("DaisyAccessibility", "a"), ("Stray", "s")]
        .into_iter()
        .collect();
    let helpers = helpers();

    let resolution =
      DocResolver::new(None, &generated, "Daisy", &helpers).resolve();
    assert_eq!(resolution.docs.len(), 2);
    assert!(resolution.docs[0].is_helper);
    assert!(resolution.docs.iter().all(|d| d.origin == Origin::Generated));
  }

  #[test]
  fn dir_source_lists_markdown_only() {
    let temp = tempfile::TempDir::new().unwrap();
    fs::write(temp.path().join("DaisyCard.md"), "# Card").unwrap();
    fs::write(temp.path().join("DaisyCard.png"), "png").unwrap();
    fs::create_dir(temp.path().join("images")).unwrap();

    let source = DirSource::new(temp.path());
    assert_eq!(source.names(), vec!["DaisyCard"]);
    assert!(source.contains("DaisyCard"));
    assert!(!source.contains("DaisyBadge"));
    assert_eq!(source.read("DaisyCard").unwrap(), "# Card");
    assert!(DirSource::new(temp.path().join("none")).names().is_empty());
  }
}
