//! Discovery of screenshots that belong to a definition.

use std::path::Path;

use log::{debug, warn};
use walkdir::WalkDir;

/// Relative path prefix for every discovered image.
pub const IMAGE_DIR: &str = "images";

/// Maximum number of `_a`, `_b`, ... chunk suffixes looked up per definition.
const CHUNK_SUFFIXES: &str = "abcdefghij";

/// File names of the `.png` images available for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageCatalog {
  names: Vec<String>,
}

impl ImageCatalog {
  /// List the `.png` files directly inside `dir`. A missing directory
  /// yields an empty catalog.
  #[must_use]
  pub fn from_dir(dir: &Path) -> Self {
    if !dir.is_dir() {
      debug!("No image directory at {}", dir.display());
      return Self::default();
    }

    let walker = WalkDir::new(dir)
      .min_depth(1)
      .max_depth(1)
      .sort_by_file_name();
    let names = walker
      .into_iter()
      .filter_map(|entry| {
        entry
          .map_err(|e| {
            warn!("Skipping unreadable entry in {}: {e}", dir.display());
          })
          .ok()
      })
      .filter(|e| e.file_type().is_file())
      .filter_map(|e| e.file_name().to_str().map(ToString::to_string))
      .filter(|name| name.ends_with(".png"));
    Self::from_names(names)
  }

  pub fn from_names<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
    let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
    names.sort();
    names.dedup();
    Self { names }
  }

  /// Image paths for `name`, relative to the documentation root.
  ///
  /// Order: the exact `{name}.png`, then chunks `{name}_a.png` to
  /// `{name}_j.png`, then descriptive variants `{name}(...).png` or
  /// `{short}(...).png` in file-name order, where `short` is `name` without
  /// `type_prefix`.
  #[must_use]
  pub fn find(&self, name: &str, type_prefix: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let mut push = |file: &str| {
      let path = format!("{IMAGE_DIR}/{file}");
      if !found.contains(&path) {
        found.push(path);
      }
    };

    let exact = format!("{name}.png");
    if self.contains(&exact) {
      push(&exact);
    }

    for suffix in CHUNK_SUFFIXES.chars() {
      let chunk = format!("{name}_{suffix}.png");
      if self.contains(&chunk) {
        push(&chunk);
      }
    }

    let short = name.strip_prefix(type_prefix).unwrap_or(name);
    let long_open = format!("{name}(");
    let short_open = format!("{short}(");
    for file in &self.names {
      if (file.starts_with(&short_open) || file.starts_with(&long_open))
        && file.ends_with(").png")
      {
        push(file);
      }
    }

    found
  }

  fn contains(&self, file: &str) -> bool {
    self.names.binary_search_by(|n| n.as_str().cmp(file)).is_ok()
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]
  use std::fs;

  use tempfile::TempDir;

  use super::*;

  #[test]
  fn exact_then_chunks_then_descriptive() {
    let catalog = ImageCatalog::from_names([
      "Mockup(Window).png",
      "DaisyMockup_b.png",
      "DaisyMockup.png",
      "DaisyMockup_a.png",
      "DaisyMockup(Code).png",
      "DaisyMockupExtra.png",
      "Other.png",
    ]);
    assert_eq!(catalog.find("DaisyMockup", "Daisy"), vec![
      "images/DaisyMockup.png",
      "images/DaisyMockup_a.png",
      "images/DaisyMockup_b.png",
      "images/DaisyMockup(Code).png",
      "images/Mockup(Window).png",
    ]);
  }

  #[test]
  fn no_images() {
    let catalog = ImageCatalog::from_names(["DaisyButton.png"]);
    assert!(catalog.find("DaisyBadge", "Daisy").is_empty());
  }

  #[test]
  fn missing_dir_is_empty() {
    let catalog = ImageCatalog::from_dir(Path::new("/nonexistent/petaldoc"));
    assert!(catalog.find("DaisyButton", "Daisy").is_empty());
  }

  #[test]
  fn from_dir_lists_top_level_pngs() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("DaisyButton_b.png"), b"").unwrap();
    fs::write(temp.path().join("DaisyButton_a.png"), b"").unwrap();
    fs::write(temp.path().join("notes.txt"), b"").unwrap();
    fs::create_dir(temp.path().join("old")).unwrap();
    fs::write(temp.path().join("old").join("DaisyButton.png"), b"").unwrap();

    let catalog = ImageCatalog::from_dir(temp.path());
    assert_eq!(catalog.find("DaisyButton", "Daisy"), vec![
      "images/DaisyButton_a.png",
      "images/DaisyButton_b.png",
    ]);
  }
}
