use std::{collections::BTreeMap, path::Path};

use log::{debug, warn};

use crate::render::Supplement;

/// Curated markdown loaded for the definitions of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Supplements {
  by_name:           BTreeMap<String, Supplement>,
  pub read_failures: usize,
}

impl Supplements {
  /// Load `{dir}/{name}.md` for every name that has one.
  pub fn load<'a>(dir: &Path, names: impl IntoIterator<Item = &'a str>) -> Self {
    let mut loaded = Self::default();
    for name in names {
      let path = dir.join(format!("{name}.md"));
      if !path.is_file() {
        continue;
      }
      match std::fs::read_to_string(&path) {
        Ok(raw) => {
          debug!("Using curated text from {}", path.display());
          loaded.by_name.insert(name.to_string(), Supplement::parse(&raw));
        },
        Err(e) => {
          warn!("Skipping curated text {}: {e}", path.display());
          loaded.read_failures += 1;
        },
      }
    }
    loaded
  }

  pub fn insert(&mut self, name: impl Into<String>, supplement: Supplement) {
    self.by_name.insert(name.into(), supplement);
  }

  #[must_use]
  pub fn get(&self, name: &str) -> Option<&Supplement> {
    self.by_name.get(name)
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.by_name.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.by_name.is_empty()
  }
}
