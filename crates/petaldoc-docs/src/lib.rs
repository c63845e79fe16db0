//! `petaldoc-docs`.
//!
//! Turns extracted metadata into the markdown documentation tree: one page
//! per definition under `controls/`, one overview per category under
//! `categories/`, and a master `llms.txt` index. Nothing here touches the
//! output directory; [`DocTree::files`] hands the pages to a writer.

pub mod category;
pub mod images;
pub mod index;
pub mod render;
mod supplement;

use std::{collections::BTreeMap, path::PathBuf};

pub use category::{Categories, Category, category_slug};
pub use images::{IMAGE_DIR, ImageCatalog};
pub use index::{IndexStats, MetadataIndex, SectionMap, normalize_section_id};
use log::debug;
pub use render::{DocRenderer, ProjectInfo, RenderLimits, Supplement};
pub use supplement::Supplements;

/// Directory of definition pages inside the tree.
pub const CONTROLS_DIR: &str = "controls";
/// Directory of category pages inside the tree.
pub const CATEGORIES_DIR: &str = "categories";
/// File name of the master index.
pub const MASTER_INDEX: &str = "llms.txt";

/// A rendered category page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDoc {
  pub name:     String,
  pub slug:     String,
  pub markdown: String,
}

/// The complete markdown tree of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocTree {
  /// Definition pages by name.
  pub controls:   BTreeMap<String, String>,
  pub categories: Vec<CategoryDoc>,
  /// Contents of the master index.
  pub index:      String,
}

impl DocTree {
  /// Every page with its path relative to the tree root, in a stable order.
  #[must_use]
  pub fn files(&self) -> Vec<(PathBuf, &str)> {
    let mut files: Vec<(PathBuf, &str)> = self
      .controls
      .iter()
      .map(|(name, body)| {
        (
          PathBuf::from(CONTROLS_DIR).join(format!("{name}.md")),
          body.as_str(),
        )
      })
      .collect();
    files.extend(self.categories.iter().map(|doc| {
      (
        PathBuf::from(CATEGORIES_DIR).join(format!("{}.md", doc.slug)),
        doc.markdown.as_str(),
      )
    }));
    files.push((PathBuf::from(MASTER_INDEX), self.index.as_str()));
    files
  }
}

/// Inputs for rendering a [`DocTree`].
#[derive(Debug, Clone, Copy)]
pub struct TreeInputs<'a> {
  pub index:       &'a MetadataIndex,
  pub categories:  &'a Categories,
  pub supplements: &'a Supplements,
  pub images:      &'a ImageCatalog,
  pub project:     &'a ProjectInfo,
}

/// Render every page of the markdown tree.
#[must_use]
pub fn build_tree(renderer: &DocRenderer, inputs: TreeInputs<'_>) -> DocTree {
  let TreeInputs {
    index,
    categories,
    supplements,
    images,
    project,
  } = inputs;
  let type_prefix = renderer.type_prefix();

  let mut tree = DocTree::default();
  for definition in index.definitions() {
    let name = &definition.name;
    let page = renderer.render(
      definition,
      index.examples_for(name),
      supplements.get(name),
      &images.find(name, type_prefix),
    );
    tree.controls.insert(name.clone(), page);
  }

  for category in categories.iter() {
    let members: Vec<_> = category
      .members
      .iter()
      .filter_map(|member| index.get(member))
      .map(|def| (def, renderer.description(def, supplements.get(&def.name))))
      .collect();
    if members.is_empty() {
      debug!("Category {} has no known members", category.name);
      continue;
    }
    tree.categories.push(CategoryDoc {
      name:     category.name.clone(),
      slug:     category.slug.clone(),
      markdown: renderer.render_category(category, &members),
    });
  }

  tree.index = renderer.render_master_index(
    project,
    index.definitions(),
    |def| renderer.description(def, supplements.get(&def.name)),
    &categories.categories,
  );

  tree
}
