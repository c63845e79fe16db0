//! `petaldoc-extract`.
//!
//! Pattern-based recovery of documentation metadata from two kinds of
//! source files: control definitions (one public type per file, with
//! `///` summaries, registered properties and enums) and gallery markup
//! (titled sections of labelled example elements).
//!
//! Extraction never fails on malformed input. A file that yields nothing
//! is a parse miss; a file that cannot be read is a read failure. Both are
//! logged and counted in the returned [`Extraction`].
//!
//! # Example
//!
//! ```
//! use petaldoc_extract::{DefinitionExtractor, ExtractLimits};
//!
//! let src = r#"
//! /// <summary>A toggle.</summary>
//! public class DaisyToggle : ToggleButton
//! {
//!     public static readonly StyledProperty<bool> IsActiveProperty =
//!         AvaloniaProperty.Register<DaisyToggle, bool>(nameof(IsActive), true);
//! }
//! "#;
//!
//! let extractor = DefinitionExtractor::new("Daisy", ExtractLimits::default());
//! let def = extractor.parse(src, "DaisyToggle.cs").unwrap();
//! assert_eq!(def.properties[0].name, "IsActive");
//! assert_eq!(def.properties[0].default_value, "true");
//! ```

pub mod error;
mod definition;
mod example;
mod types;

use std::path::{Path, PathBuf};

pub use definition::DefinitionExtractor;
pub use error::ExtractError;
pub use example::{CANONICAL_NAMESPACE, DEFAULT_LABEL, ExampleExtractor};
use log::{debug, warn};
pub use types::{
  Definition,
  EnumGroup,
  ExampleSection,
  ExtractLimits,
  Property,
  SubExample,
};
use walkdir::WalkDir;

/// Items recovered from a directory walk, with the files that produced
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction<T> {
  /// Extracted items, ordered by source path.
  pub items:         Vec<T>,
  /// Files that were read but yielded nothing.
  pub parse_misses:  usize,
  /// Files that could not be read or decoded.
  pub read_failures: usize,
}

impl<T> Default for Extraction<T> {
  fn default() -> Self {
    Self {
      items:         Vec::new(),
      parse_misses:  0,
      read_failures: 0,
    }
  }
}

/// A definition together with the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcedDefinition {
  pub path:       PathBuf,
  pub definition: Definition,
}

/// Read a source file as UTF-8 text.
///
/// # Errors
///
/// Returns [`ExtractError::ReadFile`] if the file cannot be read or is not
/// valid UTF-8.
pub fn read_source(path: impl AsRef<Path>) -> Result<String, ExtractError> {
  let path = path.as_ref();
  std::fs::read_to_string(path).map_err(|source| {
    ExtractError::ReadFile {
      path: path.to_path_buf(),
      source,
    }
  })
}

/// Parse one gallery markup file.
///
/// # Errors
///
/// Returns [`ExtractError::ReadFile`] if the file cannot be read.
pub fn extract_examples_from_file(
  extractor: &ExampleExtractor,
  path: impl AsRef<Path>,
) -> Result<Vec<ExampleSection>, ExtractError> {
  Ok(extractor.parse(&read_source(path)?))
}

/// Extract one [`Definition`] per matching source file under `dir`.
///
/// Files are named `{type_prefix}*.cs`; names containing `Converter` are
/// skipped. The walk is recursive and sorted by file name.
///
/// # Errors
///
/// Returns [`ExtractError::Walk`] only when `dir` itself cannot be walked.
/// Individual file read errors are logged, counted and skipped.
pub fn extract_definitions_from_dir(
  extractor: &DefinitionExtractor,
  dir: impl AsRef<Path>,
) -> Result<Extraction<SourcedDefinition>, ExtractError> {
  let prefix = extractor.type_prefix();
  let files = collect_files(dir.as_ref(), true, |name| {
    name.starts_with(prefix)
      && name.ends_with(".cs")
      && !name.contains("Converter")
  })?;

  let mut out = Extraction::default();
  for path in files {
    let text = match read_source(&path) {
      Ok(text) => text,
      Err(e) => {
        warn!("Skipping definition file: {e}");
        out.read_failures += 1;
        continue;
      },
    };

    let file_name = path
      .file_name()
      .and_then(|n| n.to_str())
      .unwrap_or_default();
    match extractor.parse(&text, file_name) {
      Some(definition) => out.items.push(SourcedDefinition { path, definition }),
      None => {
        debug!("No matching type declaration in {}", path.display());
        out.parse_misses += 1;
      },
    }
  }

  Ok(out)
}

/// Extract example sections from every `*Examples.axaml` file directly in
/// `dir`, in file-name order.
///
/// # Errors
///
/// Returns [`ExtractError::Walk`] only when `dir` itself cannot be walked.
pub fn extract_examples_from_dir(
  extractor: &ExampleExtractor,
  dir: impl AsRef<Path>,
) -> Result<Extraction<ExampleSection>, ExtractError> {
  let files = collect_files(dir.as_ref(), false, |name| {
    name.ends_with("Examples.axaml")
  })?;

  let mut out = Extraction::default();
  for path in files {
    match extract_examples_from_file(extractor, &path) {
      Ok(sections) if sections.is_empty() => {
        debug!("No example sections in {}", path.display());
        out.parse_misses += 1;
      },
      Ok(sections) => out.items.extend(sections),
      Err(e) => {
        warn!("Skipping example file: {e}");
        out.read_failures += 1;
      },
    }
  }

  Ok(out)
}

/// Sorted list of files under `dir` whose name satisfies `wanted`.
fn collect_files(
  dir: &Path,
  recursive: bool,
  wanted: impl Fn(&str) -> bool,
) -> Result<Vec<PathBuf>, ExtractError> {
  let max_depth = if recursive { usize::MAX } else { 1 };
  let mut walker = WalkDir::new(dir)
    .follow_links(true)
    .max_depth(max_depth)
    .sort_by_file_name()
    .into_iter()
    .peekable();

  if matches!(walker.peek(), Some(Err(_)))
    && let Some(Err(source)) = walker.next()
  {
    return Err(ExtractError::Walk {
      path: dir.to_path_buf(),
      source,
    });
  }

  let mut files = Vec::new();
  for entry in walker {
    let entry = match entry {
      Ok(entry) => entry,
      Err(e) => {
        warn!("Skipping unreadable directory entry: {e}");
        continue;
      },
    };
    if !entry.file_type().is_file() {
      continue;
    }
    if entry.file_name().to_str().is_some_and(&wanted) {
      files.push(entry.into_path());
    }
  }

  Ok(files)
}
