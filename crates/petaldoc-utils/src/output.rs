use std::{
  fs,
  path::{Path, PathBuf},
};

use log::{debug, trace};

use crate::error::OutputError;

/// Write `contents` to `path`, creating parent directories first.
///
/// # Errors
///
/// Returns [`OutputError::CreateDir`] or [`OutputError::Write`].
pub fn write_file(path: &Path, contents: &str) -> Result<(), OutputError> {
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent).map_err(|source| {
      OutputError::CreateDir {
        path: parent.to_path_buf(),
        source,
      }
    })?;
  }

  fs::write(path, contents).map_err(|source| {
    OutputError::Write {
      path: path.to_path_buf(),
      source,
    }
  })?;
  trace!("Wrote {}", path.display());
  Ok(())
}

/// Write every `(relative path, contents)` pair below `root`, overwriting
/// what is there. Returns the number of files written.
///
/// # Errors
///
/// Stops at the first file that cannot be written.
pub fn write_tree<'a>(
  root: &Path,
  files: impl IntoIterator<Item = (PathBuf, &'a str)>,
) -> Result<usize, OutputError> {
  let mut written = 0;
  for (relative, contents) in files {
    write_file(&root.join(relative), contents)?;
    written += 1;
  }
  debug!("Wrote {written} files below {}", root.display());
  Ok(written)
}

/// Contents of `path` when it names an existing file, else `fallback`.
///
/// Used for user templates that shadow embedded ones.
///
/// # Errors
///
/// Returns [`OutputError::Read`] if the file exists but cannot be read.
pub fn read_override(
  path: Option<&Path>,
  fallback: &str,
) -> Result<String, OutputError> {
  match path {
    Some(path) if path.is_file() => {
      debug!("Using template override {}", path.display());
      fs::read_to_string(path).map_err(|source| {
        OutputError::Read {
          path: path.to_path_buf(),
          source,
        }
      })
    },
    _ => Ok(fallback.to_string()),
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]

  use tempfile::TempDir;

  use super::*;

  #[test]
  fn write_tree_creates_nested_directories() {
    let temp = TempDir::new().unwrap();
    let files = vec![
      (PathBuf::from("controls/DaisyButton.md"), "# DaisyButton"),
      (PathBuf::from("llms.txt"), "index"),
    ];

    let written = write_tree(temp.path(), files).unwrap();
    assert_eq!(written, 2);
    assert_eq!(
      fs::read_to_string(temp.path().join("controls/DaisyButton.md")).unwrap(),
      "# DaisyButton"
    );
  }

  #[test]
  fn write_into_a_file_path_fails() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("controls");
    fs::write(&blocker, "not a directory").unwrap();

    let err = write_file(&blocker.join("DaisyButton.md"), "x").unwrap_err();
    assert!(matches!(err, OutputError::CreateDir { .. }));
  }

  #[test]
  fn override_falls_back_when_missing() {
    let temp = TempDir::new().unwrap();
    let custom = temp.path().join("page.html");
    assert_eq!(read_override(Some(&custom), "embedded").unwrap(), "embedded");

    fs::write(&custom, "custom").unwrap();
    assert_eq!(read_override(Some(&custom), "embedded").unwrap(), "custom");
    assert_eq!(read_override(None, "embedded").unwrap(), "embedded");
  }
}
