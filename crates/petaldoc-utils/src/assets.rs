use std::{
  fs,
  path::{Path, PathBuf},
};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::error::OutputError;

/// Extensions copied into the site's image directory.
pub const IMAGE_EXTENSIONS: &[&str] = &["gif", "png", "jpg", "jpeg", "webp", "svg"];

fn is_image(path: &Path) -> bool {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .is_some_and(|ext| {
      IMAGE_EXTENSIONS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(ext))
    })
}

/// Copies the images found directly inside each of `sources` into `dest`.
///
/// Sources are visited in order and files in name order, so when two sources
/// hold the same file name the later source wins. Missing sources are
/// skipped. Returns the number of files copied.
///
/// # Errors
///
/// Returns an error if `dest` cannot be created or a file cannot be copied.
pub fn copy_images(
  sources: &[PathBuf],
  dest: &Path,
) -> Result<usize, OutputError> {
  fs::create_dir_all(dest).map_err(|source| {
    OutputError::CreateDir {
      path: dest.to_path_buf(),
      source,
    }
  })?;

  let mut copied = 0;
  for source_dir in sources {
    if !source_dir.is_dir() {
      continue;
    }

    let walker = WalkDir::new(source_dir)
      .min_depth(1)
      .max_depth(1)
      .sort_by_file_name();
    for entry in walker {
      let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
          warn!("Skipping unreadable entry in {}: {e}", source_dir.display());
          continue;
        },
      };
      let path = entry.path();
      if !entry.file_type().is_file() || !is_image(path) {
        continue;
      }

      let target = dest.join(entry.file_name());
      fs::copy(path, &target).map_err(|source| {
        OutputError::Copy {
          from: path.to_path_buf(),
          to: target.clone(),
          source,
        }
      })?;
      copied += 1;
    }
  }

  debug!("Copied {copied} image(s) to {}", dest.display());
  Ok(copied)
}

/// Appends custom stylesheets to `base_css`, compiling `.scss` files.
///
/// Paths that do not exist are skipped; configuration validation reports
/// them.
///
/// # Errors
///
/// Returns an error if a stylesheet cannot be read or compiled.
pub fn combine_stylesheets(
  base_css: &str,
  stylesheet_paths: &[PathBuf],
) -> Result<String, OutputError> {
  let mut combined_css = base_css.to_string();

  for (index, stylesheet_path) in stylesheet_paths.iter().enumerate() {
    if !stylesheet_path.exists() {
      continue;
    }
    let content = fs::read_to_string(stylesheet_path).map_err(|source| {
      OutputError::Read {
        path: stylesheet_path.clone(),
        source,
      }
    })?;

    let processed_content =
      if stylesheet_path.extension().is_some_and(|ext| ext == "scss") {
        grass::from_string(content, &grass::Options::default()).map_err(
          |e| {
            OutputError::Stylesheet {
              path:    stylesheet_path.clone(),
              message: e.to_string(),
            }
          },
        )?
      } else {
        content
      };

    combined_css.push_str("\n\n/* Custom Stylesheet ");
    combined_css.push_str(&(index + 1).to_string());
    combined_css.push_str(": ");
    combined_css.push_str(&stylesheet_path.display().to_string());
    combined_css.push_str(" */\n");
    combined_css.push_str(&processed_content);
  }

  Ok(combined_css)
}
