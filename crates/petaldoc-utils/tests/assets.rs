#![allow(clippy::expect_used, clippy::unwrap_used, reason = "Fine in tests")]
use std::fs;

use petaldoc_utils::{OutputError, combine_stylesheets, copy_images};
use tempfile::TempDir;

#[test]
fn copies_images_from_every_source() {
  let temp = TempDir::new().expect("Failed to create temp dir");
  let curated = temp.path().join("curated");
  let nested = curated.join("images");
  fs::create_dir_all(&nested).unwrap();
  fs::write(curated.join("hero.gif"), "gif").unwrap();
  fs::write(curated.join("DaisyBadge.md"), "# Badge").unwrap();
  fs::write(nested.join("DaisyButton.png"), "png").unwrap();
  fs::write(nested.join("DaisyButton.PNG.txt"), "nope").unwrap();

  let dest = temp.path().join("site/images");
  let copied = copy_images(&[curated.clone(), nested], &dest).unwrap();

  assert_eq!(copied, 2);
  assert!(dest.join("hero.gif").is_file());
  assert!(dest.join("DaisyButton.png").is_file());
  assert!(!dest.join("DaisyBadge.md").exists());
}

#[test]
fn missing_sources_copy_nothing() {
  let temp = TempDir::new().expect("Failed to create temp dir");
  let dest = temp.path().join("images");
  let copied = copy_images(&[temp.path().join("absent")], &dest).unwrap();
  assert_eq!(copied, 0);
  assert!(dest.is_dir());
}

#[test]
fn scss_stylesheets_are_compiled() {
  let temp = TempDir::new().expect("Failed to create temp dir");
  let scss = temp.path().join("brand.scss");
  let css = temp.path().join("extra.css");
  fs::write(&scss, "$accent: #ff00ff;\n.brand { color: $accent; }").unwrap();
  fs::write(&css, ".extra { margin: 0; }").unwrap();

  let combined =
    combine_stylesheets("body {}", &[scss, temp.path().join("gone.css"), css])
      .unwrap();

  assert!(combined.starts_with("body {}"));
  assert!(combined.contains("/* Custom Stylesheet 1:"));
  assert!(combined.contains("color: #ff00ff"));
  assert!(combined.contains("/* Custom Stylesheet 3:"));
  assert!(!combined.contains("Custom Stylesheet 2"));
}

#[test]
fn invalid_scss_is_reported() {
  let temp = TempDir::new().expect("Failed to create temp dir");
  let scss = temp.path().join("broken.scss");
  fs::write(&scss, ".a { color: $undefined; }").unwrap();

  let err = combine_stylesheets("", &[scss]).unwrap_err();
  assert!(matches!(err, OutputError::Stylesheet { .. }));
}
