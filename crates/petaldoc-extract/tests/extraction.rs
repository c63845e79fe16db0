#![allow(clippy::expect_used, clippy::unwrap_used, reason = "Fine in tests")]
use std::fs;

use petaldoc_extract::{
  DefinitionExtractor,
  ExampleExtractor,
  ExtractError,
  ExtractLimits,
  extract_definitions_from_dir,
  extract_examples_from_dir,
};
use tempfile::TempDir;

const BUTTON_SOURCE: &str = r#"
namespace Flowery.Controls
{
    /// <summary>
    /// A button styled after DaisyUI.
    /// </summary>
    public class DaisyButton : Button
    {
        /// <summary>Visual variant.</summary>
        public static readonly StyledProperty<DaisyButtonVariant> VariantProperty =
            AvaloniaProperty.Register<DaisyButton, DaisyButtonVariant>(
                nameof(Variant),
                DaisyButtonVariant.Default);
    }

    public enum DaisyButtonVariant
    {
        Default,
        Primary,
        Secondary
    }
}
"#;

fn definition_extractor() -> DefinitionExtractor {
  DefinitionExtractor::new("Daisy", ExtractLimits::default())
}

#[test]
fn definitions_walk_filters_and_counts() {
  let temp_dir = TempDir::new().expect("Failed to create temp dir");
  let root = temp_dir.path();
  let nested = root.join("Buttons");
  fs::create_dir_all(&nested).expect("Failed to create nested directory");

  fs::write(nested.join("DaisyButton.cs"), BUTTON_SOURCE).unwrap();
  // Not a control: wrong prefix, converter and non-source extension.
  fs::write(root.join("Helpers.cs"), "public class Helpers {}").unwrap();
  fs::write(
    root.join("DaisyColorConverter.cs"),
    "public class DaisyColorConverter {}",
  )
  .unwrap();
  fs::write(root.join("DaisyNotes.txt"), "public class DaisyNotes {}").unwrap();
  // Matches the filter but holds no usable declaration.
  fs::write(root.join("DaisyEmpty.cs"), "// nothing to see").unwrap();
  // Invalid UTF-8 counts as a read failure.
  fs::write(root.join("DaisyBroken.cs"), [0xff, 0xfe, 0x00]).unwrap();

  let out = extract_definitions_from_dir(&definition_extractor(), root)
    .expect("walk should succeed");

  assert_eq!(out.items.len(), 1);
  let button = &out.items[0].definition;
  assert_eq!(button.name, "DaisyButton");
  assert_eq!(button.base_name, "Button");
  assert_eq!(button.summary, "A button styled after DaisyUI.");
  assert_eq!(button.properties[0].name, "Variant");
  assert_eq!(button.properties[0].default_value, "Default");
  assert_eq!(button.enums[0].values, vec![
    "Default",
    "Primary",
    "Secondary"
  ]);

  assert_eq!(out.parse_misses, 1);
  assert_eq!(out.read_failures, 1);
}

#[test]
fn missing_definitions_dir_is_an_error() {
  let temp_dir = TempDir::new().expect("Failed to create temp dir");
  let missing = temp_dir.path().join("nope");
  let err = extract_definitions_from_dir(&definition_extractor(), &missing)
    .expect_err("missing dir must fail");
  assert!(matches!(err, ExtractError::Walk { .. }));
}

#[test]
fn examples_walk_is_sorted_and_shallow() {
  let temp_dir = TempDir::new().expect("Failed to create temp dir");
  let root = temp_dir.path();

  fs::write(
    root.join("ZetaExamples.axaml"),
    r#"<local:SectionHeader Title="Zeta"/><controls:DaisyZeta/>"#,
  )
  .unwrap();
  fs::write(
    root.join("AlphaExamples.axaml"),
    r#"<local:SectionHeader Title="Alpha"/><controls:DaisyAlpha/>"#,
  )
  .unwrap();
  fs::write(root.join("EmptyExamples.axaml"), "<StackPanel/>").unwrap();
  fs::write(
    root.join("Other.axaml"),
    r#"<local:SectionHeader Title="Other"/><controls:DaisyOther/>"#,
  )
  .unwrap();
  let sub = root.join("sub");
  fs::create_dir_all(&sub).unwrap();
  fs::write(
    sub.join("DeepExamples.axaml"),
    r#"<local:SectionHeader Title="Deep"/><controls:DaisyDeep/>"#,
  )
  .unwrap();

  let extractor = ExampleExtractor::new("Daisy", ExtractLimits::default());
  let out = extract_examples_from_dir(&extractor, root).unwrap();

  let ids: Vec<_> = out.items.iter().map(|s| s.section_id.as_str()).collect();
  assert_eq!(ids, vec!["alpha", "zeta"]);
  assert_eq!(out.parse_misses, 1);
  assert_eq!(out.read_failures, 0);
}
