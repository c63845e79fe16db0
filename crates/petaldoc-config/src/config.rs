use std::{
  env,
  fs,
  path::{Path, PathBuf},
};

use indexmap::IndexMap;
use log::{info, warn};
use petaldoc_docs::{ProjectInfo, SectionMap};
use petaldoc_macros::Configurable;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{catalog, error::ConfigError, limits::LimitsConfig, templates};

/// File names looked up in the working directory when no `-c` is given.
const LOCAL_CONFIG_NAMES: &[&str] = &[
  "petaldoc.toml",
  "petaldoc.json",
  ".petaldoc.toml",
  ".petaldoc.json",
  ".config/petaldoc.toml",
  ".config/petaldoc.json",
];

/// Configuration for a petaldoc run.
///
/// Holds the source directories, output locations, project text and the
/// lookup tables that tie gallery sections to controls. Usually loaded from a
/// TOML or JSON file, then adjusted with `--config KEY=VALUE` flags.
#[derive(Debug, Clone, Serialize, Deserialize, Configurable)]
#[serde(default)]
pub struct Config {
  /// Directory scanned recursively for control sources.
  #[config(allow_empty)]
  pub definitions_dir: Option<PathBuf>,

  /// Directory holding the `*Examples.axaml` gallery files.
  #[config(allow_empty)]
  pub examples_dir: Option<PathBuf>,

  /// Hand-written markdown and images that take precedence over generated
  /// pages.
  #[config(allow_empty)]
  pub curated_dir: Option<PathBuf>,

  /// Output directory of the markdown tree.
  pub docs_dir: PathBuf,

  /// Old name of `docs_dir`.
  #[config(allow_empty, renamed = "docs_dir")]
  #[serde(skip_serializing_if = "Option::is_none")]
  pub llms_dir: Option<PathBuf>,

  /// Output directory of the HTML site.
  pub output_dir: PathBuf,

  /// Directory with template files overriding the embedded ones.
  #[config(allow_empty)]
  pub template_dir: Option<PathBuf>,

  /// Stylesheets appended to the embedded one.
  pub stylesheet_paths: Vec<PathBuf>,

  pub title: String,

  /// One-line project description used by both indexes.
  pub description: String,

  /// Shown under the title in the sidebar.
  pub subtitle: String,

  pub footer_text: String,

  #[config(allow_empty)]
  pub repository_url: Option<String>,

  /// XML namespace declaration shown in the Quick Start sections.
  pub namespace_declaration: String,

  /// Prefix shared by documented control names.
  pub type_prefix: String,

  /// Append generated properties, enums and usage examples to every page.
  pub extended: bool,

  /// Build the site from the generated tree only.
  pub use_generated: bool,

  /// Curated pages rendered at the site root.
  pub guides: Vec<String>,

  /// Classes listed as helpers rather than controls.
  pub helpers: Vec<String>,

  /// Short-name prefixes marked with a custom badge.
  pub custom_prefixes: Vec<String>,

  /// Gallery file stem to category name, in display order.
  pub categories: Option<IndexMap<String, String>>,

  /// Section id to control name.
  pub sections: Option<IndexMap<String, String>>,

  /// Heuristic thresholds.
  #[config(nested)]
  pub limits: Option<LimitsConfig>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      definitions_dir:       None,
      examples_dir:          None,
      curated_dir:           None,
      docs_dir:              PathBuf::from("llms"),
      llms_dir:              None,
      output_dir:            PathBuf::from("docs"),
      template_dir:          None,
      stylesheet_paths:      Vec::new(),
      title:                 "Flowery.NET".to_string(),
      description:           "Avalonia UI components styled after DaisyUI."
        .to_string(),
      subtitle:              "Avalonia UI Components".to_string(),
      footer_text:           "Generated by petaldoc".to_string(),
      repository_url:        None,
      namespace_declaration: "xmlns:controls=\"clr-namespace:Flowery.\
                              Controls;assembly=Flowery.NET\""
        .to_string(),
      type_prefix:           "Daisy".to_string(),
      extended:              false,
      use_generated:         false,
      guides:                catalog::names(catalog::GUIDES),
      helpers:               catalog::names(catalog::HELPERS),
      custom_prefixes:       catalog::names(catalog::CUSTOM_PREFIXES),
      categories:            None,
      sections:              None,
      limits:                None,
    }
  }
}

impl Config {
  /// Heuristic thresholds, defaulted when no `[limits]` table was given.
  #[must_use]
  pub fn limits(&self) -> LimitsConfig {
    self.limits.clone().unwrap_or_default()
  }

  /// Category table, falling back to the built-in gallery layout.
  #[must_use]
  pub fn categories(&self) -> IndexMap<String, String> {
    self
      .categories
      .clone()
      .unwrap_or_else(|| catalog::pairs(catalog::CATEGORIES))
  }

  /// Section lookup table, falling back to the built-in control catalogue.
  #[must_use]
  pub fn section_map(&self) -> SectionMap {
    match self.sections {
      Some(ref sections) => SectionMap::new(sections),
      None => SectionMap::new(catalog::SECTIONS.iter().copied()),
    }
  }

  /// Project text for the master index.
  #[must_use]
  pub fn project_info(&self) -> ProjectInfo {
    ProjectInfo {
      title:                 self.title.clone(),
      description:           self.description.clone(),
      namespace_declaration: self.namespace_declaration.clone(),
      docs_dir:              self.docs_dir.display().to_string(),
    }
  }

  /// Read one TOML or JSON config file, chosen by extension.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or has neither
  /// extension.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let layer = read_layer(path)?;
    Self::deserialize(layer).map_err(|source| ConfigError::Invalid {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Layer several config files into one, later files winning.
  ///
  /// Only keys a file actually sets take part: tables merge key by key,
  /// lists append without repeats and plain values are replaced. The result
  /// is deserialized once, so defaults only fill keys no file sets.
  ///
  /// # Errors
  ///
  /// Returns an error if a file cannot be loaded or the layered values do
  /// not form a valid config.
  pub fn from_files(paths: &[PathBuf]) -> Result<Self, ConfigError> {
    let mut merged = Value::Object(Map::new());
    for path in paths {
      let layer = read_layer(path)?;
      Self::deserialize(&layer).map_err(|source| ConfigError::Invalid {
        path: path.clone(),
        source,
      })?;
      merge_layer(&mut merged, layer);
    }

    let config = Self::deserialize(merged).map_err(|source| {
      ConfigError::Invalid {
        path: paths.last().cloned().unwrap_or_default(),
        source,
      }
    })?;
    if paths.len() > 1 {
      info!("Merged {} config files", paths.len());
    }
    Ok(config)
  }

  /// Layer the given files in order (or use a discovered one), then apply
  /// `KEY=VALUE` overrides on top.
  ///
  /// # Errors
  ///
  /// Returns an error if a file cannot be loaded, an override is invalid, or
  /// no definitions directory ends up configured.
  pub fn load(
    config_files: &[PathBuf],
    config_overrides: &[String],
  ) -> Result<Self, ConfigError> {
    let mut config = match config_files {
      [] => {
        match Self::find_config_file() {
          Some(found) => {
            info!("Using discovered config file: {}", found.display());
            Self::from_file(&found)?
          },
          None => Self::default(),
        }
      },
      files => Self::from_files(files)?,
    };

    config.apply_overrides(config_overrides)?;

    if let Some(dir) = config.llms_dir.take() {
      warn!("llms_dir is renamed to docs_dir");
      config.docs_dir = dir;
    }

    if config.definitions_dir.is_none() {
      return Err(ConfigError::MissingDefinitionsDir);
    }
    Ok(config)
  }

  /// Apply `KEY=VALUE` overrides in order.
  ///
  /// Nested keys use a dotted form:
  ///
  /// ```rust, ignore
  /// config.apply_overrides(&[
  ///   "limits.max_description_length=60".to_string(),
  ///   "helpers=DaisyAccessibility,HslColor".to_string(),
  /// ])?;
  /// ```
  ///
  /// # Errors
  ///
  /// Returns an error if a string has no `=`, names an unknown key, or holds
  /// a value of the wrong type.
  pub fn apply_overrides(
    &mut self,
    overrides: &[String],
  ) -> Result<(), ConfigError> {
    for raw in overrides {
      let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| ConfigError::OverrideSyntax(raw.clone()))?;
      self.apply_override(key.trim(), value.trim())?;
    }
    Ok(())
  }

  /// Path of a template file inside `template_dir`, if one is configured.
  ///
  /// The path is not checked for existence.
  #[must_use]
  pub fn get_template_file(&self, name: &str) -> Option<PathBuf> {
    self.template_dir.as_ref().map(|dir| dir.join(name))
  }

  /// First existing config file among the working directory names,
  /// `$XDG_CONFIG_HOME/petaldoc.{toml,json}` and
  /// `~/.config/petaldoc/config.{toml,json}`.
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(cwd) = env::current_dir() {
      candidates.extend(LOCAL_CONFIG_NAMES.iter().map(|name| cwd.join(name)));
    }
    if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
      let xdg = PathBuf::from(xdg);
      candidates.push(xdg.join("petaldoc.toml"));
      candidates.push(xdg.join("petaldoc.json"));
    }
    if let Some(home) = env::var_os("HOME") {
      let dir = PathBuf::from(home).join(".config").join("petaldoc");
      candidates.push(dir.join("config.toml"));
      candidates.push(dir.join("config.json"));
    }
    candidates.into_iter().find(|path| path.is_file())
  }

  /// Check every configured input path at once.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::InvalidPaths`] listing each directory or
  /// stylesheet that is missing or of the wrong kind.
  pub fn validate_paths(&self) -> Result<(), ConfigError> {
    let directories = [
      ("Definitions directory", &self.definitions_dir),
      ("Examples directory", &self.examples_dir),
      ("Curated directory", &self.curated_dir),
      ("Template directory", &self.template_dir),
    ];

    let mut problems: Vec<String> = directories
      .into_iter()
      .filter_map(|(label, dir)| {
        let dir = dir.as_ref()?;
        if !dir.exists() {
          Some(format!("{label} does not exist: {}", dir.display()))
        } else if !dir.is_dir() {
          Some(format!("{label} is not a directory: {}", dir.display()))
        } else {
          None
        }
      })
      .collect();

    for (number, sheet) in (1..).zip(&self.stylesheet_paths) {
      if !sheet.exists() {
        problems.push(format!(
          "Stylesheet {number} does not exist: {}",
          sheet.display()
        ));
      } else if !sheet.is_file() {
        problems
          .push(format!("Stylesheet {number} is not a file: {}", sheet.display()));
      }
    }

    if problems.is_empty() {
      Ok(())
    } else {
      Err(ConfigError::InvalidPaths(problems))
    }
  }

  /// Write the commented default config in `format` to `path`.
  ///
  /// # Errors
  ///
  /// Returns an error if the format is unsupported or the file cannot be
  /// written.
  pub fn generate_default_config(
    format: &str,
    path: &Path,
  ) -> Result<(), ConfigError> {
    let text = templates::default_config_text(format)?;
    fs::write(path, text).map_err(|source| ConfigError::Write {
      path: path.to_path_buf(),
      source,
    })?;
    info!("Created default configuration file: {}", path.display());
    Ok(())
  }

  /// Write the embedded site templates to `output_dir` for customisation.
  ///
  /// `templates` filters by file extension (`html`, `css`, `js`); `None`, an
  /// empty list or `all` exports everything. Existing files are kept unless
  /// `force` is set. Returns the number of files written.
  ///
  /// # Errors
  ///
  /// Returns an error if the directory cannot be created or a file cannot be
  /// written.
  pub fn export_templates(
    output_dir: &Path,
    force: bool,
    templates: Option<&[String]>,
  ) -> Result<usize, ConfigError> {
    fs::create_dir_all(output_dir).map_err(|source| ConfigError::Write {
      path: output_dir.to_path_buf(),
      source,
    })?;

    let wanted = |file: &str| {
      let extension = Path::new(file).extension().and_then(|e| e.to_str());
      templates.is_none_or(|filter| {
        filter.is_empty()
          || filter
            .iter()
            .any(|t| t == "all" || Some(t.as_str()) == extension)
      })
    };

    let mut written = 0;
    for (file, content) in petaldoc_templates::all_templates() {
      if !wanted(file) {
        continue;
      }
      let target = output_dir.join(file);
      if target.exists() && !force {
        warn!("{} exists, skipping (use --force)", target.display());
        continue;
      }
      fs::write(&target, content).map_err(|source| ConfigError::Write {
        path: target.clone(),
        source,
      })?;
      info!("Exported template: {}", target.display());
      written += 1;
    }
    Ok(written)
  }
}

/// Parse one config file into a loose value tree.
fn read_layer(path: &Path) -> Result<Value, ConfigError> {
  let format = path.extension().and_then(|ext| ext.to_str());
  if !matches!(format, Some("toml" | "json")) {
    return Err(ConfigError::UnsupportedFormat(path.to_path_buf()));
  }

  let content =
    fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;

  if format == Some("json") {
    serde_json::from_str(&content).map_err(|source| ConfigError::Json {
      path: path.to_path_buf(),
      source,
    })
  } else {
    toml::from_str(&content).map_err(|source| ConfigError::Toml {
      path: path.to_path_buf(),
      source,
    })
  }
}

/// Layer `layer` on top of `base`.
fn merge_layer(base: &mut Value, layer: Value) {
  match (base, layer) {
    (Value::Object(ours), Value::Object(theirs)) => {
      for (key, value) in theirs {
        match ours.get_mut(&key) {
          Some(existing) => merge_layer(existing, value),
          None => {
            ours.insert(key, value);
          },
        }
      }
    },
    (Value::Array(ours), Value::Array(theirs)) => {
      for item in theirs {
        if !ours.contains(&item) {
          ours.push(item);
        }
      }
    },
    (base, layer) => *base = layer,
  }
}

#[cfg(test)]
mod tests {
  #![allow(
    clippy::unwrap_used,
    clippy::field_reassign_with_default,
    reason = "Fine in tests"
  )]

  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_merge_layer_rules() {
    let mut base = serde_json::json!({
      "definitions_dir": "base-controls",
      "helpers": ["HslColor"],
      "categories": { "ActionsExamples": "Actions", "LayoutExamples": "Layout" }
    });
    merge_layer(
      &mut base,
      serde_json::json!({
        "curated_dir": "curated",
        "helpers": ["ColorCollection", "HslColor"],
        "categories": { "LayoutExamples": "Containers" }
      }),
    );

    let config = Config::deserialize(base).unwrap();
    assert_eq!(config.definitions_dir, Some(PathBuf::from("base-controls")));
    assert_eq!(config.curated_dir, Some(PathBuf::from("curated")));
    assert_eq!(config.helpers, vec!["HslColor", "ColorCollection"]);
    let categories = config.categories();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories["LayoutExamples"], "Containers");
  }

  #[test]
  fn test_later_file_keeps_unset_fields() {
    let temp = TempDir::new().unwrap();
    let first = temp.path().join("a.toml");
    let second = temp.path().join("b.toml");
    fs::write(
      &first,
      "definitions_dir = \"Controls\"\ntype_prefix = \"Foo\"\nhelpers = [\"X\"]\nextended = true\n",
    )
    .unwrap();
    fs::write(&second, "title = \"T\"\n").unwrap();

    let config = Config::load(&[first, second], &[]).unwrap();
    assert_eq!(config.type_prefix, "Foo");
    assert!(config.extended);
    assert_eq!(config.helpers, vec!["X"]);
    assert_eq!(config.title, "T");
  }

  #[test]
  fn test_from_files_names_the_bad_layer() {
    let temp = TempDir::new().unwrap();
    let first = temp.path().join("a.toml");
    let second = temp.path().join("b.json");
    fs::write(&first, "definitions_dir = \"Controls\"\n").unwrap();
    fs::write(&second, r#"{ "extended": "often" }"#).unwrap();

    let err = Config::from_files(&[first, second.clone()]).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { ref path, .. } if *path == second));
  }

  #[test]
  fn test_apply_overrides_values() {
    let mut config = Config::default();
    config
      .apply_overrides(&[
        "title=Petals".to_string(),
        "extended=yes".to_string(),
        "docs_dir = generated".to_string(),
        "custom_prefixes=Color, Weather,".to_string(),
      ])
      .unwrap();

    assert_eq!(config.title, "Petals");
    assert!(config.extended);
    assert_eq!(config.docs_dir, PathBuf::from("generated"));
    assert_eq!(config.custom_prefixes, vec!["Color", "Weather"]);
  }

  #[test]
  fn test_apply_overrides_invalid_format() {
    let mut config = Config::default();
    let err = config
      .apply_overrides(&["extended".to_string()])
      .unwrap_err();
    assert!(err.to_string().contains("Expected KEY=VALUE"));
  }

  #[test]
  fn test_apply_override_unknown_key() {
    let mut config = Config::default();
    let err = config.apply_override("no_such_key", "1").unwrap_err();
    assert!(matches!(err, ConfigError::UnknownKey { .. }));
    assert!(err.to_string().contains("no_such_key"));
  }

  #[test]
  fn test_apply_override_invalid_boolean() {
    let mut config = Config::default();
    assert!(config.apply_override("use_generated", "maybe").is_err());
  }

  #[test]
  fn test_apply_override_option_with_empty() {
    let mut config = Config::default();
    config.apply_override("curated_dir", "llms-static").unwrap();
    assert_eq!(config.curated_dir, Some(PathBuf::from("llms-static")));

    config.apply_override("curated_dir", "").unwrap();
    assert_eq!(config.curated_dir, None);
  }

  #[test]
  fn test_apply_override_creates_nested_config() {
    let mut config = Config::default();
    assert!(config.limits.is_none());

    config
      .apply_override("limits.max_examples_per_definition", "2")
      .unwrap();
    assert_eq!(config.limits().max_examples_per_definition, 2);
    assert_eq!(
      config.limits().max_description_length,
      LimitsConfig::default().max_description_length
    );
  }

  #[test]
  fn test_nested_override_errors_name_the_full_key() {
    let mut config = Config::default();
    let err = config
      .apply_override("limits.max_index_properties", "many")
      .unwrap_err();
    assert!(err.to_string().contains("'limits.max_index_properties'"));

    let err = config.apply_override("limits.nope", "1").unwrap_err();
    assert!(err.to_string().contains("'limits.nope'"));
    assert!(Config::OVERRIDE_KEYS.contains(&"limits.*"));
  }

  #[test]
  fn test_deprecated_key_still_works() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("petaldoc.toml");
    fs::write(&path, "definitions_dir = \"Controls\"\n").unwrap();

    let config =
      Config::load(&[path], &["llms_dir=old-llms".to_string()]).unwrap();
    assert_eq!(config.docs_dir, PathBuf::from("old-llms"));
    assert!(config.llms_dir.is_none());
  }

  #[test]
  fn test_load_merges_files_in_order() {
    let temp = TempDir::new().unwrap();
    let first = temp.path().join("base.toml");
    let second = temp.path().join("site.json");
    fs::write(
      &first,
      "definitions_dir = \"Controls\"\ntitle = \"Base\"\n[limits]\nmax_index_properties = 4\n",
    )
    .unwrap();
    fs::write(&second, r#"{ "title": "Site", "extended": true }"#).unwrap();

    let config = Config::load(&[first, second], &[]).unwrap();
    assert_eq!(config.definitions_dir, Some(PathBuf::from("Controls")));
    assert_eq!(config.title, "Site");
    assert!(config.extended);
    assert_eq!(config.limits().max_index_properties, 4);
  }

  #[test]
  fn test_load_requires_definitions_dir() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("petaldoc.toml");
    fs::write(&path, "title = \"No sources\"\n").unwrap();

    let err = Config::load(&[path], &[]).unwrap_err();
    assert!(err.to_string().contains("definitions_dir"));
  }

  #[test]
  fn test_from_file_rejects_unknown_extension() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("petaldoc.yaml");
    fs::write(&path, "title: x").unwrap();
    assert!(Config::from_file(&path).is_err());
  }

  #[test]
  fn test_default_templates_parse() {
    let temp = TempDir::new().unwrap();
    for format in ["toml", "json"] {
      let path = temp.path().join(format!("petaldoc.{format}"));
      Config::generate_default_config(format, &path).unwrap();
      let config = Config::from_file(&path).unwrap();
      assert_eq!(config.type_prefix, "Daisy");
      assert_eq!(config.docs_dir, PathBuf::from("llms"));
    }
    assert!(
      Config::generate_default_config("yaml", &temp.path().join("x")).is_err()
    );
  }

  #[test]
  fn test_validate_paths_reports_every_problem() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("file.txt");
    fs::write(&file, "").unwrap();

    let mut config = Config::default();
    config.definitions_dir = Some(temp.path().join("missing"));
    config.examples_dir = Some(file);
    config.stylesheet_paths = vec![temp.path().join("brand.scss")];

    let message = config.validate_paths().unwrap_err().to_string();
    assert!(message.contains("Definitions directory does not exist"));
    assert!(message.contains("Examples directory is not a directory"));
    assert!(message.contains("Stylesheet 1 does not exist"));
  }

  #[test]
  fn test_section_map_defaults_and_overrides() {
    let mut config = Config::default();
    assert_eq!(
      config.section_map().resolve("status-dot"),
      Some("DaisyStatusIndicator")
    );

    let mut sections = IndexMap::new();
    sections.insert("button".to_string(), "FancyButton".to_string());
    config.sections = Some(sections);
    assert_eq!(config.section_map().resolve("Button"), Some("FancyButton"));
    assert_eq!(config.section_map().resolve("badge"), None);
  }

  #[test]
  fn test_export_templates_respects_force() {
    let temp = TempDir::new().unwrap();
    let all = Config::export_templates(temp.path(), false, None).unwrap();
    assert_eq!(all, petaldoc_templates::all_templates().len());

    let again = Config::export_templates(temp.path(), false, None).unwrap();
    assert_eq!(again, 0);

    let css = ["css".to_string()];
    let forced =
      Config::export_templates(temp.path(), true, Some(&css)).unwrap();
    assert_eq!(forced, 1);
  }
}
