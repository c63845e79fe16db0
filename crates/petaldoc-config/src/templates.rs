use crate::error::ConfigError;

/// Default configuration in TOML, commented so a new user can find their way.
/// Lookup tables left out here fall back to the built-in Flowery catalogue.
pub const DEFAULT_TOML_TEMPLATE: &str = r#"# petaldoc configuration file

# Directory scanned recursively for control sources (DaisyButton.cs, ...)
definitions_dir = "Flowery.NET/Controls"

# Directory holding the gallery files (*Examples.axaml)
examples_dir = "Flowery.NET.Gallery/Examples"

# Hand-written markdown per control plus an images/ folder (optional)
# curated_dir = "llms-static"

# Where the markdown tree is written
docs_dir = "llms"

# Where the HTML site is written
output_dir = "docs"

# Directory with page.html, shell.html or style.css overriding the embedded ones
# template_dir = "templates"

# Extra stylesheets appended to style.css; .scss files are compiled
# stylesheet_paths = ["assets/brand.scss"]

title = "Flowery.NET"
description = "Avalonia UI components styled after DaisyUI."
subtitle = "Avalonia UI Components"
footer_text = "Generated by petaldoc"
# repository_url = "https://github.com/example/flowery"

# XML namespace shown in the Quick Start section
namespace_declaration = 'xmlns:controls="clr-namespace:Flowery.Controls;assembly=Flowery.NET"'

# Only files and elements starting with this prefix are treated as controls
type_prefix = "Daisy"

# Add generated properties, enums and usage examples to every page
extended = false

# Build the site from the generated tree only, ignoring curated pages
use_generated = false

# Curated pages rendered at the site root
guides = ["MigrationExample", "DesignTokens", "Effects"]

# Classes listed under "Helpers" rather than "Controls"
helpers = ["DaisyAccessibility", "DaisyPaginationItem", "ColorCollection", "HslColor"]

# Short-name prefixes of controls without a DaisyUI counterpart
custom_prefixes = ["Color", "DateTimeline", "ModifierKeys", "NumericUpDown", "Weather", "ComponentSidebar"]

# Gallery file stem -> category shown in the sidebar, in order
# [categories]
# ActionsExamples = "Actions"
# CardsExamples = "Cards & Layout"

# Normalised section id -> control name
# [sections]
# button = "DaisyButton"
# dropdown = "DaisySelect"

# Heuristic thresholds
# [limits]
# summary_proximity_chars = 300
# summary_lookback_lines = 5
# statement_max_lines = 12
# max_elements_per_example = 3
# max_examples_per_definition = 5
# max_description_length = 80
# max_index_description_length = 50
# max_index_properties = 3
# max_inner_content_length = 100
# max_normalized_length = 150
# max_icon_data_length = 50
# min_uppercase_label_length = 3
"#;

/// Default configuration in JSON.
pub const DEFAULT_JSON_TEMPLATE: &str = r#"{
  "definitions_dir": "Flowery.NET/Controls",
  "examples_dir": "Flowery.NET.Gallery/Examples",
  "curated_dir": "llms-static",
  "docs_dir": "llms",
  "output_dir": "docs",
  "title": "Flowery.NET",
  "description": "Avalonia UI components styled after DaisyUI.",
  "subtitle": "Avalonia UI Components",
  "footer_text": "Generated by petaldoc",
  "namespace_declaration": "xmlns:controls=\"clr-namespace:Flowery.Controls;assembly=Flowery.NET\"",
  "type_prefix": "Daisy",
  "extended": false,
  "use_generated": false,
  "guides": ["MigrationExample", "DesignTokens", "Effects"],
  "helpers": ["DaisyAccessibility", "DaisyPaginationItem", "ColorCollection", "HslColor"],
  "categories": {
    "ActionsExamples": "Actions",
    "CardsExamples": "Cards & Layout",
    "DataDisplayExamples": "Data Display",
    "DataInputExamples": "Data Input",
    "FeedbackExamples": "Feedback",
    "LayoutExamples": "Layout",
    "NavigationExamples": "Navigation"
  },
  "limits": {
    "max_examples_per_definition": 5,
    "max_description_length": 80
  }
}
"#;

/// Commented default configuration in `format` (`toml` or `json`).
///
/// # Errors
///
/// Returns [`ConfigError::UnsupportedTemplate`] for any other format.
pub fn default_config_text(format: &str) -> Result<&'static str, ConfigError> {
  match format.to_ascii_lowercase().as_str() {
    "toml" => Ok(DEFAULT_TOML_TEMPLATE),
    "json" => Ok(DEFAULT_JSON_TEMPLATE),
    _ => Err(ConfigError::UnsupportedTemplate(format.to_string())),
  }
}
