/// Metadata recovered from one object-definition source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
  /// Declared type name, e.g. `DaisyButton`.
  pub name:       String,
  /// Base type token, `Object` when the declaration has none.
  pub base_name:  String,
  /// Plain-text documentation summary; empty when undocumented.
  pub summary:    String,
  /// Registered properties in source order, unique by name.
  pub properties: Vec<Property>,
  /// Every enum declared in the same file, in source order.
  pub enums:      Vec<EnumGroup>,
}

/// A registered property of a [`Definition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
  /// Name taken from the registration call, not from the field.
  pub name:          String,
  /// Type argument of the property declaration.
  pub declared_type: String,
  /// Cleaned default value, `-` when none was given.
  pub default_value: String,
  /// Summary from the doc comment above the registration.
  pub summary:       String,
}

/// An enum declared next to a definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumGroup {
  pub name:    String,
  /// Member identifiers in declaration order.
  pub values:  Vec<String>,
  pub summary: String,
}

/// A titled block of examples from one gallery markup file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleSection {
  /// Explicit `SectionId`, or the title lower-cased and hyphenated.
  pub section_id:   String,
  pub title:        String,
  /// Labelled snippets in source order; never empty.
  pub sub_examples: Vec<SubExample>,
}

/// One labelled usage snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubExample {
  pub label:   String,
  /// Canonical markup, one element per line.
  pub snippet: String,
}

/// Heuristic thresholds used while extracting.
///
/// The defaults mirror what works well on real control sources; all of them
/// can be tuned from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractLimits {
  /// Maximum distance in characters between a `<summary>` block and the
  /// declaration it documents.
  pub summary_proximity_chars:  usize,
  /// How many lines above a property registration to look for its summary.
  pub summary_lookback_lines:   usize,
  /// Upper bound on lines joined into one registration statement.
  pub statement_max_lines:      usize,
  /// Custom elements kept per sub-example.
  pub max_elements_per_example: usize,
  /// Length at which plain inner content is cut.
  pub max_inner_content_length: usize,
  /// Length at which whitespace-normalised inner content is cut.
  pub max_normalized_length:    usize,
  /// Length of icon path data kept in a preview.
  pub max_icon_data_length:     usize,
}

impl Default for ExtractLimits {
  fn default() -> Self {
    Self {
      summary_proximity_chars:  300,
      summary_lookback_lines:   5,
      statement_max_lines:      12,
      max_elements_per_example: 3,
      max_inner_content_length: 100,
      max_normalized_length:    150,
      max_icon_data_length:     50,
    }
  }
}
