use petaldoc_docs::RenderLimits;
use petaldoc_extract::ExtractLimits;
use petaldoc_macros::Configurable;
use serde::{Deserialize, Serialize};

/// Thresholds for the extraction heuristics and rendering caps.
///
/// Set from a config file under `[limits]` or with dotted overrides such as
/// `--config limits.max_description_length=60`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Configurable)]
#[serde(default)]
pub struct LimitsConfig {
  /// Characters allowed between a type's summary block and its declaration.
  pub summary_proximity_chars: usize,

  /// Lines searched above a property registration for its summary.
  pub summary_lookback_lines: usize,

  /// Lines joined at most into one registration statement.
  pub statement_max_lines: usize,

  pub max_elements_per_example: usize,

  pub max_examples_per_definition: usize,

  /// Property descriptions longer than this are cut with an ellipsis.
  pub max_description_length: usize,

  pub max_index_description_length: usize,

  /// Property names listed per control in the master index.
  pub max_index_properties: usize,

  pub max_inner_content_length: usize,

  pub max_normalized_length: usize,

  pub max_icon_data_length: usize,

  /// All-uppercase example labels longer than this are treated as bound
  /// data and relabelled.
  pub min_uppercase_label_length: usize,
}

impl Default for LimitsConfig {
  fn default() -> Self {
    let extract = ExtractLimits::default();
    let render = RenderLimits::default();
    Self {
      summary_proximity_chars:      extract.summary_proximity_chars,
      summary_lookback_lines:       extract.summary_lookback_lines,
      statement_max_lines:          extract.statement_max_lines,
      max_elements_per_example:     extract.max_elements_per_example,
      max_examples_per_definition:  render.max_examples_per_definition,
      max_description_length:       render.max_description_length,
      max_index_description_length: render.max_index_description_length,
      max_index_properties:         render.max_index_properties,
      max_inner_content_length:     extract.max_inner_content_length,
      max_normalized_length:        extract.max_normalized_length,
      max_icon_data_length:         extract.max_icon_data_length,
      min_uppercase_label_length:   render.min_uppercase_label_length,
    }
  }
}

impl LimitsConfig {
  #[must_use]
  pub const fn extract_limits(&self) -> ExtractLimits {
    ExtractLimits {
      summary_proximity_chars:  self.summary_proximity_chars,
      summary_lookback_lines:   self.summary_lookback_lines,
      statement_max_lines:      self.statement_max_lines,
      max_elements_per_example: self.max_elements_per_example,
      max_inner_content_length: self.max_inner_content_length,
      max_normalized_length:    self.max_normalized_length,
      max_icon_data_length:     self.max_icon_data_length,
    }
  }

  #[must_use]
  pub const fn render_limits(&self) -> RenderLimits {
    RenderLimits {
      max_examples_per_definition:  self.max_examples_per_definition,
      max_description_length:       self.max_description_length,
      max_index_description_length: self.max_index_description_length,
      max_index_properties:         self.max_index_properties,
      min_uppercase_label_length:   self.min_uppercase_label_length,
    }
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]

  use super::*;

  #[test]
  fn defaults_match_library_limits() {
    let limits = LimitsConfig::default();
    assert_eq!(limits.extract_limits(), ExtractLimits::default());
    assert_eq!(limits.render_limits(), RenderLimits::default());
  }

  #[test]
  fn override_reaches_render_limits() {
    let mut limits = LimitsConfig::default();
    limits.apply_override("max_description_length", "60").unwrap();
    assert_eq!(limits.render_limits().max_description_length, 60);
    assert!(limits.apply_override("max_description_length", "-1").is_err());
  }
}
