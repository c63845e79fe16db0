//! Built-in lookup tables for the Flowery control gallery.
//!
//! Every table here is only a default: a config file replaces it wholesale.

use indexmap::IndexMap;

/// Normalised gallery section id to control name.
pub const SECTIONS: &[(&str, &str)] = &[
  ("button", "DaisyButton"),
  ("copybutton", "DaisyCopyButton"),
  ("dropdown", "DaisySelect"),
  ("dropdownmenu", "DaisyDropdown"),
  ("popover", "DaisyPopover"),
  ("fab", "DaisyFab"),
  ("modal", "DaisyModal"),
  ("modalradii", "DaisyModal"),
  ("swap", "DaisySwap"),
  ("card", "DaisyCard"),
  ("checkbox", "DaisyCheckBox"),
  ("fileinput", "DaisyFileInput"),
  ("input", "DaisyInput"),
  ("otpinput", "DaisyOtpInput"),
  ("tagpicker", "DaisyTagPicker"),
  ("maskinput", "DaisyMaskInput"),
  ("numericupdown", "DaisyNumericUpDown"),
  ("radio", "DaisyRadio"),
  ("range", "DaisyRange"),
  ("rating", "DaisyRating"),
  ("select", "DaisySelect"),
  ("textarea", "DaisyTextArea"),
  ("toggle", "DaisyToggle"),
  ("alert", "DaisyAlert"),
  ("badge", "DaisyBadge"),
  ("loading", "DaisyLoading"),
  ("progress", "DaisyProgress"),
  ("skeleton", "DaisySkeleton"),
  ("toast", "DaisyToast"),
  ("accordion", "DaisyAccordion"),
  ("avatar", "DaisyAvatar"),
  ("carousel", "DaisyCarousel"),
  ("chatbubble", "DaisyChatBubble"),
  ("collapse", "DaisyCollapse"),
  ("countdown", "DaisyCountdown"),
  ("diff", "DaisyDiff"),
  ("divider", "DaisyDivider"),
  ("kbd", "DaisyKbd"),
  ("list", "DaisyList"),
  ("stat", "DaisyStat"),
  ("table", "DaisyTable"),
  ("contributiongraph", "DaisyContributionGraph"),
  ("animatednumber", "DaisyAnimatedNumber"),
  ("timeline", "DaisyTimeline"),
  ("datetimeline", "DaisyDateTimeline"),
  ("breadcrumbs", "DaisyBreadcrumbs"),
  ("dock", "DaisyDock"),
  ("drawer", "DaisyDrawer"),
  ("menu", "DaisyMenu"),
  ("navbar", "DaisyNavbar"),
  ("pagination", "DaisyPagination"),
  ("steps", "DaisySteps"),
  ("tabs", "DaisyTabs"),
  ("statusdot", "DaisyStatusIndicator"),
  ("radialprogress", "DaisyRadialProgress"),
  ("indicator", "DaisyIndicator"),
  ("mask", "DaisyMask"),
  ("stack", "DaisyStack"),
  ("hero", "DaisyHero"),
  ("join", "DaisyJoin"),
  ("mockup", "DaisyMockup"),
  ("hovergallery", "DaisyHoverGallery"),
  ("glass", "DaisyGlass"),
  ("textrotate", "DaisyTextRotate"),
  ("colorslider", "DaisyColorSlider"),
  ("colorwheel", "DaisyColorWheel"),
  ("colorgrid", "DaisyColorGrid"),
  ("coloreditor", "DaisyColorEditor"),
  ("screenpicker", "DaisyScreenColorPicker"),
  ("screencolorpicker", "DaisyScreenColorPicker"),
  ("colorpickerdialog", "DaisyColorPickerDialog"),
  ("colorpicker", "DaisyColorPickerDialog"),
  ("modifierkeys", "DaisyModifierKeys"),
  ("weathericon", "DaisyWeatherIcon"),
  ("weathercard", "DaisyWeatherCard"),
  ("currentweather", "DaisyWeatherCurrent"),
  ("weatherforecast", "DaisyWeatherForecast"),
  ("weathermetrics", "DaisyWeatherMetrics"),
  ("expandablecards", "DaisyExpandableCard"),
];

/// Gallery file stem to display category, in sidebar order.
pub const CATEGORIES: &[(&str, &str)] = &[
  ("ActionsExamples", "Actions"),
  ("CardsExamples", "Cards & Layout"),
  ("DataDisplayExamples", "Data Display"),
  ("DateDisplayExamples", "Date Display"),
  ("DataInputExamples", "Data Input"),
  ("DividerExamples", "Layout"),
  ("FeedbackExamples", "Feedback"),
  ("LayoutExamples", "Layout"),
  ("NavigationExamples", "Navigation"),
  ("ThemingExamples", "Theming"),
  ("CustomControls", "Custom"),
  ("ColorPickerExamples", "Color Picker"),
];

/// Classes documented as helpers rather than controls.
pub const HELPERS: &[&str] = &[
  "DaisyAccessibility",
  "DaisyPaginationItem",
  "ColorCollection",
  "HslColor",
];

/// Short-name prefixes of controls that have no DaisyUI counterpart.
pub const CUSTOM_PREFIXES: &[&str] = &[
  "Color",
  "DateTimeline",
  "ModifierKeys",
  "NumericUpDown",
  "Weather",
  "ComponentSidebar",
];

/// Curated guide pages rendered at the site root.
pub const GUIDES: &[&str] = &["MigrationExample", "DesignTokens", "Effects"];

pub(crate) fn pairs(table: &[(&str, &str)]) -> IndexMap<String, String> {
  table
    .iter()
    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
    .collect()
}

pub(crate) fn names(table: &[&str]) -> Vec<String> {
  table.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;

  #[test]
  fn section_ids_are_normalised_and_unique() {
    let mut seen = HashSet::new();
    for (id, name) in SECTIONS {
      assert_eq!(*id, id.to_lowercase().replace(['-', '_'], ""));
      assert!(name.starts_with("Daisy"), "{name}");
      assert!(seen.insert(*id), "duplicate section id {id}");
    }
  }

  #[test]
  fn several_stems_share_a_category() {
    let categories = pairs(CATEGORIES);
    assert_eq!(categories["DividerExamples"], "Layout");
    assert_eq!(categories["LayoutExamples"], "Layout");
    assert_eq!(categories.len(), CATEGORIES.len());
  }
}
