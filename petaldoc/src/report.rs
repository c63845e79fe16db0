//! Counters for one run, logged as a summary when the run ends.

use log::info;
use petaldoc_docs::IndexStats;
use petaldoc_extract::Extraction;
use petaldoc_html::SiteReport;

/// What a run produced and what it skipped.
///
/// Parse misses, read failures and reference misses never abort a run;
/// they are only counted here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
  pub definitions:           usize,
  pub sections:              usize,
  /// Source files that were read but yielded nothing.
  pub parse_misses:          usize,
  /// Source, curated or category files that could not be read.
  pub read_failures:         usize,
  /// Example sections whose id names no known definition.
  pub reference_misses:      usize,
  pub duplicate_definitions: usize,
  /// Markdown tree files plus site files.
  pub pages_written:         usize,
  pub images_copied:         usize,
}

impl RunReport {
  pub fn add_extraction<T>(&mut self, extraction: &Extraction<T>) {
    self.parse_misses += extraction.parse_misses;
    self.read_failures += extraction.read_failures;
  }

  pub const fn add_index_stats(&mut self, stats: IndexStats) {
    self.reference_misses += stats.reference_misses;
    self.duplicate_definitions += stats.duplicate_definitions;
  }

  pub const fn add_site(&mut self, site: SiteReport) {
    self.pages_written += site.pages_written;
    self.images_copied += site.images_copied;
    self.read_failures += site.read_failures;
  }

  pub fn log_summary(&self) {
    info!(
      "Extracted {} definitions and {} example sections",
      self.definitions, self.sections
    );
    info!(
      "Skipped: {} parse misses, {} read failures, {} reference misses, {} \
       duplicate definitions",
      self.parse_misses,
      self.read_failures,
      self.reference_misses,
      self.duplicate_definitions
    );
    info!(
      "Wrote {} files and copied {} images",
      self.pages_written, self.images_copied
    );
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn counters_accumulate() {
    let mut report = RunReport::default();
    report.add_extraction(&Extraction::<()> {
      items:         Vec::new(),
      parse_misses:  2,
      read_failures: 1,
    });
    report.add_index_stats(IndexStats {
      duplicate_definitions: 1,
      reference_misses:      4,
    });
    report.add_site(SiteReport {
      pages_written: 10,
      images_copied: 3,
      read_failures: 1,
    });

    assert_eq!(report, RunReport {
      definitions:           0,
      sections:              0,
      parse_misses:          2,
      read_failures:         2,
      reference_misses:      4,
      duplicate_definitions: 1,
      pages_written:         10,
      images_copied:         3,
    });
  }
}
