//! The `docs` and `site` runs.
//!
//! Both start the same way: extract definitions and gallery sections, build
//! the metadata index, render the markdown tree and write it to `docs_dir`.
//! A site run then hands the in-memory tree to the site assembler.

use color_eyre::eyre::{Context, Result, eyre};
use log::{info, warn};
use petaldoc_config::Config;
use petaldoc_docs::{
  Categories,
  DocRenderer,
  DocTree,
  IMAGE_DIR,
  ImageCatalog,
  MetadataIndex,
  Supplements,
  TreeInputs,
  build_tree,
};
use petaldoc_extract::{
  DefinitionExtractor,
  ExampleExtractor,
  extract_definitions_from_dir,
  extract_examples_from_dir,
};
use petaldoc_html::{
  DirSource,
  DocSource,
  MemorySource,
  SiteAssembler,
  SiteInputs,
};
use petaldoc_utils::write_tree;

use crate::{error::PetaldocError, report::RunReport};

/// The markdown tree of a run and what the site needs besides it.
#[derive(Debug, Clone, Default)]
pub struct DocsRun {
  pub tree:       DocTree,
  pub categories: Categories,
  pub images:     ImageCatalog,
}

/// Extract, index and render, without writing anything.
///
/// # Errors
///
/// Returns an error if no definitions directory is configured or a
/// configured source directory cannot be walked.
pub fn build_docs(config: &Config, report: &mut RunReport) -> Result<DocsRun> {
  let limits = config.limits();
  let sections = config.section_map();

  let definitions_dir = config.definitions_dir.as_deref().ok_or_else(|| {
    eyre!("No definitions directory configured (definitions_dir)")
  })?;
  let extractor = DefinitionExtractor::new(
    config.type_prefix.as_str(),
    limits.extract_limits(),
  );
  let definitions = extract_definitions_from_dir(&extractor, definitions_dir)
    .map_err(PetaldocError::from)
    .wrap_err_with(|| {
      format!("Failed to scan definitions in {}", definitions_dir.display())
    })?;
  report.add_extraction(&definitions);
  report.definitions = definitions.items.len();
  if definitions.items.is_empty() {
    warn!(
      "No {}*.cs definitions found in {}",
      config.type_prefix,
      definitions_dir.display()
    );
  }

  let example_extractor =
    ExampleExtractor::new(config.type_prefix.as_str(), limits.extract_limits());
  let (examples, categories) = match config.examples_dir.as_deref() {
    Some(examples_dir) => {
      let examples = extract_examples_from_dir(&example_extractor, examples_dir)
        .map_err(PetaldocError::from)
        .wrap_err_with(|| {
          format!("Failed to scan examples in {}", examples_dir.display())
        })?;
      report.add_extraction(&examples);
      let categories = Categories::group(
        &example_extractor,
        examples_dir,
        &config.categories(),
        &sections,
      );
      report.read_failures += categories.read_failures;
      (examples.items, categories)
    },
    None => {
      info!("No examples directory configured; pages will have no examples");
      (Vec::new(), Categories::default())
    },
  };
  report.sections = examples.len();

  let (index, stats) =
    MetadataIndex::build(definitions.items, examples, &sections);
  report.add_index_stats(stats);

  let (supplements, images) = match config.curated_dir.as_deref() {
    Some(curated_dir) => {
      let supplements = Supplements::load(
        curated_dir,
        index.definitions().map(|def| def.name.as_str()),
      );
      report.read_failures += supplements.read_failures;
      (supplements, ImageCatalog::from_dir(&curated_dir.join(IMAGE_DIR)))
    },
    None => (Supplements::default(), ImageCatalog::default()),
  };

  let renderer = DocRenderer::new(
    config.type_prefix.as_str(),
    config.extended,
    limits.render_limits(),
  );
  let project = config.project_info();
  let tree = build_tree(&renderer, TreeInputs {
    index:       &index,
    categories:  &categories,
    supplements: &supplements,
    images:      &images,
    project:     &project,
  });

  Ok(DocsRun {
    tree,
    categories,
    images,
  })
}

fn write_docs(
  config: &Config,
  run: &DocsRun,
  report: &mut RunReport,
) -> Result<()> {
  let docs_dir = &config.docs_dir;
  let written = write_tree(docs_dir, run.tree.files())
    .map_err(PetaldocError::from)
    .wrap_err_with(|| {
      format!("Failed to write the markdown tree to {}", docs_dir.display())
    })?;
  info!("Wrote {written} markdown files to {}", docs_dir.display());
  report.pages_written += written;
  Ok(())
}

/// Write the markdown tree to `docs_dir`.
///
/// # Errors
///
/// Returns an error if extraction cannot start or a file cannot be written.
pub fn run_docs(config: &Config) -> Result<RunReport> {
  let mut report = RunReport::default();
  let run = build_docs(config, &mut report)?;
  write_docs(config, &run, &mut report)?;
  report.log_summary();
  Ok(report)
}

/// Write the markdown tree, then the HTML site to `output_dir`.
///
/// # Errors
///
/// Returns an error if extraction cannot start or a file cannot be written.
pub fn run_site(config: &Config) -> Result<RunReport> {
  let mut report = RunReport::default();
  let run = build_docs(config, &mut report)?;
  write_docs(config, &run, &mut report)?;

  let generated: MemorySource = run.tree.controls.clone().into_iter().collect();
  let curated = config.curated_dir.as_deref().map(DirSource::new);

  let site = SiteAssembler::new(config)?.assemble(SiteInputs {
    curated:       curated.as_ref().map(|source| source as &dyn DocSource),
    generated:     &generated,
    categories:    &run.categories,
    category_docs: &run.tree.categories,
    images:        &run.images,
  })?;
  report.add_site(site);

  report.log_summary();
  Ok(report)
}
