//! `petaldoc-html`: assembles the static documentation site.
//!
//! The site is an `index.html` shell with a sidebar and a viewer frame, plus
//! one content page per control, category and guide. Page bodies come from a
//! [`DocSource`]; nothing here runs the extractors.

pub mod error;
pub mod index;
pub mod nav;
pub mod page;
pub mod source;
pub mod template;

use std::{
  fmt::Write as _,
  path::{Path, PathBuf},
};

use color_eyre::eyre::{Context, Result};
use log::{debug, info, warn};
use petaldoc_config::Config;
use petaldoc_docs::{
  CATEGORIES_DIR,
  CONTROLS_DIR,
  Categories,
  CategoryDoc,
  IMAGE_DIR,
  ImageCatalog,
  MASTER_INDEX,
};
use petaldoc_markup::{convert, utils::strip_html_comments_outside_code};
use petaldoc_templates as templates;
use petaldoc_utils::{
  combine_stylesheets,
  copy_images,
  read_override,
  root_prefix,
  write_file,
};

pub use crate::{
  error::SiteError,
  source::{
    DirSource,
    DocResolver,
    DocSource,
    MemorySource,
    Origin,
    ResolvedDoc,
  },
};
use crate::{
  index::{IndexHeader, render_machine_index},
  nav::{Navigation, SidebarInputs, render_sidebar},
  page::prepare_page,
  template::{PageParts, Templates},
};

/// Block linking the plain-text index, placed after the home page's first
/// code block.
const LLM_LINK: &str = "<div class=\"llm-link\">\n  <h2>For AI Assistants</h2>\n  \
                        <p>📄 <a href=\"llms.txt\"><strong>llms.txt</strong></a> \
                        Machine-readable documentation in plain markdown, for \
                        LLMs and AI code assistants.</p>\n</div>\n";

/// What the site is built from.
#[derive(Clone, Copy)]
pub struct SiteInputs<'a> {
  /// Hand-written pages and guides, if any.
  pub curated:       Option<&'a dyn DocSource>,
  /// Pages rendered in this run.
  pub generated:     &'a dyn DocSource,
  pub categories:    &'a Categories,
  pub category_docs: &'a [CategoryDoc],
  pub images:        &'a ImageCatalog,
}

/// Counts of one assembly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiteReport {
  pub pages_written: usize,
  pub images_copied: usize,
  /// Documents that could not be read and were left out.
  pub read_failures: usize,
}

/// Writes the site below `config.output_dir`.
pub struct SiteAssembler<'a> {
  config:    &'a Config,
  templates: Templates,
}

impl<'a> SiteAssembler<'a> {
  /// # Errors
  ///
  /// Returns an error if a template override cannot be loaded.
  pub fn new(config: &'a Config) -> Result<Self> {
    let templates =
      Templates::new(config).wrap_err("Failed to load site templates")?;
    Ok(Self { config, templates })
  }

  fn output_dir(&self) -> &Path {
    &self.config.output_dir
  }

  fn write(
    &self,
    relative: &Path,
    contents: &str,
    report: &mut SiteReport,
  ) -> Result<()> {
    let path = self.output_dir().join(relative);
    write_file(&path, contents)
      .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    report.pages_written += 1;
    Ok(())
  }

  /// Build every page of the site.
  ///
  /// # Errors
  ///
  /// Returns an error on the first page, asset or image that cannot be
  /// written. Unreadable documents are counted in the report instead.
  pub fn assemble(&self, inputs: SiteInputs<'_>) -> Result<SiteReport> {
    let config = self.config;
    let mut report = SiteReport::default();

    let curated = if config.use_generated {
      debug!("Building the site from generated pages only");
      None
    } else {
      inputs.curated
    };
    let resolution = DocResolver::new(
      curated,
      inputs.generated,
      &config.type_prefix,
      &config.helpers,
    )
    .resolve();
    report.read_failures += resolution.read_failures;
    let docs = resolution.docs;
    info!(
      "Assembling site with {} pages into {}",
      docs.len(),
      self.output_dir().display()
    );

    self.write_assets(&mut report)?;

    if let Some(curated_dir) = &config.curated_dir {
      let sources: Vec<PathBuf> =
        vec![curated_dir.clone(), curated_dir.join(IMAGE_DIR)];
      let dest = self.output_dir().join(IMAGE_DIR);
      report.images_copied = copy_images(&sources, &dest).wrap_err_with(|| {
        format!("Failed to copy images to {}", dest.display())
      })?;
    }

    let guides = self.write_guides(inputs.curated, &mut report)?;

    let index = render_machine_index(
      &IndexHeader {
        title:                 &config.title,
        description:           &config.description,
        namespace_declaration: &config.namespace_declaration,
        type_prefix:           &config.type_prefix,
        custom_prefixes:       &config.custom_prefixes,
      },
      &docs,
    );
    self.write(Path::new(MASTER_INDEX), &index, &mut report)?;
    self.write_home(&index, &mut report)?;

    let navigation = Navigation::new(
      &config.type_prefix,
      &docs,
      &inputs.categories.categories,
      inputs.category_docs,
    );
    for doc in &docs {
      self.write_control(doc, &navigation, inputs.images, &mut report)?;
    }

    for category in inputs.category_docs {
      let content = convert(&category.markdown, 1);
      let page = self.templates.render_page(&PageParts {
        title:       &category.name,
        depth:       1,
        breadcrumbs: "<div class=\"breadcrumbs\"><a \
                      href=\"../home.html\">Home</a></div>",
        content:     &content,
        doc_nav:     "",
      })?;
      let relative =
        Path::new(CATEGORIES_DIR).join(format!("{}.html", category.slug));
      self.write(&relative, &page, &mut report)?;
    }

    let sidebar = render_sidebar(&SidebarInputs {
      type_prefix:     &config.type_prefix,
      custom_prefixes: &config.custom_prefixes,
      guides:          &guides,
      categories:      inputs.category_docs,
      docs:            &docs,
    });
    let shell = self.templates.render_shell(config, &sidebar)?;
    self.write(Path::new("index.html"), &shell, &mut report)?;

    info!(
      "Site complete: {} pages, {} images",
      report.pages_written, report.images_copied
    );
    Ok(report)
  }

  /// Stylesheet with custom sheets appended, and the two scripts.
  fn write_assets(&self, report: &mut SiteReport) -> Result<()> {
    let config = self.config;
    let base_css = read_override(
      config.get_template_file("style.css").as_deref(),
      templates::STYLE_CSS,
    )?;
    let css = combine_stylesheets(&base_css, &config.stylesheet_paths)
      .wrap_err("Failed to build the site stylesheet")?;
    self.write(Path::new("style.css"), &css, report)?;

    for (name, embedded) in [
      ("shell.js", templates::SHELL_JS),
      ("content.js", templates::CONTENT_JS),
    ] {
      let script =
        read_override(config.get_template_file(name).as_deref(), embedded)?;
      self.write(Path::new(name), &script, report)?;
    }
    Ok(())
  }

  /// Write configured guides found in the curated source; returns the names
  /// written, in configured order.
  fn write_guides(
    &self,
    curated: Option<&dyn DocSource>,
    report: &mut SiteReport,
  ) -> Result<Vec<String>> {
    let Some(curated) = curated else {
      return Ok(Vec::new());
    };

    let mut written = Vec::new();
    for guide in &self.config.guides {
      if !curated.contains(guide) {
        continue;
      }
      let markdown = match curated.read(guide) {
        Ok(markdown) => markdown,
        Err(e) => {
          warn!("Skipping guide {guide}: {e}");
          report.read_failures += 1;
          continue;
        },
      };

      let content = convert(&strip_html_comments_outside_code(&markdown), 0);
      let page = self.templates.render_page(&PageParts {
        title:       guide,
        depth:       0,
        breadcrumbs: "<div class=\"breadcrumbs\"><a \
                      href=\"home.html\">Home</a></div>",
        content:     &content,
        doc_nav:     "",
      })?;
      self.write(Path::new(&format!("{guide}.html")), &page, report)?;
      written.push(guide.clone());
    }
    debug!("Wrote {} guides", written.len());
    Ok(written)
  }

  fn write_home(&self, index: &str, report: &mut SiteReport) -> Result<()> {
    let mut content = convert(index, 0);
    if let Some(pos) = content.find("</pre>") {
      let at = pos + "</pre>".len();
      content.insert_str(at, &format!("\n{LLM_LINK}"));
    }
    let _ = write!(
      content,
      "\n<hr class=\"footer-separator\">\n<footer class=\"index-footer\">\n  \
       <p>{}</p>\n</footer>\n",
      html_escape::encode_text(&self.config.footer_text)
    );

    let page = self.templates.render_page(&PageParts {
      title:       "Documentation",
      depth:       0,
      breadcrumbs: "",
      content:     &content,
      doc_nav:     "",
    })?;
    self.write(Path::new("home.html"), &page, report)
  }

  fn write_control(
    &self,
    doc: &ResolvedDoc,
    navigation: &Navigation<'_>,
    images: &ImageCatalog,
    report: &mut SiteReport,
  ) -> Result<()> {
    let depth = 1;
    let found = images.find(&doc.name, &self.config.type_prefix);
    let markdown =
      prepare_page(&doc.name, &doc.body, &found, &root_prefix(depth));
    let content = convert(&markdown, depth);

    let page = self.templates.render_page(&PageParts {
      title:       &doc.name,
      depth,
      breadcrumbs: &navigation.breadcrumbs(&doc.name),
      content:     &content,
      doc_nav:     &navigation.doc_nav(&doc.name),
    })?;
    let relative = Path::new(CONTROLS_DIR).join(format!("{}.html", doc.name));
    self.write(&relative, &page, report)
  }
}
