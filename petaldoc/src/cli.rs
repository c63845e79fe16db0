use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for petaldoc
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "petaldoc: control library documentation generator"
)]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times). Multiple files are merged in order, with later files overriding
  /// earlier ones
  #[arg(
    short = 'c',
    long = "config-file",
    global = true,
    action = clap::ArgAction::Append
  )]
  pub config_files: Vec<PathBuf>,

  /// Override configuration values (KEY=VALUE format, can be used multiple
  /// times)
  #[arg(long = "config", global = true, action = clap::ArgAction::Append)]
  pub config_overrides: Vec<String>,
}

/// All supported subcommands for the petaldoc CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Extract metadata and write the markdown documentation tree.
  Docs {
    /// Append generated properties, enum values and usage examples to
    /// every page.
    #[arg(short, long)]
    extended: bool,
  },

  /// Write the markdown tree, then assemble the HTML site.
  Site {
    /// Append generated properties, enum values and usage examples to
    /// every page.
    #[arg(short, long)]
    extended: bool,

    /// Build pages from the generated tree only, ignoring curated pages.
    #[arg(short = 'g', long)]
    use_generated: bool,
  },

  /// Initialize a new petaldoc configuration file.
  Init {
    /// Path to create the configuration file at.
    #[arg(short, long, default_value = "petaldoc.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists.
    #[arg(short, long)]
    force: bool,
  },

  /// Export default templates to a directory for customization.
  Export {
    /// Output directory for template files.
    #[arg(short, long, default_value = "templates")]
    output_dir: PathBuf,

    /// Whether to overwrite existing files.
    #[arg(long)]
    force: bool,

    /// Specific templates to export (html, css, js). If not specified,
    /// exports all.
    #[arg(short, long, action = clap::ArgAction::Append)]
    templates: Vec<String>,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
