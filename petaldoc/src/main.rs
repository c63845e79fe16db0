use std::fs;

use color_eyre::eyre::{Context, Result};
use log::{LevelFilter, info};
use petaldoc::{
  cli::{Cli, Commands},
  error::PetaldocError,
  pipeline,
};
use petaldoc_config::Config;

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  match &cli.command {
    Commands::Init {
      output,
      format,
      force,
    } => {
      if output.exists() && !force {
        return Err(PetaldocError::ConfigExists(output.clone()).into());
      }

      if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
      {
        fs::create_dir_all(parent).wrap_err_with(|| {
          format!("Failed to create directory: {}", parent.display())
        })?;
        info!("Created directory: {}", parent.display());
      }

      Config::generate_default_config(format, output)
        .map_err(PetaldocError::from)
        .wrap_err_with(|| {
          format!(
            "Failed to generate configuration file: {}",
            output.display()
          )
        })?;

      info!(
        "Configuration file created successfully. Set definitions_dir and \
         run `petaldoc site`."
      );
      Ok(())
    },

    Commands::Export {
      output_dir,
      force,
      templates,
    } => {
      let written =
        Config::export_templates(output_dir, *force, Some(templates.as_slice()))
          .map_err(PetaldocError::from)
          .wrap_err_with(|| {
            format!("Failed to export templates to {}", output_dir.display())
          })?;
      info!("Exported {written} template(s) to {}", output_dir.display());
      Ok(())
    },

    Commands::Docs { extended } => {
      let mut config = load_config(&cli)?;
      config.extended |= *extended;
      pipeline::run_docs(&config)?;
      Ok(())
    },

    Commands::Site {
      extended,
      use_generated,
    } => {
      let mut config = load_config(&cli)?;
      config.extended |= *extended;
      config.use_generated |= *use_generated;
      pipeline::run_site(&config)?;
      Ok(())
    },
  }
}

/// Load, merge and override the configuration, then check its paths.
fn load_config(cli: &Cli) -> Result<Config> {
  let config = Config::load(&cli.config_files, &cli.config_overrides)
    .map_err(PetaldocError::from)
    .wrap_err("Failed to load configuration")?;
  config
    .validate_paths()
    .map_err(PetaldocError::from)
    .wrap_err("Invalid configuration")?;
  Ok(config)
}
