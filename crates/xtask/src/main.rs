use std::{
  fs,
  path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Command, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate_to};
use clap_mangen::Man;
use petaldoc::cli::Cli;

const BIN_NAME: &str = "petaldoc";
const SHELLS: [Shell; 4] =
  [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell];

#[derive(Parser)]
#[command(about = "Release tasks for petaldoc")]
struct Xtask {
  #[command(subcommand)]
  task: Task,
}

#[derive(Subcommand)]
enum Task {
  /// Write shell completions and man pages for the petaldoc CLI.
  Dist {
    /// Directory receiving `completions/` and `man/`.
    #[arg(short, long, default_value = "dist")]
    output_dir: PathBuf,

    /// Build only one kind of artifact.
    #[arg(long, value_enum)]
    only: Option<Artifact>,
  },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Artifact {
  Completions,
  Man,
}

fn main() -> Result<()> {
  let Task::Dist { output_dir, only } = Xtask::parse().task;

  if only != Some(Artifact::Man) {
    write_completions(&output_dir.join("completions"))?;
  }
  if only != Some(Artifact::Completions) {
    write_man_pages(&output_dir.join("man"))?;
  }
  Ok(())
}

fn write_completions(dir: &Path) -> Result<()> {
  fs::create_dir_all(dir)
    .with_context(|| format!("Failed to create {}", dir.display()))?;
  let mut cmd = Cli::command();
  for shell in SHELLS {
    let path = generate_to(shell, &mut cmd, BIN_NAME, dir)
      .with_context(|| format!("Failed to write {shell} completions"))?;
    println!("Wrote {}", path.display());
  }
  Ok(())
}

/// `petaldoc.1` plus one `petaldoc-<command>.1` per subcommand.
fn write_man_pages(dir: &Path) -> Result<()> {
  fs::create_dir_all(dir)
    .with_context(|| format!("Failed to create {}", dir.display()))?;

  let root = Cli::command().name(BIN_NAME);
  render_man(root.clone(), &dir.join(format!("{BIN_NAME}.1")))?;

  for sub in root.get_subcommands() {
    let name = format!("{BIN_NAME}-{}", sub.get_name());
    let page = sub.clone().name(name.clone());
    render_man(page, &dir.join(format!("{name}.1")))?;
  }
  Ok(())
}

fn render_man(cmd: Command, path: &Path) -> Result<()> {
  let mut buffer = Vec::new();
  Man::new(cmd)
    .render(&mut buffer)
    .with_context(|| format!("Failed to render {}", path.display()))?;
  fs::write(path, buffer)
    .with_context(|| format!("Failed to write {}", path.display()))?;
  println!("Wrote {}", path.display());
  Ok(())
}
