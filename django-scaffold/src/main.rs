//! django-scaffold CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use django_scaffold::commands::{RenderCommand, ViewCommand};
use django_scaffold::observability;

#[derive(Parser)]
#[command(name = "django-scaffold")]
#[command(version)]
#[command(about = "Generate Django class-based views for a model", long_about = None)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate list/detail/create/update/delete views for a model
    View(ViewCommand),
    /// Render a views module from a JSON context file
    Render(RenderCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::init(cli.verbose)?;

    match cli.command {
        Commands::View(command) => command.execute(),
        Commands::Render(command) => command.execute(),
    }
}
