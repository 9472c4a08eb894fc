mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snapdock", about = "Generate date-pinned Dockerfiles for R projects")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write .Dockerfile for the project (skipped if a Dockerfile exists)
    Compile {
        /// Project directory
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Print the build plan as JSON
    Plan {
        /// Project directory
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Write the generated Dockerfile as Dockerfile for manual customization
    Eject {
        /// Project directory
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Add a commented snapdock.toml to the project
    Init {
        /// Project directory
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                // arch-lint: allow(no-silent-result-drop) reason="unset or invalid RUST_LOG falls back to info"
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile { dir } => commands::compile(&dir)?,
        Commands::Plan { dir } => commands::plan(&dir)?,
        Commands::Eject { dir } => commands::eject(&dir)?,
        Commands::Init { dir } => commands::init_project(&dir)?,
    }

    Ok(())
}
