//! HexBuzz CLI - asset tooling for the HexBuzz puzzle game

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{assets, check, generate};

#[derive(Parser)]
#[command(name = "hexbuzz")]
#[command(about = "Batch visual-asset generation for the HexBuzz puzzle game", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the game's visual assets
    Generate {
        /// Backend to use (a1111, mock)
        #[arg(long, default_value = "a1111")]
        backend: String,

        /// Registry TOML file (defaults to the built-in asset table)
        #[arg(long)]
        registry: Option<String>,

        /// Output directory (defaults to the configured output dir)
        #[arg(long)]
        output: Option<String>,

        /// Backend API URL override
        #[arg(long)]
        api_url: Option<String>,

        /// Model checkpoint override
        #[arg(long)]
        model: Option<String>,

        /// Comma-separated asset ids, e.g. to re-run a failed subset
        #[arg(long)]
        only: Option<String>,

        /// Keep solid backgrounds even when removal is available
        #[arg(long)]
        no_remove_bg: bool,
    },

    /// List the assets the batch would produce
    Assets {
        /// Registry TOML file (defaults to the built-in asset table)
        #[arg(long)]
        registry: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Query the backend's active model
    Check {
        /// Backend to query (a1111, mock)
        #[arg(long, default_value = "a1111")]
        backend: String,

        /// Backend API URL override
        #[arg(long)]
        api_url: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            backend,
            registry,
            output,
            api_url,
            model,
            only,
            no_remove_bg,
        } => generate::run(generate::GenerateArgs {
            backend,
            registry,
            output,
            api_url,
            model,
            only,
            no_remove_bg,
        }),
        Commands::Assets { registry, format } => assets::run(registry.as_deref(), &format),
        Commands::Check { backend, api_url } => check::run(&backend, api_url.as_deref()),
    }
}
