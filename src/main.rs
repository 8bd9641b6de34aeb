//! modfacts CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "modfacts")]
#[command(about = "Extract declaration modifier facts from compiler symbol metadata", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./modfacts.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract modifier facts for every declaration in a set of compilation units
    Extract {
        /// JSON file of compilation units
        #[arg(short, long)]
        input: PathBuf,

        /// Fact output file (JSON lines)
        #[arg(short, long)]
        output: PathBuf,

        /// Stop the whole run on the first classification failure
        #[arg(long)]
        abort_run: bool,

        /// Worker threads
        #[arg(short, long)]
        threads: Option<usize>,
    },
    /// Print the modifiers of a single symbol
    Classify {
        /// JSON file holding one symbol
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "modfacts={0},modfacts_extractor={0},modfacts_core={0}",
            log_level
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("modfacts v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Extract {
            input,
            output,
            abort_run,
            threads,
        } => {
            let config = commands::load_config(cli.config.as_deref(), abort_run, threads)?;
            commands::extract(&input, &output, config)
        }
        Commands::Classify { input } => commands::classify(&input),
        Commands::Version => {
            println!("modfacts v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
