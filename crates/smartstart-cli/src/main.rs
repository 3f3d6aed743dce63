//! smartstart CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "smartstart", version, about = "Early-learning screening mini-games")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the assessment interactively in the terminal
    Play {
        /// Path to a .toml catalog (defaults to the built-in one)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Shuffle seed for a reproducible session
        #[arg(long)]
        seed: Option<u64>,

        /// Where to write the JSON report
        #[arg(long, default_value = "./smartstart-results")]
        output: PathBuf,

        /// Output format: json, html, markdown, all
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Run a scripted assessment and export its report
    Simulate {
        /// Path to a .toml answer script
        #[arg(long)]
        script: PathBuf,

        /// Path to a .toml catalog (defaults to the built-in one)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Where to write the report
        #[arg(long, default_value = "./smartstart-results")]
        output: PathBuf,

        /// Output format: json, html, markdown, all
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Validate catalog TOML files
    Validate {
        /// Path to a catalog file or directory
        #[arg(long)]
        catalog: PathBuf,
    },

    /// Compare two assessment reports from the same child
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Exit code 1 if any domain scored lower
        #[arg(long)]
        fail_on_decline: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create a starter catalog and answer script
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("smartstart=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            catalog,
            seed,
            output,
            format,
        } => commands::play::execute(catalog, seed, output, format),
        Commands::Simulate {
            script,
            catalog,
            output,
            format,
        } => commands::simulate::execute(script, catalog, output, format),
        Commands::Validate { catalog } => commands::validate::execute(catalog),
        Commands::Compare {
            baseline,
            current,
            fail_on_decline,
            format,
        } => commands::compare::execute(baseline, current, fail_on_decline, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
