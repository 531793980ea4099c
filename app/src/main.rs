#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use command::{
    CommandStrategy, ExtractInput, ExtractStrategy, InfoStrategy, InitStrategy, VersionStrategy,
};
use periodo_core::{PeriodCategory, TimeOfDay};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "periodo")]
#[command(about = "Find time periods in Spanish text", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract time periods
    Extract {
        /// Text to scan. Reads stdin, one text per line, when omitted
        text: Option<String>,

        /// File with one text per line
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Print results as JSON lines
        #[arg(short, long)]
        json: bool,

        /// Only keep periods of this category, e.g. `implicit_range`
        #[arg(long)]
        category: Option<PeriodCategory>,

        /// Only keep periods in this part of the day, e.g. `afternoon`
        #[arg(long)]
        part: Option<TimeOfDay>,
    },
    /// Initialize configuration
    Init,
    /// Show effective configuration
    Info,
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            text,
            file,
            json,
            category,
            part,
        } => ExtractStrategy.execute(ExtractInput {
            text,
            file,
            json,
            category,
            part,
        }),
        Commands::Init => InitStrategy.execute(()),
        Commands::Info => InfoStrategy.execute(()),
        Commands::Version => VersionStrategy.execute(()),
    }
}
