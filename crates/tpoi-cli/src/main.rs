mod merge;
mod normalize;
mod sources;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::normalize::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "tpoi-cli")]
#[command(about = "Tokyo POI normalization command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Normalize a JSON file of raw page extractions into POI records
    Normalize {
        /// Source profile from sources.yaml (name or slug)
        #[arg(long)]
        source: String,
        /// JSON array of raw page extractions
        #[arg(long)]
        input: PathBuf,
        /// Output format(s) to write
        #[arg(long, value_enum, default_value_t = OutputFormat::Both)]
        format: OutputFormat,
        /// Override TPOI_OUTPUT_DIR
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Normalize and print the summary without writing files
        #[arg(long)]
        dry_run: bool,
    },
    /// Deduplicate previously exported JSON files into one
    Merge {
        /// Exported JSON files, in priority order
        #[arg(long = "input", required = true, num_args = 1..)]
        inputs: Vec<PathBuf>,
        /// Destination JSON file
        #[arg(long)]
        output: PathBuf,
    },
    /// Validate and list the configured sources
    Sources,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = tpoi_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Normalize {
            source,
            input,
            format,
            output_dir,
            dry_run,
        }) => {
            normalize::run_normalize(
                &config,
                &source,
                &input,
                format,
                output_dir.as_deref(),
                dry_run,
            )
            .await?;
        }
        Some(Commands::Merge { inputs, output }) => merge::run_merge(&inputs, &output).await?,
        Some(Commands::Sources) => sources::run_sources(&config)?,
        None => println!("tpoi-cli ready ({} environment); see --help", config.env),
    }

    Ok(())
}
