use anyhow::Result;
use clap::{Parser, Subcommand};
use prizm_execution::FlowRecorder;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

mod commands;

#[derive(Parser)]
#[command(name = "prizm")]
#[command(about = "Prizm CLI - plays back multi-agent debate analyses as timed transcripts", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.config/prizm/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an analysis and print its transcript as it is delivered
    Run(commands::run::RunArgs),
    /// Print the script a dataset compiles to
    Compile {
        /// JSON dataset file (defaults to the builtin dataset)
        #[arg(long)]
        dataset: Option<PathBuf>,
        /// Print the script as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the builtin dataset as JSON, or write it to a file
    Dataset {
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing() -> FlowRecorder {
    let (flow_layer, recorder) = FlowRecorder::channel();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter),
        )
        .with(flow_layer)
        .init();

    recorder
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut recorder = init_tracing();

    match cli.command {
        Commands::Run(args) => {
            commands::run::run(args, cli.config.as_deref(), &mut recorder).await?
        }
        Commands::Compile { dataset, json } => {
            commands::compile::compile(dataset.as_deref(), cli.config.as_deref(), json)?
        }
        Commands::Dataset { output } => commands::dataset::dataset(output.as_deref())?,
    }

    Ok(())
}
