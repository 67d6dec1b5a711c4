mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "inkstamp", about = "Text and image watermarking tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image dimensions and how it fits the preview area
    Info(commands::info::InfoArgs),
    /// Watermark an image from command-line options
    Apply(commands::apply::ApplyArgs),
    /// Render the editor preview canvas for a project
    Preview(commands::preview::PreviewArgs),
    /// Run a project file
    Run(commands::run::RunArgs),
    /// Apply a project file to many images
    Batch(commands::batch::BatchArgs),
    /// Print or save a default project file
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Apply(args) => commands::apply::run(args),
        Commands::Preview(args) => commands::preview::run(args),
        Commands::Run(args) => commands::run::run(args),
        Commands::Batch(args) => commands::batch::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
