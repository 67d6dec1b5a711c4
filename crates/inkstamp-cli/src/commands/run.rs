use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use inkstamp_core::project::run_project;

use super::load_project;
use crate::summary::print_project_summary;

#[derive(Args)]
pub struct RunArgs {
    /// Project file (TOML)
    pub project: PathBuf,

    /// Override the project's output path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let mut config = load_project(&args.project)?;
    if let Some(ref output) = args.output {
        config.output = output.clone();
    }
    print_project_summary(&config);

    let result = run_project(&config)
        .with_context(|| format!("Failed to watermark {}", config.input.display()))?;
    println!(
        "Saved {}x{} {} to {}",
        result.width,
        result.height,
        result.format,
        result.output.display()
    );
    Ok(())
}
