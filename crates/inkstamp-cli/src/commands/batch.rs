use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use inkstamp_core::project::run_batch;

use super::load_project;
use crate::summary::print_project_summary;

#[derive(Args)]
pub struct BatchArgs {
    /// Project file (TOML); its input is ignored
    pub project: PathBuf,

    /// Images to watermark
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Directory for the watermarked copies
    #[arg(long, default_value = "watermarked")]
    pub out_dir: PathBuf,
}

pub fn run(args: &BatchArgs) -> Result<()> {
    let config = load_project(&args.project)?;
    print_project_summary(&config);

    let pb = ProgressBar::new(args.files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:12} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Watermarking");

    let outputs = run_batch(&config, &args.files, &args.out_dir, |done, _total| {
        pb.set_position(done as u64);
    })?;

    pb.finish_with_message("Done");
    println!(
        "\n{} image(s) written to {}",
        outputs.len(),
        args.out_dir.display()
    );
    Ok(())
}
