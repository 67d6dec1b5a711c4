use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use inkstamp_core::project::config::ProjectConfig;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write the project to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save a full default project as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let config = ProjectConfig::example();
    let toml_str = toml::to_string_pretty(&config)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write project to {}", path.display()))?;
        println!("Default project saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
