//! Quire - a static site generator for multilingual Markdown blogs.

mod build;
mod cli;
mod config;
mod error;
mod generator;
mod logger;
mod page;
mod render;
mod source;
mod transform;
mod utils;
mod writer;

use anyhow::Result;
use build::build_site;
use clap::Parser;
use cli::Cli;
use config::{ConfigError, SiteConfig};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    build_site(&config, cli.mode(), cli.build_args().clean)
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    if !config_path.exists() {
        return Err(ConfigError::Missing(config_path).into());
    }

    let mut config = SiteConfig::from_path(&config_path)?;
    config.update_with_cli(cli);
    config.validate(cli.mode())?;
    log!("config"; "{}", config.config_path.display());

    Ok(config)
}
