//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use crate::build::BuildMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Quire static site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name, relative to root
    #[arg(short = 'C', long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Source directory path (relative to project root)
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared build arguments for Site and Blog commands
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Clean output directory completely before building
    #[arg(long)]
    pub clean: bool,

    /// Minify the html and xml output
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render every source file with its own layout
    Site {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Build the multilingual blog: index pages, tag pages and rss feeds
    Blog {
        #[command(flatten)]
        build_args: BuildArgs,
    },
}

impl Cli {
    pub const fn mode(&self) -> BuildMode {
        match self.command {
            Commands::Site { .. } => BuildMode::Site,
            Commands::Blog { .. } => BuildMode::Blog,
        }
    }

    pub fn build_args(&self) -> &BuildArgs {
        match &self.command {
            Commands::Site { build_args } | Commands::Blog { build_args } => build_args,
        }
    }
}
