//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lab-report", version, about = "Lab report generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a report manifest (.toml or .json) to Markdown
    Render(RenderArgs),
    /// Print the default config file location
    ConfigPath,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Report manifest
    pub manifest: PathBuf,

    /// Output file (default: <title>.md next to the manifest)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file (default: user config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl RenderArgs {
    /// Log filter for the requested verbosity
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
