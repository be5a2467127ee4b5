//! lab-report CLI

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use lab_report::{
    sanitize_filename, Cli, Commands, Manifest, RenderArgs, ReportBuilder, ReportConfig,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => run_render(&args),
        Commands::ConfigPath => {
            match ReportConfig::default_path() {
                Some(path) => println!("{}", path.display()),
                None => anyhow::bail!("No config directory on this platform"),
            }
            Ok(())
        }
    }
}

fn run_render(args: &RenderArgs) -> Result<()> {
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    let config = load_config(args.config.as_deref())?;
    let manifest = Manifest::load(&args.manifest)
        .with_context(|| format!("Failed to load manifest {}", args.manifest.display()))?;

    let base_dir = args
        .manifest
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&manifest, &args.manifest, &base_dir));

    let mut report = ReportBuilder::with_config(&output, config);
    manifest
        .apply(&mut report, &base_dir)
        .context("Failed to build report from manifest")?;

    match report.save().context("Failed to render report")? {
        Some(written) => println!("{}", written.display()),
        None => eprintln!("Manifest has no blocks, nothing written"),
    }
    Ok(())
}

/// Explicit `--config` must exist; the default location is optional
fn load_config(path: Option<&Path>) -> Result<ReportConfig> {
    match path {
        Some(path) => ReportConfig::load_from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?
            .with_context(|| format!("Config file not found: {}", path.display())),
        None => Ok(ReportConfig::load()
            .context("Failed to load default config")?
            .unwrap_or_default()),
    }
}

/// `<title>.md`, or `<manifest stem>.md`, next to the manifest
fn default_output(manifest: &Manifest, manifest_path: &Path, base_dir: &Path) -> PathBuf {
    let stem = match &manifest.title {
        Some(title) if !title.trim().is_empty() => sanitize_filename(title.trim()),
        _ => manifest_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "report".to_string()),
    };
    base_dir.join(format!("{}.md", stem))
}
