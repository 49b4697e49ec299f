//! App Store Screenshot Generator
//!
//! One 1290x2796 image per caption, caption centered 100px above the bottom
//! edge with a faint drop shadow:
//!   AppStoreScreenshots/screenshot_<i>.png
//!
//! Uses SF Pro Text Bold when the host has it, the built-in bitmap font otherwise.
//!
//! Usage:
//!   cargo run --bin generate_screenshots
//!   cargo run --bin generate_screenshots -- --config assets.ron

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use reframe_assets::{generate_screenshots, logging, AssetConfig};

#[derive(Parser, Debug)]
#[command(about = "Generate reframe App Store screenshots", version)]
struct Args {
    /// RON file overriding any subset of the built-in settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Destination directory. Defaults to AppStoreScreenshots/.
    #[arg(long)]
    out_dir: Option<PathBuf>,
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose)?;

    let mut cfg = AssetConfig::resolve(args.config.as_deref()).context("load config")?;
    if let Some(dir) = args.out_dir {
        cfg.screenshots.out_dir = dir;
    }
    let report = generate_screenshots(&cfg.screenshots)
        .with_context(|| format!("generate screenshots into {}", cfg.screenshots.out_dir.display()))?;
    println!("Wrote {} screenshots to {}", report.files.len(), report.out_dir.display());
    Ok(())
}
