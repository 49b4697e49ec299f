//! App Icon Generator
//!
//! Renders the reframe icon (three nested rounded frames) at every size the
//! iOS asset catalog needs and writes `Contents.json` alongside:
//!   reframe/Assets.xcassets/AppIcon.appiconset/logo_size_<N>.png
//!
//! Usage:
//!   cargo run --bin generate_icons
//!   cargo run --bin generate_icons -- --config assets.ron --out-dir /tmp/icons

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use reframe_assets::{generate_icons, logging, AssetConfig};

#[derive(Parser, Debug)]
#[command(about = "Generate reframe app icons", version)]
struct Args {
    /// RON file overriding any subset of the built-in settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Destination directory. Defaults to the asset catalog icon set.
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
        cfg.icons.out_dir = dir;
    }
    let report = generate_icons(&cfg.icons)
        .with_context(|| format!("generate icons into {}", cfg.icons.out_dir.display()))?;
    println!("Wrote {} icons to {}", report.files.len(), report.out_dir.display());
    Ok(())
}
