//! Batch drivers: walk a fixed table, compose each image and persist it as PNG.
//!
//! Runs are strictly sequential and stop at the first failed write. Every
//! written file is reported with a blake3 digest of its encoded bytes so
//! repeated runs can be compared for byte-identical output.

use std::{
    fs,
    io::{self, Cursor},
    path::{Path, PathBuf},
};

use image::{ImageFormat, RgbImage};
use tracing::{debug, info, warn};

use crate::config::{IconConfig, ScreenshotConfig};
use crate::error::{AssetError, Result};
use crate::icon::{compose_icon, icon_file_name, AppIconManifest, IconPalette, ICON_SIZES};
use crate::palette::parse_rgb;
use crate::screenshot::{compose_screenshot, Caption, ScreenshotStyle};
use crate::text::CaptionFont;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrittenAsset {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Hex blake3 of the PNG bytes as written.
    pub digest: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub out_dir: PathBuf,
    pub files: Vec<WrittenAsset>,
    /// Asset catalog manifest, icon runs only.
    pub manifest: Option<PathBuf>,
    /// Screenshot runs only: the preferred font could not be used.
    pub used_fallback_font: bool,
}

/// Create `dir` and its parents; an existing directory is fine.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| AssetError::CreateDir { path: dir.to_path_buf(), source })
}

/// Encode `img` as PNG in memory, then write it to `path` in one go.
pub fn save_png(img: &RgbImage, path: &Path) -> Result<WrittenAsset> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|source| AssetError::WriteImage { path: path.to_path_buf(), source })?;
    fs::write(path, &bytes).map_err(|source| AssetError::WriteFile { path: path.to_path_buf(), source })?;
    Ok(WrittenAsset {
        path: path.to_path_buf(),
        width: img.width(),
        height: img.height(),
        digest: blake3::hash(&bytes).to_hex().to_string(),
    })
}

pub fn generate_icons(cfg: &IconConfig) -> Result<BatchReport> {
    let palette = IconPalette {
        main: parse_rgb(&cfg.main_color)?,
        background: parse_rgb(&cfg.background_color)?,
    };
    ensure_dir(&cfg.out_dir)?;

    let mut report = BatchReport { out_dir: cfg.out_dir.clone(), ..Default::default() };
    for size in ICON_SIZES {
        let icon = compose_icon(size.px, &palette);
        let written = save_png(&icon, &cfg.out_dir.join(icon_file_name(&size)))?;
        info!(target: "icons", "wrote {} ({}x{}) blake3={}", written.path.display(), written.width, written.height, &written.digest[..16]);
        report.files.push(written);
    }

    if cfg.write_manifest {
        let json = AppIconManifest::for_sizes(&ICON_SIZES).to_json()?;
        report.manifest = write_manifest(&cfg.out_dir.join(AppIconManifest::FILE_NAME), &json)?;
    }
    Ok(report)
}

/// Write `json` to `path` unless a different file is already there.
///
/// Xcode owns an existing `Contents.json` (it may list slots this tool never
/// renders), so a differing file is left untouched and `None` is returned.
/// A file that already matches is reported as written.
fn write_manifest(path: &Path, json: &str) -> Result<Option<PathBuf>> {
    match fs::read(path) {
        Ok(existing) if existing == json.as_bytes() => {
            debug!(target: "icons", "{} already up to date", path.display());
            return Ok(Some(path.to_path_buf()));
        }
        Ok(_) => {
            warn!(target: "icons", "{} exists with other content; leaving it untouched", path.display());
            return Ok(None);
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(source) => return Err(AssetError::WriteFile { path: path.to_path_buf(), source }),
    }
    fs::write(path, json).map_err(|source| AssetError::WriteFile { path: path.to_path_buf(), source })?;
    info!(target: "icons", "wrote {}", path.display());
    Ok(Some(path.to_path_buf()))
}

pub fn generate_screenshots(cfg: &ScreenshotConfig) -> Result<BatchReport> {
    let style = ScreenshotStyle::from_config(cfg)?;
    ensure_dir(&cfg.out_dir)?;

    let font = CaptionFont::load_or_fallback(&cfg.font_path, cfg.font_px);
    debug!(target: "screenshots", "caption font: {font:?}");

    let mut report = BatchReport {
        out_dir: cfg.out_dir.clone(),
        used_fallback_font: font.is_fallback(),
        ..Default::default()
    };
    for caption in Caption::numbered(&cfg.captions) {
        let shot = compose_screenshot(&caption.text, &font, &style);
        let written = save_png(&shot, &cfg.out_dir.join(caption.file_name()))?;
        info!(target: "screenshots", "wrote {} {:?} blake3={}", written.path.display(), caption.text, &written.digest[..16]);
        report.files.push(written);
    }
    Ok(report)
}
