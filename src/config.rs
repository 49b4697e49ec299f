// Generator configuration. Defaults reproduce the shipped asset set exactly;
// a RON file may override any subset of fields (missing fields keep defaults).

use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};
use tracing::{debug, warn};

use crate::error::{AssetError, Result};
use crate::palette;

pub const ICON_OUT_DIR: &str = "reframe/Assets.xcassets/AppIcon.appiconset";
pub const SCREENSHOT_OUT_DIR: &str = "AppStoreScreenshots";
pub const PREFERRED_FONT: &str = "/System/Library/Fonts/SFProText-Bold.ttf";

/// iPhone 14 Pro Max (6.7") App Store screenshot size.
pub const SCREENSHOT_WIDTH: u32 = 1290;
pub const SCREENSHOT_HEIGHT: u32 = 2796;

pub const DEFAULT_CAPTIONS: [&str; 6] = [
    "Frame your photos perfectly for Instagram",
    "Select multiple photos at once",
    "Choose from Square, Portrait, or Landscape",
    "Perfect white frames every time",
    "Batch process multiple photos",
    "Save directly to your photo library",
];

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct IconConfig {
    pub out_dir: PathBuf,
    pub main_color: String,
    pub background_color: String,
    /// Also write the asset catalog `Contents.json` next to the PNGs.
    pub write_manifest: bool,
}
impl Default for IconConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(ICON_OUT_DIR),
            main_color: palette::MAIN_BLUE.into(),
            background_color: palette::WHITE.into(),
            write_manifest: true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScreenshotConfig {
    pub out_dir: PathBuf,
    pub width: u32,
    pub height: u32,
    pub font_path: PathBuf,
    /// Pixels per em for the preferred font. The bitmap fallback has a fixed size.
    pub font_px: f32,
    /// Gap between the caption box and the bottom edge.
    pub bottom_margin: i32,
    pub shadow_offset: i32,
    pub shadow_color: String,
    pub text_color: String,
    pub background_color: String,
    pub captions: Vec<String>,
}
impl Default for ScreenshotConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(SCREENSHOT_OUT_DIR),
            width: SCREENSHOT_WIDTH,
            height: SCREENSHOT_HEIGHT,
            font_path: PathBuf::from(PREFERRED_FONT),
            font_px: 60.0,
            bottom_margin: 100,
            shadow_offset: 2,
            shadow_color: palette::SHADOW.into(),
            text_color: palette::BLACK.into(),
            background_color: palette::WHITE.into(),
            captions: DEFAULT_CAPTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AssetConfig {
    pub icons: IconConfig,
    pub screenshots: ScreenshotConfig,
}

impl AssetConfig {
    /// Load from a single RON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| AssetError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&data).map_err(|source| AssetError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load file; on failure returns default config plus the error.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<AssetError>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Built-in defaults when `path` is `None`, otherwise the file (which must load).
    /// Validation warnings are logged, never fatal.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let cfg = match path {
            Some(p) => {
                let cfg = Self::load_from_file(p)?;
                debug!(target: "config", "loaded {}", p.display());
                cfg
            }
            None => Self::default(),
        };
        for w in cfg.validate() {
            warn!(target: "config", "{w}");
        }
        Ok(cfg)
    }

    /// Produce validation warnings (non-fatal) for suspicious values.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        for (label, value) in [
            ("icons.main_color", &self.icons.main_color),
            ("icons.background_color", &self.icons.background_color),
            ("screenshots.shadow_color", &self.screenshots.shadow_color),
            ("screenshots.text_color", &self.screenshots.text_color),
            ("screenshots.background_color", &self.screenshots.background_color),
        ] {
            if let Err(e) = palette::parse_hex(value) {
                w.push(format!("{label}: {e}"));
            }
        }
        let s = &self.screenshots;
        if s.width == 0 || s.height == 0 {
            w.push(format!("screenshots canvas {}x{} is empty", s.width, s.height));
        }
        if s.captions.is_empty() {
            w.push("screenshots.captions is empty; nothing will be written".into());
        }
        if let Some(i) = s.captions.iter().position(|c| c.trim().is_empty()) {
            w.push(format!("screenshots.captions[{i}] is blank"));
        }
        if s.bottom_margin < 0 || s.bottom_margin as i64 >= s.height as i64 {
            w.push(format!(
                "screenshots.bottom_margin {} places the caption outside a {}px canvas",
                s.bottom_margin, s.height
            ));
        }
        if !(s.font_px > 0.0) {
            w.push(format!("screenshots.font_px {} must be > 0", s.font_px));
        }
        if s.shadow_offset.abs() > 50 {
            w.push(format!("screenshots.shadow_offset {} unusually large", s.shadow_offset));
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_shipped_assets() {
        let cfg = AssetConfig::default();
        assert_eq!(cfg.icons.out_dir, PathBuf::from(ICON_OUT_DIR));
        assert_eq!(cfg.icons.main_color, "#007AFF");
        assert_eq!(cfg.screenshots.width, 1290);
        assert_eq!(cfg.screenshots.height, 2796);
        assert_eq!(cfg.screenshots.captions.len(), 6);
        assert_eq!(cfg.screenshots.captions[0], "Frame your photos perfectly for Instagram");
        assert_eq!(cfg.screenshots.bottom_margin, 100);
        assert_eq!(cfg.screenshots.shadow_offset, 2);
        assert!(cfg.validate().is_empty(), "unexpected warnings: {:?}", cfg.validate());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let sample = r##"(
            icons: (main_color: "#FF3B30"),
            screenshots: (captions: ["Only one"], bottom_margin: 40),
        )"##;
        let cfg = AssetConfig::load_from_file(write_temp(sample).path()).expect("parse config");
        assert_eq!(cfg.icons.main_color, "#FF3B30");
        assert_eq!(cfg.icons.out_dir, PathBuf::from(ICON_OUT_DIR));
        assert_eq!(cfg.screenshots.captions, vec!["Only one".to_string()]);
        assert_eq!(cfg.screenshots.bottom_margin, 40);
        assert_eq!(cfg.screenshots.width, SCREENSHOT_WIDTH);
    }

    #[test]
    fn load_or_default_missing_file() {
        let (cfg, err) = AssetConfig::load_or_default("this/file/does/not/exist.ron");
        assert!(matches!(err, Some(AssetError::ConfigRead { .. })));
        assert_eq!(cfg, AssetConfig::default());
    }

    #[test]
    fn resolve_without_path_is_default() {
        assert_eq!(AssetConfig::resolve(None).unwrap(), AssetConfig::default());
        let missing = Path::new("this/file/does/not/exist.ron");
        assert!(AssetConfig::resolve(Some(missing)).is_err());
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let (cfg, err) = AssetConfig::load_or_default(write_temp("(icons: (main_color: 7").path());
        assert!(matches!(err, Some(AssetError::ConfigParse { .. })));
        assert_eq!(cfg, AssetConfig::default());
    }

    #[test]
    fn validate_detects_warnings() {
        let mut cfg = AssetConfig::default();
        cfg.icons.main_color = "blue".into();
        cfg.screenshots.width = 0;
        cfg.screenshots.captions = vec!["ok".into(), "  ".into()];
        cfg.screenshots.bottom_margin = 5000;
        cfg.screenshots.font_px = 0.0;
        let warnings = cfg.validate();
        let joined = warnings.join(" | ");
        assert!(joined.contains("icons.main_color"));
        assert!(joined.contains("canvas 0x2796 is empty"));
        assert!(joined.contains("captions[1] is blank"));
        assert!(joined.contains("bottom_margin 5000"));
        assert!(joined.contains("font_px 0 must be > 0"));
        assert_eq!(warnings.len(), 5, "{joined}");
    }

    #[test]
    fn default_roundtrips_through_ron() {
        let cfg = AssetConfig::default();
        let text = ron::ser::to_string_pretty(&cfg, ron::ser::PrettyConfig::default()).unwrap();
        let back: AssetConfig = ron::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }

    // Helper: create a temp file with given contents; returns handle (kept for lifetime)
    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().expect("tmp");
        f.write_all(contents.as_bytes()).unwrap();
        f
    }
}
