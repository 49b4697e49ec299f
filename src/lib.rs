pub mod batch;
pub mod config;
pub mod error;
pub mod icon;
pub mod logging;
pub mod palette;
pub mod raster;
pub mod screenshot;
pub mod text;

// Curated re-exports
pub use batch::{generate_icons, generate_screenshots, BatchReport, WrittenAsset};
pub use config::{AssetConfig, IconConfig, ScreenshotConfig};
pub use error::{AssetError, Result};
