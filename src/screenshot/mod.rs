//! Marketing screenshot composition: a flat canvas with a centered caption
//! and a one-step drop shadow near the bottom edge.

use image::{Rgb, RgbImage, Rgba};

use crate::config::ScreenshotConfig;
use crate::error::Result;
use crate::palette::{parse_hex, parse_rgb};
use crate::raster::Point;
use crate::text::{CaptionFont, TextBounds};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenshotStyle {
    pub width: u32,
    pub height: u32,
    pub bottom_margin: i32,
    pub shadow_offset: i32,
    pub shadow: Rgba<u8>,
    pub text: Rgba<u8>,
    pub background: Rgb<u8>,
}

impl ScreenshotStyle {
    /// Resolve color strings; fails on the first malformed one.
    pub fn from_config(cfg: &ScreenshotConfig) -> Result<Self> {
        Ok(Self {
            width: cfg.width,
            height: cfg.height,
            bottom_margin: cfg.bottom_margin,
            shadow_offset: cfg.shadow_offset,
            shadow: parse_hex(&cfg.shadow_color)?,
            text: parse_hex(&cfg.text_color)?,
            background: parse_rgb(&cfg.background_color)?,
        })
    }
}

/// 1-based position in the caption table and the caption itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Caption {
    pub index: usize,
    pub text: String,
}

impl Caption {
    pub fn numbered(captions: &[String]) -> Vec<Caption> {
        captions
            .iter()
            .enumerate()
            .map(|(i, text)| Caption { index: i + 1, text: text.clone() })
            .collect()
    }

    pub fn file_name(&self) -> String {
        format!("screenshot_{}.png", self.index)
    }
}

/// Horizontally centered (floor division), `bottom_margin` above the bottom edge.
pub fn caption_origin(style: &ScreenshotStyle, bounds: TextBounds) -> Point {
    let x = (style.width as i32 - bounds.width()).div_euclid(2);
    let y = style.height as i32 - bounds.height() - style.bottom_margin;
    Point::new(x, y)
}

pub fn compose_screenshot(caption: &str, font: &CaptionFont, style: &ScreenshotStyle) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(style.width, style.height, style.background);
    let origin = caption_origin(style, font.measure(caption));
    let shadow_at = Point::new(origin.x + style.shadow_offset, origin.y + style.shadow_offset);
    font.draw(&mut canvas, shadow_at, caption, style.shadow);
    font.draw(&mut canvas, origin, caption, style.text);
    canvas
}
