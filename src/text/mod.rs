//! Caption text measurement and drawing.
//!
//! The preferred face is any TrueType/OpenType file readable by `ab_glyph`.
//! When it cannot be read or parsed the caption falls back to the built-in
//! Noto Sans Mono bitmap glyphs, so text rendering itself never fails.
//!
//! Drawing origin is the top-left of the line box: the ascender line sits at
//! `origin.y`, glyph coverage is alpha-blended over the canvas.

use std::{fs, path::Path};

use ab_glyph::{point, Font, FontVec, Glyph, GlyphId, PxScale, ScaleFont};
use image::{Rgba, RgbImage};
use noto_sans_mono_bitmap::{get_raster, FontWeight, RasterHeight, RasterizedChar};
use tracing::debug;

use crate::palette::blend_over;
use crate::raster::Point;

const BITMAP_WEIGHT: FontWeight = FontWeight::Regular;
const BITMAP_HEIGHT: RasterHeight = RasterHeight::Size16;
/// Substituted for characters the bitmap font has no raster for.
const BACKUP_CHAR: char = '?';

/// Rendered extent of a string relative to its drawing origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl TextBounds {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    fn union(self, other: TextBounds) -> TextBounds {
        TextBounds {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

pub enum CaptionFont {
    Outline { font: FontVec, scale: PxScale },
    Bitmap,
}

impl CaptionFont {
    /// Load `path` at `em_px` pixels per em, or fall back to the built-in bitmap font.
    pub fn load_or_fallback(path: impl AsRef<Path>, em_px: f32) -> Self {
        let path = path.as_ref();
        let bytes = match fs::read(path) {
            Ok(b) => b,
            Err(e) => {
                debug!(target: "text", "font {} unavailable ({e}); using built-in bitmap font", path.display());
                return CaptionFont::Bitmap;
            }
        };
        match FontVec::try_from_vec(bytes) {
            Ok(font) => {
                debug!(target: "text", "loaded font {} at {em_px}px/em", path.display());
                Self::from_font(font, em_px)
            }
            Err(e) => {
                debug!(target: "text", "font {} unparsable ({e}); using built-in bitmap font", path.display());
                CaptionFont::Bitmap
            }
        }
    }

    /// Wrap an already parsed face. `em_px` is the em square height in pixels,
    /// converted to `ab_glyph`'s ascent-to-descent scale.
    pub fn from_font(font: FontVec, em_px: f32) -> Self {
        let upem = font.units_per_em().unwrap_or(1000.0);
        let scale = PxScale::from(em_px * font.height_unscaled() / upem);
        CaptionFont::Outline { font, scale }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, CaptionFont::Bitmap)
    }

    pub fn measure(&self, text: &str) -> TextBounds {
        match self {
            CaptionFont::Outline { font, scale } => {
                let mut bounds: Option<TextBounds> = None;
                for g in layout(font, *scale, text) {
                    if let Some(og) = font.outline_glyph(g) {
                        let r = og.px_bounds();
                        let b = TextBounds {
                            left: r.min.x.floor() as i32,
                            top: r.min.y.floor() as i32,
                            right: r.max.x.ceil() as i32,
                            bottom: r.max.y.ceil() as i32,
                        };
                        bounds = Some(bounds.map_or(b, |acc| acc.union(b)));
                    }
                }
                bounds.unwrap_or_default()
            }
            CaptionFont::Bitmap => {
                let width: usize = bitmap_chars(text).map(|r| r.width()).sum();
                if width == 0 {
                    return TextBounds::default();
                }
                TextBounds { left: 0, top: 0, right: width as i32, bottom: BITMAP_HEIGHT.val() as i32 }
            }
        }
    }

    pub fn draw(&self, canvas: &mut RgbImage, origin: Point, text: &str, color: Rgba<u8>) {
        match self {
            CaptionFont::Outline { font, scale } => {
                for g in layout(font, *scale, text) {
                    let Some(og) = font.outline_glyph(g) else { continue };
                    let min = og.px_bounds().min;
                    let (gx, gy) = (origin.x + min.x as i32, origin.y + min.y as i32);
                    og.draw(|x, y, coverage| {
                        blend_at(canvas, gx + x as i32, gy + y as i32, color, coverage);
                    });
                }
            }
            CaptionFont::Bitmap => {
                let mut x_pos = origin.x;
                for raster in bitmap_chars(text) {
                    for (y, row) in raster.raster().iter().enumerate() {
                        for (x, intensity) in row.iter().enumerate() {
                            if *intensity == 0 {
                                continue;
                            }
                            let coverage = *intensity as f32 / 255.0;
                            blend_at(canvas, x_pos + x as i32, origin.y + y as i32, color, coverage);
                        }
                    }
                    x_pos += raster.width() as i32;
                }
            }
        }
    }
}

impl std::fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptionFont::Outline { scale, .. } => f.debug_struct("Outline").field("scale", scale).finish(),
            CaptionFont::Bitmap => f.write_str("Bitmap"),
        }
    }
}

/// Single-line glyph placement with kerning; baseline at `ascent`.
fn layout(font: &FontVec, scale: PxScale, text: &str) -> Vec<Glyph> {
    let sf = font.as_scaled(scale);
    let mut caret = 0.0f32;
    let mut prev: Option<GlyphId> = None;
    let mut glyphs = Vec::with_capacity(text.len());
    for ch in text.chars().filter(|c| !c.is_control()) {
        let id = sf.glyph_id(ch);
        if let Some(p) = prev {
            caret += sf.kern(p, id);
        }
        glyphs.push(id.with_scale_and_position(scale, point(caret, sf.ascent())));
        caret += sf.h_advance(id);
        prev = Some(id);
    }
    glyphs
}

fn bitmap_chars(text: &str) -> impl Iterator<Item = RasterizedChar> + '_ {
    text.chars().filter(|c| !c.is_control()).filter_map(char_raster)
}

fn char_raster(c: char) -> Option<RasterizedChar> {
    let get = |c| get_raster(c, BITMAP_WEIGHT, BITMAP_HEIGHT);
    get(c).or_else(|| get(BACKUP_CHAR))
}

#[inline]
fn blend_at(canvas: &mut RgbImage, x: i32, y: i32, color: Rgba<u8>, coverage: f32) {
    if x < 0 || y < 0 || x as u32 >= canvas.width() || y as u32 >= canvas.height() {
        return;
    }
    blend_over(canvas.get_pixel_mut(x as u32, y as u32), color, coverage);
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use noto_sans_mono_bitmap::get_raster_width;
    use std::io::Write;

    const BITMAP_CHAR_WIDTH: usize = get_raster_width(BITMAP_WEIGHT, BITMAP_HEIGHT);

    fn ubuntu_light(em_px: f32) -> CaptionFont {
        let face = FontVec::try_from_vec(epaint_default_fonts::UBUNTU_LIGHT.to_vec()).expect("bundled ttf");
        CaptionFont::from_font(face, em_px)
    }

    #[test]
    fn missing_font_falls_back() {
        let font = CaptionFont::load_or_fallback("this/font/does/not/exist.ttf", 60.0);
        assert!(font.is_fallback());
    }

    #[test]
    fn garbage_font_falls_back() {
        let mut f = tempfile::NamedTempFile::new().expect("tmp");
        f.write_all(b"definitely not a font").unwrap();
        let font = CaptionFont::load_or_fallback(f.path(), 60.0);
        assert!(font.is_fallback());
    }

    #[test]
    fn readable_font_file_loads_as_outline() {
        let mut f = tempfile::NamedTempFile::new().expect("tmp");
        f.write_all(epaint_default_fonts::UBUNTU_LIGHT).unwrap();
        let font = CaptionFont::load_or_fallback(f.path(), 60.0);
        assert!(!font.is_fallback());
        assert!(matches!(font, CaptionFont::Outline { .. }));
    }

    #[test]
    fn outline_measure_scales_with_em_size() {
        let small = ubuntu_light(30.0).measure("Hello");
        let large = ubuntu_light(60.0).measure("Hello");
        assert!(large.width() > 0 && large.height() > 0, "{large:?}");
        // Cap height of a 60px em lands well inside the em square.
        assert!(large.height() > 30 && large.height() < 70, "{large:?}");
        // Ink starts below the ascender line.
        assert!(large.top >= 0, "{large:?}");
        assert!(large.width() > small.width() * 3 / 2, "{small:?} vs {large:?}");
        assert_eq!(ubuntu_light(60.0).measure(""), TextBounds::default());
        assert_eq!(ubuntu_light(60.0).measure("   "), TextBounds::default());
    }

    #[test]
    fn outline_draw_stays_inside_measured_box() {
        let font = ubuntu_light(60.0);
        let mut canvas = RgbImage::from_pixel(900, 120, Rgb([255, 255, 255]));
        let origin = Point::new(20, 15);
        let text = "Perfect white frames";
        font.draw(&mut canvas, origin, text, Rgba([0, 0, 0, 255]));
        let b = font.measure(text);

        let mut touched = 0;
        for (x, y, p) in canvas.enumerate_pixels() {
            if *p != Rgb([255, 255, 255]) {
                touched += 1;
                let (x, y) = (x as i32, y as i32);
                assert!(x >= origin.x + b.left && x < origin.x + b.right, "x={x} {b:?}");
                assert!(y >= origin.y + b.top && y < origin.y + b.bottom, "y={y} {b:?}");
            }
        }
        assert!(touched > 100, "only {touched} pixels inked");
        // Antialiased edges plus fully covered stems.
        assert!(canvas.pixels().any(|p| *p == Rgb([0, 0, 0])));
        assert!(canvas.pixels().any(|p| p.0[0] > 0 && p.0[0] < 255));
    }

    #[test]
    fn bitmap_measure_is_monospaced() {
        let font = CaptionFont::Bitmap;
        let one = font.measure("A");
        let five = font.measure("Hello");
        assert_eq!(one.width(), BITMAP_CHAR_WIDTH as i32);
        assert_eq!(five.width(), 5 * BITMAP_CHAR_WIDTH as i32);
        assert_eq!(five.height(), BITMAP_HEIGHT.val() as i32);
        assert_eq!(font.measure(""), TextBounds::default());
    }

    #[test]
    fn unknown_chars_use_backup_glyph() {
        let font = CaptionFont::Bitmap;
        // Private-use code point has no raster; it still occupies one cell.
        assert_eq!(font.measure("\u{E000}").width(), BITMAP_CHAR_WIDTH as i32);
    }

    #[test]
    fn bitmap_draw_stays_inside_measured_box() {
        let font = CaptionFont::Bitmap;
        let mut canvas = RgbImage::from_pixel(120, 40, Rgb([255, 255, 255]));
        let origin = Point::new(7, 9);
        let text = "Hi there";
        font.draw(&mut canvas, origin, text, Rgba([0, 0, 0, 255]));
        let b = font.measure(text);

        let mut touched = 0;
        for (x, y, p) in canvas.enumerate_pixels() {
            if *p != Rgb([255, 255, 255]) {
                touched += 1;
                let (x, y) = (x as i32, y as i32);
                assert!(x >= origin.x + b.left && x < origin.x + b.right, "x={x}");
                assert!(y >= origin.y + b.top && y < origin.y + b.bottom, "y={y}");
            }
        }
        assert!(touched > 0);
    }

    #[test]
    fn drawing_off_canvas_is_clipped() {
        let font = CaptionFont::Bitmap;
        let mut canvas = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
        font.draw(&mut canvas, Point::new(-200, -200), "clipped", Rgba([0, 0, 0, 255]));
        font.draw(&mut canvas, Point::new(500, 3), "clipped", Rgba([0, 0, 0, 255]));
        assert!(canvas.pixels().all(|p| *p == Rgb([255, 255, 255])));
    }

    #[test]
    fn translucent_ink_is_lighter_than_solid() {
        let font = CaptionFont::Bitmap;
        let mut solid = RgbImage::from_pixel(40, 20, Rgb([255, 255, 255]));
        let mut faint = solid.clone();
        font.draw(&mut solid, Point::new(0, 0), "M", Rgba([0, 0, 0, 255]));
        font.draw(&mut faint, Point::new(0, 0), "M", Rgba([0, 0, 0, 0x22]));
        let darkest = |img: &RgbImage| img.pixels().map(|p| p.0[0]).min().unwrap();
        assert!(darkest(&faint) > darkest(&solid));
        assert!(darkest(&faint) < 255);
    }
}
