//! Asset color palette & hex helpers.
//! Colors travel through config as `#RRGGBB` / `#RRGGBBAA` strings and are parsed here.

use image::{Rgb, Rgba};

use crate::error::{AssetError, Result};

/// iOS system blue used for the icon frames.
pub const MAIN_BLUE: &str = "#007AFF";
pub const WHITE: &str = "#FFFFFF";
pub const BLACK: &str = "#000000";
/// Caption drop shadow: black at alpha 0x22.
pub const SHADOW: &str = "#00000022";

/// Parse `#RRGGBB` (opaque) or `#RRGGBBAA`. Leading `#` is required.
pub fn parse_hex(s: &str) -> Result<Rgba<u8>> {
    let invalid = || AssetError::InvalidColor(s.to_string());
    let hex = s.strip_prefix('#').ok_or_else(invalid)?;
    if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    let a = if hex.len() == 8 { channel(6)? } else { 255 };
    Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, a]))
}

/// Parse and drop alpha; for opaque fills on RGB canvases.
pub fn parse_rgb(s: &str) -> Result<Rgb<u8>> {
    let Rgba([r, g, b, _]) = parse_hex(s)?;
    Ok(Rgb([r, g, b]))
}

/// Source-over blend of `src` onto an opaque pixel with extra `coverage` (0..=1).
#[inline]
pub fn blend_over(dst: &mut Rgb<u8>, src: Rgba<u8>, coverage: f32) {
    let a = (src.0[3] as f32 / 255.0) * coverage.clamp(0.0, 1.0);
    if a <= 0.0 {
        return;
    }
    for c in 0..3 {
        let d = dst.0[c] as f32;
        let s = src.0[c] as f32;
        dst.0[c] = (s * a + d * (1.0 - a)).round().clamp(0.0, 255.0) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults() {
        assert_eq!(parse_hex(MAIN_BLUE).unwrap(), Rgba([0, 122, 255, 255]));
        assert_eq!(parse_hex(SHADOW).unwrap(), Rgba([0, 0, 0, 0x22]));
        assert_eq!(parse_rgb(WHITE).unwrap(), Rgb([255, 255, 255]));
        assert_eq!(parse_hex("#00aaFF").unwrap(), Rgba([0, 0xaa, 0xff, 255]));
    }

    #[test]
    fn rejects_malformed() {
        for bad in ["007AFF", "#07F", "#007AFFF", "#GG0000", "", "#", "#ééé"] {
            let err = parse_hex(bad).unwrap_err();
            assert!(matches!(err, AssetError::InvalidColor(_)), "{bad:?} -> {err}");
        }
    }

    #[test]
    fn blend_respects_alpha() {
        let mut px = Rgb([255, 255, 255]);
        blend_over(&mut px, Rgba([0, 0, 0, 255]), 1.0);
        assert_eq!(px, Rgb([0, 0, 0]));

        let mut px = Rgb([255, 255, 255]);
        blend_over(&mut px, Rgba([0, 0, 0, 0x22]), 1.0);
        // 255 * (1 - 34/255) = 221
        assert_eq!(px, Rgb([221, 221, 221]));

        let mut px = Rgb([10, 20, 30]);
        blend_over(&mut px, Rgba([0, 0, 0, 255]), 0.0);
        assert_eq!(px, Rgb([10, 20, 30]));
    }
}
