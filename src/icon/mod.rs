//! App icon composition: three nested rounded frames on a square canvas,
//! plus the asset catalog manifest that maps each PNG to its device slots.

use image::{Rgb, RgbImage};
use serde::Serialize;

use crate::raster::{fill_rounded_rect, BoundingBox};

/// Device slot an icon image fills in the asset catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IconSlot {
    /// Logical size in points (square).
    pub points: u32,
    pub scale: u32,
    pub idiom: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IconSize {
    pub label: &'static str,
    pub px: u32,
    pub slots: &'static [IconSlot],
}

const fn iphone(points: u32, scale: u32) -> IconSlot {
    IconSlot { points, scale, idiom: "iphone" }
}

pub const ICON_SIZES: [IconSize; 8] = [
    IconSize { label: "40", px: 40, slots: &[iphone(20, 2)] },
    IconSize { label: "60", px: 60, slots: &[iphone(20, 3)] },
    IconSize { label: "58", px: 58, slots: &[iphone(29, 2)] },
    IconSize { label: "87", px: 87, slots: &[iphone(29, 3)] },
    IconSize { label: "80", px: 80, slots: &[iphone(40, 2)] },
    IconSize { label: "120", px: 120, slots: &[iphone(40, 3), iphone(60, 2)] },
    IconSize { label: "180", px: 180, slots: &[iphone(60, 3)] },
    IconSize {
        label: "1024",
        px: 1024,
        slots: &[IconSlot { points: 1024, scale: 1, idiom: "ios-marketing" }],
    },
];

/// Always white: the gap between the outer and inner frames.
const FRAME_GAP: Rgb<u8> = Rgb([255, 255, 255]);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IconPalette {
    pub main: Rgb<u8>,
    pub background: Rgb<u8>,
}

impl Default for IconPalette {
    fn default() -> Self {
        Self { main: Rgb([0x00, 0x7A, 0xFF]), background: Rgb([0xFF, 0xFF, 0xFF]) }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameDescriptor {
    pub bbox: BoundingBox,
    pub radius: i32,
    pub color: Rgb<u8>,
}

/// Outer, middle and inner frames for an `size` x `size` icon, back to front.
///
/// outer: pad = size/8, radius = size/12
/// middle: pad doubled, radius halved
/// inner: pad = middle pad + a third of the middle span, radius thirded
pub fn frame_descriptors(size: u32, palette: &IconPalette) -> [FrameDescriptor; 3] {
    let s = size as i32;
    let pad = s / 8;
    let radius = s / 12;
    let middle_pad = pad * 2;
    let inner_pad = middle_pad + (s - 2 * middle_pad) / 3;
    [
        FrameDescriptor { bbox: BoundingBox::padded_square(s, pad), radius, color: palette.main },
        FrameDescriptor {
            bbox: BoundingBox::padded_square(s, middle_pad),
            radius: radius / 2,
            color: FRAME_GAP,
        },
        FrameDescriptor {
            bbox: BoundingBox::padded_square(s, inner_pad),
            radius: radius / 3,
            color: palette.main,
        },
    ]
}

pub fn compose_icon(size: u32, palette: &IconPalette) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(size, size, palette.background);
    for frame in frame_descriptors(size, palette) {
        fill_rounded_rect(&mut canvas, frame.bbox, frame.radius, frame.color);
    }
    canvas
}

pub fn icon_file_name(size: &IconSize) -> String {
    format!("logo_size_{}.png", size.label)
}

// ----------------------------- Asset catalog manifest -----------------------------

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ManifestImage {
    pub size: String,
    pub idiom: String,
    pub filename: String,
    pub scale: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ManifestInfo {
    pub version: u32,
    pub author: String,
}

/// `Contents.json` of an `.appiconset`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AppIconManifest {
    pub images: Vec<ManifestImage>,
    pub info: ManifestInfo,
}

impl AppIconManifest {
    pub const FILE_NAME: &'static str = "Contents.json";

    /// One entry per slot; an image serving two slots is listed twice.
    pub fn for_sizes(sizes: &[IconSize]) -> Self {
        let images = sizes
            .iter()
            .flat_map(|size| {
                size.slots.iter().map(move |slot| ManifestImage {
                    size: format!("{0}x{0}", slot.points),
                    idiom: slot.idiom.to_string(),
                    filename: icon_file_name(size),
                    scale: format!("{}x", slot.scale),
                })
            })
            .collect();
        Self { images, info: ManifestInfo { version: 1, author: "xcode".into() } }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
