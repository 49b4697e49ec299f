//! Rectangle, pie-slice and rounded-rectangle fills over `image` buffers.
//!
//! Coordinates are integer pixel positions with inclusive corners: a box from
//! `(0, 0)` to `(3, 3)` covers 16 pixels. Every primitive clips to the canvas,
//! so callers may pass boxes that extend past the edges (or are inverted, which
//! fills nothing).
//!
//! A rounded rectangle is composed from two overlapping straight rectangles and
//! four full pie slices centered on the inset corners. With opaque colors the
//! draw order does not matter.

use image::GenericImage;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box given by its upper-left and lower-right corners (both inclusive).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Square box `(pad, pad) .. (size - pad, size - pad)`.
    pub const fn padded_square(size: i32, pad: i32) -> Self {
        Self::new(Point::new(pad, pad), Point::new(size - pad, size - pad))
    }

    pub const fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y
    }

    /// Pixel span on x (0 when inverted).
    pub fn width(&self) -> u32 {
        (self.max.x - self.min.x + 1).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.max.y - self.min.y + 1).max(0) as u32
    }

    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// True when `inner` lies inside `self` without touching any edge.
    pub const fn strictly_contains(&self, inner: &BoundingBox) -> bool {
        inner.min.x > self.min.x
            && inner.min.y > self.min.y
            && inner.max.x < self.max.x
            && inner.max.y < self.max.y
    }

    /// Intersection with `0..w` x `0..h` as inclusive `u32` ranges, `None` if nothing is visible.
    fn clip(&self, w: u32, h: u32) -> Option<(u32, u32, u32, u32)> {
        if self.is_empty() || w == 0 || h == 0 {
            return None;
        }
        let x0 = self.min.x.max(0) as i64;
        let y0 = self.min.y.max(0) as i64;
        let x1 = (self.max.x as i64).min(w as i64 - 1);
        let y1 = (self.max.y as i64).min(h as i64 - 1);
        if x1 < x0 || y1 < y0 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

/// Opaque fill of every canvas pixel inside `bbox`.
pub fn fill_rect<I: GenericImage>(canvas: &mut I, bbox: BoundingBox, color: I::Pixel) {
    let Some((x0, y0, x1, y1)) = bbox.clip(canvas.width(), canvas.height()) else {
        return;
    };
    for y in y0..=y1 {
        for x in x0..=x1 {
            canvas.put_pixel(x, y, color);
        }
    }
}

/// Fill the sector of the ellipse inscribed in `bbox` from `start_deg` to `end_deg`.
///
/// Angles are degrees measured clockwise from 3 o'clock (image y points down).
/// An end before the start wraps forward by whole turns, so `270..0` is the
/// upper-right quadrant. A sweep of 360 or more fills the whole ellipse.
/// A zero-width or zero-height box degenerates to a line (or single pixel)
/// through the center.
pub fn fill_pie_slice<I: GenericImage>(
    canvas: &mut I,
    bbox: BoundingBox,
    start_deg: f32,
    end_deg: f32,
    color: I::Pixel,
) {
    let Some((x0, y0, x1, y1)) = bbox.clip(canvas.width(), canvas.height()) else {
        return;
    };
    let cx = (bbox.min.x as f64 + bbox.max.x as f64) * 0.5;
    let cy = (bbox.min.y as f64 + bbox.max.y as f64) * 0.5;
    let rx = (bbox.max.x - bbox.min.x) as f64 * 0.5;
    let ry = (bbox.max.y - bbox.min.y) as f64 * 0.5;
    // Multiplied-out ellipse test keeps zero radii well defined.
    let (rx2, ry2) = (rx * rx, ry * ry);
    let limit = rx2 * ry2;

    // An end angle before the start wraps forward by whole turns: 270..0 is 270..360.
    let (start_deg, mut end_deg) = (start_deg as f64, end_deg as f64);
    if end_deg < start_deg {
        end_deg += ((start_deg - end_deg) / 360.0).ceil() * 360.0;
    }
    let sweep = end_deg - start_deg;
    let full = sweep >= 360.0;
    let start = start_deg.rem_euclid(360.0);

    for y in y0..=y1 {
        let dy = y as f64 - cy;
        for x in x0..=x1 {
            let dx = x as f64 - cx;
            if dx * dx * ry2 + dy * dy * rx2 > limit {
                continue;
            }
            if !full && !(dx == 0.0 && dy == 0.0) {
                let angle = dy.atan2(dx).to_degrees().rem_euclid(360.0);
                if (angle - start).rem_euclid(360.0) > sweep {
                    continue;
                }
            }
            canvas.put_pixel(x, y, color);
        }
    }
}

/// Full pie slice of the given radius around `center`.
pub fn fill_circle<I: GenericImage>(canvas: &mut I, center: Point, radius: i32, color: I::Pixel) {
    let bbox = BoundingBox::new(
        Point::new(center.x - radius, center.y - radius),
        Point::new(center.x + radius, center.y + radius),
    );
    fill_pie_slice(canvas, bbox, 0.0, 360.0, color);
}

/// Approximate rounded rectangle: two inset rectangles plus a circle at each inset corner.
///
/// `radius` is not validated. A radius of 0 yields exactly `fill_rect(bbox)`; a
/// radius beyond half the shorter side produces whatever the composition draws
/// (inverted inset rectangles are empty, circles still land on the swapped corners).
pub fn fill_rounded_rect<I: GenericImage>(
    canvas: &mut I,
    bbox: BoundingBox,
    radius: i32,
    color: I::Pixel,
) {
    let BoundingBox { min, max } = bbox;
    let r = radius;

    fill_rect(
        canvas,
        BoundingBox::new(Point::new(min.x, min.y + r), Point::new(max.x, max.y - r)),
        color,
    );
    fill_rect(
        canvas,
        BoundingBox::new(Point::new(min.x + r, min.y), Point::new(max.x - r, max.y)),
        color,
    );
    for center in [
        Point::new(min.x + r, min.y + r),
        Point::new(max.x - r, min.y + r),
        Point::new(min.x + r, max.y - r),
        Point::new(max.x - r, max.y - r),
    ] {
        fill_circle(canvas, center, r, color);
    }
}
