//! # Dot Renderer
//!
//! Turns every grid cell into a filled circle on the canvas.
//!
//! ## Radius Mapping
//!
//! ```text
//! radius = round(0.6 * MULTIPLIER * (255 - luminance) / 255)
//!
//! luminance   0 (black)  -> 6
//! luminance 128 (gray)   -> 3
//! luminance 255 (white)  -> 0   (nothing drawn)
//! ```
//!
//! ## Overlap
//!
//! Cells are `MULTIPLIER` (10) pixels apart but a dot can reach radius 6, so
//! neighbouring dark dots overlap by a pixel or two. Dots are drawn in
//! row-major order and each one overwrites what is beneath it, so the later
//! dot (right, then below) owns the shared edge pixels. Edge dots can also
//! extend one pixel past the canvas; those pixels are clipped.

use image::{GrayImage, RgbImage};

use super::{MAX_RADIUS_FRACTION, MULTIPLIER, PADDING};
use crate::config::Rgb;

/// Largest radius any dot can have.
pub const MAX_RADIUS: u32 = 6;

/// One circle to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dot {
    /// Center in canvas pixels.
    pub center: (i64, i64),
    pub radius: u32,
    pub color: Rgb,
}

impl Dot {
    /// The dot for grid cell `(x, y)` with the given luminance.
    pub fn for_cell(x: u32, y: u32, luminance: u8, color: Rgb) -> Self {
        Self {
            center: (
                (x * MULTIPLIER + PADDING) as i64,
                (y * MULTIPLIER + PADDING) as i64,
            ),
            radius: dot_radius(luminance),
            color,
        }
    }
}

/// Radius for a cell of the given luminance. Darker cells get larger dots.
pub fn dot_radius(luminance: u8) -> u32 {
    let darkness = (255 - luminance) as f64 / 255.0;
    (MAX_RADIUS_FRACTION * MULTIPLIER as f64 * darkness).round() as u32
}

/// Largest `h` with `h * h <= n`.
fn isqrt(n: i64) -> i64 {
    let mut h = (n as f64).sqrt() as i64;
    while h * h > n {
        h -= 1;
    }
    while (h + 1) * (h + 1) <= n {
        h += 1;
    }
    h
}

/// Rasterize a filled circle: every pixel with `dx² + dy² <= r²`, clipped to
/// the canvas. A zero radius draws nothing.
pub fn fill_circle(canvas: &mut RgbImage, dot: &Dot) {
    if dot.radius == 0 {
        return;
    }

    let (width, height) = (canvas.width() as i64, canvas.height() as i64);
    let (cx, cy) = dot.center;
    let r = dot.radius as i64;
    let color = image::Rgb::from(dot.color);

    for dy in -r..=r {
        let py = cy + dy;
        if py < 0 || py >= height {
            continue;
        }

        let half = isqrt(r * r - dy * dy);
        let x0 = (cx - half).max(0);
        let x1 = (cx + half).min(width - 1);
        for px in x0..=x1 {
            canvas.put_pixel(px as u32, py as u32, color);
        }
    }
}

/// Draw one dot per grid cell, row-major, onto `canvas`.
pub fn draw_dots(canvas: &mut RgbImage, grid: &GrayImage, color: Rgb) {
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let luminance = grid.get_pixel(x, y)[0];
            fill_circle(canvas, &Dot::for_cell(x, y, luminance, color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use pretty_assertions::assert_eq;

    const BG: Rgb = Rgb::WHITE;
    const INK: Rgb = Rgb([200, 0, 0]);

    fn count_ink(canvas: &RgbImage) -> usize {
        canvas.pixels().filter(|p| p.0 == INK.0).count()
    }

    #[test]
    fn test_radius_endpoints() {
        assert_eq!(dot_radius(255), 0);
        assert_eq!(dot_radius(0), MAX_RADIUS);
        assert_eq!(dot_radius(128), 3);
    }

    #[test]
    fn test_radius_monotonic() {
        let mut prev = dot_radius(0);
        for v in 1..=255u8 {
            let r = dot_radius(v);
            assert!(r <= prev, "radius grew from {} to {} at {}", prev, r, v);
            assert!(r <= MAX_RADIUS);
            prev = r;
        }
    }

    #[test]
    fn test_dot_center() {
        let dot = Dot::for_cell(3, 7, 0, INK);
        assert_eq!(dot.center, (35, 75));
    }

    #[test]
    fn test_zero_radius_draws_nothing() {
        let mut canvas = RgbImage::from_pixel(10, 10, BG.into());
        fill_circle(
            &mut canvas,
            &Dot {
                center: (5, 5),
                radius: 0,
                color: INK,
            },
        );
        assert_eq!(count_ink(&canvas), 0);
    }

    #[test]
    fn test_circle_pixel_counts() {
        // Lattice points inside x² + y² <= r²
        for (radius, expected) in [(1, 5), (2, 13), (3, 29), (6, 113)] {
            let mut canvas = RgbImage::from_pixel(20, 20, BG.into());
            fill_circle(
                &mut canvas,
                &Dot {
                    center: (10, 10),
                    radius,
                    color: INK,
                },
            );
            assert_eq!(count_ink(&canvas), expected, "radius {}", radius);
        }
    }

    #[test]
    fn test_circle_clipped_at_edges() {
        let mut canvas = RgbImage::from_pixel(10, 10, BG.into());
        fill_circle(
            &mut canvas,
            &Dot {
                center: (0, 0),
                radius: 2,
                color: INK,
            },
        );
        // Quarter of the r=2 disc including the axes: 6 pixels
        assert_eq!(count_ink(&canvas), 6);
    }

    #[test]
    fn test_adjacent_dark_dots_touch() {
        // Two black cells side by side: the r=6 dots overlap at x = 9..=11
        let grid = GrayImage::from_pixel(2, 1, Luma([0]));
        let mut canvas = RgbImage::from_pixel(20, 10, BG.into());
        draw_dots(&mut canvas, &grid, INK);
        assert_eq!(canvas.get_pixel(10, 5).0, INK.0);
        assert_eq!(canvas.get_pixel(5, 5).0, INK.0);
        assert_eq!(canvas.get_pixel(15, 5).0, INK.0);
    }

    #[test]
    fn test_white_cell_stays_background() {
        let grid = GrayImage::from_pixel(3, 3, Luma([255]));
        let mut canvas = RgbImage::from_pixel(30, 30, BG.into());
        draw_dots(&mut canvas, &grid, INK);
        assert_eq!(count_ink(&canvas), 0);
    }
}
