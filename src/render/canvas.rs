//! Canvas compositor: the blank output raster dots are drawn onto.

use image::RgbImage;

use super::plan::GridSize;
use crate::config::Rgb;

/// Allocate a canvas of `grid * MULTIPLIER` pixels, every pixel set to
/// `background`.
pub fn new_canvas(grid: GridSize, background: Rgb) -> RgbImage {
    let (width, height) = grid.canvas_size();
    RgbImage::from_pixel(width, height, background.into())
}
