//! # Downsampler
//!
//! Reduces a luminance image to one sample per grid cell.
//!
//! The default [`AreaAverage`] resampler is a box filter: every output cell
//! covers a rectangular footprint of the source, and its value is the mean of
//! the source pixels under that footprint, weighted by how much of each pixel
//! the footprint covers. Fine detail is averaged away instead of being
//! point-sampled, which keeps dot sizes stable on noisy photos.
//!
//! ```text
//! source row:  | 10 | 20 | 30 | 40 | 50 |      5 px -> 2 cells
//! footprints:  [----cell 0---][---cell 1----]  2.5 px each
//! cell 0 = (10 + 20 + 0.5*30) / 2.5 = 18
//! ```
//!
//! The same weights work when the grid is larger than the source (a 1x1
//! image planned to 120x120): each footprint then covers part of a single
//! pixel and copies it.

use image::{GrayImage, Luma, imageops::FilterType};

use super::plan::GridSize;

/// Resamples a luminance image to the planned grid.
///
/// Implementations must return an image of exactly `grid.width` x
/// `grid.height`.
pub trait Resampler: Send + Sync {
    fn resample(&self, luma: &GrayImage, grid: GridSize) -> GrayImage;
}

/// Coverage-weighted box filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct AreaAverage;

/// Adapter over `image::imageops::resize` for hosts that prefer one of the
/// `image` crate's filters.
#[derive(Debug, Clone, Copy)]
pub struct ImageFilter(pub FilterType);

/// Per output index, the source indices it covers and how much of each.
fn axis_weights(src: u32, dst: u32) -> Vec<Vec<(u32, f64)>> {
    let scale = src as f64 / dst as f64;

    (0..dst)
        .map(|i| {
            let start = i as f64 * scale;
            let end = (i + 1) as f64 * scale;
            let first = start.floor() as u32;
            let last = (end.ceil() as u32).min(src);

            (first..last)
                .filter_map(|p| {
                    let overlap = end.min(p as f64 + 1.0) - start.max(p as f64);
                    (overlap > 0.0).then_some((p, overlap))
                })
                .collect()
        })
        .collect()
}

impl Resampler for AreaAverage {
    fn resample(&self, luma: &GrayImage, grid: GridSize) -> GrayImage {
        let (src_w, src_h) = luma.dimensions();
        let x_weights = axis_weights(src_w, grid.width);
        let y_weights = axis_weights(src_h, grid.height);

        let mut out = GrayImage::new(grid.width, grid.height);

        for (gy, ys) in y_weights.iter().enumerate() {
            for (gx, xs) in x_weights.iter().enumerate() {
                let mut sum = 0.0;
                let mut total = 0.0;
                for &(sy, wy) in ys {
                    for &(sx, wx) in xs {
                        let w = wx * wy;
                        sum += luma.get_pixel(sx, sy)[0] as f64 * w;
                        total += w;
                    }
                }

                let value = if total > 0.0 { sum / total } else { 255.0 };
                out.put_pixel(
                    gx as u32,
                    gy as u32,
                    Luma([value.round().clamp(0.0, 255.0) as u8]),
                );
            }
        }

        out
    }
}

impl Resampler for ImageFilter {
    fn resample(&self, luma: &GrayImage, grid: GridSize) -> GrayImage {
        image::imageops::resize(luma, grid.width, grid.height, self.0)
    }
}
