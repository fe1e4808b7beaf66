//! # Dimension Planner
//!
//! Decides how many dots the output gets along each axis. The longer side of
//! the source always gets [`MAX_DOTS`] dots; the other side is scaled from it.
//!
//! ## The Width Formula
//!
//! ```text
//! calc = round(H * (MAX_DOTS / W))
//!
//! H >= W  (portrait or square):  grid = (calc, MAX_DOTS)
//! H <  W  (landscape):           grid = (MAX_DOTS, calc)
//! ```
//!
//! The divisor is `W` in both branches. For portrait sources that means the
//! short axis is `H * 120 / W`, which is at least 120 and usually larger than
//! the long axis. Existing renders depend on this geometry, so it is kept.

use crate::error::PolkaError;

use super::MULTIPLIER;

/// Dots along the longer side of the source.
pub const MAX_DOTS: u32 = 120;

/// Largest canvas the planner accepts, in bytes (512 MiB, the `image`
/// crate's default allocation limit).
pub const MAX_CANVAS_BYTES: u64 = 512 * 1024 * 1024;

/// Dot grid dimensions, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    /// Number of cells in the grid.
    pub fn cells(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Canvas dimensions `(width, height)` in pixels for this grid.
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.width * MULTIPLIER, self.height * MULTIPLIER)
    }

    /// Bytes of the RGB canvas for this grid, `None` on overflow.
    pub fn canvas_bytes(&self) -> Option<u64> {
        (self.width as u64)
            .checked_mul(MULTIPLIER as u64)?
            .checked_mul(self.height as u64)?
            .checked_mul(MULTIPLIER as u64)?
            .checked_mul(3)
    }
}

/// Plan the dot grid for a `width` x `height` source.
///
/// Fails with [`PolkaError::DegenerateGeometry`] when either source side is
/// zero, when the scaled side rounds down to zero (very wide, very short
/// sources), or when the canvas would exceed [`MAX_CANVAS_BYTES`] (very
/// tall, very narrow sources, since the scaled side grows with `H / W`).
pub fn plan_grid(width: u32, height: u32) -> Result<GridSize, PolkaError> {
    let degenerate = PolkaError::DegenerateGeometry { width, height };
    if width == 0 || height == 0 {
        return Err(degenerate);
    }

    let calc = (height as f64 * (MAX_DOTS as f64 / width as f64)).round();
    if calc < 1.0 || calc > (u32::MAX / MULTIPLIER) as f64 {
        return Err(degenerate);
    }
    let calc = calc as u32;

    let grid = if height == height.max(width) {
        GridSize {
            width: calc,
            height: MAX_DOTS,
        }
    } else {
        GridSize {
            width: MAX_DOTS,
            height: calc,
        }
    };

    match grid.canvas_bytes() {
        Some(bytes) if bytes <= MAX_CANVAS_BYTES => Ok(grid),
        _ => Err(degenerate),
    }
}
