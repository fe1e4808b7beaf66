//! # Polka-Dot Rendering
//!
//! The image-synthesis core. A photograph goes in, an RGB canvas of dots
//! comes out:
//!
//! ```text
//! DynamicImage ──► luminance ──► plan_grid ──► resample ──► new_canvas ──► draw_dots
//!   (loader)        (loader)      (plan)      (downsample)    (canvas)       (dots)
//! ```
//!
//! Every stage is pure and synchronous. The same source and colors always
//! produce a byte-identical canvas. Nothing here touches the file system
//! except [`make_polka`], which only reads the source.
//!
//! ## Usage
//!
//! ```
//! use image::{DynamicImage, GrayImage, Luma};
//! use polkadots::config::PolkaConfig;
//! use polkadots::render;
//!
//! let source = DynamicImage::ImageLuma8(GrayImage::from_pixel(120, 80, Luma([128])));
//! let canvas = render::render_polka_dots(&source, &PolkaConfig::default())?;
//!
//! assert_eq!(canvas.dimensions(), (1200, 800));
//! # Ok::<(), polkadots::PolkaError>(())
//! ```

pub mod canvas;
pub mod dots;
pub mod downsample;
pub mod loader;
pub mod plan;

use std::path::Path;

use image::{DynamicImage, GrayImage, RgbImage};

use crate::config::PolkaConfig;
use crate::error::PolkaError;
use downsample::{AreaAverage, Resampler};
use plan::GridSize;

/// Output pixels per grid cell, along each axis.
pub const MULTIPLIER: u32 = 10;

/// Offset of a dot center from its cell's top-left corner.
pub const PADDING: u32 = MULTIPLIER / 2;

/// Largest dot radius as a fraction of [`MULTIPLIER`].
pub const MAX_RADIUS_FRACTION: f64 = 0.6;

/// Runs the pipeline with an injectable downsampling stage.
pub struct PolkaRenderer {
    resampler: Box<dyn Resampler>,
}

impl Default for PolkaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolkaRenderer {
    /// Renderer using the [`AreaAverage`] box filter.
    pub fn new() -> Self {
        Self::with_resampler(AreaAverage)
    }

    pub fn with_resampler(resampler: impl Resampler + 'static) -> Self {
        Self {
            resampler: Box::new(resampler),
        }
    }

    /// Render a decoded source image.
    pub fn render(
        &self,
        source: &DynamicImage,
        config: &PolkaConfig,
    ) -> Result<RgbImage, PolkaError> {
        self.render_luminance(&loader::luminance(source), config)
    }

    /// Render from an already computed luminance image.
    pub fn render_luminance(
        &self,
        luma: &GrayImage,
        config: &PolkaConfig,
    ) -> Result<RgbImage, PolkaError> {
        let (width, height) = luma.dimensions();
        let grid_size = plan::plan_grid(width, height)?;

        let grid = self.resampler.resample(luma, grid_size);
        debug_assert_eq!(grid.dimensions(), (grid_size.width, grid_size.height));

        let mut canvas = canvas::new_canvas(grid_size, config.background_color);
        dots::draw_dots(&mut canvas, &grid, config.dots_color);

        tracing::debug!(
            source = %format!("{}x{}", width, height),
            grid = %format!("{}x{}", grid_size.width, grid_size.height),
            cells = grid_size.cells(),
            canvas = %format!("{}x{}", canvas.width(), canvas.height()),
            "rendered polka dots"
        );

        Ok(canvas)
    }

    /// Plan only: the grid a source of this size would get.
    pub fn plan(&self, width: u32, height: u32) -> Result<GridSize, PolkaError> {
        plan::plan_grid(width, height)
    }
}

/// Render `source` with the default renderer.
pub fn render_polka_dots(
    source: &DynamicImage,
    config: &PolkaConfig,
) -> Result<RgbImage, PolkaError> {
    PolkaRenderer::new().render(source, config)
}

/// Load the image at `path` and render it.
pub fn make_polka(path: &Path, config: &PolkaConfig) -> Result<RgbImage, PolkaError> {
    let source = loader::open(path)?;
    render_polka_dots(&source, config)
}
