//! # Stamps
//!
//! Overlays applied to a finished canvas before it is saved. The host decides
//! which one to use; the renderer never stamps on its own.
//!
//! [`QrStamper`] places a QR code in the bottom-right corner:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ ● ● ● ● ● ● ● ● ● ● ● ● ● ● │
//! │ ● ● ● ● ● ● ● ● ● ● ● ● ● ● │
//! │ ● ● ● ● ● ● ● ● ● ┌──────┐ │
//! │ ● ● ● ● ● ● ● ● ● │  QR  │ │
//! │ ● ● ● ● ● ● ● ● ● └──────┘ │  ← margin_px from each edge
//! └──────────────────────────────┘
//! ```

use image::{Rgb, RgbImage};
use qrcode::{Color, EcLevel, QrCode};

use crate::error::PolkaError;

/// Applies an overlay to a finished canvas.
pub trait Stamper: Send + Sync {
    fn stamp(&self, canvas: &mut RgbImage) -> Result<(), PolkaError>;
}

/// Leaves the canvas untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStamp;

impl Stamper for NoStamp {
    fn stamp(&self, _canvas: &mut RgbImage) -> Result<(), PolkaError> {
        Ok(())
    }
}

/// White border around the code, in modules.
const QUIET_ZONE_MODULES: usize = 2;

/// Stamps a QR code encoding `payload` into the bottom-right corner.
#[derive(Debug, Clone)]
pub struct QrStamper {
    pub payload: String,
    /// Pixels per QR module. Default: 4
    pub module_px: u32,
    /// Gap between the stamp and the canvas edges. Default: 8
    pub margin_px: u32,
}

impl QrStamper {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            module_px: 4,
            margin_px: 8,
        }
    }
}

impl Stamper for QrStamper {
    fn stamp(&self, canvas: &mut RgbImage) -> Result<(), PolkaError> {
        let code = QrCode::with_error_correction_level(self.payload.as_bytes(), EcLevel::M)
            .map_err(|e| PolkaError::Stamp(format!("QR code generation failed: {}", e)))?;

        let module_px = self.module_px.max(1) as usize;
        let modules = code.width();
        let size = (modules + 2 * QUIET_ZONE_MODULES) * module_px;
        let margin = self.margin_px as usize;

        let (width, height) = (canvas.width() as usize, canvas.height() as usize);
        if size + margin > width || size + margin > height {
            tracing::warn!(
                size,
                canvas = %format!("{}x{}", width, height),
                "canvas too small for QR stamp, skipping"
            );
            return Ok(());
        }

        let x0 = width - margin - size;
        let y0 = height - margin - size;
        let quiet = QUIET_ZONE_MODULES * module_px;

        for py in 0..size {
            for px in 0..size {
                let in_code = px >= quiet && py >= quiet && px < size - quiet && py < size - quiet;
                let dark = in_code
                    && code[((px - quiet) / module_px, (py - quiet) / module_px)] == Color::Dark;

                let color = if dark { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) };
                canvas.put_pixel((x0 + px) as u32, (y0 + py) as u32, color);
            }
        }

        Ok(())
    }
}
