//! # Polkadots - Halftone Polka-Dot Stylizer
//!
//! Polkadots turns a photograph into a grid of dots whose size follows the
//! local darkness of the image. It provides:
//!
//! - **Rendering core**: grid planning, box-filter downsampling, and dot
//!   rasterization onto a solid-color canvas
//! - **Configuration**: validated background and dot colors
//! - **Host layer**: batch processing, QR stamping, memory admission
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use polkadots::{
//!     config::{PolkaConfig, Rgb},
//!     host::{QrStamper, Stamper},
//!     render,
//! };
//!
//! let config = PolkaConfig::new(Rgb([255, 240, 200]), Rgb([180, 20, 60]));
//!
//! // Render the dots
//! let mut canvas = render::make_polka(Path::new("photo.jpg"), &config)?;
//!
//! // Stamp and save
//! QrStamper::new("https://example.com/p/42").stamp(&mut canvas)?;
//! canvas
//!     .save("photo_polka.png")
//!     .map_err(|e| polkadots::PolkaError::Save(e.to_string()))?;
//!
//! # Ok::<(), polkadots::error::PolkaError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`render`] | The image-synthesis pipeline |
//! | [`config`] | Colors and render options |
//! | [`host`] | Batch processing and host capabilities |
//! | [`logging`] | tracing subscriber setup |
//! | [`error`] | Error types |

pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod render;

// Re-exports for convenience
pub use config::{PolkaConfig, Rgb};
pub use error::{BatchError, PolkaError};
pub use render::{PolkaRenderer, make_polka, render_polka_dots};
