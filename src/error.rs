//! # Error Types
//!
//! This module defines error types used throughout the polkadots library.
//!
//! [`PolkaError`] covers everything that can go wrong while rendering a single
//! image. [`BatchError`] covers failures that reject a whole batch request
//! before any item is touched.

use thiserror::Error;

/// Main error type for rendering operations
#[derive(Debug, Error)]
pub enum PolkaError {
    /// Source image missing, unreadable, or undecodable
    #[error("Image load error: {0}")]
    ImageLoad(String),

    /// Color triple with wrong arity or out-of-range channels
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Source dimensions plan a grid with a zero side
    #[error("Degenerate geometry: {width}x{height} source yields an empty dot grid")]
    DegenerateGeometry { width: u32, height: u32 },

    /// Stamping capability failed
    #[error("Stamp error: {0}")]
    Stamp(String),

    /// Encoding or writing the output failed
    #[error("Save error: {0}")]
    Save(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that reject a batch request as a whole
#[derive(Debug, Error)]
pub enum BatchError {
    /// Device unsupported or not enough memory to start
    #[error("Device unavailable: {0}")]
    Unavailable(String),

    /// Malformed batch request
    #[error("Invalid request: {0}")]
    Request(String),
}
