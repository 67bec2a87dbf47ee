//! # Error Types
//!
//! This module defines error types used throughout the pclraster library.

use thiserror::Error;

/// Main error type for pclraster operations
#[derive(Debug, Error)]
pub enum PclError {
    /// I/O error wrapper (raster input, printer output, signal registration)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not a CUPS raster stream
    #[error("Invalid raster stream: {0}")]
    InvalidRaster(String),

    /// A page header describes a page this filter cannot emit
    #[error("Invalid page header: {0}")]
    InvalidHeader(String),

    /// A filter option could not be parsed
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// Compressed or PCL data could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// An emitter operation was called in the wrong page state
    #[error("Invalid emitter state: {0}")]
    State(String),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, PclError>;
