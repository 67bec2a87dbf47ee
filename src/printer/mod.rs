//! # Printer Module
//!
//! This module provides filter configuration.
//!
//! ## Modules
//!
//! - [`config`]: Filter settings and CUPS option parsing

pub mod config;

pub use config::{PlaneRemainder, PrinterConfig};
