//! # HP PCL Protocol Implementation
//!
//! This module provides low-level command builders for the subset of HP
//! Printer Command Language (PCL 5) needed to print raster pages on laser
//! and inkjet page printers.
//!
//! ## Module Structure
//!
//! - [`commands`]: Escape sequence encoding, printer reset, form feed
//! - [`page`]: Page control (size, length, copies, trays, duplex)
//! - [`graphics`]: Raster graphics (resolution, planes, data transfer)
//!
//! ## Usage Example
//!
//! ```
//! use pclraster::protocol::{commands, graphics, page};
//!
//! let mut data = Vec::new();
//!
//! data.extend(commands::reset());
//! data.extend(page::page_size(2)); // Letter
//! data.extend(graphics::resolution(300));
//! data.extend(graphics::raster_width(16));
//! data.extend(graphics::start_raster(1));
//!
//! // One 16-pixel row, all black
//! data.extend(graphics::transfer(&[0xFF, 0xFF], true));
//!
//! data.extend(graphics::end_raster());
//! data.extend(commands::form_feed());
//! data.extend(commands::reset());
//! ```

pub mod commands;
pub mod graphics;
pub mod page;
