//! # Raster Input
//!
//! Everything on the input side of the filter: the page header model, the
//! [`RasterSource`] trait the job driver pulls from, its CUPS and in-memory
//! implementations, and the per-page scanline buffer.
//!
//! ## Module Structure
//!
//! - [`header`]: `PageHeader` and `ColorSpace`
//! - [`source`]: the `RasterSource` trait
//! - [`cups`]: CUPS raster stream reader (v1, v2, v3)
//! - [`memory`]: pages held in memory
//! - [`planes`]: scanline buffer split into color planes

pub mod cups;
pub mod header;
pub mod memory;
pub mod planes;
pub mod source;

pub use cups::CupsRasterReader;
pub use header::{ColorSpace, PageHeader};
pub use memory::{MemoryPage, MemorySource};
pub use planes::PlaneBuffer;
pub use source::RasterSource;
