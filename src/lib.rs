//! # pclraster - CUPS Raster to HP PCL
//!
//! pclraster turns CUPS raster pages into HP PCL for laser and inkjet
//! printers. It provides:
//!
//! - **Raster input**: CUPS raster v1/v2/v3 reader and an in-memory source
//! - **Line compression**: PCL run-length and pack-bits encoders
//! - **Page protocol**: PCL page setup, raster transfer and page teardown
//! - **Job control**: blank line skipping, duplex sides, cancellation
//!
//! ## Quick Start
//!
//! ```
//! use pclraster::{
//!     job::{Job, JobOutcome, PageEmitter, StatusReporter},
//!     printer::PrinterConfig,
//!     raster::{MemoryPage, MemorySource, PageHeader},
//! };
//!
//! // One letter-size page, a single line of ink halfway down
//! let header = PageHeader::monochrome(2550, 3300);
//! let mut lines = vec![vec![0u8; 319]; 3300];
//! lines[1650].fill(0xFF);
//!
//! let mut job = Job::new(
//!     MemorySource::new(vec![MemoryPage::new(header, lines)]),
//!     PageEmitter::new(Vec::new()),
//!     StatusReporter::new(Vec::new()),
//!     PrinterConfig::default(),
//! );
//! assert_eq!(job.run()?, JobOutcome::Completed { pages: 1 });
//!
//! let (_, emitter, _) = job.into_parts();
//! let pcl = emitter.into_inner();
//! assert!(pcl.ends_with(b"\x0c\x1bE"));
//! # Ok::<(), pclraster::PclError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`raster`] | Page headers, raster sources, plane splitting |
//! | [`codec`] | Line compression |
//! | [`protocol`] | PCL command builders |
//! | [`ir`] | PCL instruction set, codegen and decoder |
//! | [`job`] | Page emitter and job driver |
//! | [`printer`] | Filter configuration |
//! | [`error`] | Error types |

pub mod codec;
pub mod error;
pub mod ir;
pub mod job;
pub mod printer;
pub mod protocol;
pub mod raster;

// Re-exports for convenience
pub use error::PclError;
pub use job::{Job, JobOutcome};
pub use printer::PrinterConfig;
