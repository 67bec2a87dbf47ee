//! # Print Jobs
//!
//! Everything between a raster source and the PCL output stream.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`driver`] | Page loop, cancellation checks, error teardown |
//! | [`emitter`] | Page session state and PCL output |
//! | [`feed`] | Blank line accounting |
//! | [`cancel`] | Cancel token and signal routing |
//! | [`status`] | CUPS status lines |

pub mod cancel;
pub mod driver;
pub mod emitter;
pub mod feed;
pub mod status;

pub use cancel::{CancelToken, SignalArm};
pub use driver::{Job, JobOutcome};
pub use emitter::PageEmitter;
pub use status::StatusReporter;
