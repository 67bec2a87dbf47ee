//! # Intermediate Representation (IR)
//!
//! Every PCL instruction the filter can emit is an [`Op`]. The page emitter
//! produces ops, `codegen` lowers them to bytes through the
//! [`protocol`](crate::protocol) builders, and [`parse`] reads a byte stream
//! back into ops.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────┐
//! │ PageEmitter │ ──► │     IR      │ ──► │ Codegen  │ ──► printer
//! │             │     │  (Op, ...)  │     │ (bytes)  │
//! └─────────────┘     └─────────────┘     └──────────┘
//!                            ▲                  │
//!                            └───── parse ◄─────┘
//! ```
//!
//! ## Benefits of IR
//!
//! 1. **One wire table**: each instruction's bytes are defined once
//! 2. **Testable**: assert on ops instead of escape strings
//! 3. **Inspectable**: `parse` turns captured printer output into a readable
//!    op list (`{:#?}`)
//!
//! ## Example
//!
//! ```
//! use pclraster::ir::{self, Op, Program};
//!
//! let mut program = Program::new();
//! program.push(Op::Reset);
//! program.push(Op::SkipLines(4));
//! program.push(Op::Transfer { data: &[0xFF], last: true });
//!
//! let bytes = program.to_bytes();
//! assert_eq!(ir::parse(&bytes)?, program);
//! # Ok::<(), pclraster::PclError>(())
//! ```

mod codegen;
mod ops;
mod parse;

pub use ops::*;
pub use parse::parse;
