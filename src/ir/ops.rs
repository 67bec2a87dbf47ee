//! # IR Opcodes
//!
//! One variant per PCL instruction the filter emits. The page emitter builds
//! ops and `codegen` turns them into bytes, so the wire
//! format lives in one table instead of being spread through control flow.
//!
//! ```text
//! PageEmitter → Op → codegen → protocol builders → bytes
//!                ▲                                   │
//!                └───────────── parse ◄──────────────┘
//! ```
//!
//! Ops borrow raster data, so building a line's ops never copies the
//! compressed planes.

use crate::codec::Compression;
use crate::protocol::graphics::SimpleColor;
use crate::protocol::page::{DuplexMode, PageSide};

/// IR opcodes - one per PCL instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op<'a> {
    // ========== Job Control ==========
    /// Printer reset (ESC E).
    Reset,

    /// NUL bytes flushing a cancelled raster transfer.
    Filler(usize),

    // ========== Page Control ==========
    /// Line spacing in lines per inch (ESC & l # D).
    LinesPerInch(u32),

    /// Horizontal motion index in 1/120 inch (ESC & k # H).
    HorizontalMotion(u32),

    /// Page size code (ESC & l # A).
    PageSize(u32),

    /// Page length in lines (ESC & l # P).
    PageLength(u32),

    /// Top margin in lines (ESC & l # E).
    TopMargin(u32),

    /// Number of copies (ESC & l # X).
    Copies(u32),

    /// Paper source; 0 ejects the page (ESC & l # H).
    PaperSource(u32),

    /// Media type (ESC & l # M).
    MediaType(u32),

    /// Simplex or duplex binding (ESC & l # S).
    Duplex(DuplexMode),

    /// Perforation skip (ESC & l # L).
    PerforationSkip(bool),

    /// Duplex side selection (ESC & a # G).
    SelectSide(PageSide),

    /// Horizontal cursor position in decipoints (ESC & a # H).
    CursorX(u32),

    /// Vertical cursor position in decipoints (ESC & a # V).
    CursorY(u32),

    /// Eject the page (FF).
    FormFeed,

    // ========== Raster Graphics ==========
    /// Raster resolution in dpi (ESC * t # R).
    Resolution(u32),

    /// Raster width in pixels (ESC * r # S).
    RasterWidth(u32),

    /// Raster height in lines (ESC * r # T).
    RasterHeight(u32),

    /// Planes per row (ESC * r # U).
    SimpleColor(SimpleColor),

    /// Start raster graphics (ESC * r # A).
    StartRaster(u32),

    /// Compression mode for following transfers (ESC * b # M).
    Compression(Compression),

    /// Skip blank rows (ESC * b # Y).
    SkipLines(u32),

    /// One plane of row data (ESC * b # V, or W when `last`).
    Transfer { data: &'a [u8], last: bool },

    /// End raster graphics (ESC * r 0 B).
    EndRaster,

    /// End color raster graphics (ESC * r C).
    EndRasterColor,
}

/// A sequence of ops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program<'a> {
    pub ops: Vec<Op<'a>>,
}

impl<'a> Program<'a> {
    /// Create an empty program.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Add an op.
    pub fn push(&mut self, op: Op<'a>) {
        self.ops.push(op);
    }

    /// Add several ops.
    pub fn extend(&mut self, ops: impl IntoIterator<Item = Op<'a>>) {
        self.ops.extend(ops);
    }

    /// Get the number of ops in the program.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if the program is empty.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Iterate over ops.
    pub fn iter(&self) -> impl Iterator<Item = &Op<'a>> {
        self.ops.iter()
    }

    /// Count ops matching a predicate.
    pub fn count(&self, pred: impl Fn(&Op<'a>) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl<'a> FromIterator<Op<'a>> for Program<'a> {
    fn from_iter<T: IntoIterator<Item = Op<'a>>>(iter: T) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for Program<'a> {
    type Item = Op<'a>;
    type IntoIter = std::vec::IntoIter<Op<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'p, 'a> IntoIterator for &'p Program<'a> {
    type Item = &'p Op<'a>;
    type IntoIter = std::slice::Iter<'p, Op<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_new() {
        let program = Program::new();
        assert!(program.is_empty());
    }

    #[test]
    fn test_program_push() {
        let mut program = Program::new();
        program.push(Op::Reset);
        program.push(Op::SkipLines(3));
        program.push(Op::Transfer {
            data: &[1, 2],
            last: true,
        });
        assert_eq!(program.len(), 3);
        assert_eq!(program.count(|op| matches!(op, Op::Transfer { .. })), 1);
    }

    #[test]
    fn test_from_iterator() {
        let program: Program = [Op::Reset, Op::FormFeed].into_iter().collect();
        assert_eq!(program.ops, vec![Op::Reset, Op::FormFeed]);
    }
}
