//! # Code Generation
//!
//! Converts IR ops to PCL bytes.

use std::io::{self, Write};

use super::ops::{Op, Program};
use crate::protocol::{commands, graphics, page};

impl Op<'_> {
    /// Write this op's PCL bytes to `out`.
    ///
    /// Raster transfers write their header and borrow the data directly,
    /// so no copy of the plane is made.
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        match self {
            Op::Transfer { data, last } => {
                out.write_all(&graphics::transfer_header(data.len(), *last))?;
                out.write_all(data)
            }
            other => out.write_all(&other.header_bytes()),
        }
    }

    /// PCL bytes for this op.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Op::Transfer { data, last } => graphics::transfer(data, *last),
            other => other.header_bytes(),
        }
    }

    /// Command bytes, excluding any raster payload.
    fn header_bytes(&self) -> Vec<u8> {
        match self {
            // ===== Job Control =====
            Op::Reset => commands::reset(),
            Op::Filler(count) => commands::filler(*count),

            // ===== Page Control =====
            Op::LinesPerInch(lpi) => page::lines_per_inch(*lpi),
            Op::HorizontalMotion(units) => page::horizontal_motion(*units),
            Op::PageSize(code) => page::page_size(*code),
            Op::PageLength(lines) => page::page_length(*lines),
            Op::TopMargin(lines) => page::top_margin(*lines),
            Op::Copies(count) => page::copies(*count),
            Op::PaperSource(source) => page::paper_source(*source),
            Op::MediaType(kind) => page::media_type(*kind),
            Op::Duplex(mode) => page::duplex(*mode),
            Op::PerforationSkip(enabled) => page::perforation_skip(*enabled),
            Op::SelectSide(side) => page::select_side(*side),
            Op::CursorX(x) => page::cursor_x(*x),
            Op::CursorY(y) => page::cursor_y(*y),
            Op::FormFeed => commands::form_feed(),

            // ===== Raster Graphics =====
            Op::Resolution(dpi) => graphics::resolution(*dpi),
            Op::RasterWidth(pixels) => graphics::raster_width(*pixels),
            Op::RasterHeight(lines) => graphics::raster_height(*lines),
            Op::SimpleColor(mode) => graphics::simple_color(*mode),
            Op::StartRaster(mode) => graphics::start_raster(*mode),
            Op::Compression(mode) => graphics::compression_mode(mode.pcl_mode()),
            Op::SkipLines(lines) => graphics::skip_lines(*lines),
            Op::Transfer { data, last } => graphics::transfer_header(data.len(), *last),
            Op::EndRaster => graphics::end_raster(),
            Op::EndRasterColor => graphics::end_raster_color(),
        }
    }
}

impl Program<'_> {
    /// Compile the program to PCL bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for op in &self.ops {
            out.extend(op.to_bytes());
        }
        out
    }

    /// Write the program to `out` without buffering it first.
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        for op in &self.ops {
            op.write_to(out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Compression;
    use crate::protocol::graphics::SimpleColor;
    use crate::protocol::page::{DuplexMode, PageSide};

    #[test]
    fn test_reset() {
        assert_eq!(Op::Reset.to_bytes(), vec![0x1B, b'E']);
    }

    #[test]
    fn test_transfer_write_matches_to_bytes() {
        let op = Op::Transfer {
            data: &[0xAA, 0x55, 0x00],
            last: false,
        };
        let mut written = Vec::new();
        op.write_to(&mut written).unwrap();
        assert_eq!(written, op.to_bytes());
        assert_eq!(written, b"\x1b*b3V\xaa\x55\x00");
    }

    #[test]
    fn test_program_bytes() {
        let program: Program = [
            Op::Resolution(300),
            Op::RasterWidth(16),
            Op::RasterHeight(2),
            Op::SimpleColor(SimpleColor::Kcmy),
            Op::StartRaster(1),
            Op::Compression(Compression::RunLength),
            Op::SkipLines(1),
            Op::EndRasterColor,
            Op::PaperSource(0),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            program.to_bytes(),
            b"\x1b*t300R\x1b*r16S\x1b*r2T\x1b*r-4U\x1b*r1A\x1b*b1M\x1b*b1Y\x1b*rC\x1b&l0H".to_vec()
        );
    }

    #[test]
    fn test_page_ops() {
        let program: Program = [
            Op::LinesPerInch(6),
            Op::HorizontalMotion(12),
            Op::Duplex(DuplexMode::ShortEdge),
            Op::PerforationSkip(false),
            Op::SelectSide(PageSide::Back),
            Op::FormFeed,
        ]
        .into_iter()
        .collect();

        let mut written = Vec::new();
        program.write_to(&mut written).unwrap();
        assert_eq!(written, b"\x1b&l6D\x1b&k12H\x1b&l2S\x1b&l0L\x1b&a2G\x0c".to_vec());
    }

    #[test]
    fn test_filler() {
        assert_eq!(Op::Filler(3).to_bytes(), vec![0, 0, 0]);
    }
}
