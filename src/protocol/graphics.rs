//! # PCL Raster Graphics Commands
//!
//! A raster page is a fixed sequence of commands:
//!
//! ```text
//! ESC * t # R        resolution
//! ESC * r # S        width in pixels
//! ESC * r # T        height in lines
//! ESC * r -# U       planes per row (color only)
//! ESC * r 1 A        start raster graphics at the cursor
//! ESC * b # M        compression mode
//!   ESC * b # Y      skip blank lines          ┐
//!   ESC * b # V data plane, more planes follow │ per line
//!   ESC * b # W data last plane of the row     ┘
//! ESC * r 0 B        end raster graphics (ESC * r C for color)
//! ```
//!
//! ## Plane Layout
//!
//! A monochrome row is a single `W` transfer. A CMY or KCMY row is sent as
//! one `V` transfer per plane except the last, which uses `W` to advance to
//! the next row:
//!
//! ```text
//! KCMY row:  ESC*b#V [K]  ESC*b#V [C]  ESC*b#V [M]  ESC*b#W [Y]
//! ```
//!
//! ## Reference
//!
//! PCL 5 Printer Language Technical Reference Manual, chapter 15 "Raster
//! Graphics"; PCL 5 Color Technical Reference Manual, "Simple Color Mode".

use super::commands::{Group, bare, parameterized};

/// Planes-per-row value for `ESC * r # U`.
///
/// Negative values select the CMY palette family in simple color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum SimpleColor {
    /// Single plane, black.
    Monochrome = 1,
    /// Three planes, cyan magenta yellow.
    Cmy = -3,
    /// Four planes, black cyan magenta yellow.
    Kcmy = -4,
}

/// # Raster Resolution (ESC * t # R)
#[inline]
pub fn resolution(dpi: u32) -> Vec<u8> {
    parameterized(Group::RASTER_RESOLUTION, dpi.into(), b'R')
}

/// # Raster Width (ESC * r # S)
///
/// Width of the raster area in pixels.
#[inline]
pub fn raster_width(pixels: u32) -> Vec<u8> {
    parameterized(Group::RASTER, pixels.into(), b'S')
}

/// # Raster Height (ESC * r # T)
#[inline]
pub fn raster_height(lines: u32) -> Vec<u8> {
    parameterized(Group::RASTER, lines.into(), b'T')
}

/// # Simple Color (ESC * r # U)
#[inline]
pub fn simple_color(mode: SimpleColor) -> Vec<u8> {
    parameterized(Group::RASTER, (mode as i32).into(), b'U')
}

/// # Start Raster Graphics (ESC * r # A)
///
/// Mode 0 starts at the left margin, mode 1 at the current cursor.
#[inline]
pub fn start_raster(mode: u32) -> Vec<u8> {
    parameterized(Group::RASTER, mode.into(), b'A')
}

/// # Compression Mode (ESC * b # M)
#[inline]
pub fn compression_mode(mode: u32) -> Vec<u8> {
    parameterized(Group::RASTER_DATA, mode.into(), b'M')
}

/// # Raster Y Offset (ESC * b # Y)
///
/// Moves down `lines` rows without sending data; used for runs of blank
/// lines.
#[inline]
pub fn skip_lines(lines: u32) -> Vec<u8> {
    parameterized(Group::RASTER_DATA, lines.into(), b'Y')
}

/// Header of a raster data transfer, without the data.
///
/// `last` selects `W` (transfer row, ends the row) instead of `V`
/// (transfer plane, more planes follow).
#[inline]
pub fn transfer_header(len: usize, last: bool) -> Vec<u8> {
    let terminator = if last { b'W' } else { b'V' };
    parameterized(Group::RASTER_DATA, len as i64, terminator)
}

/// # Transfer Raster Data (ESC * b # V / ESC * b # W)
///
/// ## Example
///
/// ```
/// use pclraster::protocol::graphics;
///
/// let cmd = graphics::transfer(&[0xFF, 0x00], true);
/// assert_eq!(cmd, b"\x1b*b2W\xff\x00");
/// ```
pub fn transfer(data: &[u8], last: bool) -> Vec<u8> {
    let mut cmd = transfer_header(data.len(), last);
    cmd.extend_from_slice(data);
    cmd
}

/// # End Raster Graphics (ESC * r 0 B)
#[inline]
pub fn end_raster() -> Vec<u8> {
    parameterized(Group::RASTER, 0, b'B')
}

/// # End Raster Graphics, Color (ESC * r C)
///
/// Also resets the compression mode and the simple color palette.
#[inline]
pub fn end_raster_color() -> Vec<u8> {
    bare(Group::RASTER, b'C')
}

// ============================================================================
// TESTS
// ============================================================================
