//! # Page Control Commands
//!
//! Commands that describe the sheet before any raster data is sent: size,
//! length, margins, copies, input tray, media type and duplex.
//!
//! Most of these only take effect at the start of a physical sheet. On the
//! back side of a duplex sheet the filter sends [`select_side`] instead.
//!
//! ## Reference
//!
//! PCL 5 Printer Language Technical Reference Manual, chapter 5
//! "Job Control Commands" and chapter 6 "Page Control Commands".

use super::commands::{Group, parameterized};

// ============================================================================
// MEDIA SIZES
// ============================================================================

/// A PCL page size code, keyed by the page length in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaSize {
    pub name: &'static str,
    /// Page length in points (1/72 inch) as CUPS reports it.
    pub length: u32,
    /// Value for `ESC & l # A`.
    pub code: u32,
}

/// Page sizes the filter can name.
///
/// Pages whose length is not listed get no page size command and print on
/// whatever the printer has loaded.
pub const MEDIA_SIZES: &[MediaSize] = &[
    MediaSize { name: "Monarch Envelope", length: 540, code: 80 },
    MediaSize { name: "DL Envelope", length: 624, code: 90 },
    MediaSize { name: "C5 Envelope", length: 649, code: 91 },
    MediaSize { name: "COM-10 Envelope", length: 684, code: 81 },
    MediaSize { name: "B5 Envelope", length: 709, code: 100 },
    MediaSize { name: "Executive", length: 756, code: 1 },
    MediaSize { name: "Letter", length: 792, code: 2 },
    MediaSize { name: "A4", length: 842, code: 26 },
    MediaSize { name: "Legal", length: 1008, code: 3 },
    MediaSize { name: "A3", length: 1191, code: 27 },
    MediaSize { name: "Tabloid", length: 1224, code: 6 },
];

/// Look up the page size for a page length in points.
///
/// ## Example
///
/// ```
/// use pclraster::protocol::page;
///
/// assert_eq!(page::media_size(842).map(|m| m.code), Some(26)); // A4
/// assert!(page::media_size(800).is_none());
/// ```
pub fn media_size(length_points: u32) -> Option<&'static MediaSize> {
    MEDIA_SIZES.iter().find(|size| size.length == length_points)
}

// ============================================================================
// PAGE CONTROL (ESC & l)
// ============================================================================

/// # Page Size (ESC & l # A)
#[inline]
pub fn page_size(code: u32) -> Vec<u8> {
    parameterized(Group::PAGE, code.into(), b'A')
}

/// # Line Spacing (ESC & l # D)
///
/// Lines per inch. Page length and top margin are counted in lines, so this
/// fixes their unit.
#[inline]
pub fn lines_per_inch(lpi: u32) -> Vec<u8> {
    parameterized(Group::PAGE, lpi.into(), b'D')
}

/// # Page Length (ESC & l # P)
///
/// Length in lines at the current line spacing. At 6 lpi a line is 12
/// points, so the filter sends `length_points / 12`.
#[inline]
pub fn page_length(lines: u32) -> Vec<u8> {
    parameterized(Group::PAGE, lines.into(), b'P')
}

/// # Top Margin (ESC & l # E)
#[inline]
pub fn top_margin(lines: u32) -> Vec<u8> {
    parameterized(Group::PAGE, lines.into(), b'E')
}

/// # Number of Copies (ESC & l # X)
#[inline]
pub fn copies(count: u32) -> Vec<u8> {
    parameterized(Group::PAGE, count.into(), b'X')
}

/// # Paper Source (ESC & l # H)
///
/// Selects the input tray. Value 0 does not select a tray: it prints and
/// ejects the current page, which is how color pages are ended.
#[inline]
pub fn paper_source(source: u32) -> Vec<u8> {
    parameterized(Group::PAGE, source.into(), b'H')
}

/// # Media Type (ESC & l # M)
#[inline]
pub fn media_type(kind: u32) -> Vec<u8> {
    parameterized(Group::PAGE, kind.into(), b'M')
}

/// Duplex binding for `ESC & l # S`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum DuplexMode {
    Simplex = 0,
    /// Back side flipped on the long edge.
    LongEdge = 1,
    /// Back side flipped on the short edge (tumble).
    ShortEdge = 2,
}

impl DuplexMode {
    /// Mode for a duplex page with or without tumble.
    pub fn from_tumble(tumble: bool) -> Self {
        if tumble { Self::ShortEdge } else { Self::LongEdge }
    }
}

/// # Simplex/Duplex Print (ESC & l # S)
#[inline]
pub fn duplex(mode: DuplexMode) -> Vec<u8> {
    parameterized(Group::PAGE, (mode as u32).into(), b'S')
}

/// # Perforation Skip (ESC & l # L)
///
/// When enabled the printer keeps text out of the bottom margin; raster
/// pages are laid out by the driver so it is turned off.
#[inline]
pub fn perforation_skip(enabled: bool) -> Vec<u8> {
    parameterized(Group::PAGE, enabled.into(), b'L')
}

// ============================================================================
// HORIZONTAL MOTION (ESC & k)
// ============================================================================

/// # Horizontal Motion Index (ESC & k # H)
///
/// Character advance in 1/120 inch. 12 gives 10 characters per inch.
#[inline]
pub fn horizontal_motion(units: u32) -> Vec<u8> {
    parameterized(Group::MOTION, units.into(), b'H')
}

// ============================================================================
// CURSOR AND SIDE (ESC & a)
// ============================================================================

/// Sheet side for `ESC & a # G`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum PageSide {
    Next = 0,
    Front = 1,
    Back = 2,
}

/// # Duplex Page Side Selection (ESC & a # G)
#[inline]
pub fn select_side(side: PageSide) -> Vec<u8> {
    parameterized(Group::CURSOR, (side as u32).into(), b'G')
}

/// # Horizontal Cursor Position (ESC & a # H)
///
/// Position in decipoints (1/720 inch) from the left margin.
#[inline]
pub fn cursor_x(decipoints: u32) -> Vec<u8> {
    parameterized(Group::CURSOR, decipoints.into(), b'H')
}

/// # Vertical Cursor Position (ESC & a # V)
///
/// Position in decipoints from the top margin.
#[inline]
pub fn cursor_y(decipoints: u32) -> Vec<u8> {
    parameterized(Group::CURSOR, decipoints.into(), b'V')
}

// ============================================================================
// TESTS
// ============================================================================
