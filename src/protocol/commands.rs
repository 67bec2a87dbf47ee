//! # PCL Escape Sequences
//!
//! This module holds the byte-level building blocks shared by every PCL
//! command builder.
//!
//! ## Escape Sequence Structure
//!
//! PCL has two command shapes:
//!
//! - Two-character: `ESC` followed by one character in `0x30..=0x7E`,
//!   e.g. `ESC E` (printer reset).
//! - Parameterized: `ESC`, a parameterized character (`&` or `*`), a group
//!   character (lowercase), an optional signed decimal value, and an
//!   uppercase termination character.
//!
//! ```text
//!   ESC  &  l  2  6  A
//!   1B  26 6C 32 36 41      page size = 26 (A4)
//!        │  │  └┬─┘ └─ termination: parameter within the group
//!        │  │   └─ value, ASCII decimal
//!        │  └─ group: l = page control
//!        └─ parameterized character
//! ```
//!
//! Values are sent as ASCII decimal, so a command's length depends on its
//! value.
//!
//! ## Reference
//!
//! Based on the "PCL 5 Printer Language Technical Reference Manual" and
//! the "PCL 5 Color Technical Reference Manual" by Hewlett-Packard.

// ============================================================================
// CONTROL CODES
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// FF (Form Feed) - Print the current page and eject it
pub const FF: u8 = 0x0C;

/// NUL - Ignored by the PCL parser, used as filler
pub const NUL: u8 = 0x00;

// ============================================================================
// COMMAND GROUPS
// ============================================================================

/// A parameterized character and group character pair, e.g. `&l`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Group(pub u8, pub u8);

impl Group {
    /// `ESC & l`: page control (size, length, margins, copies, trays, duplex).
    pub const PAGE: Self = Self(b'&', b'l');
    /// `ESC & k`: horizontal motion index.
    pub const MOTION: Self = Self(b'&', b'k');
    /// `ESC & a`: cursor position and duplex side.
    pub const CURSOR: Self = Self(b'&', b'a');
    /// `ESC * t`: raster resolution.
    pub const RASTER_RESOLUTION: Self = Self(b'*', b't');
    /// `ESC * r`: raster area and start/end graphics.
    pub const RASTER: Self = Self(b'*', b'r');
    /// `ESC * b`: raster data transfer, compression and skipping.
    pub const RASTER_DATA: Self = Self(b'*', b'b');
}

// ============================================================================
// BUILDERS
// ============================================================================

/// # Parameterized Command (ESC group value terminator)
///
/// ## Example
///
/// ```
/// use pclraster::protocol::commands::{self, Group};
///
/// assert_eq!(commands::parameterized(Group::PAGE, 26, b'A'), b"\x1b&l26A".to_vec());
/// assert_eq!(commands::parameterized(Group::RASTER, -4, b'U'), b"\x1b*r-4U".to_vec());
/// ```
pub fn parameterized(group: Group, value: i64, terminator: u8) -> Vec<u8> {
    let digits = value.to_string();
    let mut cmd = Vec::with_capacity(4 + digits.len());
    cmd.push(ESC);
    cmd.push(group.0);
    cmd.push(group.1);
    cmd.extend_from_slice(digits.as_bytes());
    cmd.push(terminator);
    cmd
}

/// # Parameterized Command Without a Value (ESC group terminator)
///
/// PCL treats a missing value as zero; some printers only accept the
/// short form for certain commands (`ESC * r C`).
pub fn bare(group: Group, terminator: u8) -> Vec<u8> {
    vec![ESC, group.0, group.1, terminator]
}

/// # Printer Reset (ESC E)
///
/// Prints any partial page, then restores the user default environment:
/// fonts, margins, raster settings and page control all return to their
/// defaults. Sent at the start and end of every job so the next job finds
/// the printer in a known state.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC E |
/// | Hex     | 1B 45 |
///
/// ## Example
///
/// ```
/// use pclraster::protocol::commands;
///
/// assert_eq!(commands::reset(), vec![0x1B, 0x45]);
/// ```
#[inline]
pub fn reset() -> Vec<u8> {
    vec![ESC, b'E']
}

/// # Form Feed (FF)
///
/// Ejects the current page.
#[inline]
pub fn form_feed() -> Vec<u8> {
    vec![FF]
}

/// # NUL Filler
///
/// `count` NUL bytes. When a job is cancelled in the middle of a raster
/// transfer the printer may still be counting down the byte length of a
/// `ESC * b # W` command; enough filler completes that transfer so the
/// commands that follow are parsed as commands.
#[inline]
pub fn filler(count: usize) -> Vec<u8> {
    vec![NUL; count]
}

// ============================================================================
// TESTS
// ============================================================================
