//! # PCL Decoder
//!
//! Reads a PCL byte stream back into ops. It understands exactly the
//! instructions in [`Op`], one command per escape sequence, which is what
//! the emitter produces. Combined sequences (`ESC&l2a26A`) and text are
//! rejected.

use super::ops::{Op, Program};
use crate::codec::Compression;
use crate::error::{PclError, Result};
use crate::protocol::commands::{ESC, FF, Group, NUL};
use crate::protocol::graphics::SimpleColor;
use crate::protocol::page::{DuplexMode, PageSide};

/// Decode a PCL stream.
///
/// ## Example
///
/// ```
/// use pclraster::ir::{self, Op};
///
/// let program = ir::parse(b"\x1bE\x1b*b2W\xff\x00\x0c")?;
/// assert_eq!(
///     program.ops,
///     vec![
///         Op::Reset,
///         Op::Transfer { data: &[0xFF, 0x00], last: true },
///         Op::FormFeed,
///     ]
/// );
/// # Ok::<(), pclraster::PclError>(())
/// ```
pub fn parse(data: &[u8]) -> Result<Program<'_>> {
    let mut program = Program::new();
    let mut pos = 0;

    while pos < data.len() {
        match data[pos] {
            ESC => {
                let (op, next) = parse_escape(data, pos)?;
                program.push(op);
                pos = next;
            }
            FF => {
                program.push(Op::FormFeed);
                pos += 1;
            }
            NUL => {
                let count = data[pos..].iter().take_while(|&&b| b == NUL).count();
                program.push(Op::Filler(count));
                pos += count;
            }
            other => {
                return Err(PclError::Decode(format!(
                    "unexpected byte 0x{:02X} at offset {}",
                    other, pos
                )));
            }
        }
    }

    Ok(program)
}

/// Decode the escape sequence at `start`; returns the op and the offset after it.
fn parse_escape(data: &[u8], start: usize) -> Result<(Op<'_>, usize)> {
    let truncated = || PclError::Decode(format!("escape sequence at offset {} is truncated", start));

    let first = *data.get(start + 1).ok_or_else(truncated)?;
    if first == b'E' {
        return Ok((Op::Reset, start + 2));
    }

    let group = Group(first, *data.get(start + 2).ok_or_else(truncated)?);
    let mut pos = start + 3;

    let value_start = pos;
    if matches!(data.get(pos), Some(b'-' | b'+')) {
        pos += 1;
    }
    while data.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    let digits = &data[value_start..pos];
    let value: Option<i64> = if digits.is_empty() {
        None
    } else {
        let text = std::str::from_utf8(digits).map_err(|_| truncated())?;
        Some(text.parse().map_err(|_| {
            PclError::Decode(format!("bad value '{}' at offset {}", text, value_start))
        })?)
    };

    let terminator = *data.get(pos).ok_or_else(truncated)?;
    pos += 1;

    if group == Group::RASTER_DATA && matches!(terminator, b'V' | b'W') {
        let len = unsigned(value.unwrap_or(0), start)? as usize;
        let payload = data.get(pos..pos + len).ok_or_else(|| {
            PclError::Decode(format!(
                "raster transfer at offset {} declares {} bytes, {} available",
                start,
                len,
                data.len() - pos
            ))
        })?;
        let op = Op::Transfer {
            data: payload,
            last: terminator == b'W',
        };
        return Ok((op, pos + len));
    }

    if group == Group::RASTER && terminator == b'C' && value.is_none() {
        return Ok((Op::EndRasterColor, pos));
    }

    let value = value.unwrap_or(0);
    let n = || unsigned(value, start);

    let op = match (group, terminator) {
        (Group::PAGE, b'D') => Op::LinesPerInch(n()?),
        (Group::MOTION, b'H') => Op::HorizontalMotion(n()?),
        (Group::PAGE, b'A') => Op::PageSize(n()?),
        (Group::PAGE, b'P') => Op::PageLength(n()?),
        (Group::PAGE, b'E') => Op::TopMargin(n()?),
        (Group::PAGE, b'X') => Op::Copies(n()?),
        (Group::PAGE, b'H') => Op::PaperSource(n()?),
        (Group::PAGE, b'M') => Op::MediaType(n()?),
        (Group::PAGE, b'S') => Op::Duplex(match value {
            0 => DuplexMode::Simplex,
            1 => DuplexMode::LongEdge,
            2 => DuplexMode::ShortEdge,
            _ => return Err(unknown(group, value, terminator, start)),
        }),
        (Group::PAGE, b'L') => Op::PerforationSkip(value != 0),
        (Group::CURSOR, b'G') => Op::SelectSide(match value {
            0 => PageSide::Next,
            1 => PageSide::Front,
            2 => PageSide::Back,
            _ => return Err(unknown(group, value, terminator, start)),
        }),
        (Group::CURSOR, b'H') => Op::CursorX(n()?),
        (Group::CURSOR, b'V') => Op::CursorY(n()?),
        (Group::RASTER_RESOLUTION, b'R') => Op::Resolution(n()?),
        (Group::RASTER, b'S') => Op::RasterWidth(n()?),
        (Group::RASTER, b'T') => Op::RasterHeight(n()?),
        (Group::RASTER, b'U') => Op::SimpleColor(match value {
            1 => SimpleColor::Monochrome,
            -3 => SimpleColor::Cmy,
            -4 => SimpleColor::Kcmy,
            _ => return Err(unknown(group, value, terminator, start)),
        }),
        (Group::RASTER, b'A') => Op::StartRaster(n()?),
        (Group::RASTER, b'B') => Op::EndRaster,
        (Group::RASTER_DATA, b'M') => Op::Compression(
            Compression::from_cups(n()?).map_err(|_| unknown(group, value, terminator, start))?,
        ),
        (Group::RASTER_DATA, b'Y') => Op::SkipLines(n()?),
        _ => return Err(unknown(group, value, terminator, start)),
    };

    Ok((op, pos))
}

fn unsigned(value: i64, offset: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        PclError::Decode(format!("value {} out of range at offset {}", value, offset))
    })
}

fn unknown(group: Group, value: i64, terminator: u8, offset: usize) -> PclError {
    PclError::Decode(format!(
        "unsupported command ESC {}{}{}{} at offset {}",
        group.0 as char, group.1 as char, value, terminator as char, offset
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert!(parse(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_program() {
        let data = [0xFF, 0x00, 0x1B, 0x0C];
        let program: Program = [
            Op::Reset,
            Op::LinesPerInch(6),
            Op::HorizontalMotion(12),
            Op::PageSize(26),
            Op::PageLength(70),
            Op::TopMargin(0),
            Op::Copies(2),
            Op::PaperSource(3),
            Op::MediaType(1),
            Op::Duplex(DuplexMode::LongEdge),
            Op::PerforationSkip(false),
            Op::SelectSide(PageSide::Back),
            Op::Resolution(600),
            Op::RasterWidth(4960),
            Op::RasterHeight(7016),
            Op::SimpleColor(SimpleColor::Cmy),
            Op::CursorX(0),
            Op::CursorY(330),
            Op::StartRaster(1),
            Op::Compression(Compression::PackBits),
            Op::SkipLines(12),
            Op::Transfer {
                data: &data,
                last: false,
            },
            Op::Transfer {
                data: &data[..1],
                last: true,
            },
            Op::EndRasterColor,
            Op::EndRaster,
            Op::Filler(600),
            Op::FormFeed,
            Op::Reset,
        ]
        .into_iter()
        .collect();

        let bytes = program.to_bytes();
        assert_eq!(parse(&bytes).unwrap(), program);
    }

    #[test]
    fn test_transfer_payload_may_contain_escapes() {
        // The payload is skipped by length, never scanned for commands
        let program = parse(b"\x1b*b2W\x1bE\x1bE").unwrap();
        assert_eq!(
            program.ops,
            vec![
                Op::Transfer {
                    data: b"\x1bE",
                    last: true
                },
                Op::Reset
            ]
        );
    }

    #[test]
    fn test_truncated_transfer() {
        assert!(matches!(parse(b"\x1b*b5W\x00"), Err(PclError::Decode(_))));
    }

    #[test]
    fn test_truncated_escape() {
        assert!(matches!(parse(b"\x1b"), Err(PclError::Decode(_))));
        assert!(matches!(parse(b"\x1b*r12"), Err(PclError::Decode(_))));
    }

    #[test]
    fn test_unknown_command() {
        assert!(matches!(parse(b"\x1b&l1O"), Err(PclError::Decode(_))));
        assert!(matches!(parse(b"\x1b*r-2U"), Err(PclError::Decode(_))));
    }

    #[test]
    fn test_text_rejected() {
        assert!(matches!(parse(b"hello"), Err(PclError::Decode(_))));
    }
}
