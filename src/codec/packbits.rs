//! # TIFF Pack-Bits (PCL compression mode 2)
//!
//! Output is a sequence of chunks, each led by a signed control byte:
//!
//! | Control `n` | Meaning |
//! |-------------|---------|
//! | `0..=127` | `n + 1` literal bytes follow |
//! | `-127..=-1` (`129..=255`) | repeat the next byte `1 - n` times |
//! | `-128` (`128`) | no-op |
//!
//! ## Encoder Details
//!
//! The scanner looks one byte ahead and never classifies the final byte of
//! the line as the start of a run: the extension loops stop at
//! `len - 1`, and a lone trailing byte is sent as a one-byte literal
//! (`0x00, byte`). Runs and literals are capped at 127 bytes. Printers are
//! indifferent to where chunks split, but the exact chunking is what makes
//! output byte-identical to other PCL drivers.

use crate::error::{PclError, Result};

/// Longest literal or repeat chunk.
pub const MAX_CHUNK: usize = 127;

/// Append the pack-bits encoding of `line` to `out`.
pub fn encode_into(line: &[u8], out: &mut Vec<u8>) {
    let len = line.len();
    let mut pos = 0;

    while pos < len {
        if pos + 1 >= len {
            // Single byte on the end
            out.push(0x00);
            out.push(line[pos]);
            pos += 1;
        } else if line[pos] == line[pos + 1] {
            pos += 1;
            let mut count = 2;
            while pos < len - 1 && line[pos] == line[pos + 1] && count < MAX_CHUNK {
                pos += 1;
                count += 1;
            }

            out.push((257 - count) as u8);
            out.push(line[pos]);
            pos += 1;
        } else {
            let start = pos;
            pos += 1;
            let mut count = 1;
            while pos < len - 1 && line[pos] != line[pos + 1] && count < MAX_CHUNK {
                pos += 1;
                count += 1;
            }

            out.push((count - 1) as u8);
            out.extend_from_slice(&line[start..start + count]);
        }
    }
}

/// Pack-bits encode `line` into a new buffer.
///
/// ## Example
///
/// ```
/// use pclraster::codec::packbits;
///
/// // Literal "a", then a run of three "b"
/// assert_eq!(packbits::encode(b"abbb"), vec![0, b'a', 254, b'b']);
/// ```
pub fn encode(line: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(line.len() * 2);
    encode_into(line, &mut out);
    out
}

/// Decode pack-bits chunks.
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut pos = 0;

    while pos < data.len() {
        let control = data[pos];
        pos += 1;

        match control {
            0..=127 => {
                let count = control as usize + 1;
                let literal = data.get(pos..pos + count).ok_or_else(|| {
                    PclError::Decode(format!(
                        "pack-bits literal of {} bytes truncated at offset {}",
                        count, pos
                    ))
                })?;
                out.extend_from_slice(literal);
                pos += count;
            }
            128 => {}
            _ => {
                let count = 257 - control as usize;
                let byte = *data.get(pos).ok_or_else(|| {
                    PclError::Decode(format!("pack-bits repeat truncated at offset {}", pos))
                })?;
                out.resize(out.len() + count, byte);
                pos += 1;
            }
        }
    }

    Ok(out)
}
