//! # Run-Length Encoding (PCL compression mode 1)
//!
//! Every run of identical bytes, up to 256 long, becomes a pair:
//!
//! ```text
//! ┌───────────────┬────────┐
//! │ run length - 1│  byte  │
//! └───────────────┴────────┘
//! ```
//!
//! There is no literal form, so a run of one byte still costs two bytes and
//! data without repeated neighbours doubles in size.

use crate::error::{PclError, Result};

/// Longest run a single pair can describe.
pub const MAX_RUN: usize = 256;

/// Append the run-length encoding of `line` to `out`.
pub fn encode_into(line: &[u8], out: &mut Vec<u8>) {
    let mut pos = 0;

    while pos < line.len() {
        let byte = line[pos];
        let mut count = 1;
        while pos + count < line.len() && line[pos + count] == byte && count < MAX_RUN {
            count += 1;
        }

        out.push((count - 1) as u8);
        out.push(byte);
        pos += count;
    }
}

/// Run-length encode `line` into a new buffer.
///
/// ## Example
///
/// ```
/// use pclraster::codec::rle;
///
/// assert_eq!(rle::encode(&[7, 7, 7, 1]), vec![2, 7, 0, 1]);
/// ```
pub fn encode(line: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(line.len() * 2);
    encode_into(line, &mut out);
    out
}

/// Decode run-length pairs.
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() % 2 != 0 {
        return Err(PclError::Decode(format!(
            "run-length data has odd length {}",
            data.len()
        )));
    }

    let mut out = Vec::new();
    for pair in data.chunks_exact(2) {
        let count = pair[0] as usize + 1;
        out.resize(out.len() + count, pair[1]);
    }
    Ok(out)
}
