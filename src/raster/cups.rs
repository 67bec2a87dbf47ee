//! # CUPS Raster Reader
//!
//! Reads the `application/vnd.cups-raster` stream that CUPS hands to
//! printer filters.
//!
//! ## Stream Layout
//!
//! ```text
//! ┌──────────┬─────────────┬──────────────┬─────────────┬──────────────┬───
//! │ sync (4) │ header page1│ lines page 1 │ header page2│ lines page 2 │ ...
//! └──────────┴─────────────┴──────────────┴─────────────┴──────────────┴───
//! ```
//!
//! | Sync | Version | Header | Lines |
//! |------|---------|--------|-------|
//! | `RaSt` | 1 | 420 bytes | raw |
//! | `RaS2` | 2 | 1796 bytes | compressed |
//! | `RaS3` | 3 | 1796 bytes | raw |
//!
//! The sync word is written in the producer's native byte order, so
//! `RaS*` means every header field is big-endian and `*SaR` means
//! little-endian.
//!
//! ## Version 2 Line Compression
//!
//! Each encoded line starts with a repeat byte `r` (the line is used `r + 1`
//! times), followed by pixel packets until the line is full:
//!
//! - `n` in `0..=127`: one pixel follows, repeated `n + 1` times
//! - `n` in `128..=255`: `257 - n` literal pixels follow
//!
//! A pixel is `bits_per_pixel / 8` bytes for chunky color order and
//! `bits_per_color / 8` bytes otherwise, never less than one.

use std::io::{self, Read, Write};

use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};

use super::header::{CUPS_CSPACE_CMY, CUPS_CSPACE_KCMY, ColorSpace, PageHeader};
use super::source::RasterSource;
use crate::codec::Compression;
use crate::error::{PclError, Result};

/// Header size for version 1 streams.
pub const HEADER_V1_LEN: usize = 420;

/// Header size for version 2 and 3 streams (`cups_page_header2_t`).
pub const HEADER_V2_LEN: usize = 1796;

// Field offsets within cups_page_header2_t
const OFF_DUPLEX: usize = 272;
const OFF_HW_RESOLUTION: usize = 276;
const OFF_MEDIA_POSITION: usize = 324;
const OFF_NUM_COPIES: usize = 340;
const OFF_PAGE_SIZE: usize = 352;
const OFF_TUMBLE: usize = 368;
const OFF_WIDTH: usize = 372;
const OFF_HEIGHT: usize = 376;
const OFF_MEDIA_TYPE: usize = 380;
const OFF_BITS_PER_COLOR: usize = 384;
const OFF_BITS_PER_PIXEL: usize = 388;
const OFF_BYTES_PER_LINE: usize = 392;
const OFF_COLOR_ORDER: usize = 396;
const OFF_COLOR_SPACE: usize = 400;
const OFF_COMPRESSION: usize = 404;

/// Byte order of header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Big,
    Little,
}

impl Endianness {
    fn read_u32(self, buf: &[u8], offset: usize) -> u32 {
        match self {
            Self::Big => BigEndian::read_u32(&buf[offset..offset + 4]),
            Self::Little => LittleEndian::read_u32(&buf[offset..offset + 4]),
        }
    }

    fn write_u32(self, buf: &mut [u8], offset: usize, value: u32) {
        match self {
            Self::Big => BigEndian::write_u32(&mut buf[offset..offset + 4], value),
            Self::Little => LittleEndian::write_u32(&mut buf[offset..offset + 4], value),
        }
    }
}

/// Raster stream version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterVersion {
    V1,
    V2,
    V3,
}

impl RasterVersion {
    fn header_len(self) -> usize {
        match self {
            Self::V1 => HEADER_V1_LEN,
            Self::V2 | Self::V3 => HEADER_V2_LEN,
        }
    }

    fn sync_word(self, endian: Endianness) -> [u8; 4] {
        let mut sync = match self {
            Self::V1 => *b"RaSt",
            Self::V2 => *b"RaS2",
            Self::V3 => *b"RaS3",
        };
        if endian == Endianness::Little {
            sync.reverse();
        }
        sync
    }

    fn from_sync(sync: [u8; 4]) -> Option<(Self, Endianness)> {
        match &sync {
            b"RaSt" => Some((Self::V1, Endianness::Big)),
            b"RaS2" => Some((Self::V2, Endianness::Big)),
            b"RaS3" => Some((Self::V3, Endianness::Big)),
            b"tSaR" => Some((Self::V1, Endianness::Little)),
            b"2SaR" => Some((Self::V2, Endianness::Little)),
            b"3SaR" => Some((Self::V3, Endianness::Little)),
            _ => None,
        }
    }
}

/// Decoding state for the page being read.
#[derive(Debug)]
struct PageState {
    pixel_bytes: usize,
    /// Remaining uses of `last_line` (version 2 only).
    repeat: usize,
    last_line: Vec<u8>,
}

/// Streaming CUPS raster reader.
///
/// ## Example
///
/// ```no_run
/// use pclraster::raster::{CupsRasterReader, RasterSource};
///
/// let stdin = std::io::stdin().lock();
/// let mut reader = CupsRasterReader::new(stdin);
///
/// while let Some(header) = reader.next_header()? {
///     let mut line = vec![0u8; header.bytes_per_line as usize];
///     for _ in 0..header.height {
///         if !reader.read_line(&mut line)? {
///             break;
///         }
///     }
/// }
/// # Ok::<(), pclraster::PclError>(())
/// ```
pub struct CupsRasterReader<R> {
    inner: R,
    format: Option<(RasterVersion, Endianness)>,
    finished: bool,
    page: Option<PageState>,
}

impl<R: Read> CupsRasterReader<R> {
    /// Wrap a byte stream. Nothing is read until the first header is requested.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            format: None,
            finished: false,
            page: None,
        }
    }

    /// Version and byte order, once the sync word has been read.
    pub fn format(&self) -> Option<(RasterVersion, Endianness)> {
        self.format
    }

    fn read_sync(&mut self) -> Result<Option<(RasterVersion, Endianness)>> {
        let mut sync = [0u8; 4];
        match read_full(&mut self.inner, &mut sync)? {
            0 => Ok(None),
            4 => RasterVersion::from_sync(sync).map(Some).ok_or_else(|| {
                PclError::InvalidRaster(format!("unknown sync word {:02X?}", sync))
            }),
            n => Err(PclError::InvalidRaster(format!(
                "stream ends after {} byte(s) of sync word",
                n
            ))),
        }
    }

    fn parse_header(&self, buf: &[u8], endian: Endianness) -> Result<PageHeader> {
        let field = |offset| endian.read_u32(buf, offset);

        let color_space = ColorSpace::from_cups(field(OFF_COLOR_SPACE));

        Ok(PageHeader {
            page_size: [field(OFF_PAGE_SIZE), field(OFF_PAGE_SIZE + 4)],
            resolution: [field(OFF_HW_RESOLUTION), field(OFF_HW_RESOLUTION + 4)],
            width: field(OFF_WIDTH),
            height: field(OFF_HEIGHT),
            bytes_per_line: field(OFF_BYTES_PER_LINE),
            bits_per_color: field(OFF_BITS_PER_COLOR),
            bits_per_pixel: field(OFF_BITS_PER_PIXEL),
            color_order: field(OFF_COLOR_ORDER),
            color_space,
            compression: Compression::from_cups(field(OFF_COMPRESSION))?,
            duplex: field(OFF_DUPLEX) != 0,
            tumble: field(OFF_TUMBLE) != 0,
            copies: field(OFF_NUM_COPIES),
            media_position: field(OFF_MEDIA_POSITION),
            media_type: field(OFF_MEDIA_TYPE),
        })
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        match self.inner.read_u8() {
            Ok(byte) => Ok(Some(byte)),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Decode one version 2 line into `state.last_line`.
    ///
    /// Returns `false` if the stream ends mid-line.
    fn decode_line(&mut self, state: &mut PageState) -> io::Result<bool> {
        let len = state.last_line.len();
        let mut filled = 0;

        while filled < len {
            let Some(control) = self.read_byte()? else {
                return Ok(false);
            };

            if control & 0x80 != 0 {
                let count = ((257 - control as usize) * state.pixel_bytes).min(len - filled);
                let target = &mut state.last_line[filled..filled + count];
                if read_full(&mut self.inner, target)? < count {
                    return Ok(false);
                }
                filled += count;
            } else {
                let count = ((control as usize + 1) * state.pixel_bytes).min(len - filled);
                let mut pixel = vec![0u8; state.pixel_bytes];
                if read_full(&mut self.inner, &mut pixel)? < pixel.len() {
                    return Ok(false);
                }
                for (dst, src) in state.last_line[filled..filled + count]
                    .iter_mut()
                    .zip(pixel.iter().cycle())
                {
                    *dst = *src;
                }
                filled += count;
            }
        }

        Ok(true)
    }
}

impl<R: Read> RasterSource for CupsRasterReader<R> {
    fn next_header(&mut self) -> Result<Option<PageHeader>> {
        self.page = None;
        if self.finished {
            return Ok(None);
        }

        let (version, endian) = match self.format {
            Some(format) => format,
            None => match self.read_sync()? {
                Some(format) => {
                    log::debug!("raster stream {:?}, {:?} endian", format.0, format.1);
                    self.format = Some(format);
                    format
                }
                None => {
                    self.finished = true;
                    return Ok(None);
                }
            },
        };

        let mut buf = vec![0u8; version.header_len()];
        let read = read_full(&mut self.inner, &mut buf)?;
        if read < buf.len() {
            if read > 0 {
                log::warn!("ignoring truncated page header ({} of {} bytes)", read, buf.len());
            }
            self.finished = true;
            return Ok(None);
        }

        let header = self.parse_header(&buf, endian)?;

        let pixel_bits = if header.color_order == 0 {
            header.bits_per_pixel
        } else {
            header.bits_per_color
        };
        self.page = Some(PageState {
            pixel_bytes: (pixel_bits as usize).div_ceil(8).max(1),
            repeat: 0,
            last_line: if version == RasterVersion::V2 {
                vec![0; header.bytes_per_line as usize]
            } else {
                Vec::new()
            },
        });

        Ok(Some(header))
    }

    fn read_line(&mut self, line: &mut [u8]) -> Result<bool> {
        let Some(mut state) = self.page.take() else {
            return Ok(false);
        };

        let compressed = matches!(self.format, Some((RasterVersion::V2, _)));
        if !compressed {
            let read = read_full(&mut self.inner, line)?;
            if read < line.len() {
                self.finished = true;
                return Ok(false);
            }
            self.page = Some(state);
            return Ok(true);
        }

        if state.repeat == 0 {
            let Some(repeat) = self.read_byte()? else {
                self.finished = true;
                return Ok(false);
            };
            if !self.decode_line(&mut state)? {
                self.finished = true;
                return Ok(false);
            }
            state.repeat = repeat as usize + 1;
        }

        let len = state.last_line.len().min(line.len());
        line[..len].copy_from_slice(&state.last_line[..len]);
        line[len..].fill(0);
        state.repeat -= 1;
        self.page = Some(state);
        Ok(true)
    }
}

/// Read until `buf` is full or the stream ends; returns the bytes read.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Writes uncompressed version 3 raster streams.
///
/// Fixture helper: builds filter input for tests and tooling, the filter
/// itself never writes raster. Only the header fields listed on
/// [`PageHeader`] are filled in; the rest are zero.
pub struct CupsRasterWriter<W> {
    inner: W,
    endian: Endianness,
}

impl<W: Write> CupsRasterWriter<W> {
    /// Start a stream, writing the sync word.
    pub fn new(mut inner: W, endian: Endianness) -> Result<Self> {
        inner.write_all(&RasterVersion::V3.sync_word(endian))?;
        Ok(Self { inner, endian })
    }

    /// Write one page header followed by its scanlines.
    pub fn write_page(&mut self, header: &PageHeader, lines: &[Vec<u8>]) -> Result<()> {
        self.inner.write_all(&encode_header(header, self.endian))?;
        for line in lines {
            self.inner.write_all(line)?;
        }
        Ok(())
    }

    /// Finish the stream and return the writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Encode a `cups_page_header2_t` for `header`.
///
/// Fixture helper behind [`CupsRasterWriter`]; not used when filtering.
pub fn encode_header(header: &PageHeader, endian: Endianness) -> Vec<u8> {
    let mut buf = vec![0u8; HEADER_V2_LEN];
    let color_space = match header.color_space {
        ColorSpace::Monochrome => 3, // CUPS_CSPACE_K
        ColorSpace::Cmy => CUPS_CSPACE_CMY,
        ColorSpace::Kcmy => CUPS_CSPACE_KCMY,
    };

    let fields = [
        (OFF_DUPLEX, header.duplex as u32),
        (OFF_HW_RESOLUTION, header.resolution[0]),
        (OFF_HW_RESOLUTION + 4, header.resolution[1]),
        (OFF_MEDIA_POSITION, header.media_position),
        (OFF_NUM_COPIES, header.copies),
        (OFF_PAGE_SIZE, header.page_size[0]),
        (OFF_PAGE_SIZE + 4, header.page_size[1]),
        (OFF_TUMBLE, header.tumble as u32),
        (OFF_WIDTH, header.width),
        (OFF_HEIGHT, header.height),
        (OFF_MEDIA_TYPE, header.media_type),
        (OFF_BITS_PER_COLOR, header.bits_per_color),
        (OFF_BITS_PER_PIXEL, header.bits_per_pixel),
        (OFF_BYTES_PER_LINE, header.bytes_per_line),
        (OFF_COLOR_ORDER, header.color_order),
        (OFF_COLOR_SPACE, color_space),
        (OFF_COMPRESSION, header.compression.pcl_mode()),
    ];
    for (offset, value) in fields {
        endian.write_u32(&mut buf, offset, value);
    }
    buf
}

/// Write a version 2 line: repeat byte plus pixel packets.
///
/// Fixture helper for compressed test streams; not used when filtering.
/// Packs one-byte pixels only.
pub fn write_v2_line<W: Write>(out: &mut W, line: &[u8], repeat: u8) -> io::Result<()> {
    out.write_u8(repeat)?;
    let mut pos = 0;
    while pos < line.len() {
        let byte = line[pos];
        let run = line[pos..]
            .iter()
            .take(128)
            .take_while(|&&b| b == byte)
            .count();
        if run > 1 {
            out.write_u8((run - 1) as u8)?;
            out.write_u8(byte)?;
            pos += run;
        } else {
            let literal = line[pos..]
                .windows(2)
                .take(128)
                .take_while(|pair| pair[0] != pair[1])
                .count()
                .max(1);
            out.write_u8((257 - literal) as u8)?;
            out.write_all(&line[pos..pos + literal])?;
            pos += literal;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v3_stream(endian: Endianness, pages: &[(PageHeader, Vec<Vec<u8>>)]) -> Vec<u8> {
        let mut writer = CupsRasterWriter::new(Vec::new(), endian).unwrap();
        for (header, lines) in pages {
            writer.write_page(header, lines).unwrap();
        }
        writer.into_inner().unwrap()
    }

    #[test]
    fn test_empty_stream_has_no_pages() {
        let mut reader = CupsRasterReader::new(&[][..]);
        assert!(reader.next_header().unwrap().is_none());
        assert!(reader.next_header().unwrap().is_none());
    }

    #[test]
    fn test_bad_sync_word() {
        let mut reader = CupsRasterReader::new(&b"%PDF-1.4"[..]);
        assert!(matches!(
            reader.next_header(),
            Err(PclError::InvalidRaster(_))
        ));
    }

    #[test]
    fn test_truncated_sync_word() {
        let mut reader = CupsRasterReader::new(&b"Ra"[..]);
        assert!(matches!(
            reader.next_header(),
            Err(PclError::InvalidRaster(_))
        ));
    }

    #[test]
    fn test_v3_both_byte_orders() {
        let mut header = PageHeader::monochrome(16, 2);
        header.copies = 3;
        header.duplex = true;
        header.tumble = true;
        header.media_position = 2;
        header.compression = Compression::PackBits;
        let lines = vec![vec![0xF0, 0x0F], vec![0x00, 0xFF]];

        for endian in [Endianness::Big, Endianness::Little] {
            let data = v3_stream(endian, &[(header.clone(), lines.clone())]);
            let mut reader = CupsRasterReader::new(&data[..]);

            let read = reader.next_header().unwrap().unwrap();
            assert_eq!(reader.format(), Some((RasterVersion::V3, endian)));
            // Monochrome is written as CUPS_CSPACE_K and read back as one plane
            assert_eq!(read, header);

            let mut line = [0u8; 2];
            assert!(reader.read_line(&mut line).unwrap());
            assert_eq!(line, [0xF0, 0x0F]);
            assert!(reader.read_line(&mut line).unwrap());
            assert_eq!(line, [0x00, 0xFF]);
            assert!(!reader.read_line(&mut line).unwrap());
            assert!(reader.next_header().unwrap().is_none());
        }
    }

    #[test]
    fn test_sync_word_bytes() {
        assert_eq!(&v3_stream(Endianness::Big, &[])[..], b"RaS3");
        assert_eq!(&v3_stream(Endianness::Little, &[])[..], b"3SaR");
    }

    #[test]
    fn test_v3_two_pages() {
        let first = PageHeader::monochrome(8, 1);
        let mut second = PageHeader::monochrome(8, 1);
        second.color_space = ColorSpace::Kcmy;
        second.bytes_per_line = 4;

        let data = v3_stream(
            Endianness::Little,
            &[(first, vec![vec![1]]), (second, vec![vec![1, 2, 3, 4]])],
        );
        let mut reader = CupsRasterReader::new(&data[..]);

        reader.next_header().unwrap().unwrap();
        let mut line = [0u8; 1];
        assert!(reader.read_line(&mut line).unwrap());

        let header = reader.next_header().unwrap().unwrap();
        assert_eq!(header.color_space, ColorSpace::Kcmy);
        let mut line = [0u8; 4];
        assert!(reader.read_line(&mut line).unwrap());
        assert_eq!(line, [1, 2, 3, 4]);
    }

    #[test]
    fn test_v2_compressed_lines() {
        let mut header = PageHeader::monochrome(64, 3);
        header.bits_per_pixel = 8;
        header.bytes_per_line = 8;

        let mut data = RasterVersion::V2.sync_word(Endianness::Big).to_vec();
        data.extend(encode_header(&header, Endianness::Big));
        // First line used twice, second once
        write_v2_line(&mut data, &[0, 0, 0, 0, 1, 2, 3, 3], 1).unwrap();
        write_v2_line(&mut data, &[9, 8, 7, 6, 5, 4, 3, 2], 0).unwrap();

        let mut reader = CupsRasterReader::new(&data[..]);
        let read = reader.next_header().unwrap().unwrap();
        assert_eq!(read.bytes_per_line, 8);

        let mut line = [0u8; 8];
        assert!(reader.read_line(&mut line).unwrap());
        assert_eq!(line, [0, 0, 0, 0, 1, 2, 3, 3]);
        assert!(reader.read_line(&mut line).unwrap());
        assert_eq!(line, [0, 0, 0, 0, 1, 2, 3, 3]);
        assert!(reader.read_line(&mut line).unwrap());
        assert_eq!(line, [9, 8, 7, 6, 5, 4, 3, 2]);
        assert!(!reader.read_line(&mut line).unwrap());
    }

    #[test]
    fn test_v2_multibyte_pixels() {
        let mut header = PageHeader::monochrome(2, 1);
        header.bits_per_pixel = 24;
        header.bytes_per_line = 6;

        let mut data = RasterVersion::V2.sync_word(Endianness::Little).to_vec();
        data.extend(encode_header(&header, Endianness::Little));
        // Repeat byte 0, one pixel repeated twice
        data.extend([0, 1, 0xAA, 0xBB, 0xCC]);

        let mut reader = CupsRasterReader::new(&data[..]);
        reader.next_header().unwrap().unwrap();
        let mut line = [0u8; 6];
        assert!(reader.read_line(&mut line).unwrap());
        assert_eq!(line, [0xAA, 0xBB, 0xCC, 0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn test_short_page_reports_exhaustion() {
        let header = PageHeader::monochrome(16, 4);
        let data = v3_stream(Endianness::Big, &[(header, vec![vec![1, 2]])]);
        let mut reader = CupsRasterReader::new(&data[..]);
        reader.next_header().unwrap().unwrap();

        let mut line = [0u8; 2];
        assert!(reader.read_line(&mut line).unwrap());
        assert!(!reader.read_line(&mut line).unwrap());
        assert!(reader.next_header().unwrap().is_none());
    }

    #[test]
    fn test_unsupported_compression_rejected() {
        let header = PageHeader::monochrome(8, 1);
        let mut raw = encode_header(&header, Endianness::Big);
        Endianness::Big.write_u32(&mut raw, OFF_COMPRESSION, 7);

        let mut data = b"RaS3".to_vec();
        data.extend(raw);
        let mut reader = CupsRasterReader::new(&data[..]);
        assert!(matches!(
            reader.next_header(),
            Err(PclError::InvalidHeader(_))
        ));
    }
}
