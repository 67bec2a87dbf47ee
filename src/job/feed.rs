//! Blank line accounting.
//!
//! All-zero scanlines are not transferred. They are counted, and the count
//! goes out as one `ESC * b # Y` skip in front of the next line that has
//! ink on it. Blank lines at the bottom of a page are never sent at all.

/// Whether a scanline has no ink: every byte is zero.
///
/// An empty line is blank.
#[inline]
pub fn is_blank(line: &[u8]) -> bool {
    match line.split_first() {
        None => true,
        Some((&first, rest)) => first == 0 && rest.iter().all(|&b| b == first),
    }
}

/// Count of blank lines waiting to be skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedCounter {
    pending: u32,
}

impl FeedCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one blank line.
    #[inline]
    pub fn blank(&mut self) {
        self.pending += 1;
    }

    /// Blank lines recorded since the last [`take`](Self::take).
    #[inline]
    pub fn pending(&self) -> u32 {
        self.pending
    }

    /// Return the pending count, if any, and reset it.
    #[inline]
    pub fn take(&mut self) -> Option<u32> {
        match std::mem::take(&mut self.pending) {
            0 => None,
            n => Some(n),
        }
    }
}
