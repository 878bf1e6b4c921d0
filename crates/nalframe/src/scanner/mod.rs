//! Scanner: resumable start-code search.
//!
//! A start code is a run of two or more `0x00` bytes terminated by `0x01`.
//! The scanner is fed arbitrary slices of one logical byte stream and keeps
//! the length of the current zero run between calls, so a start code split
//! across two chunks is still recognized.
//!
//! Positions reported by the scanner are logical offsets supplied by the
//! caller (`offset_base` is the stream position of the first byte of the
//! slice). They are never addresses, so the owner may move or compact its
//! storage as long as it rebases the offsets it keeps.
//!
//! Example
//! ```
//! use nalframe::{StartCode, StartCodeScanner};
//!
//! let mut scanner = StartCodeScanner::new();
//! // The start code is split across two feeds.
//! assert_eq!(scanner.advance(&[0xAA, 0x00, 0x00], 0), 3);
//! assert_eq!(scanner.advance(&[0x00, 0x01, 0xBB], 3), 2);
//! assert_eq!(
//!     scanner.start_code(),
//!     Some(StartCode { offset: 1, zero_run: 3 })
//! );
//! ```

/// The canonical three-byte start code written by encoders.
pub const START_CODE: [u8; 3] = [0x00, 0x00, 0x01];

/// A located start code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StartCode {
    /// Stream offset of the first zero byte of the leading zero run.
    pub offset: usize,
    /// Number of zero bytes before the terminating `0x01`.
    pub zero_run: usize,
}

impl StartCode {
    /// Length of the start code in bytes, terminator included.
    #[inline]
    #[must_use]
    pub const fn code_len(&self) -> usize {
        self.zero_run + 1
    }

    /// Stream offset of the first byte after the `0x01` terminator.
    #[inline]
    #[must_use]
    pub const fn payload_offset(&self) -> usize {
        self.offset + self.zero_run + 1
    }
}

/// Resumable start-code search state.
///
/// `Found` is sticky: feeding a found scanner consumes nothing, and the
/// owner has to [`reset`](Self::reset) it before the next search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartCodeScanner {
    /// No start code yet; `zero_run` zeros have been seen at the tail.
    Searching {
        /// Consecutive zero bytes at the end of everything fed so far.
        zero_run: usize,
    },
    /// A start code was located.
    Found(StartCode),
}

impl Default for StartCodeScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl StartCodeScanner {
    /// A fresh scanner in `Searching { zero_run: 0 }`.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::Searching { zero_run: 0 }
    }

    /// Feeds `bytes`, which start at stream offset `offset_base`.
    ///
    /// Returns the number of bytes consumed: all of them while searching,
    /// or up to and including the `0x01` terminator once a start code is
    /// found.
    pub fn advance(&mut self, bytes: &[u8], offset_base: usize) -> usize {
        let Self::Searching { zero_run } = *self else {
            return 0;
        };

        let mut zeros = zero_run;
        for (i, &b) in bytes.iter().enumerate() {
            match b {
                0 => zeros += 1,
                1 if zeros >= 2 => {
                    *self = Self::Found(StartCode {
                        offset: offset_base + i - zeros,
                        zero_run: zeros,
                    });
                    return i + 1;
                }
                _ => zeros = 0,
            }
        }
        *self = Self::Searching { zero_run: zeros };
        bytes.len()
    }

    /// Returns the scanner to `Searching { zero_run: 0 }`.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Whether a start code has been located.
    #[inline]
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The located start code, if any.
    #[inline]
    #[must_use]
    pub const fn start_code(&self) -> Option<StartCode> {
        match self {
            Self::Found(code) => Some(*code),
            Self::Searching { .. } => None,
        }
    }

    /// Length of the zero run seen so far (or of the found start code).
    #[inline]
    #[must_use]
    pub const fn zero_run(&self) -> usize {
        match self {
            Self::Searching { zero_run } => *zero_run,
            Self::Found(code) => code.zero_run,
        }
    }

    /// Shifts a found offset down after the owner drops `by` leading bytes.
    ///
    /// A searching scanner carries no offset and is left untouched.
    #[inline]
    pub fn rebase(&mut self, by: usize) {
        if let Self::Found(code) = self {
            debug_assert!(code.offset >= by, "rebase past the start code");
            code.offset -= by;
        }
    }
}
