use core::fmt;

use bstr::BStr;

use crate::scanner::StartCode;

/// One delimited unit, borrowed from a [`FrameExtractor`].
///
/// A view spans from the first zero of its own start code up to the first
/// zero of the next unit's start code. It holds the two start codes as
/// offsets into the extractor's buffered data and derives every slice on
/// access.
///
/// The view borrows the extractor, so it must be consumed (copied or
/// written out) before the extractor is fed, grown, or compacted again.
///
/// [`FrameExtractor`]: crate::FrameExtractor
#[derive(Clone, Copy)]
pub struct UnitView<'a> {
    data: &'a [u8],
    start: StartCode,
    next: Option<StartCode>,
    /// Exclusive end of the raw span.
    end: usize,
    /// Exclusive end of the payload; `end` minus any trailing zero run.
    payload_end: usize,
}

impl<'a> UnitView<'a> {
    /// A unit bounded by two located start codes.
    pub(crate) fn terminated(data: &'a [u8], start: StartCode, next: StartCode) -> Self {
        debug_assert!(start.payload_offset() <= next.offset);
        debug_assert!(next.offset <= data.len());
        Self {
            data,
            start,
            next: Some(next),
            end: next.offset,
            payload_end: next.offset,
        }
    }

    /// The last unit of a stream, running to the end of `data`.
    ///
    /// `pending_zeros` trailing zero bytes are excluded from the payload;
    /// they were the unresolved prefix of a start code that never arrived.
    pub(crate) fn trailing(data: &'a [u8], start: StartCode, pending_zeros: usize) -> Self {
        let end = data.len();
        let payload_end = end
            .saturating_sub(pending_zeros)
            .max(start.payload_offset());
        Self {
            data,
            start,
            next: None,
            end,
            payload_end,
        }
    }

    /// This unit's own start code.
    #[inline]
    #[must_use]
    pub fn start_code(&self) -> StartCode {
        self.start
    }

    /// The start code that terminated this unit; `None` for a trailing unit
    /// returned by [`FrameExtractor::flush`](crate::FrameExtractor::flush).
    #[inline]
    #[must_use]
    pub fn next_start_code(&self) -> Option<StartCode> {
        self.next
    }

    /// Whether the unit was closed by a following start code.
    #[inline]
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.next.is_some()
    }

    /// Bytes from this unit's start code through the byte before the next
    /// unit's start code.
    #[inline]
    #[must_use]
    pub fn total_span(&self) -> usize {
        self.end - self.start.offset
    }

    /// The original Annex-B bytes of this unit, start code and padding
    /// included.
    #[inline]
    #[must_use]
    pub fn raw_span(&self) -> &'a [u8] {
        &self.data[self.start.offset..self.end]
    }

    /// The unit's payload with both start codes stripped.
    #[inline]
    #[must_use]
    pub fn payload(&self) -> &'a [u8] {
        &self.data[self.start.payload_offset()..self.payload_end]
    }

    /// Length of [`payload`](Self::payload).
    #[inline]
    #[must_use]
    pub fn payload_len(&self) -> usize {
        self.payload_end - self.start.payload_offset()
    }
}

impl fmt::Debug for UnitView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitView")
            .field("start", &self.start)
            .field("next", &self.next)
            .field("payload", &BStr::new(self.payload()))
            .finish()
    }
}
