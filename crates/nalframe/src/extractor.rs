//! `FrameExtractor`: the scan, emit, compact cycle over one byte window.
//!
//! Overview
//! - Input bytes are appended to a [`ByteWindow`], either in place through
//!   `write_slice`/`commit_write` or from memory with `push`.
//! - Two scanner slots ping-pong over the window. `cur` marks the start of
//!   the unit being assembled, `lookahead` searches for the start code that
//!   ends it. When both are found the unit is emitted and `lookahead`
//!   becomes the new `cur`.
//! - `scanned` records how much of the window has already been fed through
//!   a scanner, so repeated `next_unit` calls never rescan a byte.
//!
//! Offsets
//! - All persisted positions (`scanned`, found start-code offsets) are
//!   relative to the window's read cursor. Growing the window may move its
//!   storage without invalidating them; compaction rebases them explicitly.
//!
//! Memory
//! - `compact` drops everything in front of `cur`, or, before the first
//!   start code, everything scanned except a pending zero run. The window
//!   therefore holds roughly one unit plus whatever arrived since the last
//!   compaction.

use crate::{
    scanner::{StartCode, StartCodeScanner},
    unit::UnitView,
    window::ByteWindow,
};

/// Incremental Annex-B unit extractor.
///
/// ```
/// use nalframe::FrameExtractor;
///
/// let mut extractor = FrameExtractor::new();
/// extractor.push(&[0x00, 0x00, 0x01, 0xAA, 0xBB, 0x00, 0x00]);
/// assert!(extractor.next_unit().is_none());
///
/// extractor.compact();
/// extractor.push(&[0x01, 0xCC]);
/// let unit = extractor.next_unit().unwrap();
/// assert_eq!(unit.payload(), &[0xAA, 0xBB]);
/// assert!(extractor.next_unit().is_none());
///
/// // End of input: the last unit has no following start code.
/// let last = extractor.flush().unwrap();
/// assert_eq!(last.payload(), &[0xCC]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct FrameExtractor {
    window: ByteWindow,
    cur: StartCodeScanner,
    lookahead: StartCodeScanner,
    scanned: usize,
}

impl FrameExtractor {
    /// Creates an extractor with an empty, unallocated window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an extractor whose window starts with `capacity` bytes of
    /// write space.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            window: ByteWindow::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Free space to fill before calling [`commit_write`](Self::commit_write).
    #[inline]
    pub fn write_slice(&mut self) -> &mut [u8] {
        self.window.write_slice()
    }

    /// Length of [`write_slice`](Self::write_slice).
    #[inline]
    #[must_use]
    pub fn write_capacity(&self) -> usize {
        self.window.write_capacity()
    }

    /// Publishes `n` bytes written into [`write_slice`](Self::write_slice).
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds [`write_capacity`](Self::write_capacity).
    #[inline]
    pub fn commit_write(&mut self, n: usize) {
        self.window.commit_write(n);
    }

    /// Appends a chunk from memory, growing by exactly the missing space.
    pub fn push(&mut self, bytes: &[u8]) {
        self.window.extend_from_slice(bytes);
    }

    /// Grows the window by exactly `extra` bytes.
    ///
    /// Offsets are kept relative to the read cursor, so a located start code
    /// survives the storage being moved.
    pub fn grow(&mut self, extra: usize) {
        tracing::trace!(
            extra,
            capacity = self.window.capacity(),
            "growing frame window"
        );
        self.window.grow(extra);
    }

    /// Total size of the window's storage.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.window.capacity()
    }

    /// Discards bytes no future unit can reach and compacts the window.
    ///
    /// Meant to run once per read iteration, before new bytes are added.
    /// Bytes that were committed but not scanned yet are always kept.
    pub fn compact(&mut self) {
        let discard = match self.cur {
            StartCodeScanner::Found(code) => code.offset,
            // Everything scanned so far holds no start code; only the tail
            // zero run may still become one.
            StartCodeScanner::Searching { zero_run } => {
                debug_assert!(zero_run <= self.scanned);
                self.scanned - zero_run
            }
        };

        self.window.consume_read(discard);
        self.scanned -= discard;
        self.cur.rebase(discard);
        self.lookahead.rebase(discard);
        self.window.compact();

        tracing::trace!(
            dropped = discard,
            buffered = self.window.read_len(),
            "compacted frame window"
        );
    }

    /// Feeds the unscanned suffix to `scanner`, advancing `scanned`.
    fn scan(window: &ByteWindow, scanner: &mut StartCodeScanner, scanned: &mut usize) -> bool {
        let data = window.read_slice();
        *scanned += scanner.advance(&data[*scanned..], *scanned);
        scanner.is_found()
    }

    /// Runs both scanner slots as far as the buffered data allows.
    ///
    /// Returns the start codes bounding the next unit once both are found.
    fn locate(&mut self) -> Option<(StartCode, StartCode)> {
        if !Self::scan(&self.window, &mut self.cur, &mut self.scanned) {
            return None;
        }
        if !Self::scan(&self.window, &mut self.lookahead, &mut self.scanned) {
            return None;
        }
        Some((self.cur.start_code()?, self.lookahead.start_code()?))
    }

    /// Rolls the slots forward and returns the unit between them.
    fn emit(&mut self, start: StartCode, next: StartCode) -> UnitView<'_> {
        self.cur = self.lookahead;
        self.lookahead.reset();

        let unit = UnitView::terminated(self.window.read_slice(), start, next);
        tracing::trace!(
            offset = start.offset,
            zero_run = start.zero_run,
            len = unit.payload_len(),
            "extracted unit"
        );
        unit
    }

    /// Extracts the next unit closed by a following start code.
    ///
    /// `None` means more input is needed; it is never an error. The returned
    /// view borrows the extractor until it is dropped.
    pub fn next_unit(&mut self) -> Option<UnitView<'_>> {
        let (start, next) = self.locate()?;
        Some(self.emit(start, next))
    }

    /// Drains the stream at end of input.
    ///
    /// Each call first behaves like [`next_unit`](Self::next_unit). Once no
    /// terminated unit is left, the bytes after the last start code are
    /// returned as a trailing unit, exactly once, and the extractor goes
    /// back to searching for a first start code. A zero run still pending
    /// at the very end is not part of the trailing payload, and a trailing
    /// unit with an empty payload is not reported.
    pub fn flush(&mut self) -> Option<UnitView<'_>> {
        if let Some((start, next)) = self.locate() {
            return Some(self.emit(start, next));
        }

        let start = self.cur.start_code()?;
        let pending_zeros = self.lookahead.zero_run();
        self.cur.reset();
        self.lookahead.reset();
        // Nothing buffered is reachable any more; the next compaction
        // releases it.
        self.scanned = self.window.read_len();

        let unit = UnitView::trailing(self.window.read_slice(), start, pending_zeros);
        if unit.payload_len() == 0 {
            return None;
        }
        tracing::trace!(
            offset = start.offset,
            zero_run = start.zero_run,
            len = unit.payload_len(),
            "flushed trailing unit"
        );
        Some(unit)
    }

    /// Drops all buffered data and scanner state, keeping the allocation.
    pub fn reset(&mut self) {
        self.window.clear();
        self.cur.reset();
        self.lookahead.reset();
        self.scanned = 0;
    }

    /// All bytes currently held.
    #[inline]
    #[must_use]
    pub fn buffered_bytes(&self) -> usize {
        self.window.read_len()
    }

    /// Held bytes that have not been fed through a scanner yet.
    #[inline]
    #[must_use]
    pub fn unscanned_bytes(&self) -> usize {
        self.window.read_len() - self.scanned
    }

    /// Checks the cursor and offset invariants.
    ///
    /// # Panics
    ///
    /// Panics if an invariant is violated.
    #[cfg(any(test, feature = "fuzzing"))]
    pub fn assert_invariants(&self) {
        let buffered = self.window.read_len();
        assert!(self.scanned <= buffered, "scanned past buffered data");
        assert!(
            !self.lookahead.is_found(),
            "lookahead left found between calls"
        );
        match self.cur {
            StartCodeScanner::Found(code) => {
                assert!(code.payload_offset() <= self.scanned);
                assert!(self.lookahead.zero_run() <= self.scanned - code.payload_offset());
            }
            StartCodeScanner::Searching { zero_run } => {
                assert!(zero_run <= self.scanned);
                assert_eq!(self.lookahead.zero_run(), 0);
            }
        }
    }
}
