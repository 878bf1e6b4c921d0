//! Growable byte window with independent read and write cursors.
//!
//! Layout of the backing storage:
//!
//! ```text
//! 0            read           write          capacity
//! |  discarded  |   buffered   |     free      |
//! ```
//!
//! Callers fill the free region in place (`write_slice` + `commit_write`),
//! drain the front (`consume_read`) and occasionally `compact` to move the
//! buffered bytes back to offset 0. Growth is always explicit: the window
//! never doubles on its own.

use alloc::{vec, vec::Vec};
use core::fmt;

/// A contiguous byte buffer with `0 <= read <= write <= capacity`.
#[derive(Default, Clone)]
pub struct ByteWindow {
    buf: Vec<u8>,
    read: usize,
    write: usize,
}

impl fmt::Debug for ByteWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteWindow")
            .field("capacity", &self.buf.len())
            .field("read", &self.read)
            .field("write", &self.write)
            .finish()
    }
}

impl ByteWindow {
    /// Creates an empty window with no capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty window with `capacity` bytes of write space.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0; capacity],
            read: 0,
            write: 0,
        }
    }

    /// Total size of the backing storage.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Free space behind the write cursor.
    #[inline]
    pub fn write_slice(&mut self) -> &mut [u8] {
        &mut self.buf[self.write..]
    }

    /// Number of bytes that can be written without growing.
    #[inline]
    #[must_use]
    pub fn write_capacity(&self) -> usize {
        self.buf.len() - self.write
    }

    /// Publishes `n` bytes previously written into [`write_slice`].
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds [`write_capacity`].
    ///
    /// [`write_slice`]: Self::write_slice
    /// [`write_capacity`]: Self::write_capacity
    #[inline]
    pub fn commit_write(&mut self, n: usize) {
        assert!(
            n <= self.write_capacity(),
            "commit of {n} bytes exceeds write capacity {}",
            self.write_capacity()
        );
        self.write += n;
    }

    /// Buffered bytes that have not been consumed yet.
    #[inline]
    #[must_use]
    pub fn read_slice(&self) -> &[u8] {
        &self.buf[self.read..self.write]
    }

    /// Length of [`read_slice`](Self::read_slice).
    #[inline]
    #[must_use]
    pub fn read_len(&self) -> usize {
        self.write - self.read
    }

    /// Releases `n` bytes from the front of the buffered data.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds [`read_len`](Self::read_len).
    #[inline]
    pub fn consume_read(&mut self, n: usize) {
        assert!(
            n <= self.read_len(),
            "consume of {n} bytes exceeds buffered length {}",
            self.read_len()
        );
        self.read += n;
    }

    /// Extends the capacity by exactly `extra` bytes.
    ///
    /// Buffered data and cursors are preserved; the storage may move.
    pub fn grow(&mut self, extra: usize) {
        self.buf.resize(self.buf.len() + extra, 0);
    }

    /// Moves the buffered bytes to offset 0 and resets the read cursor.
    pub fn compact(&mut self) {
        if self.read > 0 {
            self.buf.copy_within(self.read..self.write, 0);
            self.write -= self.read;
            self.read = 0;
        }
    }

    /// Appends `bytes`, growing by exactly the missing space first.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        let free = self.write_capacity();
        if free < bytes.len() {
            self.grow(bytes.len() - free);
        }
        self.write_slice()[..bytes.len()].copy_from_slice(bytes);
        self.commit_write(bytes.len());
    }

    /// Drops all buffered data, keeping the allocation.
    pub fn clear(&mut self) {
        self.read = 0;
        self.write = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_commit_read_consume() {
        let mut w = ByteWindow::with_capacity(8);
        assert_eq!(w.write_capacity(), 8);

        w.write_slice()[..3].copy_from_slice(&[1, 2, 3]);
        w.commit_write(3);
        assert_eq!(w.read_slice(), &[1, 2, 3]);
        assert_eq!(w.write_capacity(), 5);

        w.consume_read(2);
        assert_eq!(w.read_slice(), &[3]);
        assert_eq!(w.read_len(), 1);
        // Consuming does not free write space until compaction.
        assert_eq!(w.write_capacity(), 5);
    }

    #[test]
    fn compact_moves_buffered_bytes_to_front() {
        let mut w = ByteWindow::with_capacity(6);
        w.extend_from_slice(&[9, 8, 7, 6]);
        w.consume_read(3);
        w.compact();
        assert_eq!(w.read_slice(), &[6]);
        assert_eq!(w.write_capacity(), 5);

        // Compacting an already compact window is a no-op.
        w.compact();
        assert_eq!(w.read_slice(), &[6]);
    }

    #[test]
    fn grow_is_exact_and_preserves_data() {
        let mut w = ByteWindow::with_capacity(2);
        w.extend_from_slice(&[1, 2]);
        assert_eq!(w.write_capacity(), 0);
        w.grow(5);
        assert_eq!(w.capacity(), 7);
        assert_eq!(w.write_capacity(), 5);
        assert_eq!(w.read_slice(), &[1, 2]);
    }

    #[test]
    fn extend_grows_only_by_deficit() {
        let mut w = ByteWindow::with_capacity(4);
        w.extend_from_slice(&[0xAA; 3]);
        w.extend_from_slice(&[0xBB; 3]);
        assert_eq!(w.capacity(), 6);
        assert_eq!(w.read_slice(), &[0xAA, 0xAA, 0xAA, 0xBB, 0xBB, 0xBB]);
    }

    #[test]
    fn clear_keeps_allocation() {
        let mut w = ByteWindow::with_capacity(4);
        w.extend_from_slice(&[1, 2]);
        w.consume_read(1);
        w.clear();
        assert_eq!(w.read_len(), 0);
        assert_eq!(w.write_capacity(), 4);
    }

    #[test]
    #[should_panic(expected = "exceeds write capacity")]
    fn commit_past_capacity_panics() {
        let mut w = ByteWindow::with_capacity(1);
        w.commit_write(2);
    }

    #[test]
    #[should_panic(expected = "exceeds buffered length")]
    fn consume_past_data_panics() {
        let mut w = ByteWindow::new();
        w.consume_read(1);
    }
}
