/// What the length-prefixed reader does when the input ends inside a
/// record's payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TruncationPolicy {
    /// Write what was available, then fail with
    /// [`ConvertError::Truncated`](crate::ConvertError::Truncated).
    #[default]
    Error,
    /// Write what was available and finish as if the stream ended cleanly.
    CopyAvailable,
}

/// Configuration for the whole-stream converters.
///
/// # Examples
///
/// ```rust
/// use nalframe::{ConvertOptions, TruncationPolicy};
///
/// let options = ConvertOptions {
///     max_input_bytes: 10 * 1024,
///     truncation: TruncationPolicy::CopyAvailable,
///     ..Default::default()
/// };
/// assert_eq!(options.chunk_size, 4096);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Stop once this many input bytes have been read.
    ///
    /// Hitting the limit ends either conversion cleanly, including in the
    /// middle of a length-prefixed record; it is not subject to
    /// [`truncation`](Self::truncation).
    ///
    /// # Default
    ///
    /// `u64::MAX`
    pub max_input_bytes: u64,

    /// Growth step of the Annex-B reader's window, and size of the copy
    /// buffer used by the length-prefixed reader.
    ///
    /// # Default
    ///
    /// `4096`
    pub chunk_size: usize,

    /// Behavior on a record cut short by the end of input.
    ///
    /// # Default
    ///
    /// [`TruncationPolicy::Error`]
    pub truncation: TruncationPolicy,

    /// Whether the Annex-B reader emits the bytes after the last start code
    /// as a final unit at end of input.
    ///
    /// When `false` a unit is only written once the following start code
    /// has been seen, so the last unit of a stream is dropped unless the
    /// stream ends with a start code.
    ///
    /// # Default
    ///
    /// `false`
    pub flush_trailing: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            max_input_bytes: u64::MAX,
            chunk_size: 4096,
            truncation: TruncationPolicy::default(),
            flush_trailing: false,
        }
    }
}
