use thiserror::Error;

/// Malformed record in an in-memory length-prefixed buffer.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LengthPrefixError {
    /// The header declared more payload than the buffer holds.
    #[error("record at offset {offset} declares {declared} bytes but only {available} remain")]
    Truncated {
        /// Offset of the record's length header.
        offset: usize,
        /// Payload length from the header.
        declared: u32,
        /// Bytes left after the header.
        available: usize,
    },
}

/// Failure of a whole-stream conversion.
#[cfg(feature = "std")]
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Reading the input or writing the output failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// A unit is too long for a 4-byte length header.
    #[error("unit of {0} bytes does not fit a 32-bit length prefix")]
    UnitTooLarge(usize),
    /// The input ended inside a record's payload.
    #[error("input ended {copied} bytes into a record declaring {declared} bytes")]
    Truncated {
        /// Payload length from the header.
        declared: u32,
        /// Payload bytes that were available and copied.
        copied: u64,
    },
}
