//! Streaming framer for Annex-B video elementary streams.
//!
//! H.264/H.265 elementary streams in Annex-B form delimit NAL units with
//! start codes (`00 00 01`, or longer zero runs). This crate finds those
//! boundaries incrementally over arbitrarily chunked input and hands out
//! borrowed views of each unit, without copying and without interpreting
//! the units themselves.
//!
//! - [`StartCodeScanner`] is the resumable per-byte search.
//! - [`FrameExtractor`] owns the buffered bytes and yields [`UnitView`]s.
//! - With the `std` feature (default), [`annexb_to_length_prefixed`] and
//!   [`length_prefixed_to_annexb`] convert whole streams between Annex-B and
//!   4-byte big-endian length-prefixed framing.
//!
//! ```
//! use nalframe::FrameExtractor;
//!
//! let mut extractor = FrameExtractor::new();
//! let mut payloads = Vec::new();
//! let chunks: [&[u8]; 3] = [&[0x00, 0x00], &[0x01, 0x67, 0x42, 0x00], &[0x00, 0x01, 0x68]];
//! for chunk in chunks {
//!     extractor.compact();
//!     extractor.push(chunk);
//!     while let Some(unit) = extractor.next_unit() {
//!         payloads.push(unit.payload().to_vec());
//!     }
//! }
//! assert_eq!(payloads, [vec![0x67, 0x42]]);
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod chunk_utils;
mod error;
mod extractor;
mod length_prefixed;
mod scanner;
mod unit;
mod window;

#[cfg(feature = "std")]
mod convert;
#[cfg(feature = "std")]
mod options;

#[cfg(test)]
mod tests;

pub use error::LengthPrefixError;
pub use extractor::FrameExtractor;
pub use length_prefixed::{LENGTH_PREFIX_LEN, LengthPrefixedUnits, length_prefixed_units};
pub use scanner::{START_CODE, StartCode, StartCodeScanner};
pub use unit::UnitView;
pub use window::ByteWindow;

// Chunking helpers shared by the tests and benchmarks.
#[doc(hidden)]
pub use chunk_utils::{partition_by, produce_chunks};

#[cfg(feature = "std")]
pub use convert::{
    ConvertSummary, annexb_to_length_prefixed, length_prefixed_to_annexb, write_annexb_unit,
    write_length_prefixed_unit,
};
#[cfg(feature = "std")]
pub use error::ConvertError;
#[cfg(feature = "std")]
pub use options::{ConvertOptions, TruncationPolicy};
