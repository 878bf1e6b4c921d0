//! In-memory view of the length-prefixed format.
//!
//! Each record is a 4-byte big-endian payload length followed by the
//! payload. There is no outer container.

use crate::error::LengthPrefixError;

/// Size of a record header.
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Iterates the records of a length-prefixed buffer.
///
/// ```
/// use nalframe::length_prefixed_units;
///
/// let data = [0, 0, 0, 2, 0xAA, 0xBB, 0, 0, 0, 1, 0xCC];
/// let units: Vec<&[u8]> = length_prefixed_units(&data)
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(units, [&[0xAA, 0xBB][..], &[0xCC][..]]);
/// ```
#[must_use]
pub fn length_prefixed_units(data: &[u8]) -> LengthPrefixedUnits<'_> {
    LengthPrefixedUnits { data, offset: 0 }
}

/// Iterator returned by [`length_prefixed_units`].
///
/// A header cut short by the end of the buffer ends iteration cleanly. A
/// payload cut short yields one [`LengthPrefixError::Truncated`] and then
/// ends.
#[derive(Debug, Clone)]
pub struct LengthPrefixedUnits<'a> {
    data: &'a [u8],
    offset: usize,
}

impl LengthPrefixedUnits<'_> {
    /// Bytes not yet consumed by the iterator.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }
}

impl<'a> Iterator for LengthPrefixedUnits<'a> {
    type Item = Result<&'a [u8], LengthPrefixError>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.data[self.offset..];
        let (header, body) = rest.split_first_chunk::<LENGTH_PREFIX_LEN>()?;
        let declared = u32::from_be_bytes(*header);
        // u32 always fits in usize on the targets we support.
        let len = declared as usize;

        if body.len() < len {
            let err = LengthPrefixError::Truncated {
                offset: self.offset,
                declared,
                available: body.len(),
            };
            self.offset = self.data.len();
            return Some(Err(err));
        }

        self.offset += LENGTH_PREFIX_LEN + len;
        Some(Ok(&body[..len]))
    }
}
