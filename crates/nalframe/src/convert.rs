//! Whole-stream conversion between Annex-B and length-prefixed framing.
//!
//! Both directions read from any [`Read`] and write to any [`Write`]; they
//! never seek and never buffer more than one unit plus one read chunk.

use alloc::vec;
use std::io::{self, Read, Write};

use crate::{
    error::ConvertError,
    extractor::FrameExtractor,
    length_prefixed::LENGTH_PREFIX_LEN,
    options::{ConvertOptions, TruncationPolicy},
    scanner::START_CODE,
};

/// Counters reported by a finished conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Input bytes consumed.
    pub bytes_read: u64,
    /// Output bytes produced.
    pub bytes_written: u64,
    /// Units written.
    pub units: u64,
}

/// Writes one record: a 4-byte big-endian length, then `payload`.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Fails with [`ConvertError::UnitTooLarge`] if `payload` is longer than
/// `u32::MAX`, or with [`ConvertError::Io`] if writing fails.
pub fn write_length_prefixed_unit<W: Write + ?Sized>(
    output: &mut W,
    payload: &[u8],
) -> Result<u64, ConvertError> {
    let len =
        u32::try_from(payload.len()).map_err(|_| ConvertError::UnitTooLarge(payload.len()))?;
    output.write_all(&len.to_be_bytes())?;
    output.write_all(payload)?;
    Ok((LENGTH_PREFIX_LEN + payload.len()) as u64)
}

/// Writes one unit preceded by the canonical `00 00 01` start code.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Fails if writing to `output` fails.
pub fn write_annexb_unit<W: Write + ?Sized>(output: &mut W, payload: &[u8]) -> io::Result<u64> {
    output.write_all(&START_CODE)?;
    output.write_all(payload)?;
    Ok((START_CODE.len() + payload.len()) as u64)
}

/// Reads until `buf` is full or the input ends; returns the bytes read.
fn read_full<R: Read + ?Sized>(input: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Converts an Annex-B stream into length-prefixed records.
///
/// Every unit closed by a following start code is written as a 4-byte
/// big-endian payload length and the payload. The bytes after the last
/// start code are only written when [`ConvertOptions::flush_trailing`] is
/// set.
///
/// ```
/// use nalframe::{ConvertOptions, annexb_to_length_prefixed};
///
/// let input: &[u8] = &[0, 0, 1, 0xAA, 0xBB, 0, 0, 1, 0xCC];
/// let mut output = Vec::new();
/// let options = ConvertOptions { flush_trailing: true, ..Default::default() };
/// let summary = annexb_to_length_prefixed(input, &mut output, &options).unwrap();
/// assert_eq!(summary.units, 2);
/// assert_eq!(output, [0, 0, 0, 2, 0xAA, 0xBB, 0, 0, 0, 1, 0xCC]);
/// ```
///
/// # Errors
///
/// Fails on read or write errors, or if a unit exceeds `u32::MAX` bytes.
pub fn annexb_to_length_prefixed<R: Read, W: Write>(
    input: R,
    mut output: W,
    options: &ConvertOptions,
) -> Result<ConvertSummary, ConvertError> {
    let mut input = input.take(options.max_input_bytes);
    let mut extractor = FrameExtractor::new();
    let mut summary = ConvertSummary::default();
    let grow_by = options.chunk_size.max(1);

    loop {
        extractor.compact();
        if extractor.write_capacity() == 0 {
            extractor.grow(grow_by);
        }

        let n = match input.read(extractor.write_slice()) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        if n == 0 {
            break;
        }
        extractor.commit_write(n);
        summary.bytes_read += n as u64;

        while let Some(unit) = extractor.next_unit() {
            summary.bytes_written += write_length_prefixed_unit(&mut output, unit.payload())?;
            summary.units += 1;
        }

        tracing::debug!(
            read = n,
            total = summary.bytes_read,
            buffered = extractor.buffered_bytes(),
            unscanned = extractor.unscanned_bytes(),
            "annex-b read iteration"
        );
    }

    if options.flush_trailing {
        while let Some(unit) = extractor.flush() {
            summary.bytes_written += write_length_prefixed_unit(&mut output, unit.payload())?;
            summary.units += 1;
        }
    } else if extractor.buffered_bytes() > 0 {
        tracing::debug!(
            buffered = extractor.buffered_bytes(),
            "dropping bytes after the last start code"
        );
    }

    output.flush()?;
    Ok(summary)
}

/// Converts length-prefixed records into an Annex-B stream.
///
/// Each record becomes `00 00 01` followed by its payload, copied through a
/// [`ConvertOptions::chunk_size`] buffer. A header cut short by the end of
/// input ends the stream cleanly; a payload cut short is handled according
/// to [`ConvertOptions::truncation`].
///
/// Reaching [`ConvertOptions::max_input_bytes`] is never a truncation: the
/// bytes read up to the limit are written and the conversion ends cleanly,
/// even inside a record.
///
/// # Errors
///
/// Fails on read or write errors, and with [`ConvertError::Truncated`] when
/// a payload is cut short under [`TruncationPolicy::Error`].
pub fn length_prefixed_to_annexb<R: Read, W: Write>(
    input: R,
    mut output: W,
    options: &ConvertOptions,
) -> Result<ConvertSummary, ConvertError> {
    let mut input = input.take(options.max_input_bytes);
    let mut chunk = vec![0u8; options.chunk_size.max(1)];
    let mut summary = ConvertSummary::default();

    loop {
        let mut header = [0u8; LENGTH_PREFIX_LEN];
        let n = read_full(&mut input, &mut header)?;
        summary.bytes_read += n as u64;
        if n < LENGTH_PREFIX_LEN {
            if n > 0 {
                tracing::debug!(bytes = n, "ignoring partial length header at end of input");
            }
            break;
        }

        let declared = u32::from_be_bytes(header);
        output.write_all(&START_CODE)?;
        summary.bytes_written += START_CODE.len() as u64;

        let mut remaining = u64::from(declared);
        while remaining > 0 {
            let want = usize::try_from(remaining).map_or(chunk.len(), |r| r.min(chunk.len()));
            let got = read_full(&mut input, &mut chunk[..want])?;
            output.write_all(&chunk[..got])?;
            summary.bytes_read += got as u64;
            summary.bytes_written += got as u64;
            remaining -= got as u64;
            if got < want {
                break;
            }
        }
        summary.units += 1;

        if remaining > 0 {
            let copied = u64::from(declared) - remaining;
            if input.limit() == 0 {
                tracing::debug!(
                    declared,
                    copied,
                    limit = options.max_input_bytes,
                    "input limit reached inside a record"
                );
                break;
            }
            match options.truncation {
                TruncationPolicy::Error => {
                    output.flush()?;
                    return Err(ConvertError::Truncated { declared, copied });
                }
                TruncationPolicy::CopyAvailable => {
                    tracing::warn!(
                        declared,
                        copied,
                        "length-prefixed record truncated by end of input"
                    );
                    break;
                }
            }
        }
    }

    output.flush()?;
    Ok(summary)
}
