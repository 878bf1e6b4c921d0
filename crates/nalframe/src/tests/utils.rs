use alloc::vec::Vec;

use crate::FrameExtractor;

/// Encodes `units` as Annex-B, unit `i` preceded by `zero_runs[i]` zeros
/// (cycled) and `0x01`. `closed` appends one more start code at the end.
pub(crate) fn encode_annexb(units: &[Vec<u8>], zero_runs: &[usize], closed: bool) -> Vec<u8> {
    let zeros_for = |i: usize| zero_runs.get(i % zero_runs.len().max(1)).copied().unwrap_or(2);
    let mut out = Vec::new();
    for (i, unit) in units.iter().enumerate() {
        out.resize(out.len() + zeros_for(i), 0x00);
        out.push(0x01);
        out.extend_from_slice(unit);
    }
    if closed {
        out.resize(out.len() + zeros_for(units.len()), 0x00);
        out.push(0x01);
    }
    out
}

/// How the harness drives the extractor between chunks.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Drive {
    /// `compact()` calls before each chunk is pushed.
    pub compactions: usize,
    /// Whether to call `next_unit()` after each chunk.
    pub drain_each_chunk: bool,
    /// Whether to drain with `flush()` at the end.
    pub flush: bool,
}

impl Default for Drive {
    fn default() -> Self {
        Self {
            compactions: 1,
            drain_each_chunk: true,
            flush: true,
        }
    }
}

/// Feeds `chunks` through a fresh extractor and collects every payload.
pub(crate) fn extract(chunks: &[&[u8]], drive: Drive) -> Vec<Vec<u8>> {
    let mut extractor = FrameExtractor::new();
    let mut units = Vec::new();
    for chunk in chunks {
        for _ in 0..drive.compactions {
            extractor.compact();
            extractor.assert_invariants();
        }
        extractor.push(chunk);
        if drive.drain_each_chunk {
            while let Some(unit) = extractor.next_unit() {
                units.push(unit.payload().to_vec());
            }
            extractor.assert_invariants();
        }
    }
    if drive.flush {
        while let Some(unit) = extractor.flush() {
            units.push(unit.payload().to_vec());
        }
    } else {
        while let Some(unit) = extractor.next_unit() {
            units.push(unit.payload().to_vec());
        }
    }
    extractor.assert_invariants();
    units
}

/// Extracts from one contiguous buffer.
pub(crate) fn extract_whole(data: &[u8], flush: bool) -> Vec<Vec<u8>> {
    extract(
        &[data],
        Drive {
            flush,
            ..Drive::default()
        },
    )
}
