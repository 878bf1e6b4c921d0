use alloc::vec::Vec;

use quickcheck::QuickCheck;

use super::{
    arbitrary::{AnnexbStream, Payload},
    utils::{encode_annexb, extract_whole},
};
use crate::{
    ConvertOptions, annexb_to_length_prefixed, length_prefixed_to_annexb, length_prefixed_units,
};

fn tests() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}

/// Property: payloads framed with any start codes come back byte for byte
/// and in order.
#[test]
fn annexb_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(stream: AnnexbStream) -> bool {
        extract_whole(&stream.bytes(), true) == stream.units
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(AnnexbStream) -> bool);
}

/// Property: without a flush only units closed by a following start code
/// are emitted.
#[test]
fn unflushed_stream_holds_back_last_unit_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(stream: AnnexbStream) -> bool {
        let emitted = extract_whole(&stream.bytes(), false);
        let expected = if stream.closed || stream.units.is_empty() {
            &stream.units[..]
        } else {
            &stream.units[..stream.units.len() - 1]
        };
        emitted == expected
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(AnnexbStream) -> bool);
}

/// Property: the length of the leading zero run never moves a boundary.
#[test]
fn start_code_length_invariance_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(units: Vec<Payload>, closed: bool) -> bool {
        let units: Vec<Vec<u8>> = units.into_iter().map(|p| p.0).collect();
        let by_run: Vec<_> = [2, 3, 4]
            .iter()
            .map(|&run| extract_whole(&encode_annexb(&units, &[run], closed), false))
            .collect();
        by_run.iter().all(|u| *u == by_run[0])
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Vec<Payload>, bool) -> bool);
}

/// Property: Annex-B -> length-prefixed -> Annex-B keeps every payload.
#[test]
fn converter_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(stream: AnnexbStream, chunk_size: u8) -> bool {
        let options = ConvertOptions {
            chunk_size: usize::from(chunk_size) + 1,
            flush_trailing: true,
            ..ConvertOptions::default()
        };

        let mut lengthed = Vec::new();
        let summary =
            annexb_to_length_prefixed(&stream.bytes()[..], &mut lengthed, &options).unwrap();
        let records: Vec<Vec<u8>> = length_prefixed_units(&lengthed)
            .map(|r| r.unwrap().to_vec())
            .collect();

        let mut annexb = Vec::new();
        length_prefixed_to_annexb(&lengthed[..], &mut annexb, &options).unwrap();

        summary.units == stream.units.len() as u64
            && records == stream.units
            && annexb == encode_annexb(&stream.units, &[2], false)
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(AnnexbStream, u8) -> bool);
}
