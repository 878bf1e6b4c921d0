#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use nalframe::FrameExtractor;
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

const HEADER: usize = 5; // 1 flag + 4-byte seed

thread_local! {
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// A unit as the fuzzer sees it: a start code of `2..=5` zeros, then a
/// payload that may or may not contain start-code-like bytes.
#[derive(Debug, Arbitrary)]
struct FuzzUnit {
    extra_zeros: u8,
    payload: Vec<u8>,
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x07);
        data[1..5].copy_from_slice(&with_rng(|rng| rng.next_u32().to_le_bytes()));

        let mut prefix = HEADER;
        while prefix < size.max(HEADER + 1) && prefix < max_size {
            let written = append_unit(&mut data[prefix..max_size]);
            if written == 0 {
                break;
            }
            prefix += written;
        }
        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Append one start code and payload to `buf`, never past its end.
/// Returns the number of bytes written.
fn append_unit(buf: &mut [u8]) -> usize {
    let unit = loop {
        let raw: Vec<u8> = with_rng(|rng| {
            let n = rng.random_range(0..64);
            (0..n).map(|_| rng.random::<u8>()).collect()
        });
        if let Ok(unit) = FuzzUnit::arbitrary(&mut arbitrary::Unstructured::new(&raw)) {
            break unit;
        }
    };

    let mut bytes = vec![0x00; 2 + usize::from(unit.extra_zeros % 4)];
    bytes.push(0x01);
    bytes.extend_from_slice(&unit.payload);

    let len = bytes.len().min(buf.len());
    buf[..len].copy_from_slice(&bytes[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug, PartialEq, Eq)]
struct Extracted {
    payload: Vec<u8>,
    zero_run: usize,
    raw_len: usize,
}

fn drain(extractor: &mut FrameExtractor, flush: bool, out: &mut Vec<Extracted>) {
    loop {
        let unit = if flush {
            extractor.flush()
        } else {
            extractor.next_unit()
        };
        let Some(unit) = unit else { break };
        assert_eq!(unit.raw_span().len(), unit.total_span());
        out.push(Extracted {
            payload: unit.payload().to_vec(),
            zero_run: unit.start_code().zero_run,
            raw_len: unit.raw_span().len(),
        });
    }
    extractor.assert_invariants();
}

fn extractor(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let split_seed = u32::from_le_bytes(data[1..5].try_into().unwrap());
    let data = &data[HEADER..];

    let flush = flags & 1 != 0;
    let compact_every_chunk = flags & 2 != 0;
    let drain_every_chunk = flags & 4 != 0;

    // Reference: everything in one push.
    let mut whole = FrameExtractor::new();
    let mut expected = Vec::new();
    whole.push(data);
    drain(&mut whole, false, &mut expected);
    if flush {
        drain(&mut whole, true, &mut expected);
    }

    // Chunked through the zero-copy write path.
    let mut rng = SmallRng::seed_from_u64(u64::from(split_seed));
    let mut chunked = FrameExtractor::new();
    let mut actual = Vec::new();
    let mut rest = data;
    while !rest.is_empty() {
        if compact_every_chunk || rng.random_bool(0.5) {
            chunked.compact();
            chunked.assert_invariants();
        }
        let n = rng.random_range(1..=rest.len().min(64));
        if chunked.write_capacity() < n {
            chunked.grow(n - chunked.write_capacity());
        }
        chunked.write_slice()[..n].copy_from_slice(&rest[..n]);
        chunked.commit_write(n);
        rest = &rest[n..];

        if drain_every_chunk || rest.is_empty() {
            drain(&mut chunked, false, &mut actual);
        }
    }
    drain(&mut chunked, false, &mut actual);
    if flush {
        drain(&mut chunked, true, &mut actual);
    }

    assert_eq!(expected, actual);
}

fuzz_target!(|data: &[u8]| extractor(data));
