//! Forwards each unit of an Annex-B stream, start code included, to a
//! downstream consumer as soon as the following start code arrives.
//!
//! A packetizer or muxer often wants the original bytes of each unit rather
//! than just its payload, for example to keep the exact start code length the
//! encoder chose. [`UnitView::raw_span`] hands those bytes out without a copy;
//! the consumer only has to finish with them before the extractor is fed
//! again.
//!
//! The stream is delivered in small, irregular chunks to mirror a socket or a
//! pipe, and the last unit is drained with `flush` once the input ends.
//!
//! Run with
//!
//! ```bash
//! cargo run -p nalframe --example forward_units
//! ```
#![allow(missing_docs)]

use nalframe::{FrameExtractor, UnitView};

/// Stand-in for a packetizer: records what it was handed.
#[derive(Default)]
struct Packetizer {
    packets: Vec<Vec<u8>>,
}

impl Packetizer {
    fn send(&mut self, unit: &UnitView<'_>) {
        let nal_type = unit.payload().first().map(|b| b & 0x1F);
        println!(
            "unit: start code {} bytes, nal type {nal_type:?}, {} bytes forwarded",
            unit.start_code().code_len(),
            unit.total_span(),
        );
        self.packets.push(unit.raw_span().to_vec());
    }
}

fn main() {
    let stream: &[u8] = &[
        0x00, 0x00, 0x00, 0x01, 0x67, 0x42, 0xC0, 0x1E, // SPS
        0x00, 0x00, 0x01, 0x68, 0xCE, 0x3C, 0x80, // PPS
        0x00, 0x00, 0x01, 0x65, 0x88, 0x84, 0x00, 0x00, 0x03, 0x01, // IDR
    ];
    let sizes = [3usize, 5, 1, 7, 2, 4, 3];

    let mut extractor = FrameExtractor::new();
    let mut sink = Packetizer::default();
    let mut rest = stream;
    for size in sizes {
        let (chunk, tail) = rest.split_at(size.min(rest.len()));
        rest = tail;

        extractor.compact();
        extractor.push(chunk);
        while let Some(unit) = extractor.next_unit() {
            sink.send(&unit);
        }
    }
    while let Some(unit) = extractor.flush() {
        sink.send(&unit);
    }

    assert_eq!(sink.packets.concat(), stream);
    println!("forwarded {} units", sink.packets.len());
}
