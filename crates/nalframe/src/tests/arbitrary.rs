use alloc::{boxed::Box, vec::Vec};

use quickcheck::{Arbitrary, Gen};

use super::utils::encode_annexb;

/// A unit payload that can be framed unambiguously: it never contains a
/// start code and never ends in a zero byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Payload(pub Vec<u8>);

impl Payload {
    /// Applies H.264-style emulation prevention so `bytes` stays a single
    /// unit: `03` is inserted after two zeros when the next byte is `<= 03`
    /// or the payload would end in zero.
    fn escape(bytes: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(bytes.len() + 2);
        let mut zeros = 0;
        for &b in bytes {
            if zeros >= 2 && b <= 0x03 {
                out.push(0x03);
                zeros = 0;
            }
            out.push(b);
            zeros = if b == 0 { zeros + 1 } else { 0 };
        }
        if out.last().is_none_or(|&b| b == 0) {
            out.push(0x03);
        }
        out
    }
}

impl Arbitrary for Payload {
    fn arbitrary(g: &mut Gen) -> Self {
        // Bias towards zeros and ones so start-code-like runs show up.
        let len = usize::arbitrary(g) % 24;
        let raw: Vec<u8> = (0..len)
            .map(|_| match u8::arbitrary(g) % 4 {
                0 | 1 => 0x00,
                2 => 0x01,
                _ => u8::arbitrary(g),
            })
            .collect();
        Self(Self::escape(&raw))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let shrunk: Vec<Self> = self
            .0
            .shrink()
            .map(|bytes| Self(Self::escape(&bytes)))
            .filter(|p| p.0.len() < self.0.len())
            .collect();
        Box::new(shrunk.into_iter())
    }
}

/// An Annex-B stream built from known payloads.
#[derive(Debug, Clone)]
pub(crate) struct AnnexbStream {
    pub units: Vec<Vec<u8>>,
    /// Leading zeros of each start code, each in `2..=4`.
    pub zero_runs: Vec<usize>,
    /// Whether a final start code closes the last unit.
    pub closed: bool,
}

impl AnnexbStream {
    pub(crate) fn bytes(&self) -> Vec<u8> {
        encode_annexb(&self.units, &self.zero_runs, self.closed)
    }
}

impl Arbitrary for AnnexbStream {
    fn arbitrary(g: &mut Gen) -> Self {
        let count = usize::arbitrary(g) % 8;
        let units = (0..count).map(|_| Payload::arbitrary(g).0).collect();
        let zero_runs = (0..=count).map(|_| 2 + usize::arbitrary(g) % 3).collect();
        Self {
            units,
            zero_runs,
            closed: bool::arbitrary(g),
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let mut shrunk = Vec::new();
        for i in 0..self.units.len() {
            let mut units = self.units.clone();
            units.remove(i);
            shrunk.push(Self {
                units,
                zero_runs: self.zero_runs.clone(),
                closed: self.closed,
            });
        }
        Box::new(shrunk.into_iter())
    }
}

#[test]
fn escape_breaks_start_codes_and_trailing_zeros() {
    assert_eq!(Payload::escape(&[0, 0, 1]), [0, 0, 3, 1]);
    assert_eq!(Payload::escape(&[0, 0, 0, 1]), [0, 0, 3, 0, 1]);
    assert_eq!(Payload::escape(&[0x65, 0]), [0x65, 0, 3]);
    assert_eq!(Payload::escape(&[]), [3]);
    assert_eq!(Payload::escape(&[0, 0, 0x80]), [0, 0, 0x80]);
}
