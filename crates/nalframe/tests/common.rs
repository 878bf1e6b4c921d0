#![allow(missing_docs)]
#![allow(dead_code)]

/// A short H.264 access unit: SPS, PPS, and an IDR slice, each behind a
/// different start code length, followed by an access unit delimiter.
pub const STREAM: &[u8] = &[
    0x00, 0x00, 0x00, 0x01, 0x67, 0x42, 0xC0, 0x1E, 0xDA, 0x02, 0x80, // SPS
    0x00, 0x00, 0x01, 0x68, 0xCE, 0x3C, 0x80, // PPS
    0x00, 0x00, 0x00, 0x00, 0x01, 0x65, 0x88, 0x84, 0x00, 0x00, 0x03, 0x01, 0x21, // IDR
    0x00, 0x00, 0x01, 0x09, 0xF0, // AUD
];

/// `STREAM` split at awkward places: inside start codes and escapes.
pub fn awkward_chunks() -> Vec<&'static [u8]> {
    [0, 2, 12, 20, 27, 29, STREAM.len()]
        .windows(2)
        .map(|w| &STREAM[w[0]..w[1]])
        .collect()
}

/// Renders bytes as space-separated lowercase hex.
pub fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
