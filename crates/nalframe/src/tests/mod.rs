mod arbitrary;
#[cfg(feature = "std")]
mod property_roundtrip;
pub(crate) mod utils;
