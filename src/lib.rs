//! Textpack is a lossless text-compaction codec for programs that hold very large numbers of short strings in memory, where per-object byte overhead dominates total footprint (caches, indexes, parsed records).
//!
//! ## Key Features:
//!
//! - **Scheme-based packing**: Each string is classified once and packed with the narrowest scheme in an ordered registry that can represent every one of its code points — 7 bits per element for ASCII, one byte for the Latin-1 range, big-endian UTF-16 code units otherwise. A reduced 64-symbol alphabet at 6 bits per element is available for custom registries.
//!
//! - **Compare without decoding**: [`CompactValue`] supports equality, hashing, and lexicographic ordering directly on the compacted bytes. Encoding is deterministic and scheme selection is unique per text, so byte equality *is* text equality.
//!
//! - **Zero-allocation decode**: [`CompactValue::decode_into`] writes decoded code units into a caller-supplied buffer and allocates nothing itself.
//!
//! ```
//! use textpack::Encoder;
//!
//! let encoder = Encoder::default();
//! let value = encoder.encode("hello")?;
//!
//! // 5 ASCII characters pack into 5 bytes at 7 bits each, plus a 2-byte header.
//! assert_eq!(value.len(), 5);
//! assert_eq!(value.payload().len(), 5);
//! assert_eq!(value.decode(), "hello");
//! # Ok::<(), textpack::EncodeErr>(())
//! ```

use thiserror::Error;

mod classify;
mod codec;
mod compact;
mod cursor;
mod registry;
mod scheme;
mod varint;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

pub use codec::{Encodable, decoder::Units, encoder::Encoder};
pub use compact::CompactValue;
pub use registry::SchemeRegistry;
pub use scheme::Scheme;

/// Errors surfaced while classifying or encoding text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeErr {
    /// A code point is outside every scheme in the registry. Only possible
    /// with custom registries whose widest scheme is partial; the baseline
    /// registry ends in [`Scheme::Wide16`], which covers all of `char`.
    #[error("character {ch:?} at index {index} is not representable by any registered scheme")]
    UnsupportedCharacter { ch: char, index: usize },
}

/// Errors surfaced while decoding a [`CompactValue`] or parsing its canonical
/// serialized form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeErr {
    /// The destination cannot hold the value's element count. Nothing has
    /// been written; retry with a larger buffer.
    #[error("destination buffer too small: need {needed} code units, capacity {capacity}")]
    BufferTooSmall { needed: usize, capacity: usize },

    /// The payload length disagrees with the declared scheme tag and element
    /// count. Detects truncation and trailing garbage at the structural
    /// level; this is not a checksum.
    #[error("payload does not match its declared scheme and element count")]
    CorruptPayload,
}
