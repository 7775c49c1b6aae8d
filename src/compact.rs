use std::sync::OnceLock;

use bytes::{BufMut, Bytes};
use crc64fast_nvme::Digest;

use crate::{DecodeErr, Encodable, Scheme, varint};

mod cmp;

/// Immutable compacted text: a scheme tag, an element count, and the packed
/// payload bytes.
///
/// A `CompactValue` is created by [`Encoder::encode`] or parsed back from its
/// canonical bytes with [`CompactValue::from_bytes`], and never mutated
/// afterwards; any number of threads may read the same instance without
/// synchronization. Because encoding is deterministic and scheme selection is
/// unique per text, equality, hashing, and ordering operate on the compacted
/// bytes and never run the decoder (ordering decodes only when a scheme's
/// byte order diverges from text order — see
/// [`Scheme::payload_orders_like_text`]).
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
///
/// use textpack::Encoder;
///
/// let encoder = Encoder::default();
/// let mut seen = HashSet::new();
/// for word in ["compact", "values", "hash", "compact"] {
///     seen.insert(encoder.encode(word)?);
/// }
/// assert_eq!(seen.len(), 3);
/// # Ok::<(), textpack::EncodeErr>(())
/// ```
///
/// [`Encoder::encode`]: crate::Encoder::encode
#[derive(Debug, Clone)]
pub struct CompactValue {
    scheme: Scheme,
    element_count: usize,
    payload: Bytes,
    /// Memoized content hash; not part of the value's identity.
    hash: OnceLock<u64>,
}

static_assertions::assert_impl_all!(CompactValue: Send, Sync);

impl CompactValue {
    pub(crate) fn new(scheme: Scheme, element_count: usize, payload: Bytes) -> Self {
        debug_assert_eq!(payload.len(), scheme.payload_len(element_count));
        Self { scheme, element_count, payload, hash: OnceLock::new() }
    }

    /// The scheme that produced the payload.
    #[inline]
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Number of UTF-16 code units represented. O(1), no decode.
    #[inline]
    pub fn len(&self) -> usize {
        self.element_count
    }

    /// True when the represented text is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.element_count == 0
    }

    /// The packed payload bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Stable 64-bit hash of `(scheme tag, element count, payload)`.
    ///
    /// Computed once per value and memoized. The digest depends only on the
    /// canonical fields, so it is identical across processes for equal values
    /// and safe to persist alongside the canonical bytes.
    pub fn content_hash(&self) -> u64 {
        *self.hash.get_or_init(|| {
            let mut digest = Digest::new();
            digest.write(&[self.scheme.tag()]);
            digest.write(&(self.element_count as u64).to_le_bytes());
            digest.write(&self.payload);
            digest.sum64()
        })
    }

    /// Parses a value from its canonical bytes (see [`Encodable`]).
    ///
    /// The payload is sliced out of `data` without copying. The whole
    /// structure is validated here: the scheme tag must be known, the element
    /// count well formed, and `data` must hold exactly the payload bytes the
    /// header calls for — truncation and trailing garbage are both
    /// [`DecodeErr::CorruptPayload`].
    pub fn from_bytes(data: Bytes) -> Result<Self, DecodeErr> {
        let mut rest = &data[..];
        let (&tag, remainder) = rest.split_first().ok_or(DecodeErr::CorruptPayload)?;
        rest = remainder;
        let scheme = Scheme::from_tag(tag).ok_or(DecodeErr::CorruptPayload)?;

        let element_count = varint::read(&mut rest)?;
        let element_count =
            usize::try_from(element_count).map_err(|_| DecodeErr::CorruptPayload)?;
        let expected = scheme
            .checked_payload_len(element_count)
            .ok_or(DecodeErr::CorruptPayload)?;
        if rest.len() != expected {
            return Err(DecodeErr::CorruptPayload);
        }

        let payload = data.slice(data.len() - expected..);
        Ok(Self::new(scheme, element_count, payload))
    }
}

impl Encodable for CompactValue {
    fn encoded_size(&self) -> usize {
        1 + varint::encoded_len(self.element_count as u64) + self.payload.len()
    }

    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(self.scheme.tag());
        varint::write(buf, self.element_count as u64);
        buf.put_slice(&self.payload);
    }
}
