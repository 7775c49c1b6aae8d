//! Canonical byte encoding of compact values.
//!
//! Layout: `[scheme tag: 1 byte][element count: LEB128][payload]`. The
//! payload length is an exact function of the tag and element count, so the
//! layout carries no explicit payload length and structural corruption is
//! detectable from the header alone.

use bytes::{BufMut, Bytes, BytesMut};

pub mod decoder;
pub mod encoder;

/// A value with a canonical, deterministic byte encoding.
pub trait Encodable {
    /// Exact number of bytes [`Encodable::encode`] will write.
    fn encoded_size(&self) -> usize;

    /// Writes the canonical encoding into `buf`.
    fn encode<B: BufMut>(&self, buf: &mut B);

    /// Encodes into a freshly allocated buffer.
    fn encode_to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_size());
        self.encode(&mut buf);
        buf.freeze()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use bytes::Bytes;

    use crate::{
        CompactValue, DecodeErr, Encodable, Scheme,
        testutil::{TextGen, mkvalue},
    };

    #[test]
    fn test_canonical_layout() {
        //                       tag  count  payload (5 elements x 7 bits)
        let expected: &[u8] = &[0x00, 0x05, 0xD1, 0x97, 0x66, 0xCD, 0xE0];
        let value = mkvalue("hello");
        assert_eq!(value.encoded_size(), expected.len());
        assert_eq!(value.encode_to_bytes(), Bytes::from_static(expected));

        let reparsed = CompactValue::from_bytes(value.encode_to_bytes()).unwrap();
        assert_eq!(reparsed, value);
        assert_eq!(reparsed.decode(), "hello");
    }

    #[test]
    fn test_empty_value_layout() {
        let value = mkvalue("");
        assert_eq!(value.encode_to_bytes(), Bytes::from_static(&[0x00, 0x00]));
        let reparsed = CompactValue::from_bytes(value.encode_to_bytes()).unwrap();
        assert!(reparsed.is_empty());
        assert_eq!(reparsed.decode(), "");
    }

    #[test]
    fn test_serialized_roundtrip_all_schemes() {
        let mut textgen = TextGen::new(0xDEAD_BEEF);
        for _ in 0..64 {
            for text in [
                textgen.ascii(24),
                textgen.latin1(24),
                textgen.unicode(24),
            ] {
                let value = mkvalue(&text);
                let buf = value.encode_to_bytes();
                assert_eq!(buf.len(), value.encoded_size());
                let reparsed = CompactValue::from_bytes(buf).unwrap();
                assert_eq!(reparsed, value);
                assert_eq!(reparsed.decode(), text);
            }
        }
    }

    #[test]
    fn test_truncated_is_corrupt() {
        let buf = mkvalue("hello").encode_to_bytes();
        for len in 0..buf.len() {
            assert_matches!(
                CompactValue::from_bytes(buf.slice(..len)),
                Err(DecodeErr::CorruptPayload),
                "prefix of {len} bytes"
            );
        }
    }

    #[test]
    fn test_trailing_garbage_is_corrupt() {
        let mut buf = mkvalue("hello").encode_to_bytes().to_vec();
        buf.push(0x00);
        assert_matches!(
            CompactValue::from_bytes(Bytes::from(buf)),
            Err(DecodeErr::CorruptPayload)
        );
    }

    #[test]
    fn test_unknown_tag_is_corrupt() {
        let mut buf = mkvalue("hello").encode_to_bytes().to_vec();
        buf[0] = 0x09;
        assert_matches!(
            CompactValue::from_bytes(Bytes::from(buf)),
            Err(DecodeErr::CorruptPayload)
        );
    }

    #[test]
    fn test_overflowing_count_is_corrupt() {
        // wide tag with a u64::MAX element count and no payload
        let mut buf = vec![Scheme::Wide16.tag()];
        buf.extend_from_slice(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]);
        assert_matches!(
            CompactValue::from_bytes(Bytes::from(buf)),
            Err(DecodeErr::CorruptPayload)
        );
    }

    #[test]
    fn test_count_payload_mismatch_is_corrupt() {
        // tag says 8-bit, count says 3, but 4 payload bytes follow
        let buf = Bytes::from_static(&[0x01, 0x03, b'a', b'b', b'c', b'd']);
        assert_matches!(
            CompactValue::from_bytes(buf),
            Err(DecodeErr::CorruptPayload)
        );
    }
}
