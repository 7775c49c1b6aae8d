use bytes::BytesMut;

use crate::{CompactValue, EncodeErr, SchemeRegistry, cursor::BitCursor};

/// Packs text into [`CompactValue`]s using an injected scheme registry.
///
/// Encoding is deterministic: a given registry and text always select the
/// same scheme and produce the same payload bytes. That determinism is what
/// makes byte equality of compact values equivalent to text equality.
///
/// # Examples
///
/// ```
/// use textpack::{Encoder, Scheme, SchemeRegistry};
///
/// let encoder = Encoder::new(SchemeRegistry::with_reduced_alphabet());
/// let value = encoder.encode("SKU-1047")?;
///
/// // eight 64-alphabet symbols pack into six bytes
/// assert_eq!(value.scheme(), Scheme::Alpha6);
/// assert_eq!(value.payload().len(), 6);
/// assert_eq!(value.decode(), "SKU-1047");
/// # Ok::<(), textpack::EncodeErr>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    registry: SchemeRegistry,
}

impl Encoder {
    /// An encoder over a custom registry. `Encoder::default()` uses
    /// [`SchemeRegistry::baseline`].
    pub fn new(registry: SchemeRegistry) -> Self {
        Self { registry }
    }

    #[inline]
    pub fn registry(&self) -> &SchemeRegistry {
        &self.registry
    }

    /// Compacts `text` with the narrowest scheme its registry admits.
    ///
    /// The payload is allocated at its exact final size; unused trailing bits
    /// of the last byte stay zero so byte equality is well defined.
    ///
    /// # Errors
    ///
    /// [`EncodeErr::UnsupportedCharacter`] when some code point is outside
    /// every registered scheme. Never fails for representable text.
    pub fn encode(&self, text: &str) -> Result<CompactValue, EncodeErr> {
        let scheme = self.registry.classify(text)?;
        let element_count: usize = text.chars().map(char::len_utf16).sum();

        let width = scheme.bits_per_element();
        let mut payload = BytesMut::zeroed(scheme.payload_len(element_count));
        let mut cursor = BitCursor::new();
        for unit in text.encode_utf16() {
            cursor.write(&mut payload, width, scheme.pack_unit(unit));
        }

        Ok(CompactValue::new(scheme, element_count, payload.freeze()))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::{EncodeErr, Scheme, testutil::mkvalue};

    #[test]
    fn test_empty() {
        let value = mkvalue("");
        assert_eq!(value.scheme(), Scheme::Packed7);
        assert_eq!(value.len(), 0);
        assert!(value.payload().is_empty());
    }

    #[test]
    fn test_packed7_golden() {
        let value = mkvalue("hello");
        assert_eq!(value.scheme(), Scheme::Packed7);
        assert_eq!(value.len(), 5);
        assert_eq!(value.payload(), &[0xD1, 0x97, 0x66, 0xCD, 0xE0]);
    }

    #[test]
    fn test_byte8_golden() {
        let value = mkvalue("café");
        assert_eq!(value.scheme(), Scheme::Byte8);
        assert_eq!(value.len(), 4);
        assert_eq!(value.payload(), &[0x63, 0x61, 0x66, 0xE9]);
    }

    #[test]
    fn test_wide16_golden() {
        let value = mkvalue("好");
        assert_eq!(value.scheme(), Scheme::Wide16);
        assert_eq!(value.len(), 1);
        assert_eq!(value.payload(), &[0x59, 0x7D]);
    }

    #[test]
    fn test_supplementary_packs_as_surrogate_pair() {
        let value = mkvalue("🦀");
        assert_eq!(value.scheme(), Scheme::Wide16);
        assert_eq!(value.len(), 2);
        assert_eq!(value.payload(), &[0xD8, 0x3E, 0xDD, 0x80]);
    }

    #[test]
    fn test_cjk_payload_is_two_bytes_per_element() {
        let text = "漢字テキスト";
        let value = mkvalue(text);
        assert_eq!(value.scheme(), Scheme::Wide16);
        assert_eq!(value.len(), text.chars().count());
        assert_eq!(value.payload().len(), value.len() * 2);
    }

    #[test]
    fn test_alpha6_golden() {
        let encoder = Encoder::new(SchemeRegistry::with_reduced_alphabet());
        let value = encoder.encode("HELLO").unwrap();
        assert_eq!(value.scheme(), Scheme::Alpha6);
        assert_eq!(value.len(), 5);
        assert_eq!(value.payload(), &[0xA2, 0x5B, 0x2C, 0xBC]);
        assert_eq!(value.decode(), "HELLO");
    }

    #[test]
    fn test_determinism() {
        let encoder = Encoder::default();
        for text in ["", "hello", "café", "好 and 🦀"] {
            let a = encoder.encode(text).unwrap();
            let b = encoder.encode(text).unwrap();
            assert_eq!(a, b);
            assert_eq!(a.payload(), b.payload());
            assert_eq!(a.content_hash(), b.content_hash());
        }
    }

    #[test]
    fn test_unsupported_character() {
        let encoder = Encoder::new(SchemeRegistry::new(vec![Scheme::Packed7]));
        assert_matches!(
            encoder.encode("naïve"),
            Err(EncodeErr::UnsupportedCharacter { ch: 'ï', index: 2 })
        );
    }
}
