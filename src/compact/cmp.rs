use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use super::CompactValue;

impl PartialEq for CompactValue {
    /// Byte-wise `(scheme tag, element count, payload)` comparison. Canonical
    /// encoding makes this equivalent to comparing the decoded texts, without
    /// running the decoder. The tag participates: values that collide on
    /// payload bytes under different schemes compare unequal.
    fn eq(&self, other: &Self) -> bool {
        self.scheme == other.scheme
            && self.element_count == other.element_count
            && self.payload == other.payload
    }
}

impl Eq for CompactValue {}

// CompactValue == str, without decoding or allocating
impl PartialEq<str> for CompactValue {
    fn eq(&self, other: &str) -> bool {
        self.units().eq(other.encode_utf16())
    }
}

impl PartialEq<&str> for CompactValue {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl Hash for CompactValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.content_hash());
    }
}

impl PartialOrd for CompactValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CompactValue {
    /// Lexicographic order of the represented text.
    ///
    /// When both sides share a scheme whose payload bytes sort like the text
    /// (see [`Scheme::payload_orders_like_text`]), the comparison runs over
    /// the payloads directly, element count as tiebreak. Every other pairing
    /// streams decoded code points through the unpack walk; neither path
    /// allocates.
    ///
    /// [`Scheme::payload_orders_like_text`]: crate::Scheme::payload_orders_like_text
    fn cmp(&self, other: &Self) -> Ordering {
        if self.scheme == other.scheme && self.scheme.payload_orders_like_text() {
            return self
                .payload()
                .cmp(other.payload())
                .then_with(|| self.element_count.cmp(&other.element_count));
        }
        self.chars().cmp(other.chars())
    }
}
