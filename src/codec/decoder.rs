use zerocopy::{
    FromBytes,
    byteorder::{BigEndian, U16},
};

use crate::{CompactValue, DecodeErr, Scheme, cursor::BitCursor};

impl CompactValue {
    /// Unpacks into `dst`, returning the number of code units written.
    ///
    /// The caller supplies the destination; this function performs no
    /// allocation of its own. On error nothing has been written.
    ///
    /// The walk mirrors the encoder exactly: same scheme, same element width,
    /// same cursor order. The 16-bit scheme additionally takes a byte-aligned
    /// path through big-endian views; the result is bit-identical.
    ///
    /// # Errors
    ///
    /// - [`DecodeErr::BufferTooSmall`] if `dst` holds fewer than
    ///   [`CompactValue::len`] code units.
    /// - [`DecodeErr::CorruptPayload`] if the payload length disagrees with
    ///   the scheme and element count.
    pub fn decode_into(&self, dst: &mut [u16]) -> Result<usize, DecodeErr> {
        let count = self.len();
        if dst.len() < count {
            return Err(DecodeErr::BufferTooSmall { needed: count, capacity: dst.len() });
        }
        let payload = self.payload();
        if payload.len() != self.scheme().payload_len(count) {
            return Err(DecodeErr::CorruptPayload);
        }

        match self.scheme() {
            Scheme::Wide16 => {
                let units = <[U16<BigEndian>]>::ref_from_bytes(payload)
                    .map_err(|_| DecodeErr::CorruptPayload)?;
                for (slot, unit) in dst.iter_mut().zip(units) {
                    *slot = unit.get();
                }
            }
            scheme => {
                let width = scheme.bits_per_element();
                let mut cursor = BitCursor::new();
                for slot in dst.iter_mut().take(count) {
                    *slot = scheme.unpack_unit(cursor.read(payload, width));
                }
            }
        }
        Ok(count)
    }

    /// Decodes back into an owned `String`.
    ///
    /// Convenience over [`CompactValue::decode_into`]: the destination buffer
    /// is allocated here, on the caller's behalf.
    pub fn decode(&self) -> String {
        let mut units = vec![0u16; self.len()];
        self.decode_into(&mut units)
            .expect("compact values are structurally validated at construction");
        String::from_utf16_lossy(&units)
    }

    /// Iterates the decoded UTF-16 code units without allocating.
    pub fn units(&self) -> Units<'_> {
        Units {
            scheme: self.scheme(),
            payload: self.payload(),
            cursor: BitCursor::new(),
            remaining: self.len(),
        }
    }

    /// Iterates decoded code points, substituting U+FFFD for unpaired
    /// surrogates in hostile payloads. Backs the ordering fallback; never
    /// allocates.
    pub(crate) fn chars(&self) -> impl Iterator<Item = char> + '_ {
        char::decode_utf16(self.units()).map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
    }
}

/// Allocation-free iterator over the UTF-16 code units of a [`CompactValue`].
#[derive(Debug, Clone)]
pub struct Units<'a> {
    scheme: Scheme,
    payload: &'a [u8],
    cursor: BitCursor,
    remaining: usize,
}

impl Iterator for Units<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let raw = self.cursor.read(self.payload, self.scheme.bits_per_element());
        Some(self.scheme.unpack_unit(raw))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Units<'_> {}
impl std::iter::FusedIterator for Units<'_> {}
