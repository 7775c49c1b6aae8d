use rand::{Rng, RngExt, SeedableRng, rngs::StdRng};

use crate::{CompactValue, Encoder};

/// Encodes `text` with the baseline registry.
pub fn mkvalue(text: &str) -> CompactValue {
    Encoder::default().encode(text).expect("baseline registry is total")
}

/// Asserts that `text` survives a full encode/decode cycle.
#[track_caller]
pub fn assert_roundtrip(text: &str) {
    let value = mkvalue(text);
    assert_eq!(value.decode(), text, "round trip mismatch");
    assert_eq!(value.len(), text.encode_utf16().count());
    assert_eq!(
        value.payload().len(),
        value.scheme().payload_len(value.len())
    );
}

/// Seeded generator producing strings confined to each scheme's alphabet.
pub struct TextGen {
    rng: StdRng,
}

impl TextGen {
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Symbols drawn from the reduced 64-character alphabet.
    pub fn alpha6(&mut self, len: usize) -> String {
        let pool: Vec<char> = (' '..='Z').chain(['[', ']', '_', '{', '}']).collect();
        (0..len)
            .map(|_| pool[self.rng.random_range(0..pool.len())])
            .collect()
    }

    /// Code points below U+0080.
    pub fn ascii(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| char::from_u32(self.rng.random_range(0..0x80)).expect("ascii is valid"))
            .collect()
    }

    /// Code points below U+0100; long outputs land in the 8-bit scheme with
    /// near certainty.
    pub fn latin1(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| char::from_u32(self.rng.random_range(0..0x100)).expect("latin-1 is valid"))
            .collect()
    }

    /// Arbitrary code points, surrogates excluded, supplementary included.
    pub fn unicode(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| loop {
                if let Some(ch) = char::from_u32(self.rng.random_range(0..=0x10FFFF)) {
                    break ch;
                }
            })
            .collect()
    }
}
