use crate::{EncodeErr, Scheme, SchemeRegistry};

impl SchemeRegistry {
    /// Returns the narrowest registered scheme able to represent every code
    /// point of `text`.
    ///
    /// Single pass, maintaining the index of the widest scheme required so
    /// far. Iteration stops early once the widest scheme has been forced,
    /// provided that scheme is total; a partial widest scheme must keep
    /// scanning so an unrepresentable code point is still reported.
    ///
    /// Empty input selects the narrowest scheme. That is the canonical scheme
    /// for empty text: encoding is deterministic, so there is exactly one
    /// compact form of `""` per registry.
    ///
    /// # Errors
    ///
    /// [`EncodeErr::UnsupportedCharacter`] if some code point is outside
    /// every registered scheme.
    pub fn classify(&self, text: &str) -> Result<Scheme, EncodeErr> {
        let schemes = self.schemes();
        let widest = schemes.len() - 1;
        let may_stop_early = self.widest().is_total();

        let mut required = 0;
        for (index, ch) in text.chars().enumerate() {
            if schemes[required].can_represent(ch) {
                continue;
            }
            required = schemes[required + 1..]
                .iter()
                .position(|scheme| scheme.can_represent(ch))
                .map(|offset| required + 1 + offset)
                .ok_or(EncodeErr::UnsupportedCharacter { ch, index })?;
            if required == widest && may_stop_early {
                break;
            }
        }
        Ok(schemes[required])
    }
}
