use crate::decoder::family::FamilyDecoder;
use crate::decoder::fields::read_u64_le;
use crate::error::DecodeError;
use crate::protocols::{DiscriminatorKey, InstructionSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub key: DiscriminatorKey,
    pub spec: &'static InstructionSpec,
}

impl Resolved {
    pub fn data_start(&self) -> usize {
        self.key.data_start()
    }
}

/// Complex (8-byte) lookup first, then the single leading byte, both within
/// the family's own tables.
pub fn resolve(decoder: &dyn FamilyDecoder, payload: &[u8]) -> Result<Resolved, DecodeError> {
    let Some(&first) = payload.first() else {
        return Err(DecodeError::malformed("empty instruction data"));
    };

    if let Some(value) = read_u64_le(payload, 0) {
        let key = DiscriminatorKey::Complex(value);
        if let Some(spec) = decoder.lookup(key) {
            return Ok(Resolved { key, spec });
        }
    }

    let key = DiscriminatorKey::Simple(first);
    decoder
        .lookup(key)
        .map(|spec| Resolved { key, spec })
        .ok_or(DecodeError::UnresolvedDiscriminator)
}
