//! Canonical state hashing for audit and replay.
//!
//! Values are first converted to a `serde_json::Value`, whose objects keep
//! their keys in a sorted map. Rendering that value gives alphabetical key
//! order at every level, so two implementations that agree on field names
//! and values produce the same digest.

use serde::Serialize;
use sha2::{Digest, Sha256};

use super::error::Result;

/// SHA-256 digest of a canonically serialized value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StateDigest(pub [u8; 32]);

impl StateDigest {
    /// Lowercase hex form.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Display for StateDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Canonical JSON bytes: sorted keys, no whitespace.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let tree = serde_json::to_value(value)?;
    Ok(serde_json::to_vec(&tree)?)
}

/// Hash a value's canonical JSON form.
pub fn state_digest<T: Serialize>(value: &T) -> Result<StateDigest> {
    let bytes = canonical_json(value)?;
    Ok(StateDigest(Sha256::digest(&bytes).into()))
}
