//! Cross-mixing of the schedule results into the master hash, and the byte
//! codes that drive character selection.

use zeroize::Zeroizing;

use crate::crypto::digest::sha512_digest;
use crate::input::InputSet;
use crate::mixing::{MixResults, MIX_SLOTS};
use crate::salt::derive_salt;

const DIGEST_LEN: usize = 64;

/// Hex length of a master hash: one SHA-512 digest per schedule slot.
pub const MASTER_HASH_LEN: usize = MIX_SLOTS * DIGEST_LEN * 2;

/// Byte values parsed from the master hash. Lookups wrap around.
pub struct ByteCodes(Zeroizing<Vec<u8>>);

impl ByteCodes {
    /// `bytes` must not be empty.
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        debug_assert!(!bytes.is_empty());
        Self(Zeroizing::new(bytes))
    }

    /// Byte at `index`, modulo the sequence length.
    pub fn at(&self, index: usize) -> u8 {
        self.0[index % self.0.len()]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

pub struct MasterHash {
    hex: String,
    codes: ByteCodes,
}

impl MasterHash {
    pub fn as_hex(&self) -> &str {
        &self.hex
    }

    pub fn byte_codes(&self) -> &ByteCodes {
        &self.codes
    }
}

/// Hashes each result with a fresh salt and its cyclic successor. The byte
/// codes are the raw digests, which is the master hash read two hex
/// characters at a time.
pub fn aggregate(input: &InputSet, results: &MixResults) -> MasterHash {
    let mut master_hex = String::with_capacity(MASTER_HASH_LEN);
    let mut codes = Vec::with_capacity(MIX_SLOTS * DIGEST_LEN);

    for (i, current) in results.iter().enumerate() {
        let next = &results[(i + 1) % results.len()];
        let salt = derive_salt(input);
        let digest = sha512_digest(format!("{current}{salt}{next}").as_bytes());
        master_hex.push_str(&hex::encode(&digest));
        codes.extend_from_slice(&digest);
    }

    tracing::debug!(len = master_hex.len(), "master hash built");
    MasterHash {
        hex: master_hex,
        codes: ByteCodes::new(codes),
    }
}
