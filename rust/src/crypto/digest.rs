//! Digest primitives for the derivation pipeline. Every stage that hashes text
//! goes through these helpers so the byte encoding (UTF-8) and the hex
//! rendering (lowercase, two characters per byte) stay identical everywhere.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha384, Sha512};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DigestError {
    #[error("hmac failed: {0}")]
    HmacFailed(String),
}

type HmacSha512 = Hmac<Sha512>;

/// Produces a raw SHA-256 digest of the provided bytes.
pub fn sha256_digest(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Produces a raw SHA-384 digest of the provided bytes.
pub fn sha384_digest(data: &[u8]) -> Vec<u8> {
    let mut hasher = Sha384::new();
    hasher.update(data);
    hasher.finalize().to_vec()
}

/// Produces a raw SHA-512 digest of the provided bytes.
pub fn sha512_digest(data: &[u8]) -> Vec<u8> {
    let mut hasher = Sha512::new();
    hasher.update(data);
    hasher.finalize().to_vec()
}

/// Returns the hexadecimal representation of a SHA-256 digest.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256_digest(data))
}

/// Returns the hexadecimal representation of a SHA-384 digest.
pub fn sha384_hex(data: &[u8]) -> String {
    hex::encode(sha384_digest(data))
}

/// Returns the hexadecimal representation of a SHA-512 digest.
pub fn sha512_hex(data: &[u8]) -> String {
    hex::encode(sha512_digest(data))
}

/// Signs `data` with HMAC-SHA512 and returns the hex encoded tag.
pub fn hmac_sha512_hex(key: &[u8], data: &[u8]) -> Result<String, DigestError> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| DigestError::HmacFailed(format!("{e}")))?;
    mac.update(data);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::{hmac_sha512_hex, sha256_hex, sha384_digest, sha384_hex, sha512_hex};

    #[test]
    fn hashes_empty_input_to_hex() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            sha384_hex(b""),
            "38b060a751ac96384cd9327eb1b1e36a21fdb71114be07434c0cc7bf63f6e1da274edebfe76f65fbd51ad2f14898b95b"
        );
        assert_eq!(
            sha512_hex(b""),
            "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
        );
    }

    #[test]
    fn hex_is_lowercase_and_sized() {
        let hex = sha512_hex(b"squire");
        assert_eq!(hex.len(), 128);
        assert!(hex.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        assert_eq!(sha384_digest(b"squire").len(), 48);
    }

    #[test]
    fn builds_hmac_sha512() {
        // RFC 4231 test case 2.
        let tag = hmac_sha512_hex(b"Jefe", b"what do ya want for nothing?")
            .expect("hmac should succeed");
        assert_eq!(
            tag,
            "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea2505549758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
        );
    }

    #[test]
    fn hmac_accepts_empty_key() {
        assert!(hmac_sha512_hex(b"", b"payload").is_ok());
    }
}
