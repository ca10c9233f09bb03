//! The derivation pipeline: salt, mixing schedule, aggregation, character
//! mapping, position rules, and the single validator check.

use thiserror::Error;
use zeroize::Zeroizing;

use crate::aggregate::aggregate;
use crate::compose::{extra_transform, map_glyphs, needs_extra_transform, post_process};
use crate::crypto::digest::DigestError;
use crate::input::InputSet;
use crate::mixing::{run_schedule, MixResults};
use crate::salt::derive_salt;

/// Password length used when the caller does not pick one.
pub const DEFAULT_LENGTH: usize = 48;

/// Longest password `derive` will produce. The glyph buffer is allocated up
/// front, so anything past this is rejected before any hashing.
pub const MAX_LENGTH: usize = 4096;

#[derive(Debug, Error)]
pub enum DeriveError {
    #[error("invalid password length {0}; expected 1 to 4096")]
    InvalidLength(usize),
    #[error("hashing failed: {0}")]
    Hashing(#[from] DigestError),
}

/// Output knobs for a derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub allow_special_chars: bool,
    pub length: usize,
}

impl Options {
    pub fn new(allow_special_chars: bool, length: usize) -> Self {
        Self {
            allow_special_chars,
            length,
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new(true, DEFAULT_LENGTH)
    }
}

/// A finished derivation together with its intermediate artifacts.
pub struct Derivation {
    pub salt: String,
    pub mix_results: MixResults,
    pub master_hash: String,
    pub extra_transform: bool,
    pub password: Zeroizing<String>,
}

/// Derives the password for `input` and `options`.
pub fn derive(input: &InputSet, options: &Options) -> Result<Zeroizing<String>, DeriveError> {
    Ok(derive_with_trace(input, options)?.password)
}

/// Same as [`derive`] but keeps every intermediate artifact.
pub fn derive_with_trace(input: &InputSet, options: &Options) -> Result<Derivation, DeriveError> {
    if options.length == 0 || options.length > MAX_LENGTH {
        return Err(DeriveError::InvalidLength(options.length));
    }
    let allow_special = options.allow_special_chars;

    let salt = derive_salt(input);
    let mix_results = run_schedule(input)?;
    tracing::debug!(slots = mix_results.len(), "mix results collected");

    let master = aggregate(input, &mix_results);
    let codes = master.byte_codes();

    let mut glyphs = map_glyphs(codes, allow_special, options.length);
    post_process(&mut glyphs, codes, allow_special);

    let transformed = needs_extra_transform(input, &glyphs, allow_special);
    if transformed {
        tracing::debug!("validator requested extra transform");
        extra_transform(&mut glyphs, codes);
    }

    let password: String = glyphs.iter().map(|&b| char::from(b)).collect();
    tracing::debug!(
        length = options.length,
        allow_special,
        extra_transform = transformed,
        "password derived"
    );

    Ok(Derivation {
        salt,
        mix_results,
        master_hash: master.as_hex().to_string(),
        extra_transform: transformed,
        password: Zeroizing::new(password),
    })
}
