//! The eight mixing algorithms. Each folds the input set and its salt through
//! a different hashing strategy and yields a short opaque string. The set is
//! closed and the run order is fixed by [`SCHEDULE`].

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::crypto::digest::{
    hmac_sha512_hex, sha256_hex, sha384_digest, sha384_hex, sha512_hex, DigestError,
};
use crate::input::{DateText, InputSet};
use crate::salt::derive_salt;

/// Upper bound on the length of a single mix result.
pub const MIX_LEN: usize = 16;

/// Number of slots in the run schedule.
pub const MIX_SLOTS: usize = 9;

const HASH_ROUNDS: usize = 1000;
const CHUNK_COUNT: usize = 4;
const CHUNK_LEN: usize = 4;
const BLEND_LEN: usize = 12;
const BLEND_STEP: usize = 3;
const CHAIN_PREFIX: usize = 5;

/// Outputs of one full schedule run, in slot order.
pub type MixResults = [String; MIX_SLOTS];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MixAlgorithm {
    /// HMAC-SHA512 over the canonical text keyed by the salt.
    KeyedHmac,
    /// SHA-256 applied a thousand times to its own hex output.
    IteratedHash,
    /// SHA-384 with each byte folded into its successor by XOR.
    XorDiffusion,
    /// Four hex slices taken from per-position salted digests.
    PositionalChunks,
    /// Interleaves three digests of the strings, numbers, and dates.
    TriSourceBlend,
    /// SHA-512 seeded with a 32-bit rolling checksum of the input.
    ChecksumSeeded,
    /// SHA-512 chained across the strings, numbers, and dates blocks.
    ChainedBlocks,
    /// SHA-256, SHA-384, SHA-512 layered over each other.
    LayeredDigest,
}

/// Run order consumed by the aggregator. The keyed HMAC runs twice.
pub const SCHEDULE: [MixAlgorithm; MIX_SLOTS] = [
    MixAlgorithm::KeyedHmac,
    MixAlgorithm::KeyedHmac,
    MixAlgorithm::IteratedHash,
    MixAlgorithm::XorDiffusion,
    MixAlgorithm::PositionalChunks,
    MixAlgorithm::TriSourceBlend,
    MixAlgorithm::ChecksumSeeded,
    MixAlgorithm::ChainedBlocks,
    MixAlgorithm::LayeredDigest,
];

impl MixAlgorithm {
    pub const ALL: [MixAlgorithm; 8] = [
        MixAlgorithm::KeyedHmac,
        MixAlgorithm::IteratedHash,
        MixAlgorithm::XorDiffusion,
        MixAlgorithm::PositionalChunks,
        MixAlgorithm::TriSourceBlend,
        MixAlgorithm::ChecksumSeeded,
        MixAlgorithm::ChainedBlocks,
        MixAlgorithm::LayeredDigest,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MixAlgorithm::KeyedHmac => "keyed-hmac",
            MixAlgorithm::IteratedHash => "iterated-hash",
            MixAlgorithm::XorDiffusion => "xor-diffusion",
            MixAlgorithm::PositionalChunks => "positional-chunks",
            MixAlgorithm::TriSourceBlend => "tri-source-blend",
            MixAlgorithm::ChecksumSeeded => "checksum-seeded",
            MixAlgorithm::ChainedBlocks => "chained-blocks",
            MixAlgorithm::LayeredDigest => "layered-digest",
        }
    }

    /// Produces this algorithm's mix result for `input`.
    pub fn mix(self, input: &InputSet) -> Result<String, DigestError> {
        let result = match self {
            MixAlgorithm::KeyedHmac => keyed_hmac(input)?,
            MixAlgorithm::IteratedHash => iterated_hash(input),
            MixAlgorithm::XorDiffusion => xor_diffusion(input),
            MixAlgorithm::PositionalChunks => positional_chunks(input),
            MixAlgorithm::TriSourceBlend => tri_source_blend(input),
            MixAlgorithm::ChecksumSeeded => checksum_seeded(input),
            MixAlgorithm::ChainedBlocks => chained_blocks(input),
            MixAlgorithm::LayeredDigest => layered_digest(input),
        };
        tracing::trace!(algorithm = self.name(), len = result.len(), "mixed");
        Ok(result)
    }
}

/// Runs every slot of [`SCHEDULE`] and returns the results in slot order.
#[cfg(feature = "parallel")]
pub fn run_schedule(input: &InputSet) -> Result<MixResults, DigestError> {
    use rayon::prelude::*;

    let mut results = MixResults::default();
    results[..]
        .par_iter_mut()
        .zip(SCHEDULE[..].par_iter())
        .try_for_each(|(slot, algorithm)| {
            *slot = algorithm.mix(input)?;
            Ok::<(), DigestError>(())
        })?;
    Ok(results)
}

/// Runs every slot of [`SCHEDULE`] and returns the results in slot order.
#[cfg(not(feature = "parallel"))]
pub fn run_schedule(input: &InputSet) -> Result<MixResults, DigestError> {
    run_schedule_in_order(input)
}

/// Single-threaded schedule run. Compiled under every feature set so the
/// parallel run can be checked against it.
#[cfg_attr(feature = "parallel", allow(dead_code))]
fn run_schedule_in_order(input: &InputSet) -> Result<MixResults, DigestError> {
    let mut results = MixResults::default();
    for (slot, algorithm) in results.iter_mut().zip(SCHEDULE) {
        *slot = algorithm.mix(input)?;
    }
    Ok(results)
}

/// Keeps at most the first `len` characters. Inputs are always ASCII.
fn head(mut text: String, len: usize) -> String {
    text.truncate(len);
    text
}

fn keyed_hmac(input: &InputSet) -> Result<String, DigestError> {
    let salt = derive_salt(input);
    let tag = hmac_sha512_hex(salt.as_bytes(), input.canonical(DateText::Millis).as_bytes())?;
    Ok(head(tag, MIX_LEN))
}

fn iterated_hash(input: &InputSet) -> String {
    let mut combined = input.joined_strings();
    combined.push_str(&derive_salt(input));
    combined.push_str(&input.joined_numbers());
    combined.push_str(&input.joined_dates(DateText::Iso));

    for _ in 0..HASH_ROUNDS {
        combined = sha256_hex(combined.as_bytes());
    }
    head(combined, MIX_LEN)
}

fn xor_diffusion(input: &InputSet) -> String {
    let mut material = input.canonical(DateText::Millis);
    material.push_str(&derive_salt(input));

    let mut bytes = sha384_digest(material.as_bytes());
    for i in 0..bytes.len() - 1 {
        bytes[i] ^= bytes[i + 1];
    }
    head(STANDARD.encode(bytes), MIX_LEN)
}

fn positional_chunks(input: &InputSet) -> String {
    let canonical = input.canonical(DateText::Iso);
    let salt = derive_salt(input);

    let mut result = String::with_capacity(CHUNK_COUNT * CHUNK_LEN);
    for i in 0..CHUNK_COUNT {
        let hash = sha256_hex(format!("{canonical}{salt}{i}").as_bytes());
        let start = (i * CHUNK_LEN) % (hash.len() - CHUNK_LEN);
        result.push_str(&hash[start..start + CHUNK_LEN]);
    }
    head(result, MIX_LEN)
}

fn tri_source_blend(input: &InputSet) -> String {
    let salt = derive_salt(input);
    let sources = [
        sha256_hex(format!("{}{salt}", input.joined_strings()).as_bytes()),
        sha512_hex(format!("{}{salt}", input.joined_numbers()).as_bytes()),
        sha384_hex(format!("{}{salt}", input.joined_dates(DateText::Millis)).as_bytes()),
    ];

    let mut result = String::with_capacity(MIX_LEN);
    for i in (0..BLEND_LEN).step_by(BLEND_STEP) {
        for source in &sources {
            let bytes = source.as_bytes();
            result.push(char::from(bytes[i % bytes.len()]));
        }
    }
    while result.len() < MIX_LEN {
        result.push('0');
    }
    result
}

/// `hash * 31 + unit` over UTF-16 code units with 32-bit wraparound.
fn rolling_checksum(text: &str) -> i32 {
    text.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_mul(31).wrapping_add(i32::from(unit))
    })
}

fn checksum_seeded(input: &InputSet) -> String {
    let canonical = input.canonical(DateText::Millis);
    let checksum = rolling_checksum(&canonical);
    let salt = derive_salt(input);
    head(
        sha512_hex(format!("{checksum}{salt}{canonical}").as_bytes()),
        MIX_LEN,
    )
}

fn chained_blocks(input: &InputSet) -> String {
    let blocks = [
        input.joined_strings(),
        input.joined_numbers(),
        input.joined_dates(DateText::Millis),
    ];

    let mut previous = derive_salt(input);
    let mut result = String::with_capacity(blocks.len() * CHAIN_PREFIX);
    for block in &blocks {
        previous = sha512_hex(format!("{previous}{block}").as_bytes());
        result.push_str(&previous[..CHAIN_PREFIX]);
    }
    // Three blocks yield 15 characters; the shortfall is kept.
    head(result, MIX_LEN)
}

fn layered_digest(input: &InputSet) -> String {
    let salt = derive_salt(input);
    let layer1 = sha256_hex(format!("{}{salt}", input.joined_strings()).as_bytes());
    let layer2 = sha384_hex(format!("{}{salt}{layer1}", input.joined_numbers()).as_bytes());
    let layer3 = sha512_hex(
        format!("{}{salt}{layer2}", input.joined_dates(DateText::Millis)).as_bytes(),
    );
    head(format!("{layer1}{layer2}{layer3}"), MIX_LEN)
}
