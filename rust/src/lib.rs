//! Deterministic password derivation from memorable facts. The same phrases,
//! numbers, and dates always yield the same password, so a forgotten password
//! can be regenerated instead of stored.

pub mod aggregate;
pub mod compose;
pub mod config;
pub mod crypto;
pub mod generator;
pub mod input;
pub mod mixing;
pub mod salt;
pub mod vectors;

pub use generator::{
    derive, derive_with_trace, DeriveError, Derivation, Options, DEFAULT_LENGTH, MAX_LENGTH,
};
pub use input::InputSet;
