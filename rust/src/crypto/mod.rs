//! Cryptographic building blocks for the derivation pipeline. Only digest and
//! MAC primitives live here; everything that shapes a password sits above.

pub mod digest;
