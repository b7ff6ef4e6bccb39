//! Cryptographic functionality for the custody core
//!
//! This module provides authenticated encryption of private key material and
//! secp256k1 key generation with address derivation.
//!
//! SECURITY: all plaintext key material lives in zeroizing buffers and is
//! wiped on every exit path; decryption failures are reported through a
//! single opaque error variant.

pub mod encryption;
pub mod keys;

// Re-export all public items from submodules
pub use encryption::*;
pub use keys::*;
