//! Error handling for the custody core
//!
//! This module defines the error types used throughout the custody core.

use thiserror::Error;

/// Custody error type
///
/// `DecryptionFailed` is deliberately payload-free: tag mismatch, truncated
/// ciphertext, and malformed nonces all collapse into the same variant so
/// callers cannot distinguish why authenticated decryption rejected an input.
#[derive(Error, Debug)]
pub enum CustodyError {
    #[error("confidentiality key must be exactly 32 bytes")]
    InvalidKeyLength,

    #[error("decryption failed")]
    DecryptionFailed,

    #[error("invalid destination address: {0}")]
    InvalidDestination(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("secure randomness unavailable")]
    RandomnessUnavailable,

    #[error("cryptographic error: {0}")]
    Crypto(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl CustodyError {
    /// Create an invalid destination error
    pub fn invalid_destination(message: impl Into<String>) -> Self {
        Self::InvalidDestination(message.into())
    }

    /// Create an invalid amount error
    pub fn invalid_amount(message: impl Into<String>) -> Self {
        Self::InvalidAmount(message.into())
    }

    /// Create a cryptographic error
    pub fn crypto(message: impl Into<String>) -> Self {
        Self::Crypto(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

/// Result type for custody operations
pub type CustodyResult<T> = Result<T, CustodyError>;
