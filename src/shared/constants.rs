//! Constants for the custody core
//!
//! This module contains all constants used throughout the custody core.

// Security constants
pub const KEY_SIZE: usize = 32;
pub const PRIVATE_KEY_SIZE: usize = 32;
pub const PUBLIC_KEY_SIZE: usize = 65;
pub const NONCE_SIZE: usize = 12;
pub const TAG_SIZE: usize = 16;
pub const HASH_SIZE: usize = 32;
pub const SIGNATURE_SIZE: usize = 65; // r || s || v

// Address constants
pub const ADDRESS_BYTES: usize = 20;
pub const ADDRESS_LENGTH: usize = 42; // 0x + 40 hex chars

// Fixed-point amount constants
pub const NATIVE_DECIMALS: usize = 18;

// Build information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_security_constants() {
        assert_eq!(KEY_SIZE, 32);
        assert_eq!(PRIVATE_KEY_SIZE, 32);
        assert_eq!(PUBLIC_KEY_SIZE, 65);
        assert_eq!(NONCE_SIZE, 12);
        assert_eq!(TAG_SIZE, 16);
        assert_eq!(SIGNATURE_SIZE, 65);
    }

    #[test]
    fn test_address_constants() {
        assert_eq!(ADDRESS_BYTES * 2 + 2, ADDRESS_LENGTH);
    }
}
