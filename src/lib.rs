//! Custody Core
//!
//! Key custody and transfer signing. Handles the only operations in the
//! system with hard security invariants: generating keypairs, deriving
//! addresses, sealing private key material under a process confidentiality
//! key, and transiently reconstituting a key to sign a transfer.
//!
//! ## Architecture
//!
//! - **Core**: key custody, authenticated encryption, transfer signing,
//!   persistence seam
//! - **Shared**: common types, constants, and errors
//!
//! Everything around this crate - chat command routing, balance lookups,
//! persistence, broadcast - is a collaborator: the core takes a 32-byte
//! confidentiality key and high-level requests and returns addresses,
//! ciphertexts, or signed-transfer artifacts.
//!
//! ## Security properties
//!
//! - The confidentiality key must be exactly 32 bytes; anything else fails
//!   closed at construction.
//! - Private key plaintext only ever lives in zeroizing buffers and is wiped
//!   on every exit path.
//! - Encryption is AES-256-GCM with a fresh random nonce per seal; nonce
//!   reuse cannot be expressed through the API.
//! - Every decryption failure is the same opaque error.
//!
//! ## Usage
//!
//! ```
//! use custody_core::{Address, Amount, KeyCustody, TransactionSigner};
//!
//! # fn main() -> Result<(), custody_core::CustodyError> {
//! let custody = KeyCustody::new(b"0123456789abcdef0123456789abcdef")?;
//! let (address, encrypted) = custody.generate_wallet()?;
//!
//! let signer = TransactionSigner::new();
//! let destination = Address::parse("0x742d35cc6634c0532925a3b8d4c9db96c4b4d8b6")?;
//! let transfer = signer.sign_transfer(&custody, &encrypted, &destination, Amount::parse("1.5")?)?;
//!
//! assert_eq!(transfer.sender, address);
//! assert!(signer.verify(&transfer));
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod shared;

// Re-export the public surface
pub use crate::core::crypto::encryption::EncryptedSecret;
pub use crate::core::crypto::keys::KeyPair;
pub use crate::core::custody::KeyCustody;
pub use crate::core::signing::{SignedTransfer, TransactionSigner};
pub use crate::core::store::{MemorySecretStore, SecretStore};
pub use crate::shared::error::{CustodyError, CustodyResult};
pub use crate::shared::types::{Address, Amount};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize logging from the environment. Safe to call more than once.
pub fn init() {
    let _ = env_logger::Builder::from_default_env().try_init();
}
