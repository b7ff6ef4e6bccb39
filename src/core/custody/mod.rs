//! Key custody: wallet generation and private key decryption
//!
//! [`KeyCustody`] owns the process confidentiality key and is the only
//! component that can seal or open private key material. It is immutable
//! after construction and carries no other state, so concurrent callers
//! need no coordination.

use crate::core::crypto::encryption::{EncryptedSecret, SecretCipher};
use crate::core::crypto::keys::KeyPair;
use crate::shared::error::CustodyResult;
use crate::shared::types::Address;
use secp256k1::{All, Secp256k1};
use zeroize::Zeroizing;

pub struct KeyCustody {
    cipher: SecretCipher,
    secp: Secp256k1<All>,
}

impl KeyCustody {
    /// Initialize custody with the confidentiality key.
    ///
    /// The key must be exactly 32 bytes; any other length fails closed with
    /// `InvalidKeyLength` rather than being padded or truncated. There is no
    /// reinitialization or rotation path.
    pub fn new(secret: &[u8]) -> CustodyResult<Self> {
        let cipher = SecretCipher::new(secret)?;
        log::info!("key custody initialized");
        Ok(Self {
            cipher,
            secp: Secp256k1::new(),
        })
    }

    /// Generate a new wallet: a fresh keypair, its derived address, and the
    /// private scalar sealed under the confidentiality key.
    ///
    /// No side effects beyond the returned data; persisting the pair is the
    /// caller's responsibility.
    pub fn generate_wallet(&self) -> CustodyResult<(Address, EncryptedSecret)> {
        let keypair = KeyPair::generate(&self.secp)?;
        let address = keypair.address();
        let encrypted = self.cipher.seal(keypair.secret_bytes())?;

        log::debug!("generated wallet {}", address);
        Ok((address, encrypted))
    }

    /// Decrypt a stored secret back into plaintext key material.
    ///
    /// The plaintext is returned in a zeroizing buffer and is wiped when the
    /// caller's scope ends. Every malformed or tampered input fails with the
    /// same opaque `DecryptionFailed`.
    pub fn decrypt(&self, secret: &EncryptedSecret) -> CustodyResult<Zeroizing<Vec<u8>>> {
        self.cipher.open(secret)
    }
}
