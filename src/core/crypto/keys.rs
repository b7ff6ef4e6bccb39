//! Key generation and address derivation
//!
//! Keypairs are secp256k1; the private scalar lives in a zeroizing buffer
//! and is wiped when the pair is dropped. The address is always recomputed
//! from the public point, never cached independently of the key.

use crate::shared::constants::PRIVATE_KEY_SIZE;
use crate::shared::error::{CustodyError, CustodyResult};
use crate::shared::types::Address;
use rand_core::{OsRng, RngCore};
use secp256k1::{All, PublicKey, Secp256k1, SecretKey};
use zeroize::Zeroizing;

/// A secp256k1 signing keypair.
pub struct KeyPair {
    secret: Zeroizing<[u8; PRIVATE_KEY_SIZE]>,
    public: PublicKey,
}

impl KeyPair {
    /// Generate a new keypair from OS entropy.
    ///
    /// Candidate bytes outside the curve order are re-drawn; only an entropy
    /// source failure aborts, and it never falls back to a weaker source.
    pub fn generate(secp: &Secp256k1<All>) -> CustodyResult<Self> {
        let mut secret = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
        let secret_key = loop {
            OsRng
                .try_fill_bytes(&mut *secret)
                .map_err(|_| CustodyError::RandomnessUnavailable)?;
            if let Ok(key) = SecretKey::from_byte_array(*secret) {
                break key;
            }
        };
        let public = PublicKey::from_secret_key(secp, &secret_key);
        Ok(Self { secret, public })
    }

    /// Reconstruct a keypair from decrypted scalar bytes.
    ///
    /// The bytes came out of an authenticated envelope, so a wrong length or
    /// an invalid scalar means the stored secret is corrupt; the error stays
    /// as opaque as any other decryption failure.
    pub fn from_secret_bytes(secp: &Secp256k1<All>, bytes: &[u8]) -> CustodyResult<Self> {
        let secret: [u8; PRIVATE_KEY_SIZE] = bytes
            .try_into()
            .map_err(|_| CustodyError::DecryptionFailed)?;
        let secret = Zeroizing::new(secret);

        let secret_key =
            SecretKey::from_byte_array(*secret).map_err(|_| CustodyError::DecryptionFailed)?;
        let public = PublicKey::from_secret_key(secp, &secret_key);
        Ok(Self { secret, public })
    }

    /// Canonical 32-byte big-endian encoding of the private scalar.
    pub fn secret_bytes(&self) -> &[u8; PRIVATE_KEY_SIZE] {
        &self.secret
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Derive the address from the public point.
    pub fn address(&self) -> Address {
        Address::from_public_key(&self.public)
    }

    pub(crate) fn signing_key(&self) -> CustodyResult<SecretKey> {
        // The scalar was validated at construction; a failure here means
        // memory corruption, not caller input.
        SecretKey::from_byte_array(*self.secret)
            .map_err(|e| CustodyError::crypto(format!("invalid signing key: {}", e)))
    }
}

// No Debug, Clone, or serde implementations: the private scalar never leaves
// the zeroizing buffer except through secret_bytes().
