//! Authenticated encryption of private key material
//!
//! AES-256-GCM with a 12-byte random nonce and 16-byte tag. The stored
//! envelope is `nonce || ciphertext || tag`, so a secret round-trips through
//! any byte-for-byte persistence layer unchanged.

use crate::shared::constants::{KEY_SIZE, NONCE_SIZE, TAG_SIZE};
use crate::shared::error::{CustodyError, CustodyResult};
use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, Key, KeyInit, Nonce};
use rand_core::{OsRng, RngCore};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::Zeroizing;

/// An encrypted private key envelope: `nonce || ciphertext || tag`.
///
/// Opaque to callers; the only way to produce one is [`SecretCipher::seal`]
/// and the only way to read it is [`SecretCipher::open`].
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptedSecret(Vec<u8>);

impl EncryptedSecret {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Hex wire form for the persistence collaborator.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Decode the hex wire form. A malformed envelope is reported as
    /// `DecryptionFailed`, uniform with every other rejected input.
    pub fn from_hex(encoded: &str) -> CustodyResult<Self> {
        let bytes = hex::decode(encoded).map_err(|_| CustodyError::DecryptionFailed)?;
        Ok(Self(bytes))
    }
}

// Ciphertext is not logged; Debug shows only the envelope length.
impl fmt::Debug for EncryptedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncryptedSecret({} bytes)", self.0.len())
    }
}

impl Serialize for EncryptedSecret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for EncryptedSecret {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

/// AES-256-GCM cipher keyed by the process confidentiality key.
///
/// The key is held in a zeroizing buffer for the cipher's lifetime and wiped
/// on drop. There is no nonce parameter anywhere in the API: every seal draws
/// a fresh random nonce, so reuse under this key cannot be expressed.
pub struct SecretCipher {
    key: Zeroizing<[u8; KEY_SIZE]>,
}

impl SecretCipher {
    /// Build a cipher from a confidentiality key of exactly 32 bytes.
    /// Any other length fails closed; the key is never padded or truncated.
    pub fn new(secret: &[u8]) -> CustodyResult<Self> {
        let key: [u8; KEY_SIZE] = secret
            .try_into()
            .map_err(|_| CustodyError::InvalidKeyLength)?;
        Ok(Self {
            key: Zeroizing::new(key),
        })
    }

    /// Encrypt plaintext under a fresh random nonce.
    pub fn seal(&self, plaintext: &[u8]) -> CustodyResult<EncryptedSecret> {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&*self.key));

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng
            .try_fill_bytes(&mut nonce_bytes)
            .map_err(|_| CustodyError::RandomnessUnavailable)?;
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext)
            .map_err(|e| CustodyError::crypto(format!("AES-GCM encryption failed: {}", e)))?;

        let mut envelope = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        envelope.extend_from_slice(&nonce_bytes);
        envelope.extend_from_slice(&ciphertext);
        Ok(EncryptedSecret::from_bytes(envelope))
    }

    /// Authenticated decryption. Truncated input, a malformed nonce, and a
    /// tag mismatch are indistinguishable to the caller.
    pub fn open(&self, secret: &EncryptedSecret) -> CustodyResult<Zeroizing<Vec<u8>>> {
        let data = secret.as_bytes();
        if data.len() < NONCE_SIZE + TAG_SIZE {
            return Err(CustodyError::DecryptionFailed);
        }

        let (nonce_bytes, ciphertext) = data.split_at(NONCE_SIZE);
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&*self.key));

        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| CustodyError::DecryptionFailed)?;

        Ok(Zeroizing::new(plaintext))
    }
}

// No Debug or Clone: the confidentiality key must not leak through logs or
// extra in-memory copies.
