//! Transfer signing
//!
//! [`TransactionSigner`] reconstitutes a private key from an encrypted
//! secret just long enough to authorize one transfer, recomputes the sender
//! address from the reconstructed public key, and signs a digest of the
//! transfer. Producing a broadcastable ledger transaction is out of scope;
//! the artifact is handed back to the caller for submission elsewhere.

use crate::core::crypto::encryption::EncryptedSecret;
use crate::core::crypto::keys::KeyPair;
use crate::core::custody::KeyCustody;
use crate::shared::constants::{HASH_SIZE, SIGNATURE_SIZE};
use crate::shared::error::CustodyResult;
use crate::shared::types::{Address, Amount};
use crate::shared::utils::keccak256;
use ethers::types::U256;
use rlp::RlpStream;
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{All, Message, Secp256k1};
use serde::{Deserialize, Serialize};

/// The result of a signing operation. Ephemeral; never persisted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedTransfer {
    /// Recomputed from the reconstructed key, never trusted from storage.
    pub sender: Address,
    pub destination: Address,
    pub amount: Amount,
    /// 65-byte recoverable ECDSA signature as hex: r || s || v, v = 27 + recovery id.
    pub signature: String,
}

/// Stateless transfer signer.
pub struct TransactionSigner {
    secp: Secp256k1<All>,
}

impl TransactionSigner {
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::new(),
        }
    }

    /// Sign a transfer of `amount` to `destination` using the stored secret.
    ///
    /// The decrypted key material lives in zeroizing buffers and is wiped on
    /// every exit path, including each early error return.
    pub fn sign_transfer(
        &self,
        custody: &KeyCustody,
        secret: &EncryptedSecret,
        destination: &Address,
        amount: Amount,
    ) -> CustodyResult<SignedTransfer> {
        let plaintext = custody.decrypt(secret)?;
        let keypair = KeyPair::from_secret_bytes(&self.secp, &plaintext)?;
        drop(plaintext);

        let sender = keypair.address();
        let digest = transfer_digest(&sender, destination, &amount);
        let message = Message::from_digest(digest);

        let signing_key = keypair.signing_key()?;
        let recoverable = self.secp.sign_ecdsa_recoverable(message, &signing_key);
        let (recovery_id, compact) = recoverable.serialize_compact();

        let mut signature = [0u8; SIGNATURE_SIZE];
        signature[..64].copy_from_slice(&compact);
        signature[64] = 27 + i32::from(recovery_id) as u8;

        log::debug!("signed transfer of {} from {} to {}", amount, sender, destination);

        Ok(SignedTransfer {
            sender,
            destination: destination.clone(),
            amount,
            signature: hex::encode(signature),
        })
    }

    /// Check an artifact without key access: recover the public key from the
    /// signature over the recomputed digest and compare its derived address
    /// against the artifact's sender.
    pub fn verify(&self, transfer: &SignedTransfer) -> bool {
        let Ok(raw) = hex::decode(&transfer.signature) else {
            return false;
        };
        if raw.len() != SIGNATURE_SIZE {
            return false;
        }
        let Some(recovery) = raw[64].checked_sub(27) else {
            return false;
        };
        let Ok(recovery_id) = RecoveryId::try_from(recovery as i32) else {
            return false;
        };
        let Ok(signature) = RecoverableSignature::from_compact(&raw[..64], recovery_id) else {
            return false;
        };

        let digest = transfer_digest(&transfer.sender, &transfer.destination, &transfer.amount);
        let message = Message::from_digest(digest);

        match self.secp.recover_ecdsa(message, &signature) {
            Ok(public_key) => Address::from_public_key(&public_key) == transfer.sender,
            Err(_) => false,
        }
    }
}

impl Default for TransactionSigner {
    fn default() -> Self {
        Self::new()
    }
}

/// keccak256 of the RLP list [sender, destination, amount-wei].
fn transfer_digest(sender: &Address, destination: &Address, amount: &Amount) -> [u8; HASH_SIZE] {
    let mut stream = RlpStream::new_list(3);
    stream.append(&sender.as_fixed_bytes().as_slice());
    stream.append(&destination.as_fixed_bytes().as_slice());
    let value = u256_to_bytes_be(amount.as_wei());
    stream.append(&value.as_slice());
    keccak256(&stream.out())
}

fn u256_to_bytes_be(value: U256) -> Vec<u8> {
    if value.is_zero() {
        return Vec::new();
    }
    let mut buf = [0u8; 32];
    value.to_big_endian(&mut buf);
    let first_non_zero = buf.iter().position(|&b| b != 0).unwrap_or(31);
    buf[first_non_zero..].to_vec()
}
