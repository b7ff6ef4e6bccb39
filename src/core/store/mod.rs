//! Persistence seam for encrypted secrets
//!
//! The custody core never touches storage itself; embedders implement
//! [`SecretStore`] over whatever backend they use and exchange
//! `(user id, address, encrypted secret)` tuples through it. The in-memory
//! implementation backs tests and lightweight embedders.

use crate::core::crypto::encryption::EncryptedSecret;
use crate::shared::error::{CustodyError, CustodyResult};
use crate::shared::types::Address;
use std::collections::HashMap;
use std::sync::Mutex;

pub trait SecretStore: Send + Sync {
    /// Store the wallet material for a user, replacing any previous entry.
    fn put(&self, user_id: &str, address: &Address, secret: &EncryptedSecret)
        -> CustodyResult<()>;

    /// Fetch the wallet material for a user, if any.
    fn get(&self, user_id: &str) -> CustodyResult<Option<(Address, EncryptedSecret)>>;

    /// Remove a user's wallet material.
    fn remove(&self, user_id: &str) -> CustodyResult<()>;
}

/// In-memory store keyed by user id.
#[derive(Default)]
pub struct MemorySecretStore {
    entries: Mutex<HashMap<String, (Address, EncryptedSecret)>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> CustodyResult<std::sync::MutexGuard<'_, HashMap<String, (Address, EncryptedSecret)>>> {
        self.entries
            .lock()
            .map_err(|_| CustodyError::internal("secret store lock poisoned"))
    }
}

impl SecretStore for MemorySecretStore {
    fn put(
        &self,
        user_id: &str,
        address: &Address,
        secret: &EncryptedSecret,
    ) -> CustodyResult<()> {
        self.lock()?
            .insert(user_id.to_string(), (address.clone(), secret.clone()));
        Ok(())
    }

    fn get(&self, user_id: &str) -> CustodyResult<Option<(Address, EncryptedSecret)>> {
        Ok(self.lock()?.get(user_id).cloned())
    }

    fn remove(&self, user_id: &str) -> CustodyResult<()> {
        self.lock()?.remove(user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::custody::KeyCustody;
    use crate::shared::constants::KEY_SIZE;

    #[test]
    fn test_put_get_remove_round_trip() {
        let custody = KeyCustody::new(&[0x22; KEY_SIZE]).unwrap();
        let store = MemorySecretStore::new();
        let (address, secret) = custody.generate_wallet().unwrap();

        store.put("user-1", &address, &secret).unwrap();
        let (stored_address, stored_secret) = store.get("user-1").unwrap().expect("entry");
        assert_eq!(stored_address, address);
        assert_eq!(stored_secret, secret);

        // The stored secret must decrypt exactly as the original did.
        assert_eq!(
            &*custody.decrypt(&stored_secret).unwrap(),
            &*custody.decrypt(&secret).unwrap()
        );

        store.remove("user-1").unwrap();
        assert!(store.get("user-1").unwrap().is_none());
    }

    #[test]
    fn test_get_missing_user() {
        let store = MemorySecretStore::new();
        assert!(store.get("nobody").unwrap().is_none());
    }

    #[test]
    fn test_put_replaces_previous_entry() {
        let custody = KeyCustody::new(&[0x33; KEY_SIZE]).unwrap();
        let store = MemorySecretStore::new();

        let (first_address, first_secret) = custody.generate_wallet().unwrap();
        let (second_address, second_secret) = custody.generate_wallet().unwrap();

        store.put("user-1", &first_address, &first_secret).unwrap();
        store.put("user-1", &second_address, &second_secret).unwrap();

        let (address, _) = store.get("user-1").unwrap().unwrap();
        assert_eq!(address, second_address);
    }
}
