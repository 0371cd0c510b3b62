//! Storage seams for the session credential and the profile display copy.
//!
//! The browser app backs these with `localStorage`; tests and native builds
//! use the in-memory implementations.

use std::cell::RefCell;

use thiserror::Error;

use crate::claims::User;

/// Key the credential is stored under. One key, one credential.
pub const CREDENTIAL_STORAGE_KEY: &str = "buku-session";

/// Key the profile display copy is stored under.
pub const PROFILE_STORAGE_KEY: &str = "buku-profile";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("storage is unavailable")]
    Unavailable,

    #[error("storage rejected the operation: {0}")]
    Denied(String),
}

/// Holds at most one opaque credential. `save` overwrites unconditionally,
/// and no expiry is tracked here; a stale credential surfaces as a rejected
/// API call, not as a storage miss.
pub trait CredentialStore {
    /// Persist the credential, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the backing storage is missing or rejects
    /// the write.
    fn save(&self, credential: &str) -> Result<(), StoreError>;

    /// Read the stored credential, if any.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the backing storage is missing.
    fn read(&self) -> Result<Option<String>, StoreError>;

    /// Remove the stored credential. Clearing an empty store is fine.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the backing storage is missing.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Holds the last profile copy shown to the user. Purely cosmetic: it lets a
/// profile edit survive a reload even though the credential still carries the
/// pre-edit identity.
pub trait ProfileStore {
    /// Persist the profile copy, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the backing storage is missing or rejects
    /// the write.
    fn save(&self, user: &User) -> Result<(), StoreError>;

    /// Read the stored profile copy, if any.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the backing storage is missing.
    fn load(&self) -> Result<Option<User>, StoreError>;

    /// Remove the stored profile copy.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the backing storage is missing.
    fn clear(&self) -> Result<(), StoreError>;
}

/// In-memory credential store.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: RefCell<Option<String>>,
}

impl CredentialStore for MemoryCredentialStore {
    fn save(&self, credential: &str) -> Result<(), StoreError> {
        *self.slot.borrow_mut() = Some(credential.to_string());
        Ok(())
    }

    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.slot.borrow().clone())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}

/// In-memory profile store.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    slot: RefCell<Option<User>>,
}

impl ProfileStore for MemoryProfileStore {
    fn save(&self, user: &User) -> Result<(), StoreError> {
        *self.slot.borrow_mut() = Some(user.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<User>, StoreError> {
        Ok(self.slot.borrow().clone())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{CredentialStore, MemoryCredentialStore, MemoryProfileStore, ProfileStore, StoreError};
    use crate::claims::User;
    use crate::role::Role;

    #[test]
    fn save_overwrites_previous_credential() -> Result<(), StoreError> {
        let store = MemoryCredentialStore::default();

        store.save("first")?;
        store.save("second")?;

        assert_eq!(store.read()?, Some("second".to_string()));

        Ok(())
    }

    #[test]
    fn clear_empties_the_store_and_is_idempotent() -> Result<(), StoreError> {
        let store = MemoryCredentialStore::default();

        store.save("credential")?;
        store.clear()?;
        assert_eq!(store.read()?, None);

        store.clear()?;
        assert_eq!(store.read()?, None);

        Ok(())
    }

    #[test]
    fn empty_store_reads_none() -> Result<(), StoreError> {
        let store = MemoryCredentialStore::default();

        assert_eq!(store.read()?, None);

        Ok(())
    }

    #[test]
    fn profile_copy_round_trips() -> Result<(), StoreError> {
        let store = MemoryProfileStore::default();
        let user = User {
            id: "u-7".to_string(),
            name: "Noa Reyes".to_string(),
            email: "noa@example.test".to_string(),
            role: Role::User,
            avatar: None,
        };

        assert_eq!(store.load()?, None);

        store.save(&user)?;
        assert_eq!(store.load()?, Some(user));

        store.clear()?;
        assert_eq!(store.load()?, None);

        Ok(())
    }
}
