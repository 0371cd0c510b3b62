//! `localStorage` backing for the credential and profile-copy stores. The
//! credential is an opaque token the API issued; nothing here inspects it.

use identity::{
    CREDENTIAL_STORAGE_KEY, CredentialStore, PROFILE_STORAGE_KEY, ProfileStore, StoreError, User,
};

fn local_storage() -> Result<web_sys::Storage, StoreError> {
    web_sys::window()
        .and_then(|window| window.local_storage().ok())
        .flatten()
        .ok_or(StoreError::Unavailable)
}

/// Session credential persisted under [`CREDENTIAL_STORAGE_KEY`].
#[derive(Default)]
pub struct BrowserCredentialStore;

impl CredentialStore for BrowserCredentialStore {
    fn save(&self, credential: &str) -> Result<(), StoreError> {
        local_storage()?
            .set_item(CREDENTIAL_STORAGE_KEY, credential)
            .map_err(|_| StoreError::Denied("write rejected".to_string()))
    }

    fn read(&self) -> Result<Option<String>, StoreError> {
        local_storage()?
            .get_item(CREDENTIAL_STORAGE_KEY)
            .map_err(|_| StoreError::Unavailable)
    }

    fn clear(&self) -> Result<(), StoreError> {
        local_storage()?
            .remove_item(CREDENTIAL_STORAGE_KEY)
            .map_err(|_| StoreError::Unavailable)
    }
}

/// Profile display copy persisted as JSON under [`PROFILE_STORAGE_KEY`].
#[derive(Default)]
pub struct BrowserProfileStore;

impl ProfileStore for BrowserProfileStore {
    fn save(&self, user: &User) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(user)
            .map_err(|err| StoreError::Denied(format!("profile copy not encodable: {err}")))?;
        local_storage()?
            .set_item(PROFILE_STORAGE_KEY, &encoded)
            .map_err(|_| StoreError::Denied("write rejected".to_string()))
    }

    fn load(&self) -> Result<Option<User>, StoreError> {
        let raw = local_storage()?
            .get_item(PROFILE_STORAGE_KEY)
            .map_err(|_| StoreError::Unavailable)?;
        let Some(raw) = raw else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(err) => {
                // The copy is cosmetic; treat an unreadable one as absent.
                log::warn!("discarding unreadable profile copy: {err}");
                let _ = self.clear();
                Ok(None)
            }
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        local_storage()?
            .remove_item(PROFILE_STORAGE_KEY)
            .map_err(|_| StoreError::Unavailable)
    }
}
