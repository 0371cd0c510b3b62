mod claims;
mod role;
mod store;
pub mod validate;

pub use claims::{DecodeError, User, decode};
pub use role::{Role, UnknownRole};
pub use store::{
    CREDENTIAL_STORAGE_KEY, CredentialStore, MemoryCredentialStore, MemoryProfileStore,
    PROFILE_STORAGE_KEY, ProfileStore, StoreError,
};
