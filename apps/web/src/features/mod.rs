//! Domain-level frontend features (auth, books) and their shared logic.
//! Routes import these modules to keep view code focused while keeping
//! session and API handling in dedicated feature areas.

pub(crate) mod auth;
pub(crate) mod books;
