//! Auth feature covering session state, the sign-in gateway, storage, and
//! route guards. It keeps authentication logic out of the UI and must avoid
//! logging credentials or passwords.
//!
//! Flow overview: login and registration resolve to a credential the session
//! controller decodes and persists; restore replays the stored credential on
//! startup; an API 401 on any authorized call expires the session centrally.

pub(crate) mod gateway;
pub(crate) mod guards;
pub(crate) mod state;
pub(crate) mod storage;
