//! Shared frontend utilities for API access, configuration, and build metadata.
//!
//! Every request goes through [`api::ApiClient`]: it attaches the stored
//! credential as a `Authorization: Bearer` header on authorized calls,
//! unwraps the API response envelope, and reports an expired session through
//! a single callback so session teardown happens in exactly one place.
//!
//! Centralizing these helpers keeps network behavior consistent and avoids
//! duplicated logic in routes and features. These utilities do not handle
//! secrets directly, but callers must still avoid logging sensitive data.

#[cfg(target_arch = "wasm32")]
pub(crate) mod api;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) mod config;
#[cfg(target_arch = "wasm32")]
pub(crate) mod forms;
#[cfg(target_arch = "wasm32")]
pub(crate) mod theme;

#[cfg(target_arch = "wasm32")]
pub(crate) const GIT_COMMIT_HASH: &str = env!("BUKU_WEB_GIT_SHA");

#[cfg(target_arch = "wasm32")]
pub(crate) use api::{ApiClient, append_field, append_file, new_form_data};
