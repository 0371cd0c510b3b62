//! Books feature: the shared cached store and the API gateway behind it.

pub(crate) mod gateway;
pub(crate) mod state;
