//! Session lifecycle for the browser app.
//!
//! The [`SessionController`] owns the authenticated-user state machine and
//! drives the credential and profile stores; [`authentication_gate`] and
//! [`role_gate`] answer routing questions from the current phase without
//! touching the network.

mod controller;
mod error;
mod gateway;
mod guards;
pub mod validate;

pub use controller::{SessionController, SessionEvent, SessionPhase};
pub use error::SessionError;
pub use gateway::{AuthGateway, GatewayError, LoginCredentials, ProfileUpdate, Registration};
pub use guards::{
    Denial, GateDecision, LANDING_ROUTE, SIGN_IN_ROUTE, authentication_gate, role_gate,
};
