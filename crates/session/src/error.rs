use thiserror::Error;

use crate::gateway::GatewayError;

/// Session-level failures. Display strings are shown to users as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// A credential was present but could not be decoded into a user.
    #[error("stored sign-in is invalid, please sign in again")]
    InvalidCredential,

    /// The API rejected a login or registration; the string is the message
    /// to surface.
    #[error("{0}")]
    AuthenticationFailed(String),

    /// The operation requires a signed-in user.
    #[error("not signed in")]
    NotAuthenticated,

    /// A profile update carried no fields.
    #[error("nothing to update")]
    EmptyUpdate,

    /// Another login, registration, or profile update is still in flight.
    #[error("another account operation is already running")]
    OperationPending,

    /// Transport or server failure outside the authentication flow itself.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
