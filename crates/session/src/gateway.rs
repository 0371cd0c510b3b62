use identity::User;
use serde::Serialize;
use thiserror::Error;

/// Transport-level failure reported by a gateway implementation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    /// The API answered 401. The HTTP layer has already torn the session
    /// down by the time callers see this.
    #[error("not authorized")]
    Unauthorized,

    /// Any other non-success status; `message` is what the API said, already
    /// trimmed for display.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    /// The response arrived but did not carry what the envelope promised.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Login form payload. Deliberately not `Debug`; it carries a password.
#[derive(Clone, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Registration form payload. `A` is the attachment type the gateway accepts
/// for the avatar; the browser uses `web_sys::File`.
#[derive(Clone)]
pub struct Registration<A> {
    pub name: String,
    pub email: String,
    pub password: String,
    pub avatar: Option<A>,
}

/// Profile update payload. Absent fields are left untouched by the API.
#[derive(Clone)]
pub struct ProfileUpdate<A> {
    pub name: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub avatar: Option<A>,
}

impl<A> Default for ProfileUpdate<A> {
    fn default() -> Self {
        Self {
            name: None,
            current_password: None,
            new_password: None,
            avatar: None,
        }
    }
}

impl<A> ProfileUpdate<A> {
    /// Whether this update would change anything. A password is only a
    /// change when both halves of the pair are present.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.name.is_some()
            || self.avatar.is_some()
            || (self.current_password.is_some() && self.new_password.is_some())
    }
}

/// What the session controller needs from the API.
///
/// Login and registration resolve to the raw credential string; decoding it
/// into a [`User`] stays with the controller so every sign-in path goes
/// through the same claims check.
#[allow(async_fn_in_trait)]
pub trait AuthGateway {
    type Attachment;

    /// Exchange login credentials for a session credential.
    async fn login(&self, credentials: &LoginCredentials) -> Result<String, GatewayError>;

    /// Create an account and sign it in, resolving to a session credential.
    async fn register(
        &self,
        registration: &Registration<Self::Attachment>,
    ) -> Result<String, GatewayError>;

    /// Apply a profile update for `user_id`, resolving to the updated user.
    async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate<Self::Attachment>,
    ) -> Result<User, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::ProfileUpdate;

    #[test]
    fn an_empty_update_has_no_changes() {
        let update: ProfileUpdate<()> = ProfileUpdate::default();
        assert!(!update.has_changes());
    }

    #[test]
    fn half_a_password_pair_is_not_a_change() {
        let update: ProfileUpdate<()> = ProfileUpdate {
            current_password: Some("Old1tim3!".to_string()),
            ..ProfileUpdate::default()
        };
        assert!(!update.has_changes());

        let update: ProfileUpdate<()> = ProfileUpdate {
            new_password: Some("N3w!passw".to_string()),
            ..ProfileUpdate::default()
        };
        assert!(!update.has_changes());
    }

    #[test]
    fn name_avatar_or_a_full_pair_counts() {
        let named: ProfileUpdate<()> = ProfileUpdate {
            name: Some("Noa".to_string()),
            ..ProfileUpdate::default()
        };
        assert!(named.has_changes());

        let avatar: ProfileUpdate<()> = ProfileUpdate {
            avatar: Some(()),
            ..ProfileUpdate::default()
        };
        assert!(avatar.has_changes());

        let pair: ProfileUpdate<()> = ProfileUpdate {
            current_password: Some("Old1tim3!".to_string()),
            new_password: Some("N3w!passw".to_string()),
            ..ProfileUpdate::default()
        };
        assert!(pair.has_changes());
    }
}
