use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Access role carried in the credential claims.
///
/// The API has emitted role strings in more than one casing, so parsing is
/// case-insensitive and everything past the decode boundary works with this
/// enum instead of raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    Admin,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    /// Parse a role string in any casing.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRole` for anything other than admin/user.
    pub fn parse(value: &str) -> Result<Self, UnknownRole> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "USER" => Ok(Role::User),
            _ => Err(UnknownRole(value.to_string())),
        }
    }

    /// Canonical wire form, as the API spells it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Role::parse(&value)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::Role;

    #[test]
    fn parses_any_casing() {
        assert_eq!(Role::parse("ADMIN"), Ok(Role::Admin));
        assert_eq!(Role::parse("admin"), Ok(Role::Admin));
        assert_eq!(Role::parse("Admin"), Ok(Role::Admin));
        assert_eq!(Role::parse(" user "), Ok(Role::User));
        assert_eq!(Role::parse("USER"), Ok(Role::User));
    }

    #[test]
    fn rejects_unknown_roles() {
        assert!(Role::parse("superuser").is_err());
        assert!(Role::parse("").is_err());
        assert!(Role::parse("admin2").is_err());
    }

    #[test]
    fn serializes_to_canonical_form() {
        assert_eq!(
            serde_json::to_string(&Role::Admin).ok(),
            Some("\"ADMIN\"".to_string())
        );
        let parsed: Role = serde_json::from_str("\"uSeR\"").unwrap();
        assert_eq!(parsed, Role::User);
    }
}
