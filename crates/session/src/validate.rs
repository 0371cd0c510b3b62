//! Account form validation, composed from the field rules in `identity`.

use identity::validate::{self, ValidationError};

/// Validate a registration form before it is sent.
///
/// # Errors
///
/// Returns the first failing field rule, or `PasswordMismatch` when the
/// confirmation does not match.
pub fn registration(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<(), ValidationError> {
    validate::name(name)?;
    validate::email(email)?;
    validate::password(password)?;

    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }

    Ok(())
}

/// Validate a profile update form before it is sent.
///
/// The current password is only checked for presence; accounts created under
/// older rules must still be able to change their password.
///
/// # Errors
///
/// Returns `NothingToChange` when no field is set, `PasswordPairIncomplete`
/// when only one half of the password pair is, and otherwise the first
/// failing field rule.
pub fn profile_update(
    name: Option<&str>,
    current_password: Option<&str>,
    new_password: Option<&str>,
    has_avatar: bool,
) -> Result<(), ValidationError> {
    let wants_password_change = current_password.is_some() || new_password.is_some();

    if name.is_none() && !wants_password_change && !has_avatar {
        return Err(ValidationError::NothingToChange);
    }

    if wants_password_change && (current_password.is_none() || new_password.is_none()) {
        return Err(ValidationError::PasswordPairIncomplete);
    }

    if let Some(name) = name {
        validate::name(name)?;
    }

    if let Some(new_password) = new_password {
        validate::password(new_password)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{profile_update, registration};
    use identity::validate::ValidationError;

    #[test]
    fn a_complete_registration_passes() {
        assert_eq!(
            registration("Noa Reyes", "noa@example.test", "Str0ng!pw", "Str0ng!pw"),
            Ok(())
        );
    }

    #[test]
    fn registration_rejects_a_mismatched_confirmation() {
        assert_eq!(
            registration("Noa Reyes", "noa@example.test", "Str0ng!pw", "Str0ng!pW"),
            Err(ValidationError::PasswordMismatch)
        );
    }

    #[test]
    fn registration_surfaces_field_rules_first() {
        assert_eq!(
            registration("N", "noa@example.test", "Str0ng!pw", "other"),
            Err(ValidationError::NameLength)
        );
        assert_eq!(
            registration("Noa Reyes", "not-an-email", "Str0ng!pw", "Str0ng!pw"),
            Err(ValidationError::Email)
        );
    }

    #[test]
    fn an_update_with_no_fields_is_rejected() {
        assert_eq!(
            profile_update(None, None, None, false),
            Err(ValidationError::NothingToChange)
        );
    }

    #[test]
    fn an_avatar_alone_is_a_valid_update() {
        assert_eq!(profile_update(None, None, None, true), Ok(()));
    }

    #[test]
    fn half_a_password_pair_is_rejected() {
        assert_eq!(
            profile_update(None, Some("Old1tim3!"), None, false),
            Err(ValidationError::PasswordPairIncomplete)
        );
        assert_eq!(
            profile_update(None, None, Some("N3w!passw"), false),
            Err(ValidationError::PasswordPairIncomplete)
        );
    }

    #[test]
    fn the_new_password_must_meet_the_rules() {
        assert_eq!(
            profile_update(None, Some("anything"), Some("weak"), false),
            Err(ValidationError::PasswordLength)
        );
    }

    #[test]
    fn the_current_password_is_not_held_to_the_rules() {
        assert_eq!(
            profile_update(None, Some("weak"), Some("N3w!passw"), false),
            Ok(())
        );
    }

    #[test]
    fn a_name_change_is_validated() {
        assert_eq!(profile_update(Some("Noa"), None, None, false), Ok(()));
        assert_eq!(
            profile_update(Some("x"), None, None, false),
            Err(ValidationError::NameLength)
        );
    }
}
