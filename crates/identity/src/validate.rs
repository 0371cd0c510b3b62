//! Form validation rules shared by the account and catalog forms.
//!
//! These mirror what the API enforces, so a form that passes here is expected
//! to pass server-side as well. The messages are shown to users verbatim.

use regex::Regex;
use thiserror::Error;

/// Upload ceiling for avatar and cover images.
pub const MAX_UPLOAD_BYTES: u64 = 2 * 1024 * 1024;

/// Content types accepted for image uploads.
pub const ACCEPTED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/webp"];

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 20;
const DESCRIPTION_MIN: usize = 10;
const DESCRIPTION_MAX: usize = 255;
const PASSWORD_MIN: usize = 8;
const PASSWORD_SPECIALS: &str = "@$!%*?&#";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("must be {NAME_MIN}-{NAME_MAX} characters")]
    NameLength,

    #[error("may only contain letters, spaces, apostrophes, and hyphens")]
    NameCharset,

    #[error("enter a valid email address")]
    Email,

    #[error("password must be at least {PASSWORD_MIN} characters")]
    PasswordLength,

    #[error("password needs an uppercase letter, a lowercase letter, a digit, and one of {PASSWORD_SPECIALS}")]
    PasswordComplexity,

    #[error("description must be {DESCRIPTION_MIN}-{DESCRIPTION_MAX} characters")]
    DescriptionLength,

    #[error("image must be smaller than 2 MB")]
    UploadTooLarge,

    #[error("image must be a jpeg, png, or webp")]
    UploadType,

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("nothing to update")]
    NothingToChange,

    #[error("both the current and the new password are required to change it")]
    PasswordPairIncomplete,
}

/// Validate a display name, book title, or author name.
///
/// # Errors
///
/// Returns `NameLength` or `NameCharset` when the trimmed value falls outside
/// the accepted shape.
pub fn name(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    let length = trimmed.chars().count();

    if !(NAME_MIN..=NAME_MAX).contains(&length) {
        return Err(ValidationError::NameLength);
    }

    if !Regex::new(r"^[A-Za-zÀ-ÿ\s'-]+$").is_ok_and(|re| re.is_match(trimmed)) {
        return Err(ValidationError::NameCharset);
    }

    Ok(())
}

/// Validate an email address.
///
/// # Errors
///
/// Returns `Email` when the value does not look like `local@domain.tld`.
pub fn email(value: &str) -> Result<(), ValidationError> {
    if Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(value.trim())) {
        Ok(())
    } else {
        Err(ValidationError::Email)
    }
}

/// Validate a password against the length and complexity rules.
///
/// # Errors
///
/// Returns `PasswordLength` or `PasswordComplexity`.
pub fn password(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() < PASSWORD_MIN {
        return Err(ValidationError::PasswordLength);
    }

    let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    let has_special = value.chars().any(|c| PASSWORD_SPECIALS.contains(c));

    if has_upper && has_lower && has_digit && has_special {
        Ok(())
    } else {
        Err(ValidationError::PasswordComplexity)
    }
}

/// Validate a book description.
///
/// # Errors
///
/// Returns `DescriptionLength` when the trimmed value falls outside 10-255
/// characters.
pub fn description(value: &str) -> Result<(), ValidationError> {
    let length = value.trim().chars().count();

    if (DESCRIPTION_MIN..=DESCRIPTION_MAX).contains(&length) {
        Ok(())
    } else {
        Err(ValidationError::DescriptionLength)
    }
}

/// Validate an image upload by size and content type.
///
/// # Errors
///
/// Returns `UploadTooLarge` or `UploadType`.
pub fn image_upload(bytes: u64, content_type: &str) -> Result<(), ValidationError> {
    if bytes > MAX_UPLOAD_BYTES {
        return Err(ValidationError::UploadTooLarge);
    }

    if ACCEPTED_IMAGE_TYPES.contains(&content_type) {
        Ok(())
    } else {
        Err(ValidationError::UploadType)
    }
}

#[cfg(test)]
mod tests {
    use super::{ValidationError, description, email, image_upload, name, password};

    #[test]
    fn accepts_reasonable_names() {
        assert_eq!(name("Amira Boone"), Ok(()));
        assert_eq!(name("O'Brien"), Ok(()));
        assert_eq!(name("Zoë"), Ok(()));
        assert_eq!(name("Jean-Luc"), Ok(()));
        assert_eq!(name("  padded  "), Ok(()));
    }

    #[test]
    fn rejects_out_of_range_names() {
        assert_eq!(name("A"), Err(ValidationError::NameLength));
        assert_eq!(name(""), Err(ValidationError::NameLength));
        assert_eq!(
            name("a name that runs well past twenty characters"),
            Err(ValidationError::NameLength)
        );
    }

    #[test]
    fn rejects_names_with_digits_or_symbols() {
        assert_eq!(name("R2-D2"), Err(ValidationError::NameCharset));
        assert_eq!(name("name!"), Err(ValidationError::NameCharset));
        assert_eq!(name("a_b"), Err(ValidationError::NameCharset));
    }

    #[test]
    fn checks_email_shape() {
        assert_eq!(email("noa@example.test"), Ok(()));
        assert_eq!(email(" noa@example.test "), Ok(()));
        assert_eq!(email("noa@example"), Err(ValidationError::Email));
        assert_eq!(email("noa example.test"), Err(ValidationError::Email));
        assert_eq!(email("@example.test"), Err(ValidationError::Email));
        assert_eq!(email(""), Err(ValidationError::Email));
    }

    #[test]
    fn checks_password_rules() {
        assert_eq!(password("Str0ng!pw"), Ok(()));
        assert_eq!(password("Sh0rt!"), Err(ValidationError::PasswordLength));
        assert_eq!(
            password("alllowercase1!"),
            Err(ValidationError::PasswordComplexity)
        );
        assert_eq!(
            password("NoDigitsHere!"),
            Err(ValidationError::PasswordComplexity)
        );
        assert_eq!(
            password("NoSpecials12"),
            Err(ValidationError::PasswordComplexity)
        );
    }

    #[test]
    fn checks_description_length() {
        assert_eq!(description("A short but fine description."), Ok(()));
        assert_eq!(description("too short"), Err(ValidationError::DescriptionLength));
        assert_eq!(
            description(&"x".repeat(256)),
            Err(ValidationError::DescriptionLength)
        );
        assert_eq!(description(&"x".repeat(255)), Ok(()));
    }

    #[test]
    fn checks_image_uploads() {
        assert_eq!(image_upload(1024, "image/png"), Ok(()));
        assert_eq!(image_upload(2 * 1024 * 1024, "image/webp"), Ok(()));
        assert_eq!(
            image_upload(2 * 1024 * 1024 + 1, "image/png"),
            Err(ValidationError::UploadTooLarge)
        );
        assert_eq!(
            image_upload(1024, "image/gif"),
            Err(ValidationError::UploadType)
        );
        assert_eq!(
            image_upload(1024, "application/pdf"),
            Err(ValidationError::UploadType)
        );
    }
}
