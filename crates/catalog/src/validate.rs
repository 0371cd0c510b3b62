//! Book form validation, composed from the field rules in `identity`.

use identity::validate::{self, ValidationError};

/// Validate the text fields of a book form before it is sent. Author names
/// follow the same shape rule as titles.
///
/// # Errors
///
/// Returns the first failing field rule.
pub fn book_form(name: &str, author: &str, description: &str) -> Result<(), ValidationError> {
    validate::name(name)?;
    validate::name(author)?;
    validate::description(description)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::book_form;
    use identity::validate::ValidationError;

    #[test]
    fn a_complete_form_passes() {
        assert_eq!(
            book_form(
                "Piranesi",
                "Susanna Clarke",
                "A man in an endless house of statues and tides.",
            ),
            Ok(())
        );
    }

    #[test]
    fn each_field_is_checked_in_order() {
        assert_eq!(
            book_form("P", "Susanna Clarke", "A perfectly fine description."),
            Err(ValidationError::NameLength)
        );
        assert_eq!(
            book_form("Piranesi", "Clarke 2000", "A perfectly fine description."),
            Err(ValidationError::NameCharset)
        );
        assert_eq!(
            book_form("Piranesi", "Susanna Clarke", "too brief"),
            Err(ValidationError::DescriptionLength)
        );
    }
}
