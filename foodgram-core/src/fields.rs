//! Length limits and text-field checks shared by recipes, ingredients and users.

use crate::error::ValidationError;

pub const USER_NAME_MAX_LENGTH: usize = 150;
pub const EMAIL_MAX_LENGTH: usize = 254;
pub const INGREDIENT_NAME_MAX_LENGTH: usize = 128;
pub const MEASUREMENT_UNIT_MAX_LENGTH: usize = 64;
pub const RECIPE_NAME_MAX_LENGTH: usize = 256;

/// Trim `value` and check it is non-empty and, if `max` is given, no longer
/// than `max` characters. Returns the trimmed text.
pub fn require_text<'a>(
    field: &'static str,
    value: &'a str,
    max: Option<usize>,
) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    if let Some(max) = max {
        if trimmed.chars().count() > max {
            return Err(ValidationError::TooLong { field, max });
        }
    }
    Ok(trimmed)
}
