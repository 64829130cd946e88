//! Account field rules.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::fields::{require_text, EMAIL_MAX_LENGTH, USER_NAME_MAX_LENGTH};

pub const MIN_PASSWORD_LENGTH: usize = 8;

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._-]+$").expect("Invalid username regex"));

/// Latin or Cyrillic letters, spaces, hyphens
static PERSON_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[А-Яа-яЁёA-Za-z\- ]+$").expect("Invalid person name regex"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("Invalid email regex")
});

/// Registration fields after validation and trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub password: &'a str,
}

impl<'a> NewAccount<'a> {
    pub fn validate(
        email: &'a str,
        username: &'a str,
        first_name: &'a str,
        last_name: &'a str,
        password: &'a str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            email: validate_email(email)?,
            username: validate_username(username)?,
            first_name: validate_person_name("first_name", first_name)?,
            last_name: validate_person_name("last_name", last_name)?,
            password: validate_password(password)?,
        })
    }
}

pub fn validate_email(email: &str) -> Result<&str, ValidationError> {
    let email = require_text("email", email, Some(EMAIL_MAX_LENGTH))?;
    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(email)
}

pub fn validate_username(username: &str) -> Result<&str, ValidationError> {
    let username = require_text("username", username, Some(USER_NAME_MAX_LENGTH))?;
    if !USERNAME_RE.is_match(username) {
        return Err(ValidationError::InvalidUsername);
    }
    Ok(username)
}

pub fn validate_person_name<'a>(
    field: &'static str,
    value: &'a str,
) -> Result<&'a str, ValidationError> {
    let value = require_text(field, value, Some(USER_NAME_MAX_LENGTH))?;
    if !PERSON_NAME_RE.is_match(value) {
        return Err(ValidationError::InvalidName(field));
    }
    Ok(value)
}

/// Passwords are not trimmed.
pub fn validate_password(password: &str) -> Result<&str, ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }
    Ok(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_account() {
        let account =
            NewAccount::validate(" vasya@example.com ", "vasya.p", "Вася", "Pupkin-Smith", "s3cretpass")
                .unwrap();
        assert_eq!(account.email, "vasya@example.com");
        assert_eq!(account.first_name, "Вася");
    }

    #[test]
    fn test_username_charset() {
        assert!(validate_username("chef_42-x.y").is_ok());
        assert_eq!(
            validate_username("chef 42"),
            Err(ValidationError::InvalidUsername)
        );
        assert_eq!(
            validate_username("шеф"),
            Err(ValidationError::InvalidUsername)
        );
    }

    #[test]
    fn test_person_name_charset() {
        assert!(validate_person_name("first_name", "Анна-Мария").is_ok());
        assert_eq!(
            validate_person_name("last_name", "Smith3"),
            Err(ValidationError::InvalidName("last_name"))
        );
    }

    #[test]
    fn test_email_shape() {
        assert!(validate_email("a@b.co").is_ok());
        assert_eq!(validate_email("a@b"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("no-at.example"), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_password_length() {
        assert!(validate_password("12345678").is_ok());
        assert_eq!(
            validate_password("short"),
            Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH))
        );
    }
}
