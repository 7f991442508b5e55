/// Request input validators.
///
/// Length bounds mirror the column limits in the accounts migration, so a
/// value that passes validation can never be rejected by the schema.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ValidationError;

const MAX_USERNAME_LENGTH: usize = 50;
const MAX_EMAIL_LENGTH: usize = 100;
const MIN_EMAIL_LENGTH: usize = 5;
const MAX_FULL_NAME_LENGTH: usize = 100;

const MIN_HOUSING_SIZE: i32 = 1;
const MAX_HOUSING_SIZE: i32 = 100;

lazy_static! {
    // RFC 5322 simplified email regex (practical validation)
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap();

    // Letters, digits, and a conservative set of separators
    static ref USERNAME_REGEX: Regex = Regex::new(r"^[A-Za-z0-9._-]+$").unwrap();
}

pub fn validate_username(username: &str) -> Result<String, ValidationError> {
    let trimmed = username.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField("username".to_string()));
    }

    if trimmed.len() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::TooLong(
            "username".to_string(),
            MAX_USERNAME_LENGTH,
        ));
    }

    if !USERNAME_REGEX.is_match(trimmed) {
        return Err(ValidationError::InvalidFormat("username".to_string()));
    }

    Ok(trimmed.to_string())
}

pub fn validate_email(email: &str) -> Result<String, ValidationError> {
    let trimmed = email.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField("email".to_string()));
    }

    if trimmed.len() < MIN_EMAIL_LENGTH {
        return Err(ValidationError::TooShort(
            "email".to_string(),
            MIN_EMAIL_LENGTH,
        ));
    }

    if trimmed.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::TooLong(
            "email".to_string(),
            MAX_EMAIL_LENGTH,
        ));
    }

    if trimmed.matches('@').count() != 1 || !EMAIL_REGEX.is_match(trimmed) {
        return Err(ValidationError::InvalidFormat("email".to_string()));
    }

    Ok(trimmed.to_string())
}

/// Optional free-text profile field, bounded by the schema column width.
pub fn validate_optional_field(
    value: Option<String>,
    field: &str,
    max_length: usize,
) -> Result<Option<String>, ValidationError> {
    match value {
        None => Ok(None),
        Some(v) => {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            if trimmed.len() > max_length {
                return Err(ValidationError::TooLong(field.to_string(), max_length));
            }
            Ok(Some(trimmed.to_string()))
        }
    }
}

pub fn validate_full_name(value: Option<String>) -> Result<Option<String>, ValidationError> {
    validate_optional_field(value, "full_name", MAX_FULL_NAME_LENGTH)
}

pub fn validate_housing_size(housing_size: i32) -> Result<i32, ValidationError> {
    if !(MIN_HOUSING_SIZE..=MAX_HOUSING_SIZE).contains(&housing_size) {
        return Err(ValidationError::OutOfRange(format!(
            "housing_size must be between {} and {}",
            MIN_HOUSING_SIZE, MAX_HOUSING_SIZE
        )));
    }
    Ok(housing_size)
}

pub fn validate_budget_pref(budget_pref: f64) -> Result<f64, ValidationError> {
    if budget_pref < 0.0 || !budget_pref.is_finite() {
        return Err(ValidationError::OutOfRange(
            "budget_pref must be a non-negative number".to_string(),
        ));
    }
    Ok(budget_pref)
}
