/// Password hashing and verification.
///
/// Wraps bcrypt. Hashes are salted, so hashing the same password twice
/// yields different strings; equality comparison of hashes is meaningless
/// and verification must always go through `verify_password`.

use bcrypt::{hash, verify, DEFAULT_COST};
use lazy_static::lazy_static;

use crate::error::{AppError, ValidationError};

const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 256;

lazy_static! {
    // Burned on logins for unknown usernames so a lookup miss costs a full
    // bcrypt round, same as a wrong password.
    static ref DUMMY_HASH: String =
        hash("pantry-timing-equalizer", DEFAULT_COST).expect("bcrypt dummy hash");
}

/// Hash a plaintext password with bcrypt.
///
/// # Errors
/// Fails validation if the password is shorter than 8 or longer than 256
/// characters, or with an internal error if bcrypt itself fails.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(ValidationError::TooShort(
            "password".to_string(),
            MIN_PASSWORD_LENGTH,
        )));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(AppError::Validation(ValidationError::TooLong(
            "password".to_string(),
            MAX_PASSWORD_LENGTH,
        )));
    }

    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("password hashing failed: {}", e)))
}

/// Verify a plaintext password against a stored hash.
///
/// A malformed stored hash counts as a verification failure rather than an
/// error; the caller only ever sees a yes/no answer.
pub fn verify_password(password: &str, hashed: &str) -> bool {
    verify(password, hashed).unwrap_or(false)
}

/// Run a bcrypt verification against a throwaway hash and discard the
/// result. Called on the unknown-username login path to keep its latency
/// in line with the wrong-password path.
pub fn dummy_verify(password: &str) {
    let _ = verify(password, &DUMMY_HASH);
}
