/// Token codec: issuance and validation of signed bearer tokens.
///
/// Both token kinds are HS256 JWTs signed with the configured secret. The
/// codec holds no state; everything it needs arrives through `JwtSettings`.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::{Claims, TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH};
use crate::configuration::JwtSettings;
use crate::error::{AppError, AuthError};

/// Issue a short-lived access token bound to `username`.
///
/// # Errors
/// Returns an internal error if signing fails.
pub fn issue_access_token(username: &str, config: &JwtSettings) -> Result<String, AppError> {
    issue_token(username, TOKEN_TYPE_ACCESS, config.access_token_expiry, config)
}

/// Issue a long-lived refresh token bound to `username`.
///
/// # Errors
/// Returns an internal error if signing fails.
pub fn issue_refresh_token(username: &str, config: &JwtSettings) -> Result<String, AppError> {
    issue_token(
        username,
        TOKEN_TYPE_REFRESH,
        config.refresh_token_expiry,
        config,
    )
}

fn issue_token(
    username: &str,
    token_type: &str,
    ttl_seconds: i64,
    config: &JwtSettings,
) -> Result<String, AppError> {
    let claims = Claims::new(
        username.to_string(),
        token_type,
        ttl_seconds,
        config.issuer.clone(),
    );

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("token signing failed: {}", e)))
}

/// Validate a token string and extract its claims.
///
/// Verifies the signature, the issuer, and the embedded expiry. An expired
/// token and a tampered/garbage token fail with distinct errors so callers
/// can tell them apart, even though both surface to clients as 401.
pub fn decode_token(token: &str, config: &JwtSettings) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::Auth(AuthError::ExpiredToken)
        }
        _ => AppError::Auth(AuthError::InvalidToken),
    })
}
