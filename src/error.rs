/// Unified error handling for the account service.
///
/// Domain-specific error enums are folded into a single `AppError` used as
/// the handler return error, which maps onto HTTP responses via
/// `ResponseError`. Every failure the API can signal to a client lives
/// here; storage faults that are not part of the client-facing taxonomy
/// surface as a generic internal-error category.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::error::Error as StdError;
use std::fmt;

/// Validation errors for request input
#[derive(Debug, Clone)]
pub enum ValidationError {
    EmptyField(String),
    TooShort(String, usize),
    TooLong(String, usize),
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyField(field) => write!(f, "{} is empty", field),
            ValidationError::TooShort(field, min) => {
                write!(f, "{} is too short (minimum {} characters)", field, min)
            }
            ValidationError::TooLong(field, max) => {
                write!(f, "{} is too long (maximum {} characters)", field, max)
            }
            ValidationError::InvalidFormat(field) => write!(f, "{} has invalid format", field),
            ValidationError::OutOfRange(msg) => write!(f, "{}", msg),
        }
    }
}

impl StdError for ValidationError {}

/// Token and credential failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    InvalidCredentials,
    InvalidToken,
    ExpiredToken,
    WrongTokenType,
    MissingToken,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "incorrect username or password"),
            AuthError::InvalidToken => write!(f, "invalid token"),
            AuthError::ExpiredToken => write!(f, "token has expired"),
            AuthError::WrongTokenType => write!(f, "wrong token type"),
            AuthError::MissingToken => write!(f, "missing authentication token"),
        }
    }
}

impl StdError for AuthError {}

/// Account lookup and uniqueness failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// The named field (username or email) collided with an existing account.
    Duplicate(String),
    NotFound,
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountError::Duplicate(field) => write!(f, "{} already registered", field),
            AccountError::NotFound => write!(f, "account not found"),
        }
    }
}

impl StdError for AccountError {}

/// Storage-layer faults outside the client-facing taxonomy
#[derive(Debug)]
pub enum DatabaseError {
    ConnectionPool(String),
    QueryExecution(String),
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseError::ConnectionPool(msg) => write!(f, "database connection error: {}", msg),
            DatabaseError::QueryExecution(msg) => write!(f, "query error: {}", msg),
        }
    }
}

impl StdError for DatabaseError {}

/// Central error type all handlers return
#[derive(Debug)]
pub enum AppError {
    Validation(ValidationError),
    Auth(AuthError),
    Account(AccountError),
    Database(DatabaseError),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(e) => write!(f, "{}", e),
            AppError::Auth(e) => write!(f, "{}", e),
            AppError::Account(e) => write!(f, "{}", e),
            AppError::Database(e) => write!(f, "{}", e),
            AppError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl StdError for AppError {}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Auth(err)
    }
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        AppError::Account(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::Account(AccountError::NotFound),
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                // Unique violation. The constraint name tells us which field
                // collided; accounts_email_key vs accounts_username_key.
                let field = if db.message().contains("email") {
                    "email"
                } else {
                    "username"
                };
                AppError::Account(AccountError::Duplicate(field.to_string()))
            }
            sqlx::Error::PoolTimedOut => AppError::Database(DatabaseError::ConnectionPool(
                "connection pool timed out".to_string(),
            )),
            sqlx::Error::PoolClosed => AppError::Database(DatabaseError::ConnectionPool(
                "connection pool closed".to_string(),
            )),
            sqlx::Error::Io(e) => AppError::Database(DatabaseError::ConnectionPool(e.to_string())),
            other => AppError::Database(DatabaseError::QueryExecution(other.to_string())),
        }
    }
}

/// JSON body returned for every error response
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub code: String,
    pub status: u16,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(message: String, code: String, status: u16) -> Self {
        Self {
            message,
            code,
            status,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl AppError {
    /// Client-facing error code for the response body.
    fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Auth(AuthError::InvalidCredentials) => "INVALID_CREDENTIALS",
            AppError::Auth(AuthError::InvalidToken) => "TOKEN_INVALID",
            AppError::Auth(AuthError::ExpiredToken) => "TOKEN_EXPIRED",
            AppError::Auth(AuthError::WrongTokenType) => "WRONG_TOKEN_TYPE",
            AppError::Auth(AuthError::MissingToken) => "MISSING_TOKEN",
            AppError::Account(AccountError::Duplicate(_)) => "DUPLICATE_ACCOUNT",
            AppError::Account(AccountError::NotFound) => "ACCOUNT_NOT_FOUND",
            AppError::Database(DatabaseError::ConnectionPool(_)) => "SERVICE_UNAVAILABLE",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message exposed to the client. Storage and internal faults get a
    /// generic message; the detail stays in the logs.
    fn client_message(&self) -> String {
        match self {
            AppError::Validation(_) | AppError::Auth(_) | AppError::Account(_) => self.to_string(),
            AppError::Database(DatabaseError::ConnectionPool(_)) => {
                "service temporarily unavailable".to_string()
            }
            AppError::Database(_) | AppError::Internal(_) => "internal server error".to_string(),
        }
    }

    fn log(&self) {
        match self {
            AppError::Validation(e) => {
                tracing::warn!(error = %e, "request validation failed");
            }
            AppError::Auth(e) => {
                tracing::warn!(error = %e, "authentication failed");
            }
            AppError::Account(e) => {
                tracing::warn!(error = %e, "account operation rejected");
            }
            AppError::Database(e) => {
                tracing::error!(error = %e, "storage failure");
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Account(AccountError::Duplicate(_)) => StatusCode::CONFLICT,
            AppError::Account(AccountError::NotFound) => StatusCode::NOT_FOUND,
            AppError::Database(DatabaseError::ConnectionPool(_)) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        self.log();
        let status = self.status_code();
        let body = ErrorResponse::new(
            self.client_message(),
            self.code().to_string(),
            status.as_u16(),
        );
        HttpResponse::build(status).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_map_to_unauthorized() {
        for err in [
            AuthError::InvalidCredentials,
            AuthError::InvalidToken,
            AuthError::ExpiredToken,
            AuthError::WrongTokenType,
            AuthError::MissingToken,
        ] {
            assert_eq!(
                AppError::Auth(err).status_code(),
                StatusCode::UNAUTHORIZED
            );
        }
    }

    #[test]
    fn duplicate_account_maps_to_conflict() {
        let err = AppError::Account(AccountError::Duplicate("username".to_string()));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.code(), "DUPLICATE_ACCOUNT");
    }

    #[test]
    fn account_not_found_maps_to_not_found() {
        let err = AppError::Account(AccountError::NotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "ACCOUNT_NOT_FOUND");
    }

    #[test]
    fn row_not_found_converts_to_account_not_found() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        match err {
            AppError::Account(AccountError::NotFound) => (),
            other => panic!("expected AccountError::NotFound, got {:?}", other),
        }
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let err = AppError::Internal("secret detail".to_string());
        assert!(!err.client_message().contains("secret detail"));
    }
}
