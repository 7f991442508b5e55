/// JWT claims carried by both token kinds.
///
/// Access and refresh tokens share this claim set; they differ only in the
/// `type` field and in how far out `exp` is set.

use serde::{Deserialize, Serialize};

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Token kind: "access" or "refresh"
    #[serde(rename = "type")]
    pub token_type: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

impl Claims {
    pub fn new(subject: String, token_type: &str, expiry_seconds: i64, issuer: String) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: subject,
            token_type: token_type.to_string(),
            exp: now + expiry_seconds,
            iat: now,
            iss: issuer,
        }
    }

    pub fn is_access(&self) -> bool {
        self.token_type == TOKEN_TYPE_ACCESS
    }

    pub fn is_refresh(&self) -> bool {
        self.token_type == TOKEN_TYPE_REFRESH
    }
}
