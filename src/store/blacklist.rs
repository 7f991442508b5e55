/// Revocation store: an append-only set of blacklisted refresh tokens.
///
/// A token present here must be treated as revoked regardless of its
/// signature or expiry. Records are never removed.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;

/// Membership test for the blacklist.
pub async fn contains(pool: &PgPool, token: &str) -> Result<bool, AppError> {
    let revoked = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM token_blacklist WHERE token = $1)",
    )
    .bind(token)
    .fetch_one(pool)
    .await?;

    Ok(revoked)
}

/// Blacklist a refresh-token string.
///
/// Idempotent: blacklisting a token that is already present is a no-op and
/// leaves exactly one record, guaranteed by the unique constraint on
/// `token` rather than a check-then-insert.
pub async fn add(pool: &PgPool, token: &str) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO token_blacklist (id, token) VALUES ($1, $2) \
         ON CONFLICT (token) DO NOTHING",
    )
    .bind(Uuid::new_v4())
    .bind(token)
    .execute(pool)
    .await?;

    Ok(())
}
