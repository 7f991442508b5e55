/// Account records and exact-match access to the `accounts` table.

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;

const ACCOUNT_COLUMNS: &str = "id, username, email, full_name, is_active, is_superuser, \
     account_type, housing_size, budget_pref, dietary_pref, dietary_restrictions, \
     location, hashed_password";

/// A stored account, hashed credential included. Never serialized outward;
/// responses go through [`AccountPublic`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
    pub account_type: Option<String>,
    pub housing_size: i32,
    pub budget_pref: f64,
    pub dietary_pref: Option<String>,
    pub dietary_restrictions: Option<String>,
    pub location: Option<String>,
    pub hashed_password: String,
}

/// Outward-facing account representation. Every field of [`Account`]
/// except the hashed credential.
#[derive(Debug, Clone, Serialize)]
pub struct AccountPublic {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
    pub account_type: Option<String>,
    pub housing_size: i32,
    pub budget_pref: f64,
    pub dietary_pref: Option<String>,
    pub dietary_restrictions: Option<String>,
    pub location: Option<String>,
}

impl From<Account> for AccountPublic {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            full_name: account.full_name,
            is_active: account.is_active,
            is_superuser: account.is_superuser,
            account_type: account.account_type,
            housing_size: account.housing_size,
            budget_pref: account.budget_pref,
            dietary_pref: account.dietary_pref,
            dietary_restrictions: account.dietary_restrictions,
            location: account.location,
        }
    }
}

/// Fields supplied at registration. `is_active`/`is_superuser` are not
/// caller-settable; the insert pins them to their defaults.
#[derive(Debug)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub hashed_password: String,
    pub full_name: Option<String>,
    pub account_type: Option<String>,
    pub housing_size: i32,
    pub budget_pref: f64,
    pub dietary_pref: Option<String>,
    pub dietary_restrictions: Option<String>,
    pub location: Option<String>,
}

/// Look up an account by exact username.
///
/// # Errors
/// Returns an error only on storage failure; an absent account is `None`.
pub async fn find_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<Account>, AppError> {
    let account = sqlx::query_as::<_, Account>(&format!(
        "SELECT {} FROM accounts WHERE username = $1",
        ACCOUNT_COLUMNS
    ))
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(account)
}

/// Insert a new account and return the stored row.
///
/// # Errors
/// A username or email collision surfaces as `AccountError::Duplicate` via
/// the unique constraints on the table.
pub async fn insert(pool: &PgPool, new_account: NewAccount) -> Result<Account, AppError> {
    let account = sqlx::query_as::<_, Account>(&format!(
        "INSERT INTO accounts \
             (id, username, email, full_name, is_active, is_superuser, account_type, \
              housing_size, budget_pref, dietary_pref, dietary_restrictions, location, \
              hashed_password) \
         VALUES ($1, $2, $3, $4, TRUE, FALSE, $5, $6, $7, $8, $9, $10, $11) \
         RETURNING {}",
        ACCOUNT_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(&new_account.username)
    .bind(&new_account.email)
    .bind(&new_account.full_name)
    .bind(&new_account.account_type)
    .bind(new_account.housing_size)
    .bind(new_account.budget_pref)
    .bind(&new_account.dietary_pref)
    .bind(&new_account.dietary_restrictions)
    .bind(&new_account.location)
    .bind(&new_account.hashed_password)
    .fetch_one(pool)
    .await?;

    Ok(account)
}
