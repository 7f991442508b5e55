/// Account management routes.
///
/// Registration, login, token refresh, logout, and the protected
/// current-user lookup. Handlers orchestrate the token codec, the password
/// hasher, and the stores; they hold no state of their own.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::auth::{
    decode_token, dummy_verify, hash_password, issue_access_token, issue_refresh_token,
    verify_password, Claims,
};
use crate::configuration::JwtSettings;
use crate::error::{AccountError, AppError, AuthError};
use crate::store::{accounts, blacklist, AccountPublic, NewAccount};
use crate::validators::{
    validate_budget_pref, validate_email, validate_full_name, validate_housing_size,
    validate_optional_field, validate_username,
};

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default = "default_housing_size")]
    pub housing_size: i32,
    #[serde(default)]
    pub budget_pref: f64,
    #[serde(default)]
    pub dietary_pref: Option<String>,
    #[serde(default)]
    pub dietary_restrictions: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

fn default_housing_size() -> i32 {
    1
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Bearer token pair returned by login and refresh
#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

impl TokenResponse {
    fn bearer(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "bearer".to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub detail: String,
}

/// POST /auth/register
///
/// Create a new account and return its public view.
///
/// The duplicate-username pre-check gives the common case a clean error;
/// the unique constraints on `accounts` remain the backstop for races and
/// for duplicate emails, both mapped to the same 409.
pub async fn register(
    form: web::Json<RegisterRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();

    let username = validate_username(&form.username)?;
    let email = validate_email(&form.email)?;
    let full_name = validate_full_name(form.full_name)?;
    let account_type = validate_optional_field(form.account_type, "account_type", 50)?;
    let housing_size = validate_housing_size(form.housing_size)?;
    let budget_pref = validate_budget_pref(form.budget_pref)?;
    let dietary_pref = validate_optional_field(form.dietary_pref, "dietary_pref", 50)?;
    let dietary_restrictions =
        validate_optional_field(form.dietary_restrictions, "dietary_restrictions", 100)?;
    let location = validate_optional_field(form.location, "location", 100)?;

    if accounts::find_by_username(pool.get_ref(), &username)
        .await?
        .is_some()
    {
        return Err(AppError::Account(AccountError::Duplicate(
            "username".to_string(),
        )));
    }

    let hashed_password = hash_password(&form.password)?;

    let account = accounts::insert(
        pool.get_ref(),
        NewAccount {
            username,
            email,
            hashed_password,
            full_name,
            account_type,
            housing_size,
            budget_pref,
            dietary_pref,
            dietary_restrictions,
            location,
        },
    )
    .await?;

    tracing::info!(account_id = %account.id, username = %account.username, "account registered");

    Ok(HttpResponse::Created().json(AccountPublic::from(account)))
}

/// POST /auth/login
///
/// Verify credentials and issue an access/refresh token pair.
///
/// Unknown username and wrong password return the same error, and the
/// unknown-username path burns a bcrypt verification so the two are not
/// distinguishable by latency either.
pub async fn login(
    form: web::Json<LoginRequest>,
    pool: web::Data<PgPool>,
    jwt_config: web::Data<JwtSettings>,
) -> Result<HttpResponse, AppError> {
    let account = match accounts::find_by_username(pool.get_ref(), &form.username).await? {
        Some(account) => account,
        None => {
            dummy_verify(&form.password);
            return Err(AppError::Auth(AuthError::InvalidCredentials));
        }
    };

    if !verify_password(&form.password, &account.hashed_password) {
        return Err(AppError::Auth(AuthError::InvalidCredentials));
    }

    let access_token = issue_access_token(&account.username, jwt_config.get_ref())?;
    let refresh_token = issue_refresh_token(&account.username, jwt_config.get_ref())?;

    tracing::info!(username = %account.username, "login succeeded");

    Ok(HttpResponse::Ok().json(TokenResponse::bearer(access_token, refresh_token)))
}

/// POST /auth/refresh
///
/// Exchange a valid refresh token for a new access token.
///
/// The refresh token itself is returned unchanged: no rotation, and the
/// blacklist is not consulted here.
pub async fn refresh(
    form: web::Json<RefreshRequest>,
    jwt_config: web::Data<JwtSettings>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();

    let claims = decode_token(&form.refresh_token, jwt_config.get_ref())?;

    if !claims.is_refresh() {
        return Err(AppError::Auth(AuthError::WrongTokenType));
    }

    if claims.sub.is_empty() {
        return Err(AppError::Auth(AuthError::InvalidCredentials));
    }

    let access_token = issue_access_token(&claims.sub, jwt_config.get_ref())?;

    tracing::info!(username = %claims.sub, "access token refreshed");

    Ok(HttpResponse::Ok().json(TokenResponse::bearer(access_token, form.refresh_token)))
}

/// POST /auth/logout
///
/// Blacklist a refresh token. The token must still decode (signature and
/// expiry), but its claims are otherwise unused. Idempotent: logging out
/// the same token twice succeeds both times and stores one record.
pub async fn logout(
    form: web::Json<RefreshRequest>,
    pool: web::Data<PgPool>,
    jwt_config: web::Data<JwtSettings>,
) -> Result<HttpResponse, AppError> {
    decode_token(&form.refresh_token, jwt_config.get_ref())?;

    blacklist::add(pool.get_ref(), &form.refresh_token).await?;

    tracing::info!("refresh token blacklisted");

    Ok(HttpResponse::Ok().json(LogoutResponse {
        detail: "Successfully logged out".to_string(),
    }))
}

/// GET /auth/users/me
///
/// Return the public view of the authenticated account. Claims arrive via
/// the JWT middleware, which has already checked signature, expiry, and
/// token kind.
pub async fn current_user(
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let account = accounts::find_by_username(pool.get_ref(), &claims.sub)
        .await?
        .ok_or(AppError::Account(AccountError::NotFound))?;

    Ok(HttpResponse::Ok().json(AccountPublic::from(account)))
}
