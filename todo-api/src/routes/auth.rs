/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /auth/register` - Create an account (role `user`) and get tokens
/// - `POST /auth/login` - Exchange email and password for tokens
/// - `POST /auth/refresh` - Exchange a refresh token for a new access token
///
/// Access tokens carry the role the user had when the token was issued.
/// Refreshing re-reads the user, so a role change made by an admin reaches
/// the user's next access token.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{trimmed, ValidatedJson},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use todo_shared::{
    auth::{
        jwt::{self, Claims, TokenType},
        password,
    },
    models::{
        role::Role,
        user::{CreateUser, User},
    },
};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 255, message = "Username must be 1 to 255 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Checked for strength after the basic rules pass
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Refresh token request
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Tokens issued on register and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: User,

    /// Access token (24h)
    pub access_token: String,

    /// Refresh token (30d)
    pub refresh_token: String,

    pub token_type: &'static str,
}

/// Refresh token response
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// New access token (24h)
    pub access_token: String,

    pub token_type: &'static str,
}

/// Emails are compared case-insensitively
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn issue_tokens(user: User, secret: &str) -> ApiResult<AuthResponse> {
    let access_token = jwt::create_token(&Claims::for_user(&user, TokenType::Access), secret)?;
    let refresh_token = jwt::create_token(&Claims::for_user(&user, TokenType::Refresh), secret)?;

    Ok(AuthResponse {
        user,
        access_token,
        refresh_token,
        token_type: "Bearer",
    })
}

/// Register a new user
///
/// ```text
/// POST /auth/register
/// { "username": "alice", "email": "alice@example.com", "password": "S3cure!pass" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed or weak password
/// - `409 Conflict`: Email already exists
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    password::validate_password_strength(&req.password)
        .map_err(|e| ApiError::invalid_field("password", e))?;

    let password_hash = password::hash_password_async(req.password).await?;

    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            email: normalize_email(&req.email),
            password_hash,
            position: Role::User,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "User registered");

    let response = issue_tokens(user, state.jwt_secret())?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Login
///
/// ```text
/// POST /auth/login
/// { "email": "alice@example.com", "password": "S3cure!pass" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `401 Unauthorized`: Unknown email or wrong password (indistinguishable)
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let invalid = || ApiError::Unauthorized("Invalid email or password".to_string());

    let user = User::find_by_email(&state.db, &normalize_email(&req.email))
        .await?
        .ok_or_else(invalid)?;

    let valid = password::verify_password_async(req.password, user.password_hash.clone()).await?;
    if !valid {
        tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
        return Err(invalid());
    }

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(issue_tokens(user, state.jwt_secret())?))
}

/// Token refresh
///
/// ```text
/// POST /auth/refresh
/// { "refresh_token": "eyJ..." }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Invalid or expired refresh token, or the user no longer exists
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let claims = jwt::validate_refresh_token(&req.refresh_token, state.jwt_secret())?;

    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User no longer exists".to_string()))?;

    let access_token =
        jwt::create_token(&Claims::for_user(&user, TokenType::Access), state.jwt_secret())?;

    Ok(Json(RefreshResponse {
        access_token,
        token_type: "Bearer",
    }))
}
