/// Request authentication for Axum
///
/// The API's auth layer calls [`authenticate_bearer`] with the request's
/// `Authorization` header, then reloads the token's user from the store and
/// keeps [`AuthContext::from_user`] in the request extensions. The stored
/// role wins over the one in the claims. Handlers then take `AuthContext` as
/// an extractor.
///
/// # Example
///
/// ```no_run
/// use axum::{extract::Request, middleware::Next, response::Response, http::header};
/// use todo_shared::auth::middleware::{authenticate_bearer, AuthContext, AuthError};
///
/// async fn protected_handler(auth: AuthContext) -> String {
///     format!("Hello, {}!", auth.username)
/// }
///
/// async fn require_auth(mut req: Request, next: Next) -> Result<Response, AuthError> {
///     let header = req.headers().get(header::AUTHORIZATION).and_then(|v| v.to_str().ok());
///     let auth = authenticate_bearer(header, "your-jwt-secret")?;
///     req.extensions_mut().insert(auth);
///     Ok(next.run(req).await)
/// }
/// ```

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::jwt::{validate_access_token, Claims, JwtError};
use crate::models::{role::Role, user::User};

/// Authenticated caller, added to request extensions
///
/// # Example
///
/// ```
/// use todo_shared::auth::middleware::AuthContext;
///
/// async fn handler(auth: AuthContext) -> String {
///     format!("{} ({})", auth.username, auth.role)
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    pub user_id: Uuid,

    pub username: String,

    pub role: Role,
}

impl AuthContext {
    pub fn new(user_id: Uuid, username: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            username: username.into(),
            role,
        }
    }

    /// Identity of a stored user, with their current role
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            role: user.position,
        }
    }

    /// Creates auth context from validated access token claims
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username,
            role: claims.role,
        }
    }
}

/// Error type for credential extraction
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No `Authorization` header
    #[error("Missing credentials")]
    MissingCredentials,

    /// Header present but not `Bearer <token>`
    #[error("{0}")]
    InvalidFormat(String),

    /// Token failed validation
    #[error("{0}")]
    InvalidToken(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredentials | AuthError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            AuthError::InvalidFormat(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials | AuthError::InvalidToken(_) => "unauthorized",
            AuthError::InvalidFormat(_) => "bad_request",
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
            JwtError::InvalidIssuer => AuthError::InvalidToken("Invalid issuer".to_string()),
            JwtError::WrongTokenType { .. } => AuthError::InvalidToken(err.to_string()),
            _ => AuthError::InvalidToken(format!("Invalid token: {}", err)),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.error_code(),
            "message": self.to_string(),
        }));

        (self.status_code(), body).into_response()
    }
}

/// Validates an `Authorization: Bearer <token>` header value
///
/// # Errors
///
/// - `MissingCredentials` if the header is absent
/// - `InvalidFormat` if it isn't a Bearer credential
/// - `InvalidToken` if the token is expired, forged, or a refresh token
pub fn authenticate_bearer(header: Option<&str>, secret: &str) -> Result<AuthContext, AuthError> {
    let header = header.ok_or(AuthError::MissingCredentials)?;

    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = validate_access_token(token, secret)?;

    Ok(AuthContext::from_claims(claims))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AuthError::MissingCredentials)
    }
}
