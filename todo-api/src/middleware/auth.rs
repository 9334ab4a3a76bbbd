/// Bearer token authentication layer
///
/// Applied with `axum::middleware::from_fn_with_state` to every router that
/// needs a caller identity. The token is checked first, then its user is
/// loaded from the database so the caller's current role is the one that
/// counts. On success the request carries an [`AuthContext`] extension;
/// otherwise the request is answered with 401 (400 for a malformed
/// `Authorization` header) and never reaches a handler.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use todo_shared::{
    auth::middleware::{authenticate_bearer, AuthContext},
    models::user::User,
};

use crate::{app::AppState, error::ApiError};

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let claimed = authenticate_bearer(header, state.jwt_secret()).map_err(|e| {
        tracing::debug!(error = %e, "Rejected request credentials");
        ApiError::from(e)
    })?;

    let user = User::find_by_id(&state.db, claimed.user_id)
        .await?
        .ok_or_else(|| {
            tracing::debug!(user_id = %claimed.user_id, "Rejected token of a deleted user");
            ApiError::Unauthorized("User no longer exists".to_string())
        })?;

    if user.position != claimed.role {
        tracing::debug!(
            user_id = %user.id,
            token_role = %claimed.role,
            stored_role = %user.position,
            "Token role is stale, using stored role"
        );
    }

    req.extensions_mut().insert(AuthContext::from_user(&user));

    Ok(next.run(req).await)
}
