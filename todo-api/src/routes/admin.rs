/// Admin endpoints
///
/// Every endpoint requires the admin role; the check runs before any lookup.
///
/// # Endpoints
///
/// - `GET /admin/` - Welcome message
/// - `GET /admin/users/` - List users (`?limit=&offset=`)
/// - `POST /admin/users/` - Create a user with an explicit role
/// - `GET /admin/users/:id/` - User with their todos
/// - `PUT /admin/users/:id/` - Change a user's role
/// - `DELETE /admin/users/:id/` - Delete a non-admin user and their todos

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{trimmed, IdPath, Pagination, ValidatedJson},
    routes::auth::normalize_email,
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use todo_shared::{
    auth::{
        authorization::{can_delete_user, is_admin},
        middleware::AuthContext,
        password,
    },
    models::{
        role::Role,
        user::{CreateUser, User, UserWithTodos},
    },
};
use validator::Validate;

/// Body for creating a user
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 255, message = "Username must be 1 to 255 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// guest, user or admin (defaults to user)
    pub position: Option<String>,
}

/// Body for changing a user's role
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePositionRequest {
    #[validate(length(min = 1, message = "Position is required"))]
    pub position: String,
}

#[derive(Debug, Serialize)]
pub struct UserList {
    pub users: Vec<User>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Serialize)]
pub struct UserMessage {
    pub user: User,
    pub message: &'static str,
}

fn user_not_found() -> ApiError {
    ApiError::NotFound("User not found".to_string())
}

pub async fn admin_index(auth: AuthContext) -> ApiResult<Json<Value>> {
    is_admin(&auth)?;

    Ok(Json(json!({ "message": "Welcome, Admin!" })))
}

pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthContext,
    page: Pagination,
) -> ApiResult<Json<UserList>> {
    is_admin(&auth)?;

    let users = User::list(&state.db, page.limit, page.offset).await?;
    let total = User::count(&state.db).await?;

    Ok(Json(UserList {
        users,
        total,
        limit: page.limit,
        offset: page.offset,
    }))
}

pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserMessage>)> {
    is_admin(&auth)?;

    let position: Role = match req.position.as_deref() {
        Some(value) => value.parse()?,
        None => Role::default(),
    };

    password::validate_password_strength(&req.password)
        .map_err(|e| ApiError::invalid_field("password", e))?;
    let password_hash = password::hash_password_async(req.password).await?;

    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            email: normalize_email(&req.email),
            password_hash,
            position,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, position = %user.position, admin_id = %auth.user_id, "User created by admin");

    Ok((
        StatusCode::CREATED,
        Json(UserMessage {
            user,
            message: "User created successfully",
        }),
    ))
}

pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthContext,
    IdPath(id): IdPath,
) -> ApiResult<Json<UserWithTodos>> {
    is_admin(&auth)?;

    let user = User::find_with_todos(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User doesn't exist".to_string()))?;

    Ok(Json(user))
}

pub async fn update_user_position(
    State(state): State<AppState>,
    auth: AuthContext,
    IdPath(id): IdPath,
    ValidatedJson(req): ValidatedJson<UpdatePositionRequest>,
) -> ApiResult<Json<UserMessage>> {
    is_admin(&auth)?;

    let position: Role = req.position.parse()?;

    let user = User::update_position(&state.db, id, position)
        .await?
        .ok_or_else(user_not_found)?;

    tracing::info!(user_id = %id, position = %position, admin_id = %auth.user_id, "User position updated");

    Ok(Json(UserMessage {
        user,
        message: "User updated successfully",
    }))
}

pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthContext,
    IdPath(id): IdPath,
) -> ApiResult<StatusCode> {
    is_admin(&auth)?;

    let target = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(user_not_found)?;

    can_delete_user(&auth, target.position)?;

    if !User::delete(&state.db, id).await? {
        return Err(user_not_found());
    }

    tracing::info!(user_id = %id, admin_id = %auth.user_id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}
