/// Todo endpoints
///
/// # Endpoints
///
/// - `GET /todo/` - List todos, newest first (`?limit=&offset=`)
/// - `POST /todo/` - Create a todo owned by the caller
/// - `GET /todo/:id/` - Todo with its owner and category
/// - `PUT /todo/:id/` - Replace a todo (owner or admin)
/// - `DELETE /todo/:id/` - Delete a todo (owner or admin)
///
/// Guests are refused on every endpoint.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{IdPath, Pagination, ValidatedJson},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use todo_shared::{
    auth::{
        authorization::{can_edit_or_delete_todo, can_read_or_create_todos},
        middleware::AuthContext,
    },
    models::{
        category::Category,
        todo::{CreateTodo, Todo, TodoWithRelations, UpdateTodo},
    },
};
use uuid::Uuid;
use validator::Validate;

/// Body for create and full replace
#[derive(Debug, Deserialize, Validate)]
pub struct TodoRequest {
    #[validate(length(min = 1, max = 255, message = "Text must be 1 to 255 characters"))]
    pub text: String,

    pub category_id: Option<Uuid>,

    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Serialize)]
pub struct TodoMessage {
    pub todo: Todo,
    pub message: &'static str,
}

async fn ensure_category_exists(pool: &PgPool, category_id: Option<Uuid>) -> ApiResult<()> {
    if let Some(id) = category_id {
        if !Category::exists(pool, id).await? {
            return Err(ApiError::invalid_field(
                "category_id",
                "Category does not exist",
            ));
        }
    }

    Ok(())
}

fn todo_not_found() -> ApiError {
    ApiError::NotFound("Todo not found".to_string())
}

pub async fn list_todos(
    State(state): State<AppState>,
    auth: AuthContext,
    page: Pagination,
) -> ApiResult<Json<Vec<Todo>>> {
    can_read_or_create_todos(&auth)?;

    let todos = Todo::list(&state.db, page.limit, page.offset).await?;
    Ok(Json(todos))
}

pub async fn create_todo(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedJson(req): ValidatedJson<TodoRequest>,
) -> ApiResult<(StatusCode, Json<TodoMessage>)> {
    can_read_or_create_todos(&auth)?;
    ensure_category_exists(&state.db, req.category_id).await?;

    let todo = Todo::create(
        &state.db,
        CreateTodo {
            user_id: auth.user_id,
            text: req.text,
            category_id: req.category_id,
            completed: req.completed,
        },
    )
    .await?;

    tracing::info!(todo_id = %todo.id, user_id = %auth.user_id, "Todo created");

    Ok((
        StatusCode::CREATED,
        Json(TodoMessage {
            todo,
            message: "Todo created successfully",
        }),
    ))
}

pub async fn get_todo(
    State(state): State<AppState>,
    auth: AuthContext,
    IdPath(id): IdPath,
) -> ApiResult<Json<TodoWithRelations>> {
    can_read_or_create_todos(&auth)?;

    let todo = Todo::find_with_related(&state.db, id)
        .await?
        .ok_or_else(todo_not_found)?;

    Ok(Json(todo))
}

pub async fn update_todo(
    State(state): State<AppState>,
    auth: AuthContext,
    IdPath(id): IdPath,
    ValidatedJson(req): ValidatedJson<TodoRequest>,
) -> ApiResult<Json<TodoMessage>> {
    can_read_or_create_todos(&auth)?;

    let existing = Todo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(todo_not_found)?;

    can_edit_or_delete_todo(&auth, existing.user_id).inspect_err(|e| {
        tracing::debug!(todo_id = %id, user_id = %auth.user_id, reason = %e, "Todo update denied");
    })?;

    ensure_category_exists(&state.db, req.category_id).await?;

    let todo = Todo::update(
        &state.db,
        id,
        UpdateTodo {
            text: req.text,
            category_id: req.category_id,
            completed: req.completed,
        },
    )
    .await?
    .ok_or_else(todo_not_found)?;

    tracing::info!(todo_id = %todo.id, user_id = %auth.user_id, "Todo updated");

    Ok(Json(TodoMessage {
        todo,
        message: "Todo updated successfully",
    }))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    auth: AuthContext,
    IdPath(id): IdPath,
) -> ApiResult<StatusCode> {
    can_read_or_create_todos(&auth)?;

    let existing = Todo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(todo_not_found)?;

    can_edit_or_delete_todo(&auth, existing.user_id).inspect_err(|e| {
        tracing::debug!(todo_id = %id, user_id = %auth.user_id, reason = %e, "Todo delete denied");
    })?;

    if !Todo::delete(&state.db, id).await? {
        return Err(todo_not_found());
    }

    tracing::info!(todo_id = %id, user_id = %auth.user_id, "Todo deleted");

    Ok(StatusCode::NO_CONTENT)
}
