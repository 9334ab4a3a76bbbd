/// Category endpoints
///
/// # Endpoints
///
/// - `GET /category/` - List categories (non-guest)
/// - `POST /category/` - Create a category (admin)
/// - `GET /category/:id/` - Category with its todos (non-guest)
/// - `PUT /category/:id/` - Replace a category (admin)
/// - `DELETE /category/:id/` - Delete a category (admin); its todos are kept uncategorized

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{IdPath, ValidatedJson},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use todo_shared::{
    auth::{
        authorization::{can_manage_categories, can_read_categories},
        middleware::AuthContext,
    },
    models::category::{validate_slug, Category, CategoryData, CategoryWithTodos},
};
use validator::Validate;

/// Body for create and full replace
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 255, message = "Text must be 1 to 255 characters"))]
    pub text: String,

    pub slug: String,
}

impl CategoryRequest {
    fn into_data(self) -> ApiResult<CategoryData> {
        let slug = self.slug.trim().to_string();
        validate_slug(&slug).map_err(|e| ApiError::invalid_field("slug", e))?;

        Ok(CategoryData {
            text: self.text,
            slug,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryMessage {
    pub category: Category,
    pub message: &'static str,
}

fn category_not_found() -> ApiError {
    ApiError::NotFound("Category not found".to_string())
}

pub async fn list_categories(
    State(state): State<AppState>,
    auth: AuthContext,
) -> ApiResult<Json<Vec<Category>>> {
    can_read_categories(&auth)?;

    Ok(Json(Category::list(&state.db).await?))
}

pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedJson(req): ValidatedJson<CategoryRequest>,
) -> ApiResult<(StatusCode, Json<CategoryMessage>)> {
    can_manage_categories(&auth)?;

    let category = Category::create(&state.db, req.into_data()?).await?;

    tracing::info!(category_id = %category.id, user_id = %auth.user_id, "Category created");

    Ok((
        StatusCode::CREATED,
        Json(CategoryMessage {
            category,
            message: "Category created successfully",
        }),
    ))
}

pub async fn get_category(
    State(state): State<AppState>,
    auth: AuthContext,
    IdPath(id): IdPath,
) -> ApiResult<Json<CategoryWithTodos>> {
    can_read_categories(&auth)?;

    let category = Category::find_with_todos(&state.db, id)
        .await?
        .ok_or_else(category_not_found)?;

    Ok(Json(category))
}

pub async fn update_category(
    State(state): State<AppState>,
    auth: AuthContext,
    IdPath(id): IdPath,
    ValidatedJson(req): ValidatedJson<CategoryRequest>,
) -> ApiResult<Json<CategoryMessage>> {
    can_manage_categories(&auth)?;

    let category = Category::update(&state.db, id, req.into_data()?)
        .await?
        .ok_or_else(category_not_found)?;

    tracing::info!(category_id = %id, user_id = %auth.user_id, "Category updated");

    Ok(Json(CategoryMessage {
        category,
        message: "Category updated successfully",
    }))
}

pub async fn delete_category(
    State(state): State<AppState>,
    auth: AuthContext,
    IdPath(id): IdPath,
) -> ApiResult<StatusCode> {
    can_manage_categories(&auth)?;

    if !Category::delete(&state.db, id).await? {
        return Err(category_not_found());
    }

    tracing::info!(category_id = %id, user_id = %auth.user_id, "Category deleted");

    Ok(StatusCode::NO_CONTENT)
}
