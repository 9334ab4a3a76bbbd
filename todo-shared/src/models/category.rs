/// Category model and database operations
///
/// Categories are global (not owned by a user) and identified by a unique slug.
/// Deleting a category leaves its todos in place with `category_id = NULL`.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE categories (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     text VARCHAR(255) NOT NULL,
///     slug VARCHAR(255) NOT NULL UNIQUE
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::todo::Todo;

/// Maximum slug length (matches the column width)
pub const MAX_SLUG_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: Uuid,

    /// Human-readable name
    pub text: String,

    /// URL-safe identifier, unique across categories
    pub slug: String,
}

/// Input for creating or fully replacing a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryData {
    pub text: String,
    pub slug: String,
}

/// A category with every todo filed under it
#[derive(Debug, Clone, Serialize)]
pub struct CategoryWithTodos {
    #[serde(flatten)]
    pub category: Category,

    pub todos: Vec<Todo>,
}

#[derive(sqlx::FromRow)]
struct CategoryTodosRow {
    id: Uuid,
    text: String,
    slug: String,
    todos: Json<Vec<Todo>>,
}

/// Checks that a slug is non-empty lowercase ASCII letters, digits and single hyphens
///
/// # Example
///
/// ```
/// use todo_shared::models::category::validate_slug;
///
/// assert!(validate_slug("home-chores").is_ok());
/// assert!(validate_slug("Home Chores").is_err());
/// ```
pub fn validate_slug(slug: &str) -> Result<(), String> {
    if slug.is_empty() {
        return Err("Slug must not be empty".to_string());
    }

    if slug.len() > MAX_SLUG_LENGTH {
        return Err(format!("Slug must be at most {} characters", MAX_SLUG_LENGTH));
    }

    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("Slug may only contain lowercase letters, digits and hyphens".to_string());
    }

    if slug.starts_with('-') || slug.ends_with('-') || slug.contains("--") {
        return Err("Slug must not start or end with a hyphen or contain '--'".to_string());
    }

    Ok(())
}

impl Category {
    /// Creates a category
    ///
    /// # Errors
    ///
    /// Returns an error if the slug is taken (unique constraint `categories_slug_key`)
    pub async fn create(pool: &PgPool, data: CategoryData) -> Result<Self, sqlx::Error> {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (text, slug) VALUES ($1, $2) RETURNING id, text, slug",
        )
        .bind(data.text)
        .bind(data.slug)
        .fetch_one(pool)
        .await?;

        Ok(category)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let category =
            sqlx::query_as::<_, Category>("SELECT id, text, slug FROM categories WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(category)
    }

    /// Checks whether a category exists without loading it
    pub async fn exists(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM categories WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;

        Ok(exists)
    }

    /// Finds a category and its todos in one query
    pub async fn find_with_todos(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<CategoryWithTodos>, sqlx::Error> {
        let row = sqlx::query_as::<_, CategoryTodosRow>(
            r#"
            SELECT c.id, c.text, c.slug,
                   COALESCE(
                       json_agg(t ORDER BY t.created_at DESC) FILTER (WHERE t.id IS NOT NULL),
                       '[]'::json
                   ) AS todos
            FROM categories c
            LEFT JOIN todos t ON t.category_id = c.id
            WHERE c.id = $1
            GROUP BY c.id
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(|row| CategoryWithTodos {
            category: Category {
                id: row.id,
                text: row.text,
                slug: row.slug,
            },
            todos: row.todos.0,
        }))
    }

    /// Lists all categories ordered by slug
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT id, text, slug FROM categories ORDER BY slug")
                .fetch_all(pool)
                .await?;

        Ok(categories)
    }

    /// Replaces text and slug
    ///
    /// # Returns
    ///
    /// The updated category, None if it doesn't exist
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: CategoryData,
    ) -> Result<Option<Self>, sqlx::Error> {
        let category = sqlx::query_as::<_, Category>(
            "UPDATE categories SET text = $2, slug = $3 WHERE id = $1 RETURNING id, text, slug",
        )
        .bind(id)
        .bind(data.text)
        .bind(data.slug)
        .fetch_optional(pool)
        .await?;

        Ok(category)
    }

    /// Deletes a category
    ///
    /// Todos referencing it keep existing with `category_id` set to NULL
    /// (`ON DELETE SET NULL`).
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
