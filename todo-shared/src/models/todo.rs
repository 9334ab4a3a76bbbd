/// Todo model and database operations
///
/// A todo belongs to exactly one user and optionally to one category.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE todos (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     text VARCHAR(255) NOT NULL,
///     category_id UUID REFERENCES categories(id) ON DELETE SET NULL,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use todo_shared::models::todo::{CreateTodo, Todo, UpdateTodo};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, owner: Uuid) -> Result<(), sqlx::Error> {
/// let todo = Todo::create(&pool, CreateTodo {
///     user_id: owner,
///     text: "Buy milk".to_string(),
///     category_id: None,
///     completed: false,
/// }).await?;
///
/// Todo::update(&pool, todo.id, UpdateTodo {
///     text: "Buy oat milk".to_string(),
///     category_id: None,
///     completed: true,
/// }).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::category::Category;
use super::role::Role;

const TODO_COLUMNS: &str = "id, user_id, text, category_id, completed, created_at";

/// A single todo item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    pub text: String,

    /// Cleared to None when the category is deleted
    pub category_id: Option<Uuid>,

    pub completed: bool,

    pub created_at: DateTime<Utc>,
}

/// Input for creating a todo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub user_id: Uuid,
    pub text: String,
    pub category_id: Option<Uuid>,
    pub completed: bool,
}

/// Full replacement of a todo's mutable fields
///
/// Unlike a patch, a `None` category here clears the category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodo {
    pub text: String,
    pub category_id: Option<Uuid>,
    pub completed: bool,
}

/// Public view of a todo's owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoOwner {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub position: Role,
}

/// A todo with its owner and category loaded
#[derive(Debug, Clone, Serialize)]
pub struct TodoWithRelations {
    #[serde(flatten)]
    pub todo: Todo,

    pub user: TodoOwner,

    pub category: Option<Category>,
}

#[derive(sqlx::FromRow)]
struct TodoRelationsRow {
    id: Uuid,
    user_id: Uuid,
    text: String,
    category_id: Option<Uuid>,
    completed: bool,
    created_at: DateTime<Utc>,
    owner_username: String,
    owner_email: String,
    owner_position: Role,
    category_text: Option<String>,
    category_slug: Option<String>,
}

impl From<TodoRelationsRow> for TodoWithRelations {
    fn from(row: TodoRelationsRow) -> Self {
        // LEFT JOIN: the category columns are all present or all NULL
        let category = match (row.category_id, row.category_text, row.category_slug) {
            (Some(id), Some(text), Some(slug)) => Some(Category { id, text, slug }),
            _ => None,
        };

        Self {
            user: TodoOwner {
                id: row.user_id,
                username: row.owner_username,
                email: row.owner_email,
                position: row.owner_position,
            },
            todo: Todo {
                id: row.id,
                user_id: row.user_id,
                text: row.text,
                category_id: row.category_id,
                completed: row.completed,
                created_at: row.created_at,
            },
            category,
        }
    }
}

impl Todo {
    /// Creates a new todo
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The owner or the category doesn't exist (foreign key violation)
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateTodo) -> Result<Self, sqlx::Error> {
        let todo = sqlx::query_as::<_, Todo>(&format!(
            r#"
            INSERT INTO todos (user_id, text, category_id, completed)
            VALUES ($1, $2, $3, $4)
            RETURNING {TODO_COLUMNS}
            "#
        ))
        .bind(data.user_id)
        .bind(data.text)
        .bind(data.category_id)
        .bind(data.completed)
        .fetch_one(pool)
        .await?;

        Ok(todo)
    }

    /// Finds a todo by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let todo = sqlx::query_as::<_, Todo>(&format!(
            "SELECT {TODO_COLUMNS} FROM todos WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(todo)
    }

    /// Finds a todo together with its owner and category in one query
    pub async fn find_with_related(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<TodoWithRelations>, sqlx::Error> {
        let row = sqlx::query_as::<_, TodoRelationsRow>(
            r#"
            SELECT t.id, t.user_id, t.text, t.category_id, t.completed, t.created_at,
                   u.username AS owner_username,
                   u.email AS owner_email,
                   u.position AS owner_position,
                   c.text AS category_text,
                   c.slug AS category_slug
            FROM todos t
            JOIN users u ON u.id = t.user_id
            LEFT JOIN categories c ON c.id = t.category_id
            WHERE t.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(TodoWithRelations::from))
    }

    /// Lists todos with pagination, newest first
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Self>, sqlx::Error> {
        let todos = sqlx::query_as::<_, Todo>(&format!(
            "SELECT {TODO_COLUMNS} FROM todos ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(todos)
    }

    /// Replaces text, category and completion state
    ///
    /// # Returns
    ///
    /// The updated todo, None if it doesn't exist
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateTodo,
    ) -> Result<Option<Self>, sqlx::Error> {
        let todo = sqlx::query_as::<_, Todo>(&format!(
            r#"
            UPDATE todos
            SET text = $2, category_id = $3, completed = $4
            WHERE id = $1
            RETURNING {TODO_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(data.text)
        .bind(data.category_id)
        .bind(data.completed)
        .fetch_optional(pool)
        .await?;

        Ok(todo)
    }

    /// Deletes a todo
    ///
    /// # Returns
    ///
    /// True if a row was deleted
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts todos owned by a user
    pub async fn count_by_user(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM todos WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
