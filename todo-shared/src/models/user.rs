/// User model and database operations
///
/// This module provides the User model and CRUD operations for managing user accounts.
/// Each user owns zero or more todos; deleting a user deletes them too (schema cascade).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     username VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     position user_position NOT NULL DEFAULT 'user',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use todo_shared::models::role::Role;
/// use todo_shared::models::user::{CreateUser, User};
/// use todo_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, CreateUser {
///     username: "alice".to_string(),
///     email: "alice@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     position: Role::User,
/// }).await?;
///
/// let found = User::find_by_email(&pool, "alice@example.com").await?;
/// assert_eq!(found.map(|u| u.id), Some(user.id));
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::role::Role;
use super::todo::Todo;

const USER_COLUMNS: &str = "id, username, email, password_hash, position, created_at";

/// User account
///
/// The password hash is never serialized into API responses.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: Uuid,

    /// Display/login name (not unique)
    pub username: String,

    /// Email address, unique across all users
    pub email: String,

    /// Argon2id password hash
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Role governing authorization decisions
    pub position: Role,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub username: String,

    pub email: String,

    /// Argon2id password hash (NOT plaintext password!)
    pub password_hash: String,

    /// Role to assign (defaults to `user`)
    #[serde(default)]
    pub position: Role,
}

/// A user together with every todo they own
#[derive(Debug, Clone, Serialize)]
pub struct UserWithTodos {
    #[serde(flatten)]
    pub user: User,

    pub todos: Vec<Todo>,
}

/// Flat row produced by the `json_agg` query in [`User::find_with_todos`]
#[derive(sqlx::FromRow)]
struct UserTodosRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    position: Role,
    created_at: DateTime<Utc>,
    todos: Json<Vec<Todo>>,
}

impl From<UserTodosRow> for UserWithTodos {
    fn from(row: UserTodosRow) -> Self {
        Self {
            user: User {
                id: row.id,
                username: row.username,
                email: row.email,
                password_hash: row.password_hash,
                position: row.position,
                created_at: row.created_at,
            },
            todos: row.todos.0,
        }
    }
}

impl User {
    /// Creates a new user in the database
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Email already exists (unique constraint `users_email_key`)
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, email, password_hash, position)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(data.username)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.position)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address
    ///
    /// Used by login; the lookup is exact-match.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user and all their todos in a single query
    ///
    /// Todos are ordered newest first.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use todo_shared::models::user::User;
    /// # use sqlx::PgPool;
    /// # use uuid::Uuid;
    /// # async fn example(pool: PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
    /// if let Some(found) = User::find_with_todos(&pool, user_id).await? {
    ///     println!("{} owns {} todos", found.user.username, found.todos.len());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn find_with_todos(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<UserWithTodos>, sqlx::Error> {
        let row = sqlx::query_as::<_, UserTodosRow>(
            r#"
            SELECT u.id, u.username, u.email, u.password_hash, u.position, u.created_at,
                   COALESCE(
                       json_agg(t ORDER BY t.created_at DESC) FILTER (WHERE t.id IS NOT NULL),
                       '[]'::json
                   ) AS todos
            FROM users u
            LEFT JOIN todos t ON t.user_id = u.id
            WHERE u.id = $1
            GROUP BY u.id
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(UserWithTodos::from))
    }

    /// Changes a user's role
    ///
    /// # Returns
    ///
    /// The updated user if found, None if user doesn't exist
    pub async fn update_position(
        pool: &PgPool,
        id: Uuid,
        position: Role,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET position = $2 WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(position)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Deletes a user by ID
    ///
    /// All todos owned by the user are removed by the `ON DELETE CASCADE`
    /// foreign key in the same statement.
    ///
    /// # Returns
    ///
    /// True if user was deleted, false if user didn't exist
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists users with pagination, oldest first
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Self>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Counts total number of users
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Counts users holding a given role
    ///
    /// Reported by the startup admin bootstrap.
    pub async fn count_by_position(pool: &PgPool, position: Role) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE position = $1")
            .bind(position)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
