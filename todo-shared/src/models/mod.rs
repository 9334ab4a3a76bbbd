/// Database models for the todo service
///
/// Each model owns its CRUD operations as associated functions taking a
/// `&PgPool`. Reads return `Ok(None)` when a row is absent, writes return the
/// freshly persisted row, and deletes return whether a row was removed.
///
/// # Models
///
/// - `role`: The closed set of account roles
/// - `user`: User accounts
/// - `todo`: Todo items owned by users
/// - `category`: Global categories todos can be filed under
///
/// # Example
///
/// ```no_run
/// use todo_shared::models::category::{Category, CategoryData};
/// use todo_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let category = Category::create(&pool, CategoryData {
///     text: "Work".to_string(),
///     slug: "work".to_string(),
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod category;
pub mod role;
pub mod todo;
pub mod user;
