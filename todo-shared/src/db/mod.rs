/// Database layer
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool with health checks and stats
/// - `migrations`: Embedded schema migrations from the workspace `migrations/` directory
///
/// Models and their queries live in the crate's `models` module.
///
/// # Example
///
/// ```no_run
/// use todo_shared::db::pool::{create_pool, DatabaseConfig};
/// use todo_shared::db::migrations::run_migrations;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig::new(std::env::var("DATABASE_URL")?);
///
///     let pool = create_pool(config).await?;
///     run_migrations(&pool).await?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;
