/// Authentication and authorization
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and strength checks
/// - [`jwt`]: Access/refresh token generation and validation
/// - [`middleware`]: Bearer credential extraction into an [`middleware::AuthContext`]
/// - [`authorization`]: Role-based permission checks
///
/// # Example
///
/// ```no_run
/// use todo_shared::auth::password::{hash_password, verify_password};
/// use todo_shared::auth::jwt::{create_token, Claims, TokenType};
/// use todo_shared::models::role::Role;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("S3cure!pass")?;
/// assert!(verify_password("S3cure!pass", &hash)?);
///
/// let claims = Claims::new(Uuid::new_v4(), "alice", Role::User, TokenType::Access);
/// let token = create_token(&claims, "secret-key")?;
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod jwt;
pub mod middleware;
pub mod password;
