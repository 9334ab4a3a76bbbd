/// Startup admin account
///
/// When `ADMIN_USERNAME`, `ADMIN_EMAIL` and `ADMIN_PASSWORD` are set, the
/// server makes sure that account exists with the admin role before it
/// starts accepting requests. An existing account with that email is
/// promoted if needed; its password is left untouched.

use sqlx::PgPool;
use todo_shared::{
    auth::password::hash_password_async,
    models::{
        role::Role,
        user::{CreateUser, User},
    },
};

use crate::{config::AdminBootstrap, routes::auth::normalize_email};

/// What [`ensure_admin`] had to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminOutcome {
    Created,
    Promoted,
    AlreadyAdmin,
}

pub async fn ensure_admin(pool: &PgPool, admin: &AdminBootstrap) -> anyhow::Result<AdminOutcome> {
    let email = normalize_email(&admin.email);

    let outcome = match User::find_by_email(pool, &email).await? {
        Some(user) if user.position == Role::Admin => AdminOutcome::AlreadyAdmin,
        Some(user) => {
            User::update_position(pool, user.id, Role::Admin).await?;
            AdminOutcome::Promoted
        }
        None => {
            let password_hash = hash_password_async(admin.password.clone()).await?;
            User::create(
                pool,
                CreateUser {
                    username: admin.username.clone(),
                    email: email.clone(),
                    password_hash,
                    position: Role::Admin,
                },
            )
            .await?;
            AdminOutcome::Created
        }
    };

    let admins = User::count_by_position(pool, Role::Admin).await?;
    tracing::info!(email = %email, outcome = ?outcome, admins, "Admin account ensured");

    Ok(outcome)
}
