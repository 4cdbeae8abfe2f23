use chrono::Utc;
use contracts::system::users::{CreateUserDto, User};
use sea_orm::DatabaseConnection;
use thiserror::Error;

use super::repository;
use crate::system::auth::password;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("{0}")]
    Invalid(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Create a new user
pub async fn create(conn: &DatabaseConnection, dto: CreateUserDto) -> Result<String, UserError> {
    let username = dto.username.trim().to_string();
    if username.is_empty() {
        return Err(UserError::Invalid("Username cannot be empty".to_string()));
    }

    if repository::get_by_username(conn, &username).await?.is_some() {
        return Err(UserError::UsernameTaken(username));
    }

    let email = dto.email.filter(|e| !e.trim().is_empty());
    if let Some(ref email) = email {
        if !email.contains('@') {
            return Err(UserError::Invalid("Invalid email format".to_string()));
        }
    }

    password::validate_password_strength(&dto.password).map_err(UserError::Invalid)?;
    let password_hash = password::hash_password(&dto.password)?;

    let user_id = uuid::Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    let user = User {
        id: user_id.clone(),
        username,
        email,
        full_name: dto.full_name.filter(|n| !n.trim().is_empty()),
        is_active: true,
        is_admin: dto.is_admin,
        created_at: now.clone(),
        updated_at: now,
        last_login_at: None,
    };

    repository::create_with_password(conn, &user, &password_hash).await?;

    Ok(user_id)
}

pub async fn get_by_id(conn: &DatabaseConnection, id: &str) -> anyhow::Result<Option<User>> {
    repository::get_by_id(conn, id).await
}

/// Verify user credentials (for sign-in). Inactive users never match.
pub async fn verify_credentials(
    conn: &DatabaseConnection,
    username: &str,
    password: &str,
) -> anyhow::Result<Option<User>> {
    let user = match repository::get_by_username(conn, username.trim()).await? {
        Some(u) if u.is_active => u,
        _ => return Ok(None),
    };

    let password_hash = repository::get_password_hash(conn, &user.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Password hash not found"))?;

    if !password::verify_password(password, &password_hash)? {
        return Ok(None);
    }

    if let Err(e) = repository::update_last_login(conn, &user.id).await {
        tracing::warn!("Failed to record last login for {}: {}", user.username, e);
    }

    Ok(Some(user))
}
