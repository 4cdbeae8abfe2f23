use anyhow::{Context, Result};
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

/// Tables of the authentication system.
const AUTH_SCHEMA: &str = r#"
-- Users
CREATE TABLE IF NOT EXISTS sys_users (
    id TEXT PRIMARY KEY NOT NULL,
    username TEXT NOT NULL UNIQUE COLLATE NOCASE,
    email TEXT,
    password_hash TEXT NOT NULL,
    full_name TEXT,
    is_active INTEGER NOT NULL DEFAULT 1,
    is_admin INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    last_login_at TEXT
);

-- Refresh tokens (only the SHA-256 hash is stored)
CREATE TABLE IF NOT EXISTS sys_refresh_tokens (
    id TEXT PRIMARY KEY NOT NULL,
    user_id TEXT NOT NULL REFERENCES sys_users(id) ON DELETE CASCADE,
    token_hash TEXT NOT NULL UNIQUE,
    expires_at TEXT NOT NULL,
    created_at TEXT NOT NULL,
    revoked_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_sys_refresh_tokens_user ON sys_refresh_tokens(user_id);

-- Key/value settings (JWT secret)
CREATE TABLE IF NOT EXISTS sys_settings (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    description TEXT,
    created_at TEXT,
    updated_at TEXT
);
"#;

/// Splits a script into statements, dropping `--` comment lines.
fn split_statements(script: &str) -> Vec<String> {
    script
        .split(';')
        .map(|statement| {
            statement
                .lines()
                .filter(|line| {
                    let trimmed_line = line.trim();
                    !trimmed_line.is_empty() && !trimmed_line.starts_with("--")
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
        .filter(|s| !s.trim().is_empty())
        .collect()
}

/// Apply authentication system migration
pub async fn apply_auth_migration(conn: &DatabaseConnection) -> Result<()> {
    // SQLite doesn't support execute_batch in sea-orm
    for (idx, statement) in split_statements(AUTH_SCHEMA).into_iter().enumerate() {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            format!("{};", statement),
        ))
        .await
        .with_context(|| {
            format!(
                "Failed to execute statement #{}: {}",
                idx,
                statement.lines().take(3).collect::<Vec<_>>().join(" ")
            )
        })?;
    }

    tracing::info!("Auth system migration applied successfully");
    Ok(())
}

/// Ensure admin user exists (create if table is empty)
pub async fn ensure_admin_user_exists(conn: &DatabaseConnection) -> Result<()> {
    use crate::system::users::{repository, service};
    use contracts::system::users::CreateUserDto;

    if repository::count_users(conn).await? > 0 {
        return Ok(());
    }

    tracing::info!("No users found. Creating default admin user...");

    let admin_dto = CreateUserDto {
        username: "admin".to_string(),
        password: "admin".to_string(),
        email: None,
        full_name: Some("Administrator".to_string()),
        is_admin: true,
    };

    let admin_id = service::create(conn, admin_dto).await?;

    tracing::warn!("═══════════════════════════════════════════════");
    tracing::warn!("  Default admin user created!");
    tracing::warn!("  Username: admin");
    tracing::warn!("  Password: admin");
    tracing::warn!("  User ID: {}", admin_id);
    tracing::warn!("  PLEASE CHANGE THE PASSWORD IMMEDIATELY!");
    tracing::warn!("═══════════════════════════════════════════════");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect;
    use crate::system::users::repository;

    #[test]
    fn comments_are_stripped_from_statements() {
        let statements = split_statements(AUTH_SCHEMA);
        assert_eq!(statements.len(), 4);
        assert!(statements.iter().all(|s| !s.contains("--")));
    }

    #[tokio::test]
    async fn migration_is_idempotent_and_admin_is_created_once() {
        let conn = connect("sqlite::memory:").await.unwrap();
        apply_auth_migration(&conn).await.unwrap();
        apply_auth_migration(&conn).await.unwrap();

        ensure_admin_user_exists(&conn).await.unwrap();
        ensure_admin_user_exists(&conn).await.unwrap();
        assert_eq!(repository::count_users(&conn).await.unwrap(), 1);

        let admin = repository::get_by_username(&conn, "admin")
            .await
            .unwrap()
            .unwrap();
        assert!(admin.is_admin);
    }
}
