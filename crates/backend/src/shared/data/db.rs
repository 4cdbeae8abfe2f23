use contracts::shared::descriptor::TableDescriptor;
use contracts::shared::registry::all_tables;
use once_cell::sync::OnceCell;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

use crate::shared::store::query;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

fn sqlite_url(db_file: &str) -> anyhow::Result<String> {
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    Ok(format!("sqlite://{}{}?mode=rwc", prefix, normalized))
}

/// Opens a connection and makes sure every registered table exists.
pub async fn connect(url: &str) -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(url.to_string());
    options.sqlx_logging(false);
    // An in-memory database lives and dies with its single connection.
    if url.starts_with("sqlite::memory:") {
        options.max_connections(1).min_connections(1);
    }
    let conn = Database::connect(options).await?;
    bootstrap_schema(&conn).await?;
    Ok(conn)
}

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/inventory.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let conn = connect(&sqlite_url(db_file)?).await?;
    install_connection(conn)
}

/// Makes `conn` the connection returned by [`get_connection`]. Only the first
/// call succeeds.
pub fn install_connection(conn: DatabaseConnection) -> anyhow::Result<()> {
    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

/// Creates missing registry tables and adds columns introduced since the
/// table was first created.
pub async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for table in all_tables() {
        ensure_table(conn, table).await?;
    }
    tracing::info!("Schema bootstrap finished for {} tables", all_tables().count());
    Ok(())
}

async fn ensure_table(conn: &DatabaseConnection, table: &TableDescriptor) -> anyhow::Result<()> {
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        query::create_table(table),
    ))
    .await?;

    let pragma = format!("PRAGMA table_info('{}');", table.table_name);
    let existing: Vec<String> = conn
        .query_all(Statement::from_string(DatabaseBackend::Sqlite, pragma))
        .await?
        .into_iter()
        .map(|row| row.try_get::<String>("", "name").unwrap_or_default())
        .collect();

    for column in table.columns {
        if !existing.iter().any(|name| name == column.name) {
            tracing::info!("Adding column {}.{}", table.table_name, column.name);
            conn.execute(Statement::from_string(
                DatabaseBackend::Sqlite,
                query::add_column(table, column),
            ))
            .await?;
        }
    }
    if !existing.iter().any(|name| name == "updated_at") {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            format!("ALTER TABLE \"{}\" ADD COLUMN \"updated_at\" TEXT;", table.table_name),
        ))
        .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bootstrap_creates_every_registered_table() {
        let conn = connect("sqlite::memory:").await.unwrap();
        let rows = conn
            .query_all(Statement::from_string(
                DatabaseBackend::Sqlite,
                "SELECT name FROM sqlite_master WHERE type='table'".to_string(),
            ))
            .await
            .unwrap();
        let names: Vec<String> = rows
            .into_iter()
            .map(|r| r.try_get::<String>("", "name").unwrap())
            .collect();
        for table in all_tables() {
            assert!(names.iter().any(|n| n == table.table_name), "{}", table.table_name);
        }
    }

    #[tokio::test]
    async fn bootstrap_adds_missing_columns_and_is_idempotent() {
        let conn = connect("sqlite::memory:").await.unwrap();
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            "DROP TABLE ref_departments".to_string(),
        ))
        .await
        .unwrap();
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            "CREATE TABLE ref_departments (id INTEGER PRIMARY KEY, code TEXT NOT NULL UNIQUE, name TEXT NOT NULL)"
                .to_string(),
        ))
        .await
        .unwrap();

        bootstrap_schema(&conn).await.unwrap();
        bootstrap_schema(&conn).await.unwrap();

        let cols: Vec<String> = conn
            .query_all(Statement::from_string(
                DatabaseBackend::Sqlite,
                "PRAGMA table_info('ref_departments')".to_string(),
            ))
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.try_get::<String>("", "name").unwrap())
            .collect();
        assert!(cols.iter().any(|c| c == "description"));
        assert!(cols.iter().any(|c| c == "parent_code"));
        assert!(cols.iter().any(|c| c == "updated_at"));
    }
}
