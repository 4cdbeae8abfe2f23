//! SQL statements for the generic table store.
//!
//! Identifiers are never taken from the request: every table and column name
//! is looked up in the static registry first and only the descriptor's
//! `'static` names are spliced into SQL. Values are always bound.

use contracts::shared::descriptor::{ColumnDef, ColumnKind, TableDescriptor};
use contracts::shared::row::{CellValue, ReferenceRow};
use contracts::shared::table_api::{KeyFilter, SortOrder};
use sea_orm::{DatabaseBackend, Statement, Value};

use super::error::StoreError;

fn quote(ident: &str) -> String {
    format!("\"{}\"", ident)
}

fn column_list(table: &TableDescriptor) -> String {
    table
        .column_names()
        .map(quote)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn resolve_column(
    table: &TableDescriptor,
    name: &str,
) -> Result<&'static ColumnDef, StoreError> {
    table.column(name).ok_or_else(|| StoreError::UnknownColumn {
        table: table.table_name.to_string(),
        column: name.to_string(),
    })
}

/// Converts a cell into a bound value of the column's storage type.
pub fn bind(column: &ColumnDef, value: &CellValue) -> Result<Value, StoreError> {
    let invalid = || {
        StoreError::Validation(format!(
            "column '{}' expects an integer, got '{}'",
            column.name,
            value.as_display()
        ))
    };
    match column.kind {
        ColumnKind::Text | ColumnKind::LongText => Ok(match value {
            CellValue::Null => Value::String(None),
            other => Value::from(other.as_display()),
        }),
        ColumnKind::Integer => match value {
            CellValue::Null => Ok(Value::BigInt(None)),
            CellValue::Integer(v) => Ok(Value::from(*v)),
            // `as` would saturate outside [-2^63, 2^63).
            CellValue::Float(v)
                if v.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(v) =>
            {
                Ok(Value::from(*v as i64))
            }
            CellValue::Float(_) => Err(invalid()),
            CellValue::Text(s) if s.trim().is_empty() => Ok(Value::BigInt(None)),
            CellValue::Text(s) => s.trim().parse::<i64>().map(Value::from).map_err(|_| invalid()),
        },
    }
}

fn require_non_blank(row: &ReferenceRow, column: &str) -> Result<(), StoreError> {
    match row.get(column) {
        Some(v) if !v.is_blank() => Ok(()),
        _ => Err(StoreError::Validation(format!("'{}' must not be blank", column))),
    }
}

/// `code` and `name` are required on insert.
pub fn validate_insert(row: &ReferenceRow) -> Result<(), StoreError> {
    require_non_blank(row, "code")?;
    require_non_blank(row, "name")
}

/// On update `code` / `name` are optional, but may not be blanked.
pub fn validate_update(row: &ReferenceRow) -> Result<(), StoreError> {
    for column in ["code", "name"] {
        if row.get(column).is_some() {
            require_non_blank(row, column)?;
        }
    }
    Ok(())
}

pub fn select_all(table: &TableDescriptor, order: &SortOrder) -> Result<Statement, StoreError> {
    let order_col = resolve_column(table, &order.column)?;
    let direction = if order.ascending { "ASC" } else { "DESC" };
    let sql = format!(
        "SELECT {} FROM {} ORDER BY {} COLLATE NOCASE {}, {} ASC",
        column_list(table),
        quote(table.table_name),
        quote(order_col.name),
        direction,
        quote("code"),
    );
    Ok(Statement::from_string(DatabaseBackend::Sqlite, sql))
}

pub fn count(table: &TableDescriptor) -> Statement {
    Statement::from_string(
        DatabaseBackend::Sqlite,
        format!("SELECT COUNT(*) AS count FROM {}", quote(table.table_name)),
    )
}

pub fn insert(table: &TableDescriptor, row: &ReferenceRow) -> Result<Statement, StoreError> {
    validate_insert(row)?;
    let mut columns = Vec::new();
    let mut values = Vec::new();
    for (name, value) in row.iter() {
        let column = resolve_column(table, name)?;
        columns.push(quote(column.name));
        values.push(bind(column, value)?);
    }
    let placeholders = vec!["?"; columns.len()].join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote(table.table_name),
        columns.join(", "),
        placeholders
    );
    Ok(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        &sql,
        values,
    ))
}

pub fn update(
    table: &TableDescriptor,
    row: &ReferenceRow,
    filter: &KeyFilter,
) -> Result<Statement, StoreError> {
    if row.is_empty() {
        return Err(StoreError::BadRequest("update body is empty".to_string()));
    }
    validate_update(row)?;
    let mut assignments = Vec::new();
    let mut values = Vec::new();
    for (name, value) in row.iter() {
        let column = resolve_column(table, name)?;
        assignments.push(format!("{} = ?", quote(column.name)));
        values.push(bind(column, value)?);
    }
    assignments.push(format!("{} = CURRENT_TIMESTAMP", quote("updated_at")));

    let key = resolve_column(table, &filter.column)?;
    values.push(bind(key, &CellValue::text(filter.value.clone()))?);

    let sql = format!(
        "UPDATE {} SET {} WHERE {} = ?",
        quote(table.table_name),
        assignments.join(", "),
        quote(key.name)
    );
    Ok(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        &sql,
        values,
    ))
}

pub fn delete(table: &TableDescriptor, filter: &KeyFilter) -> Result<Statement, StoreError> {
    let key = resolve_column(table, &filter.column)?;
    let value = bind(key, &CellValue::text(filter.value.clone()))?;
    let sql = format!(
        "DELETE FROM {} WHERE {} = ?",
        quote(table.table_name),
        quote(key.name)
    );
    Ok(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        &sql,
        [value],
    ))
}

/// `CREATE TABLE` for a descriptor: surrogate `id`, unique `code`, then the
/// descriptor's columns, then audit timestamps.
pub fn create_table(table: &TableDescriptor) -> String {
    let mut defs = vec!["\"id\" INTEGER PRIMARY KEY AUTOINCREMENT".to_string()];
    for column in table.columns {
        let constraint = match column.name {
            "code" => " NOT NULL UNIQUE",
            "name" => " NOT NULL",
            _ => "",
        };
        defs.push(format!(
            "{} {}{}",
            quote(column.name),
            column.kind.sql_type(),
            constraint
        ));
    }
    defs.push("\"created_at\" TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP".to_string());
    defs.push("\"updated_at\" TEXT".to_string());
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n    {}\n);",
        quote(table.table_name),
        defs.join(",\n    ")
    )
}

pub fn add_column(table: &TableDescriptor, column: &ColumnDef) -> String {
    format!(
        "ALTER TABLE {} ADD COLUMN {} {};",
        quote(table.table_name),
        quote(column.name),
        column.kind.sql_type()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::reference::{REF_CRITICALITY_LEVELS, REF_DEPARTMENTS};

    fn values(stmt: &Statement) -> Vec<Value> {
        stmt.values.clone().map(|v| v.0).unwrap_or_default()
    }

    #[test]
    fn select_orders_by_requested_column() {
        let stmt = select_all(&REF_DEPARTMENTS, &SortOrder::default()).unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT \"code\", \"name\", \"description\", \"parent_code\" FROM \"ref_departments\" \
             ORDER BY \"name\" COLLATE NOCASE ASC, \"code\" ASC"
        );
    }

    #[test]
    fn select_rejects_unknown_order_column() {
        let err = select_all(&REF_DEPARTMENTS, &SortOrder::asc("name; DROP TABLE x")).unwrap_err();
        assert!(matches!(err, StoreError::UnknownColumn { .. }));
    }

    #[test]
    fn insert_binds_only_supplied_columns() {
        let row = ReferenceRow::new()
            .with("code", "HR")
            .with("name", "Human Resources")
            .with("description", "");
        let stmt = insert(&REF_DEPARTMENTS, &row).unwrap();
        assert_eq!(
            stmt.sql,
            "INSERT INTO \"ref_departments\" (\"code\", \"description\", \"name\") VALUES (?, ?, ?)"
        );
        assert_eq!(values(&stmt).len(), 3);
    }

    #[test]
    fn insert_requires_code_and_name() {
        let row = ReferenceRow::new().with("code", "HR").with("name", "  ");
        assert!(matches!(
            insert(&REF_DEPARTMENTS, &row),
            Err(StoreError::Validation(_))
        ));
        let row = ReferenceRow::new().with("name", "Human Resources");
        assert!(matches!(
            insert(&REF_DEPARTMENTS, &row),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn insert_rejects_columns_outside_descriptor() {
        let row = ReferenceRow::new()
            .with("code", "HR")
            .with("name", "Human Resources")
            .with("salary", "1");
        assert!(matches!(
            insert(&REF_DEPARTMENTS, &row),
            Err(StoreError::UnknownColumn { column, .. }) if column == "salary"
        ));
    }

    #[test]
    fn update_is_keyed_by_filter_and_touches_updated_at() {
        let row = ReferenceRow::new().with("name", "People");
        let stmt = update(&REF_DEPARTMENTS, &row, &KeyFilter::eq("code", "HR")).unwrap();
        assert_eq!(
            stmt.sql,
            "UPDATE \"ref_departments\" SET \"name\" = ?, \"updated_at\" = CURRENT_TIMESTAMP WHERE \"code\" = ?"
        );
        assert_eq!(values(&stmt).last(), Some(&Value::from("HR".to_string())));
    }

    #[test]
    fn update_rejects_empty_body_and_blanked_name() {
        assert!(matches!(
            update(&REF_DEPARTMENTS, &ReferenceRow::new(), &KeyFilter::eq("code", "HR")),
            Err(StoreError::BadRequest(_))
        ));
        let row = ReferenceRow::new().with("name", "");
        assert!(matches!(
            update(&REF_DEPARTMENTS, &row, &KeyFilter::eq("code", "HR")),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn integer_columns_bind_as_integers() {
        let level = REF_CRITICALITY_LEVELS.column("level").unwrap();
        assert_eq!(bind(level, &CellValue::text("3")).unwrap(), Value::from(3i64));
        assert_eq!(bind(level, &CellValue::text("")).unwrap(), Value::BigInt(None));
        assert_eq!(bind(level, &CellValue::Float(2.0)).unwrap(), Value::from(2i64));
        assert!(bind(level, &CellValue::text("high")).is_err());
        assert!(bind(level, &CellValue::Float(2.5)).is_err());
    }

    #[test]
    fn integer_columns_reject_floats_outside_i64() {
        let level = REF_CRITICALITY_LEVELS.column("level").unwrap();
        assert!(matches!(
            bind(level, &CellValue::Float(1e20)),
            Err(StoreError::Validation(_))
        ));
        assert!(bind(level, &CellValue::Float(-1e20)).is_err());
        assert!(bind(level, &CellValue::Float(9_223_372_036_854_775_808.0)).is_err());
        assert!(bind(level, &CellValue::Float(f64::INFINITY)).is_err());
        assert_eq!(
            bind(level, &CellValue::Float(-9_223_372_036_854_775_808.0)).unwrap(),
            Value::from(i64::MIN)
        );
    }

    #[test]
    fn schema_has_unique_code() {
        let sql = create_table(&REF_DEPARTMENTS);
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS \"ref_departments\""));
        assert!(sql.contains("\"code\" TEXT NOT NULL UNIQUE"));
        assert!(sql.contains("\"parent_code\" TEXT"));
        let sql = create_table(&REF_CRITICALITY_LEVELS);
        assert!(sql.contains("\"level\" INTEGER"));
    }
}
