use contracts::shared::descriptor::{ColumnKind, TableDescriptor};
use contracts::shared::row::{CellValue, ReferenceRow};
use contracts::shared::table_api::{KeyFilter, SortOrder};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, QueryResult, TransactionTrait};

use super::error::StoreError;
use super::query;

fn read_row(table: &TableDescriptor, row: &QueryResult) -> Result<ReferenceRow, DbErr> {
    let mut out = ReferenceRow::new();
    for column in table.columns {
        let value = match column.kind {
            ColumnKind::Integer => {
                CellValue::from(row.try_get::<Option<i64>>("", column.name)?)
            }
            ColumnKind::Text | ColumnKind::LongText => {
                CellValue::from(row.try_get::<Option<String>>("", column.name)?)
            }
        };
        out.set(column.name, value);
    }
    Ok(out)
}

pub async fn list(
    db: &DatabaseConnection,
    table: &TableDescriptor,
    order: &SortOrder,
) -> Result<Vec<ReferenceRow>, StoreError> {
    let rows = db.query_all(query::select_all(table, order)?).await?;
    let items = rows
        .iter()
        .map(|r| read_row(table, r))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}

pub async fn count(db: &DatabaseConnection, table: &TableDescriptor) -> Result<u64, StoreError> {
    let row = db.query_one(query::count(table)).await?;
    let count = match row {
        Some(r) => r.try_get::<i64>("", "count")?,
        None => 0,
    };
    Ok(count.max(0) as u64)
}

/// Inserts all rows or none.
pub async fn insert(
    db: &DatabaseConnection,
    table: &TableDescriptor,
    rows: &[ReferenceRow],
) -> Result<u64, StoreError> {
    if rows.is_empty() {
        return Err(StoreError::BadRequest("insert body is empty".to_string()));
    }
    // Build every statement first so a bad row never opens a transaction.
    let statements = rows
        .iter()
        .map(|row| query::insert(table, row).map(|stmt| (row.code(), stmt)))
        .collect::<Result<Vec<_>, _>>()?;

    let txn = db.begin().await?;
    let mut affected = 0;
    for (code, stmt) in statements {
        match txn.execute(stmt).await {
            Ok(result) => affected += result.rows_affected(),
            Err(e) => {
                txn.rollback().await?;
                return Err(StoreError::from_write(e, &code));
            }
        }
    }
    txn.commit().await?;
    Ok(affected)
}

pub async fn update(
    db: &DatabaseConnection,
    table: &TableDescriptor,
    row: &ReferenceRow,
    filter: &KeyFilter,
) -> Result<u64, StoreError> {
    let stmt = query::update(table, row, filter)?;
    let new_code = row
        .get(contracts::shared::descriptor::KEY_COLUMN)
        .map(CellValue::as_display)
        .unwrap_or_else(|| filter.value.clone());
    let result = db
        .execute(stmt)
        .await
        .map_err(|e| StoreError::from_write(e, &new_code))?;
    match result.rows_affected() {
        0 => Err(StoreError::NotFound(format!(
            "{}={}",
            filter.column, filter.value
        ))),
        n => Ok(n),
    }
}

pub async fn delete(
    db: &DatabaseConnection,
    table: &TableDescriptor,
    filter: &KeyFilter,
) -> Result<u64, StoreError> {
    let result = db.execute(query::delete(table, filter)?).await?;
    match result.rows_affected() {
        0 => Err(StoreError::NotFound(format!(
            "{}={}",
            filter.column, filter.value
        ))),
        n => Ok(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect;
    use contracts::shared::reference::{REF_CRITICALITY_LEVELS, REF_DEPARTMENTS};

    fn dept(code: &str, name: &str) -> ReferenceRow {
        ReferenceRow::new().with("code", code).with("name", name)
    }

    #[tokio::test]
    async fn departments_cycle() {
        let db = connect("sqlite::memory:").await.unwrap();
        let t = &REF_DEPARTMENTS;

        assert_eq!(count(&db, t).await.unwrap(), 0);
        assert!(list(&db, t, &SortOrder::default()).await.unwrap().is_empty());

        insert(&db, t, &[dept("HR", "Human Resources")]).await.unwrap();
        insert(&db, t, &[dept("FIN", "finance")]).await.unwrap();

        let rows = list(&db, t, &SortOrder::default()).await.unwrap();
        let codes: Vec<_> = rows.iter().map(|r| r.code()).collect();
        // Case-insensitive ordering by name.
        assert_eq!(codes, ["FIN", "HR"]);
        assert_eq!(rows[1].name(), "Human Resources");
        assert!(rows[1].get("parent_code").unwrap().is_null());

        let desc = list(&db, t, &SortOrder::desc("code")).await.unwrap();
        assert_eq!(desc[0].code(), "HR");
        assert_eq!(count(&db, t).await.unwrap(), 2);

        let filter = KeyFilter::eq("code", "HR");
        update(&db, t, &ReferenceRow::new().with("name", "People"), &filter)
            .await
            .unwrap();
        let rows = list(&db, t, &SortOrder::asc("code")).await.unwrap();
        assert_eq!(rows[1].name(), "People");

        assert_eq!(delete(&db, t, &filter).await.unwrap(), 1);
        let rows = list(&db, t, &SortOrder::default()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].code(), "FIN");
    }

    #[tokio::test]
    async fn duplicate_code_is_a_conflict_and_nothing_is_written() {
        let db = connect("sqlite::memory:").await.unwrap();
        let t = &REF_DEPARTMENTS;
        insert(&db, t, &[dept("HR", "Human Resources")]).await.unwrap();

        let err = insert(&db, t, &[dept("OPS", "Operations"), dept("HR", "Again")])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(code) if code == "HR"));
        // The batch is atomic.
        assert_eq!(count(&db, t).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_code_are_not_found() {
        let db = connect("sqlite::memory:").await.unwrap();
        let t = &REF_DEPARTMENTS;
        let filter = KeyFilter::eq("code", "NOPE");
        assert!(matches!(
            update(&db, t, &dept("NOPE", "x"), &filter).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            delete(&db, t, &filter).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn renaming_onto_an_existing_code_conflicts() {
        let db = connect("sqlite::memory:").await.unwrap();
        let t = &REF_DEPARTMENTS;
        insert(&db, t, &[dept("HR", "Human Resources"), dept("FIN", "Finance")])
            .await
            .unwrap();
        let err = update(
            &db,
            t,
            &ReferenceRow::new().with("code", "HR"),
            &KeyFilter::eq("code", "FIN"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn integer_columns_round_trip_as_numbers() {
        let db = connect("sqlite::memory:").await.unwrap();
        let t = &REF_CRITICALITY_LEVELS;
        let row = dept("C1", "Critical").with("level", "1");
        insert(&db, t, &[row]).await.unwrap();
        let rows = list(&db, t, &SortOrder::default()).await.unwrap();
        assert_eq!(rows[0].get("level"), Some(&CellValue::Integer(1)));
    }
}
