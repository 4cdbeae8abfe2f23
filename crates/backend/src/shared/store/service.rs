use std::collections::HashMap;

use contracts::shared::descriptor::TableDescriptor;
use contracts::shared::registry::find_table;
use contracts::shared::row::ReferenceRow;
use contracts::shared::table_api::{KeyFilter, SortOrder, ORDER_PARAM};

use super::error::StoreError;
use super::repository;
use crate::shared::data::db::get_connection;

pub fn resolve_table(table_name: &str) -> Result<&'static TableDescriptor, StoreError> {
    find_table(table_name).ok_or_else(|| StoreError::UnknownTable(table_name.to_string()))
}

/// `order` query parameter, `name.asc` when absent.
pub fn parse_order(params: &HashMap<String, String>) -> Result<SortOrder, StoreError> {
    match params.get(ORDER_PARAM) {
        Some(raw) => SortOrder::parse(raw).map_err(StoreError::BadRequest),
        None => Ok(SortOrder::default()),
    }
}

/// The `column=eq.value` filter that update and delete require.
pub fn require_filter(params: &HashMap<String, String>) -> Result<KeyFilter, StoreError> {
    KeyFilter::from_query(params)
        .map_err(StoreError::BadRequest)?
        .ok_or_else(|| StoreError::BadRequest("a column=eq.value filter is required".to_string()))
}

pub async fn list(
    table_name: &str,
    params: &HashMap<String, String>,
) -> Result<Vec<ReferenceRow>, StoreError> {
    let table = resolve_table(table_name)?;
    let order = parse_order(params)?;
    repository::list(get_connection(), table, &order).await
}

pub async fn count(table_name: &str) -> Result<u64, StoreError> {
    let table = resolve_table(table_name)?;
    repository::count(get_connection(), table).await
}

pub async fn insert(table_name: &str, rows: &[ReferenceRow]) -> Result<u64, StoreError> {
    let table = resolve_table(table_name)?;
    let affected = repository::insert(get_connection(), table, rows).await?;
    tracing::info!("Inserted {} row(s) into {}", affected, table.table_name);
    Ok(affected)
}

pub async fn update(
    table_name: &str,
    params: &HashMap<String, String>,
    row: &ReferenceRow,
) -> Result<u64, StoreError> {
    let table = resolve_table(table_name)?;
    let filter = require_filter(params)?;
    let affected = repository::update(get_connection(), table, row, &filter).await?;
    tracing::info!(
        "Updated {} row(s) in {} where {}={}",
        affected,
        table.table_name,
        filter.column,
        filter.value
    );
    Ok(affected)
}

pub async fn delete(
    table_name: &str,
    params: &HashMap<String, String>,
) -> Result<u64, StoreError> {
    let table = resolve_table(table_name)?;
    let filter = require_filter(params)?;
    let affected = repository::delete(get_connection(), table, &filter).await?;
    tracing::info!(
        "Deleted {} row(s) from {} where {}={}",
        affected,
        table.table_name,
        filter.column,
        filter.value
    );
    Ok(affected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn unknown_tables_are_rejected() {
        assert!(resolve_table("ref_departments").is_ok());
        assert!(matches!(
            resolve_table("sys_users"),
            Err(StoreError::UnknownTable(_))
        ));
    }

    #[test]
    fn order_defaults_to_name_ascending() {
        assert_eq!(parse_order(&params(&[])).unwrap(), SortOrder::asc("name"));
        assert_eq!(
            parse_order(&params(&[("order", "code.desc")])).unwrap(),
            SortOrder::desc("code")
        );
        assert!(matches!(
            parse_order(&params(&[("order", "code.up")])),
            Err(StoreError::BadRequest(_))
        ));
    }

    #[test]
    fn mutations_need_exactly_one_filter() {
        assert_eq!(
            require_filter(&params(&[("code", "eq.HR")])).unwrap(),
            KeyFilter::eq("code", "HR")
        );
        assert!(require_filter(&params(&[])).is_err());
        assert!(require_filter(&params(&[("order", "name.asc")])).is_err());
    }
}
