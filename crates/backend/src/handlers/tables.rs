use std::collections::HashMap;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::shared::row::ReferenceRow;
use contracts::shared::table_api::{CountResponse, MutationResponse};

use crate::shared::store::{service, StoreError};

/// GET /api/tables/:table?order=name.asc
pub async fn list(
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<ReferenceRow>>, StoreError> {
    service::list(&table, &params).await.map(Json)
}

/// GET /api/tables/:table/count
pub async fn count(Path(table): Path<String>) -> Result<Json<CountResponse>, StoreError> {
    let count = service::count(&table).await?;
    Ok(Json(CountResponse { table, count }))
}

/// POST /api/tables/:table
pub async fn insert(
    Path(table): Path<String>,
    Json(rows): Json<Vec<ReferenceRow>>,
) -> Result<(StatusCode, Json<MutationResponse>), StoreError> {
    let affected = service::insert(&table, &rows).await?;
    Ok((StatusCode::CREATED, Json(MutationResponse { affected })))
}

/// PATCH /api/tables/:table?code=eq.X
pub async fn update(
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    Json(row): Json<ReferenceRow>,
) -> Result<Json<MutationResponse>, StoreError> {
    let affected = service::update(&table, &params, &row).await?;
    Ok(Json(MutationResponse { affected }))
}

/// DELETE /api/tables/:table?code=eq.X
pub async fn delete(
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<MutationResponse>, StoreError> {
    let affected = service::delete(&table, &params).await?;
    Ok(Json(MutationResponse { affected }))
}
