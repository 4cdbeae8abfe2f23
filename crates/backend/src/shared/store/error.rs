use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::table_api::{ApiError, ApiErrorCode};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Errors of the generic table store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unknown table '{0}'")]
    UnknownTable(String),

    #[error("unknown column '{column}' in table '{table}'")]
    UnknownColumn { table: String, column: String },

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("code '{0}' already exists")]
    Conflict(String),

    #[error("no row matches {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl StoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::UnknownTable(_) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UnknownColumn { .. } | Self::BadRequest(_) | Self::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn api_code(&self) -> ApiErrorCode {
        match self {
            Self::UnknownTable(_) => ApiErrorCode::UnknownTable,
            Self::UnknownColumn { .. } => ApiErrorCode::UnknownColumn,
            Self::BadRequest(_) => ApiErrorCode::BadRequest,
            Self::Validation(_) => ApiErrorCode::Validation,
            Self::Conflict(_) => ApiErrorCode::Conflict,
            Self::NotFound(_) => ApiErrorCode::NotFound,
            Self::Database(_) => ApiErrorCode::Internal,
        }
    }

    /// Maps a failed write to `Conflict` when it hit the `UNIQUE(code)` index.
    pub fn from_write(err: DbErr, code: &str) -> Self {
        if is_unique_violation(&err) {
            Self::Conflict(code.to_string())
        } else {
            Self::Database(err)
        }
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        || err.to_string().contains("UNIQUE constraint failed")
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("table store error: {}", self);
        } else {
            tracing::warn!("table store rejected request: {}", self);
        }
        // Database internals stay in the log.
        let message = match &self {
            Self::Database(_) => "internal database error".to_string(),
            other => other.to_string(),
        };
        (status, Json(ApiError::new(self.api_code(), message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            StoreError::UnknownTable("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            StoreError::Validation("code".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(StoreError::Conflict("HR".into()).status(), StatusCode::CONFLICT);
        assert_eq!(
            StoreError::Database(DbErr::Custom("boom".into())).api_code(),
            ApiErrorCode::Internal
        );
    }

    #[test]
    fn unique_violation_message_maps_to_conflict() {
        let err = DbErr::Custom("UNIQUE constraint failed: ref_departments.code".into());
        assert!(matches!(
            StoreError::from_write(err, "HR"),
            StoreError::Conflict(code) if code == "HR"
        ));
        let err = DbErr::Custom("disk I/O error".into());
        assert!(matches!(
            StoreError::from_write(err, "HR"),
            StoreError::Database(_)
        ));
    }
}
