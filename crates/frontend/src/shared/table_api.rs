//! Client of the backend table API (`/api/tables/{table}`).
//!
//! Components talk to [`TableStore`] so the manager and the aggregator can be
//! driven by an in-memory store in tests.

use contracts::shared::row::ReferenceRow;
use contracts::shared::table_api::{
    ApiError, ApiErrorCode, CountResponse, KeyFilter, MutationResponse, SortOrder, ORDER_PARAM,
};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::shared::api_utils::api_base;
use crate::system::auth::storage;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("backend error {status} ({code:?}): {message}")]
    Backend {
        status: u16,
        code: ApiErrorCode,
        message: String,
    },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("not signed in")]
    Unauthenticated,
}

impl TableApiError {
    /// The store refused the write because the `code` is already taken.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::Backend {
                code: ApiErrorCode::Conflict,
                ..
            }
        )
    }
}

/// The five calls the console makes against a table.
#[allow(async_fn_in_trait)]
pub trait TableStore {
    async fn list(&self, table: &str, order: &SortOrder)
        -> Result<Vec<ReferenceRow>, TableApiError>;

    /// Row count without fetching rows.
    async fn count(&self, table: &str) -> Result<u64, TableApiError>;

    async fn insert(&self, table: &str, rows: &[ReferenceRow]) -> Result<u64, TableApiError>;

    async fn update(
        &self,
        table: &str,
        row: &ReferenceRow,
        filter: &KeyFilter,
    ) -> Result<u64, TableApiError>;

    async fn delete(&self, table: &str, filter: &KeyFilter) -> Result<u64, TableApiError>;
}

/// [`TableStore`] over HTTP, authenticated with the stored access token.
#[derive(Debug, Clone, Default)]
pub struct HttpTableStore;

impl HttpTableStore {
    pub fn new() -> Self {
        Self
    }

    fn url(table: &str) -> String {
        format!("{}/api/tables/{}", api_base(), table)
    }

    fn authorize(builder: RequestBuilder) -> Result<RequestBuilder, TableApiError> {
        let token = storage::get_access_token().ok_or(TableApiError::Unauthenticated)?;
        Ok(builder.header("Authorization", &format!("Bearer {}", token)))
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, TableApiError> {
    let status = response.status();
    if status == 401 {
        return Err(TableApiError::Unauthenticated);
    }
    if !response.ok() {
        let body = response.json::<ApiError>().await.unwrap_or_else(|_| {
            ApiError::new(ApiErrorCode::Internal, response.status_text())
        });
        return Err(TableApiError::Backend {
            status,
            code: body.code,
            message: body.message,
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| TableApiError::Decode(e.to_string()))
}

fn network(e: gloo_net::Error) -> TableApiError {
    TableApiError::Network(e.to_string())
}

impl TableStore for HttpTableStore {
    async fn list(
        &self,
        table: &str,
        order: &SortOrder,
    ) -> Result<Vec<ReferenceRow>, TableApiError> {
        let order = order.to_string();
        let request = Self::authorize(
            Request::get(&Self::url(table)).query([(ORDER_PARAM, order.as_str())]),
        )?;
        let response = request.send().await.map_err(network)?;
        read_json(response).await
    }

    async fn count(&self, table: &str) -> Result<u64, TableApiError> {
        let request = Self::authorize(Request::get(&format!("{}/count", Self::url(table))))?;
        let response = request.send().await.map_err(network)?;
        read_json::<CountResponse>(response).await.map(|c| c.count)
    }

    async fn insert(&self, table: &str, rows: &[ReferenceRow]) -> Result<u64, TableApiError> {
        let request = Self::authorize(Request::post(&Self::url(table)))?
            .json(&rows)
            .map_err(network)?;
        let response = request.send().await.map_err(network)?;
        read_json::<MutationResponse>(response)
            .await
            .map(|m| m.affected)
    }

    async fn update(
        &self,
        table: &str,
        row: &ReferenceRow,
        filter: &KeyFilter,
    ) -> Result<u64, TableApiError> {
        let value = filter.query_value();
        let request = Self::authorize(
            Request::patch(&Self::url(table)).query([(filter.column.as_str(), value.as_str())]),
        )?
        .json(row)
        .map_err(network)?;
        let response = request.send().await.map_err(network)?;
        read_json::<MutationResponse>(response)
            .await
            .map(|m| m.affected)
    }

    async fn delete(&self, table: &str, filter: &KeyFilter) -> Result<u64, TableApiError> {
        let value = filter.query_value();
        let request = Self::authorize(
            Request::delete(&Self::url(table)).query([(filter.column.as_str(), value.as_str())]),
        )?;
        let response = request.send().await.map_err(network)?;
        read_json::<MutationResponse>(response)
            .await
            .map(|m| m.affected)
    }
}

#[cfg(test)]
pub(crate) mod memory {
    //! In-memory [`TableStore`] that records every call.

    use super::*;
    use contracts::shared::descriptor::KEY_COLUMN;
    use std::cell::RefCell;
    use std::collections::{BTreeMap, HashSet};
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        List(String),
        Count(String),
        Insert(String),
        Update(String, String),
        Delete(String, String),
    }

    #[derive(Default)]
    struct Inner {
        tables: BTreeMap<String, Vec<ReferenceRow>>,
        calls: Vec<Call>,
        failing: HashSet<String>,
        signed_out: bool,
    }

    #[derive(Clone, Default)]
    pub struct MemoryStore {
        inner: Rc<RefCell<Inner>>,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_rows(self, table: &str, rows: Vec<ReferenceRow>) -> Self {
            self.inner
                .borrow_mut()
                .tables
                .insert(table.to_string(), rows);
            self
        }

        /// Every call against `table` fails with a backend error from now on.
        pub fn fail_table(&self, table: &str) {
            self.inner.borrow_mut().failing.insert(table.to_string());
        }

        /// Every call is rejected as unauthenticated from now on.
        pub fn expire_session(&self) {
            self.inner.borrow_mut().signed_out = true;
        }

        pub fn heal_table(&self, table: &str) {
            self.inner.borrow_mut().failing.remove(table);
        }

        pub fn calls(&self) -> Vec<Call> {
            self.inner.borrow().calls.clone()
        }

        pub fn rows(&self, table: &str) -> Vec<ReferenceRow> {
            self.inner
                .borrow()
                .tables
                .get(table)
                .cloned()
                .unwrap_or_default()
        }

        fn record(&self, table: &str, call: Call) -> Result<(), TableApiError> {
            let mut inner = self.inner.borrow_mut();
            inner.calls.push(call);
            if inner.signed_out {
                return Err(TableApiError::Unauthenticated);
            }
            if inner.failing.contains(table) {
                return Err(TableApiError::Backend {
                    status: 500,
                    code: ApiErrorCode::Internal,
                    message: "injected failure".to_string(),
                });
            }
            Ok(())
        }

        fn conflict(code: &str) -> TableApiError {
            TableApiError::Backend {
                status: 409,
                code: ApiErrorCode::Conflict,
                message: format!("code '{}' already exists", code),
            }
        }

        fn not_found() -> TableApiError {
            TableApiError::Backend {
                status: 404,
                code: ApiErrorCode::NotFound,
                message: "no row matches".to_string(),
            }
        }
    }

    impl TableStore for MemoryStore {
        async fn list(
            &self,
            table: &str,
            order: &SortOrder,
        ) -> Result<Vec<ReferenceRow>, TableApiError> {
            self.record(table, Call::List(table.to_string()))?;
            let mut rows = self.rows(table);
            rows.sort_by_key(|r| r.text(&order.column).to_lowercase());
            if !order.ascending {
                rows.reverse();
            }
            Ok(rows)
        }

        async fn count(&self, table: &str) -> Result<u64, TableApiError> {
            self.record(table, Call::Count(table.to_string()))?;
            Ok(self.rows(table).len() as u64)
        }

        async fn insert(
            &self,
            table: &str,
            rows: &[ReferenceRow],
        ) -> Result<u64, TableApiError> {
            self.record(table, Call::Insert(table.to_string()))?;
            let mut inner = self.inner.borrow_mut();
            let existing = inner.tables.entry(table.to_string()).or_default();
            for row in rows {
                if existing.iter().any(|r| r.code() == row.code()) {
                    return Err(Self::conflict(&row.code()));
                }
            }
            existing.extend(rows.iter().cloned());
            Ok(rows.len() as u64)
        }

        async fn update(
            &self,
            table: &str,
            row: &ReferenceRow,
            filter: &KeyFilter,
        ) -> Result<u64, TableApiError> {
            self.record(
                table,
                Call::Update(table.to_string(), filter.value.clone()),
            )?;
            let mut inner = self.inner.borrow_mut();
            let existing = inner.tables.entry(table.to_string()).or_default();
            let new_code = row.get(KEY_COLUMN).map(|v| v.as_display());
            if let Some(code) = &new_code {
                if code != &filter.value && existing.iter().any(|r| &r.code() == code) {
                    return Err(Self::conflict(code));
                }
            }
            let mut affected = 0;
            for target in existing
                .iter_mut()
                .filter(|r| r.text(&filter.column) == filter.value)
            {
                for (column, value) in row.iter() {
                    target.set(column, value.clone());
                }
                affected += 1;
            }
            if affected == 0 {
                return Err(Self::not_found());
            }
            Ok(affected)
        }

        async fn delete(&self, table: &str, filter: &KeyFilter) -> Result<u64, TableApiError> {
            self.record(
                table,
                Call::Delete(table.to_string(), filter.value.clone()),
            )?;
            let mut inner = self.inner.borrow_mut();
            let existing = inner.tables.entry(table.to_string()).or_default();
            let before = existing.len();
            existing.retain(|r| r.text(&filter.column) != filter.value);
            let affected = (before - existing.len()) as u64;
            if affected == 0 {
                return Err(Self::not_found());
            }
            Ok(affected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_backend_conflicts_count_as_conflicts() {
        let conflict = TableApiError::Backend {
            status: 409,
            code: ApiErrorCode::Conflict,
            message: "code 'HR' already exists".to_string(),
        };
        assert!(conflict.is_conflict());
        assert!(!TableApiError::Network("offline".to_string()).is_conflict());
        assert!(!TableApiError::Unauthenticated.is_conflict());
    }
}
