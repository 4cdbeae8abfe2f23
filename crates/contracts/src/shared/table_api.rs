//! Wire contract of the table API (`/api/tables/{table}`).
//!
//! Query strings follow the hosted-backend convention the console was written
//! against: `order=name.asc` and `code=eq.HR`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::descriptor::NAME_COLUMN;

pub const ORDER_PARAM: &str = "order";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub column: String,
    pub ascending: bool,
}

impl SortOrder {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: true,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: false,
        }
    }

    /// Parses `column.asc` / `column.desc`; a bare column means ascending.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let (column, direction) = match s.rsplit_once('.') {
            Some((c, d)) => (c, d),
            None => (s, "asc"),
        };
        if column.is_empty() {
            return Err(format!("empty order column in '{}'", s));
        }
        let ascending = match direction {
            "asc" => true,
            "desc" => false,
            other => return Err(format!("unknown order direction '{}'", other)),
        };
        Ok(Self {
            column: column.to_string(),
            ascending,
        })
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        Self::asc(NAME_COLUMN)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = if self.ascending { "asc" } else { "desc" };
        write!(f, "{}.{}", self.column, dir)
    }
}

/// Equality filter addressing the rows of an update or delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyFilter {
    pub column: String,
    pub value: String,
}

impl KeyFilter {
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Query value form, e.g. `eq.HR`.
    pub fn query_value(&self) -> String {
        format!("eq.{}", self.value)
    }

    /// Extracts the single `column=eq.value` filter from decoded query params.
    ///
    /// `order` is ignored. Zero filters is `Ok(None)`; more than one, or an
    /// operator other than `eq`, is an error.
    pub fn from_query(params: &HashMap<String, String>) -> Result<Option<Self>, String> {
        let mut found: Option<Self> = None;
        for (key, raw) in params {
            if key == ORDER_PARAM {
                continue;
            }
            let value = raw
                .strip_prefix("eq.")
                .ok_or_else(|| format!("unsupported filter '{}={}'", key, raw))?;
            if found.is_some() {
                return Err("only one filter is supported".to_string());
            }
            found = Some(Self::eq(key.clone(), value));
        }
        Ok(found)
    }
}

/// Result of a count-only select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    pub table: String,
    pub count: u64,
}

/// Result of insert / update / delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResponse {
    pub affected: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorCode {
    UnknownTable,
    UnknownColumn,
    BadRequest,
    Validation,
    Conflict,
    NotFound,
    Unauthorized,
    Internal,
}

/// Error body returned by the backend for every failed table call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_parsing() {
        assert_eq!(SortOrder::parse("name.asc").unwrap(), SortOrder::asc("name"));
        assert_eq!(SortOrder::parse("code.desc").unwrap(), SortOrder::desc("code"));
        assert_eq!(SortOrder::parse("code").unwrap(), SortOrder::asc("code"));
        assert!(SortOrder::parse("code.sideways").is_err());
        assert!(SortOrder::parse(".asc").is_err());
        assert_eq!(SortOrder::default().to_string(), "name.asc");
    }

    #[test]
    fn filter_extraction_skips_order() {
        let params = HashMap::from([
            ("order".to_string(), "name.asc".to_string()),
            ("code".to_string(), "eq.HR".to_string()),
        ]);
        assert_eq!(
            KeyFilter::from_query(&params).unwrap(),
            Some(KeyFilter::eq("code", "HR"))
        );
    }

    #[test]
    fn filter_value_may_contain_dots() {
        let params = HashMap::from([("code".to_string(), "eq.A.B".to_string())]);
        let filter = KeyFilter::from_query(&params).unwrap().unwrap();
        assert_eq!(filter.value, "A.B");
        assert_eq!(filter.query_value(), "eq.A.B");
    }

    #[test]
    fn filter_rejects_other_operators_and_multiple_filters() {
        let params = HashMap::from([("code".to_string(), "like.H%".to_string())]);
        assert!(KeyFilter::from_query(&params).is_err());

        let params = HashMap::from([
            ("code".to_string(), "eq.HR".to_string()),
            ("name".to_string(), "eq.Human".to_string()),
        ]);
        assert!(KeyFilter::from_query(&params).is_err());

        assert_eq!(KeyFilter::from_query(&HashMap::new()).unwrap(), None);
    }

    #[test]
    fn error_codes_are_snake_case_on_the_wire() {
        let err = ApiError::new(ApiErrorCode::UnknownTable, "no such table");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"unknown_table\""));
    }
}
