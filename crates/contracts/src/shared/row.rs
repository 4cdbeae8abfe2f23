use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::descriptor::ColumnKind;

/// Nullable scalar stored in a table cell.
///
/// Serialized untagged, so on the wire it is plain JSON `null`, a number or a string.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// `true` for null and for whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Integer(_) | Self::Float(_) => false,
        }
    }

    /// Value as shown in a table cell or seeded into a form input.
    pub fn as_display(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Integer(v) => v.to_string(),
            Self::Float(v) => v.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    /// Converts raw form input into a cell value for the given column kind.
    ///
    /// Text input is passed through untouched (blank stays an empty string).
    /// Integer input that is blank becomes `Null`; unparsable input is kept as
    /// text so the store can reject it.
    pub fn from_input(kind: ColumnKind, raw: &str) -> Self {
        match kind {
            ColumnKind::Text | ColumnKind::LongText => Self::Text(raw.to_string()),
            ColumnKind::Integer => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    Self::Null
                } else {
                    trimmed
                        .parse::<i64>()
                        .map(Self::Integer)
                        .unwrap_or_else(|_| Self::Text(raw.to_string()))
                }
            }
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

/// One row of a table: column name → nullable scalar.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceRow(pub BTreeMap<String, CellValue>);

impl ReferenceRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CellValue>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.0.get(column)
    }

    /// Display text of a column, empty string for missing or null values.
    pub fn text(&self, column: &str) -> String {
        self.get(column).map(CellValue::as_display).unwrap_or_default()
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.0.insert(column.into(), value.into());
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.set(column, value);
        self
    }

    pub fn code(&self) -> String {
        self.text(super::descriptor::KEY_COLUMN)
    }

    pub fn name(&self) -> String {
        self.text(super::descriptor::NAME_COLUMN)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-insensitive substring match against every cell.
    pub fn matches_filter(&self, filter: &str) -> bool {
        let needle = filter.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.0
            .values()
            .any(|v| v.as_display().to_lowercase().contains(&needle))
    }
}
