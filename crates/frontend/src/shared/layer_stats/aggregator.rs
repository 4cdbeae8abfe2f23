use contracts::shared::descriptor::LayerDescriptor;
use futures::future::join_all;
use std::collections::HashMap;

use crate::shared::table_api::{TableApiError, TableStore};
use crate::system::auth::context::SessionExpiry;

/// Count of one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountState {
    #[default]
    Loading,
    Ready(u64),
    Failed,
}

impl CountState {
    /// Card text: `…` while loading and `—` when the request failed.
    pub fn display(&self) -> String {
        match self {
            Self::Loading => "…".to_string(),
            Self::Ready(n) => format_count(*n),
            Self::Failed => "—".to_string(),
        }
    }

    /// Count of a card backed by two tables. One failed table fails the card.
    pub fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Failed, _) | (_, Self::Failed) => Self::Failed,
            (Self::Ready(a), Self::Ready(b)) => Self::Ready(a + b),
            _ => Self::Loading,
        }
    }
}

fn format_count(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// One entry per descriptor key.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayerCounts(HashMap<&'static str, CountState>);

impl LayerCounts {
    pub fn loading(descriptors: &[LayerDescriptor]) -> Self {
        Self(
            descriptors
                .iter()
                .map(|d| (d.key, CountState::Loading))
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> CountState {
        self.0.get(key).copied().unwrap_or_default()
    }

    /// Failed and pending counts read as zero.
    pub fn value_or_zero(&self, key: &str) -> u64 {
        match self.get(key) {
            CountState::Ready(n) => n,
            CountState::Loading | CountState::Failed => 0,
        }
    }

    /// Sum of the counts that arrived.
    pub fn total(&self) -> u64 {
        self.0.keys().map(|k| self.value_or_zero(k)).sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_settled(&self) -> bool {
        !self.0.values().any(|c| *c == CountState::Loading)
    }
}

/// Runs one count per descriptor concurrently and waits for all of them.
///
/// Descriptors sharing a key add up under that key. A failed count only marks
/// its own key as [`CountState::Failed`]; a rejected access token is reported
/// to `session` once.
pub async fn fetch_all_counts<S: TableStore, E: SessionExpiry>(
    store: &S,
    session: &E,
    descriptors: &[LayerDescriptor],
) -> LayerCounts {
    let results = join_all(descriptors.iter().map(|d| store.count(d.table))).await;

    let mut counts: HashMap<&'static str, CountState> = HashMap::new();
    let mut unauthenticated = false;
    for (d, result) in descriptors.iter().zip(results) {
        let state = match result {
            Ok(n) => CountState::Ready(n),
            Err(e) => {
                log::error!("count of {} failed: {}", d.table, e);
                unauthenticated |= e == TableApiError::Unauthenticated;
                CountState::Failed
            }
        };
        counts
            .entry(d.key)
            .and_modify(|c| *c = c.merge(state))
            .or_insert(state);
    }
    if unauthenticated {
        session.session_expired();
    }
    LayerCounts(counts)
}
