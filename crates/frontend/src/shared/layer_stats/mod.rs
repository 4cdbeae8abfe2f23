//! Concurrent row counts behind the dashboard cards.

pub mod aggregator;
pub mod view;

pub use aggregator::{fetch_all_counts, CountState, LayerCounts};
pub use view::{CountCard, LayerStats};
