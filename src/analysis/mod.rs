//! Analysis core: aggregation, ranking and filtering.
//!
//! Pure functions over a read-only dataset slice. Every operation returns
//! a new value and raises typed [`crate::error::AnalysisError`] failures
//! instead of producing NaN or silently empty output.

pub mod filter;
pub mod ranking;
pub mod summary;

pub use filter::FilterCriteria;
pub use ranking::{top_n, Aggregation, GroupColumn, MeasureColumn, Ranking, RankingEntry};
pub use summary::{regional_percentages, summarize, Summary};
