//! # Vgsales - descriptive analytics over video-game sales data
//!
//! Vgsales loads a cleaned video-game sales CSV (one row per game, with
//! regional and global sales, platform, genre, publisher and release year)
//! and computes the derived views a reporting dashboard needs: summary
//! metrics, regional sales shares, top-N rankings and multi-criteria
//! filtered drill-downs.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Loader    │────▶│    Filter    │────▶│  Summary /  │
//! │ (auto-enc)  │     │  (schema    │     │  (optional,  │     │  Rankings / │
//! └─────────────┘     │   checked)  │     │   identity)  │     │  Shares     │
//!                     └─────────────┘     └──────────────┘     └─────────────┘
//! ```
//!
//! The analysis core is pure and synchronous: every operation takes a
//! read-only record slice and returns a new value, so one loaded dataset
//! can back any number of independent report views.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vgsales::{load_dataset, summarize, FilterCriteria};
//!
//! let dataset = load_dataset("data/vgsales_clean.csv")?;
//! let recent = FilterCriteria::new().with_year_range(2000, 2010);
//! let summary = summarize(&recent.apply(&dataset.records))?;
//! println!("{} games, {:.2}M units", summary.total_games, summary.total_sales);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (GameRecord, Region)
//! - [`loader`] - CSV loading with auto-detection and schema validation
//! - [`analysis`] - Aggregation, ranking and filtering core
//! - [`report`] - High-level report pipeline

// Core modules
pub mod error;
pub mod models;

// Loading
pub mod loader;

// Analysis
pub mod analysis;

// Reporting
pub mod report;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{AnalysisError, LoadError, ReportError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{GameRecord, Region};

// =============================================================================
// Re-exports - Loader
// =============================================================================

pub use loader::{
    detect_delimiter, detect_encoding, load_dataset, load_dataset_bytes, validate_schema,
    Dataset, REQUIRED_COLUMNS,
};

// =============================================================================
// Re-exports - Analysis
// =============================================================================

pub use analysis::{
    regional_percentages, summarize, top_n, Aggregation, FilterCriteria, GroupColumn,
    MeasureColumn, Ranking, RankingEntry, Summary,
};

// =============================================================================
// Re-exports - Report
// =============================================================================

pub use report::{build_report, report_from_file, Report, ReportOptions};
