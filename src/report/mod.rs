//! High-level report pipeline.
//!
//! Combines the loader and the analysis core into one call: load (or take)
//! a dataset, apply filter criteria, and compute every block a dashboard
//! view needs — summary metrics, regional shares, and a configurable set
//! of top-N rankings. The result is a single serializable [`Report`] for
//! the rendering shell to print or emit as JSON.
//!
//! # Example
//!
//! ```rust,ignore
//! use vgsales::{build_report, FilterCriteria, ReportOptions};
//!
//! let dataset = vgsales::load_dataset("data/vgsales_clean.csv")?;
//! let criteria = FilterCriteria::new().with_year_range(2000, 2010);
//! let report = build_report(&dataset.records, &criteria, &ReportOptions::default())?;
//! println!("{} games matched", report.matched);
//! ```

use crate::analysis::{
    regional_percentages, summarize, top_n, Aggregation, FilterCriteria, GroupColumn,
    MeasureColumn, Ranking, Summary,
};
use crate::error::{AnalysisError, ReportResult};
use crate::loader::load_dataset;
use crate::models::{GameRecord, Region};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Options for report generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Number of entries per ranking.
    pub top_n: usize,

    /// Group columns to rank.
    pub rankings: Vec<GroupColumn>,

    /// Measure the rankings aggregate over.
    pub measure: MeasureColumn,

    /// Aggregation applied per group.
    pub aggregation: Aggregation,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_n: 10,
            rankings: vec![
                GroupColumn::Platform,
                GroupColumn::Genre,
                GroupColumn::Publisher,
            ],
            measure: MeasureColumn::GlobalSales,
            aggregation: Aggregation::Sum,
        }
    }
}

/// A complete report over one filtered dataset view.
///
/// An empty view is a valid report (`matched == 0` with no summary or
/// shares), matching the dashboard's "no data" state rather than an error.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Criteria the view was filtered with.
    pub criteria: FilterCriteria,

    /// Number of records matching the criteria.
    pub matched: usize,

    /// Summary metrics; absent when no records matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,

    /// Regional sales shares; absent when no records matched or the view's
    /// total global sales is zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regional_shares: Option<BTreeMap<Region, f64>>,

    /// One ranking per requested group column.
    pub rankings: Vec<Ranking>,
}

/// Build a report from an in-memory dataset.
///
/// Filters the records with `criteria`, then computes the summary blocks.
/// The input slice is never mutated.
pub fn build_report(
    records: &[GameRecord],
    criteria: &FilterCriteria,
    options: &ReportOptions,
) -> ReportResult<Report> {
    let filtered = criteria.apply(records);

    let (summary, regional_shares) = if filtered.is_empty() {
        (None, None)
    } else {
        let summary = summarize(&filtered)?;
        // A zero-sales view has a summary but no meaningful shares.
        let shares = match regional_percentages(&filtered) {
            Ok(shares) => Some(shares),
            Err(AnalysisError::ZeroTotalSales) => None,
            Err(e) => return Err(e.into()),
        };
        (Some(summary), shares)
    };

    let mut rankings = Vec::with_capacity(options.rankings.len());
    for group_by in &options.rankings {
        rankings.push(top_n(
            &filtered,
            *group_by,
            options.top_n,
            options.measure,
            options.aggregation,
        )?);
    }

    Ok(Report {
        criteria: criteria.clone(),
        matched: filtered.len(),
        summary,
        regional_shares,
        rankings,
    })
}

/// Load a dataset file and build a report in one step.
pub fn report_from_file<P: AsRef<Path>>(
    path: P,
    criteria: &FilterCriteria,
    options: &ReportOptions,
) -> ReportResult<Report> {
    let dataset = load_dataset(path)?;
    build_report(&dataset.records, criteria, options)
}
