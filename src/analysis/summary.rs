//! Dataset-wide descriptive statistics.
//!
//! [`summarize`] produces the fixed-shape [`Summary`] snapshot behind the
//! dashboard's headline metrics; [`regional_percentages`] computes each
//! region's share of global sales for the distribution charts. Both take
//! any dataset view (full or filtered) and recompute from scratch, so a
//! summary is never stale and never tied to its input's identity.

use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{GameRecord, Region};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Descriptive summary of one dataset view.
///
/// Immutable snapshot; recomputed on demand rather than cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Number of records in the view.
    pub total_games: usize,
    /// Sum of global sales, millions of units.
    pub total_sales: f64,
    /// Mean global sales per game.
    pub avg_sales: f64,
    /// Distinct platforms.
    pub total_platforms: usize,
    /// Distinct genres.
    pub total_genres: usize,
    /// Distinct publishers.
    pub total_publishers: usize,
    /// Inclusive (min, max) release year.
    pub year_range: (u16, u16),
    /// Total North America sales.
    pub na_sales: f64,
    /// Total Europe sales.
    pub eu_sales: f64,
    /// Total Japan sales.
    pub jp_sales: f64,
    /// Total rest-of-world sales.
    pub other_sales: f64,
}

impl Summary {
    /// Total sales for a single region.
    pub fn regional_sales(&self, region: Region) -> f64 {
        match region {
            Region::Na => self.na_sales,
            Region::Eu => self.eu_sales,
            Region::Jp => self.jp_sales,
            Region::Other => self.other_sales,
        }
    }
}

/// Compute the descriptive summary of a dataset view.
///
/// Fails with [`AnalysisError::EmptyDataset`] on zero records, since the
/// mean and the year range are undefined there.
pub fn summarize(records: &[GameRecord]) -> AnalysisResult<Summary> {
    if records.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }

    let total_games = records.len();
    let total_sales: f64 = records.iter().map(|r| r.global_sales).sum();

    let mut platforms = HashSet::new();
    let mut genres = HashSet::new();
    let mut publishers = HashSet::new();
    let mut min_year = u16::MAX;
    let mut max_year = u16::MIN;
    let mut regional = [0.0f64; 4];

    for record in records {
        platforms.insert(record.platform.as_str());
        genres.insert(record.genre.as_str());
        publishers.insert(record.publisher.as_str());
        min_year = min_year.min(record.year);
        max_year = max_year.max(record.year);
        for (i, region) in Region::ALL.iter().enumerate() {
            regional[i] += record.regional_sales(*region);
        }
    }

    Ok(Summary {
        total_games,
        total_sales,
        avg_sales: total_sales / total_games as f64,
        total_platforms: platforms.len(),
        total_genres: genres.len(),
        total_publishers: publishers.len(),
        year_range: (min_year, max_year),
        na_sales: regional[0],
        eu_sales: regional[1],
        jp_sales: regional[2],
        other_sales: regional[3],
    })
}

/// Each region's share of total global sales, as a percentage (0-100).
///
/// The four shares sum to ~100 within floating-point tolerance; the small
/// discrepancy comes from `Global_Sales` not being the exact sum of the
/// regional columns in the source data.
///
/// Fails with [`AnalysisError::ZeroTotalSales`] when the view's global
/// sales total is zero — an explicit error, never a NaN.
pub fn regional_percentages(records: &[GameRecord]) -> AnalysisResult<BTreeMap<Region, f64>> {
    let total: f64 = records.iter().map(|r| r.global_sales).sum();

    if total == 0.0 {
        return Err(AnalysisError::ZeroTotalSales);
    }

    let mut shares = BTreeMap::new();
    for region in Region::ALL {
        let regional: f64 = records.iter().map(|r| r.regional_sales(region)).sum();
        shares.insert(region, regional / total * 100.0);
    }

    Ok(shares)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, year: u16, sales: [f64; 5]) -> GameRecord {
        GameRecord {
            rank: 1,
            name: name.to_string(),
            platform: "Wii".to_string(),
            year,
            genre: "Sports".to_string(),
            publisher: "Nintendo".to_string(),
            na_sales: sales[0],
            eu_sales: sales[1],
            jp_sales: sales[2],
            other_sales: sales[3],
            global_sales: sales[4],
            dominant_region: Region::Na,
            sales_category: "Alta".to_string(),
        }
    }

    /// The 3-record scenario: Global = [10, 20, 30], NA = [5, 10, 15],
    /// EU = [3, 6, 9], JP = [1, 2, 3], Other = [1, 2, 3].
    fn three_records() -> Vec<GameRecord> {
        vec![
            record("A", 2000, [5.0, 3.0, 1.0, 1.0, 10.0]),
            record("B", 2005, [10.0, 6.0, 2.0, 2.0, 20.0]),
            record("C", 2010, [15.0, 9.0, 3.0, 3.0, 30.0]),
        ]
    }

    #[test]
    fn test_summary_totals() {
        let summary = summarize(&three_records()).unwrap();

        assert_eq!(summary.total_games, 3);
        assert_eq!(summary.total_sales, 60.0);
        assert_eq!(summary.avg_sales, 20.0);
        assert_eq!(summary.year_range, (2000, 2010));
        assert_eq!(summary.na_sales, 30.0);
        assert_eq!(summary.eu_sales, 18.0);
        assert_eq!(summary.jp_sales, 6.0);
        assert_eq!(summary.other_sales, 6.0);
    }

    #[test]
    fn test_summary_distinct_counts() {
        let mut records = three_records();
        records[1].platform = "NES".to_string();
        records[2].genre = "Puzzle".to_string();

        let summary = summarize(&records).unwrap();
        assert_eq!(summary.total_platforms, 2);
        assert_eq!(summary.total_genres, 2);
        assert_eq!(summary.total_publishers, 1);
    }

    #[test]
    fn test_mean_identity() {
        let summary = summarize(&three_records()).unwrap();
        let expected = summary.total_sales / summary.total_games as f64;
        assert!((summary.avg_sales - expected).abs() < 1e-12);
    }

    #[test]
    fn test_empty_dataset_rejected() {
        assert_eq!(summarize(&[]), Err(AnalysisError::EmptyDataset));
    }

    #[test]
    fn test_regional_percentages() {
        let shares = regional_percentages(&three_records()).unwrap();

        assert_eq!(shares[&Region::Na], 50.0);
        assert_eq!(shares[&Region::Eu], 30.0);
        assert_eq!(shares[&Region::Jp], 10.0);
        assert_eq!(shares[&Region::Other], 10.0);
    }

    #[test]
    fn test_percentages_sum_to_100() {
        // Global_Sales deliberately off the exact regional sum, as in the
        // real dataset.
        let records = vec![
            record("A", 2001, [1.02, 0.5, 0.25, 0.24, 2.0]),
            record("B", 2002, [0.33, 0.33, 0.33, 0.0, 1.0]),
        ];
        let shares = regional_percentages(&records).unwrap();
        let total: f64 = shares.values().sum();

        assert!((total - 100.0).abs() / 100.0 < 1e-2);
    }

    #[test]
    fn test_zero_total_rejected() {
        let records = vec![record("A", 2000, [0.0, 0.0, 0.0, 0.0, 0.0])];
        assert_eq!(
            regional_percentages(&records),
            Err(AnalysisError::ZeroTotalSales)
        );
    }
}
