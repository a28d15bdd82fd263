//! Top-N ranking of categorical groups.
//!
//! Groups the dataset by a categorical column and ranks the groups by an
//! aggregated measure (sum, mean or row count). The group column, measure
//! column and aggregation kind are closed enums, so a malformed request is
//! rejected at the string boundary instead of being silently ignored
//! somewhere inside a group-by.

use crate::error::{AnalysisError, AnalysisResult};
use crate::models::GameRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Grouping and aggregation selectors
// =============================================================================

/// Categorical column to group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupColumn {
    Platform,
    Genre,
    Publisher,
    Name,
    Year,
    DominantRegion,
    SalesCategory,
}

impl GroupColumn {
    /// Schema column name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Platform => "Platform",
            Self::Genre => "Genre",
            Self::Publisher => "Publisher",
            Self::Name => "Name",
            Self::Year => "Year",
            Self::DominantRegion => "Dominant_Region",
            Self::SalesCategory => "Sales_Category",
        }
    }

    /// Group key for one record.
    fn key(&self, record: &GameRecord) -> String {
        match self {
            Self::Platform => record.platform.clone(),
            Self::Genre => record.genre.clone(),
            Self::Publisher => record.publisher.clone(),
            Self::Name => record.name.clone(),
            Self::Year => record.year.to_string(),
            Self::DominantRegion => record.dominant_region.label().to_string(),
            Self::SalesCategory => record.sales_category.clone(),
        }
    }
}

impl fmt::Display for GroupColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupColumn {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "platform" => Ok(Self::Platform),
            "genre" => Ok(Self::Genre),
            "publisher" => Ok(Self::Publisher),
            "name" => Ok(Self::Name),
            "year" => Ok(Self::Year),
            "region" | "dominant_region" => Ok(Self::DominantRegion),
            "category" | "sales_category" => Ok(Self::SalesCategory),
            other => Err(AnalysisError::InvalidArgument(format!(
                "unknown group column '{}'",
                other
            ))),
        }
    }
}

/// Numeric column the aggregation runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureColumn {
    GlobalSales,
    NaSales,
    EuSales,
    JpSales,
    OtherSales,
}

impl MeasureColumn {
    /// Schema column name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GlobalSales => "Global_Sales",
            Self::NaSales => "NA_Sales",
            Self::EuSales => "EU_Sales",
            Self::JpSales => "JP_Sales",
            Self::OtherSales => "Other_Sales",
        }
    }

    fn value(&self, record: &GameRecord) -> f64 {
        match self {
            Self::GlobalSales => record.global_sales,
            Self::NaSales => record.na_sales,
            Self::EuSales => record.eu_sales,
            Self::JpSales => record.jp_sales,
            Self::OtherSales => record.other_sales,
        }
    }
}

impl fmt::Display for MeasureColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasureColumn {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "global" | "global_sales" => Ok(Self::GlobalSales),
            "na" | "na_sales" => Ok(Self::NaSales),
            "eu" | "eu_sales" => Ok(Self::EuSales),
            "jp" | "jp_sales" => Ok(Self::JpSales),
            "other" | "other_sales" => Ok(Self::OtherSales),
            other => Err(AnalysisError::InvalidArgument(format!(
                "unknown measure column '{}'",
                other
            ))),
        }
    }
}

/// How the measure is aggregated per group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Sum of the measure.
    Sum,
    /// Arithmetic mean of the measure.
    Mean,
    /// Row count per group; the measure column is ignored.
    Count,
}

impl FromStr for Aggregation {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sum" => Ok(Self::Sum),
            "mean" | "avg" => Ok(Self::Mean),
            "count" => Ok(Self::Count),
            other => Err(AnalysisError::InvalidArgument(format!(
                "unknown aggregation '{}'",
                other
            ))),
        }
    }
}

// =============================================================================
// Ranking result
// =============================================================================

/// One ranked group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    /// Group key (platform name, genre, ...).
    pub group: String,
    /// Aggregated value for the group.
    pub value: f64,
}

/// Result of a top-N ranking, largest aggregate first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    /// Column the dataset was grouped by.
    pub group_by: GroupColumn,
    /// Aggregation that produced the values.
    pub aggregation: Aggregation,
    /// Measure column; absent for `count` rankings, whose values are row
    /// counts rather than sales figures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measure: Option<MeasureColumn>,
    /// Groups in descending value order.
    pub entries: Vec<RankingEntry>,
}

impl Ranking {
    /// Human-readable label for the value column.
    pub fn metric_label(&self) -> &'static str {
        match self.measure {
            Some(measure) => measure.as_str(),
            None => "count",
        }
    }
}

/// Rank the `n` largest groups of `group_by` under `aggregation`.
///
/// `n` larger than the number of distinct groups returns all groups.
/// Ties on the aggregate value break deterministically by group key,
/// ascending.
///
/// Fails with [`AnalysisError::InvalidArgument`] when `n` is zero.
pub fn top_n(
    records: &[GameRecord],
    group_by: GroupColumn,
    n: usize,
    measure: MeasureColumn,
    aggregation: Aggregation,
) -> AnalysisResult<Ranking> {
    if n == 0 {
        return Err(AnalysisError::InvalidArgument(
            "top-n size must be at least 1".to_string(),
        ));
    }

    let mut groups: HashMap<String, (f64, usize)> = HashMap::new();
    for record in records {
        let entry = groups.entry(group_by.key(record)).or_insert((0.0, 0));
        entry.0 += measure.value(record);
        entry.1 += 1;
    }

    let mut entries: Vec<RankingEntry> = groups
        .into_iter()
        .map(|(group, (sum, count))| {
            let value = match aggregation {
                Aggregation::Sum => sum,
                Aggregation::Mean => sum / count as f64,
                Aggregation::Count => count as f64,
            };
            RankingEntry { group, value }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| a.group.cmp(&b.group))
    });
    entries.truncate(n);

    Ok(Ranking {
        group_by,
        aggregation,
        measure: (aggregation != Aggregation::Count).then_some(measure),
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Region;

    fn record(platform: &str, genre: &str, global: f64) -> GameRecord {
        GameRecord {
            rank: 1,
            name: format!("{} game", platform),
            platform: platform.to_string(),
            year: 2005,
            genre: genre.to_string(),
            publisher: "Nintendo".to_string(),
            na_sales: global / 2.0,
            eu_sales: global / 4.0,
            jp_sales: global / 8.0,
            other_sales: global / 8.0,
            global_sales: global,
            dominant_region: Region::Na,
            sales_category: "Media".to_string(),
        }
    }

    fn platforms() -> Vec<GameRecord> {
        vec![
            record("Wii", "Sports", 30.0),
            record("Wii", "Racing", 10.0),
            record("NES", "Platform", 25.0),
            record("PS2", "Action", 15.0),
            record("PS2", "Action", 15.0),
            record("X360", "Shooter", 5.0),
            record("GB", "Puzzle", 3.0),
            record("PC", "Strategy", 2.0),
        ]
    }

    #[test]
    fn test_top_n_sum() {
        let ranking = top_n(
            &platforms(),
            GroupColumn::Platform,
            5,
            MeasureColumn::GlobalSales,
            Aggregation::Sum,
        )
        .unwrap();

        assert_eq!(ranking.entries.len(), 5);
        assert_eq!(ranking.entries[0].group, "Wii");
        assert_eq!(ranking.entries[0].value, 40.0);
        assert_eq!(ranking.entries[1].group, "PS2");
        assert_eq!(ranking.entries[1].value, 30.0);
        assert_eq!(ranking.entries[2].group, "NES");
        // Descending throughout
        for pair in ranking.entries.windows(2) {
            assert!(pair[0].value >= pair[1].value);
        }
        assert_eq!(ranking.metric_label(), "Global_Sales");
    }

    #[test]
    fn test_top_n_mean() {
        let ranking = top_n(
            &platforms(),
            GroupColumn::Platform,
            3,
            MeasureColumn::GlobalSales,
            Aggregation::Mean,
        )
        .unwrap();

        // Wii mean is 20, NES 25, PS2 15
        assert_eq!(ranking.entries[0].group, "NES");
        assert_eq!(ranking.entries[0].value, 25.0);
        assert_eq!(ranking.entries[1].group, "Wii");
        assert_eq!(ranking.entries[1].value, 20.0);
    }

    #[test]
    fn test_top_n_count() {
        let ranking = top_n(
            &platforms(),
            GroupColumn::Platform,
            2,
            MeasureColumn::GlobalSales,
            Aggregation::Count,
        )
        .unwrap();

        // Wii and PS2 both have 2 rows; tie breaks by name ascending.
        assert_eq!(ranking.entries[0].group, "PS2");
        assert_eq!(ranking.entries[0].value, 2.0);
        assert_eq!(ranking.entries[1].group, "Wii");
        assert!(ranking.measure.is_none());
        assert_eq!(ranking.metric_label(), "count");
    }

    #[test]
    fn test_n_larger_than_groups() {
        let ranking = top_n(
            &platforms(),
            GroupColumn::Platform,
            50,
            MeasureColumn::GlobalSales,
            Aggregation::Sum,
        )
        .unwrap();

        assert_eq!(ranking.entries.len(), 6);
    }

    #[test]
    fn test_zero_n_rejected() {
        let err = top_n(
            &platforms(),
            GroupColumn::Platform,
            0,
            MeasureColumn::GlobalSales,
            Aggregation::Sum,
        )
        .unwrap_err();

        assert!(matches!(err, AnalysisError::InvalidArgument(_)));
    }

    #[test]
    fn test_tie_break_is_deterministic() {
        let records = vec![
            record("Zeta", "Action", 10.0),
            record("Alpha", "Action", 10.0),
            record("Mid", "Action", 10.0),
        ];
        let ranking = top_n(
            &records,
            GroupColumn::Platform,
            3,
            MeasureColumn::GlobalSales,
            Aggregation::Sum,
        )
        .unwrap();

        let order: Vec<&str> = ranking.entries.iter().map(|e| e.group.as_str()).collect();
        assert_eq!(order, vec!["Alpha", "Mid", "Zeta"]);
    }

    #[test]
    fn test_selector_parsing() {
        assert_eq!("platform".parse::<GroupColumn>().unwrap(), GroupColumn::Platform);
        assert_eq!("Sales_Category".parse::<GroupColumn>().unwrap(), GroupColumn::SalesCategory);
        assert_eq!("na".parse::<MeasureColumn>().unwrap(), MeasureColumn::NaSales);
        assert_eq!("mean".parse::<Aggregation>().unwrap(), Aggregation::Mean);

        assert!(matches!(
            "median".parse::<Aggregation>(),
            Err(AnalysisError::InvalidArgument(_))
        ));
        assert!(matches!(
            "Score".parse::<MeasureColumn>(),
            Err(AnalysisError::InvalidArgument(_))
        ));
    }
}
