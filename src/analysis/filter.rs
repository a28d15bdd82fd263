//! Multi-criteria dataset filtering.
//!
//! [`FilterCriteria`] is the typed form of the dashboard's sidebar
//! selections: an inclusive year range plus inclusion lists per
//! categorical column. Each criterion is independently optional, an
//! absent or empty criterion imposes no restriction, and all present
//! criteria compose by logical AND. Applying criteria always produces a
//! new record vector; the input view is never touched.

use crate::models::{GameRecord, Region};
use serde::{Deserialize, Serialize};

/// A conjunction of optional filter predicates.
///
/// Criteria loaded from JSON reject unrecognized keys at construction
/// time (`deny_unknown_fields`), so a typo like `"genre"` for `"genres"`
/// fails loudly instead of silently filtering nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterCriteria {
    /// Inclusive (min, max) release-year range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_range: Option<(u16, u16)>,

    /// Genres to keep.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,

    /// Platforms to keep.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub platforms: Vec<String>,

    /// Publishers to keep.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub publishers: Vec<String>,

    /// Dominant regions to keep.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<Region>,

    /// Sales categories to keep.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sales_categories: Vec<String>,
}

impl FilterCriteria {
    /// Criteria with no restrictions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to an inclusive year range.
    pub fn with_year_range(mut self, min: u16, max: u16) -> Self {
        self.year_range = Some((min, max));
        self
    }

    /// Restrict to the given genres.
    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict to the given platforms.
    pub fn with_platforms<I, S>(mut self, platforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.platforms = platforms.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict to the given publishers.
    pub fn with_publishers<I, S>(mut self, publishers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.publishers = publishers.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict to records dominated by the given regions.
    pub fn with_regions<I: IntoIterator<Item = Region>>(mut self, regions: I) -> Self {
        self.regions = regions.into_iter().collect();
        self
    }

    /// Restrict to the given sales categories.
    pub fn with_sales_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sales_categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Parse criteria from a JSON object, rejecting unknown keys.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// True when no criterion restricts anything.
    pub fn is_unrestricted(&self) -> bool {
        self.year_range.is_none()
            && self.genres.is_empty()
            && self.platforms.is_empty()
            && self.publishers.is_empty()
            && self.regions.is_empty()
            && self.sales_categories.is_empty()
    }

    /// Whether a single record satisfies every present criterion.
    pub fn matches(&self, record: &GameRecord) -> bool {
        if let Some((min, max)) = self.year_range {
            if record.year < min || record.year > max {
                return false;
            }
        }
        if !self.genres.is_empty() && !self.genres.contains(&record.genre) {
            return false;
        }
        if !self.platforms.is_empty() && !self.platforms.contains(&record.platform) {
            return false;
        }
        if !self.publishers.is_empty() && !self.publishers.contains(&record.publisher) {
            return false;
        }
        if !self.regions.is_empty() && !self.regions.contains(&record.dominant_region) {
            return false;
        }
        if !self.sales_categories.is_empty()
            && !self.sales_categories.contains(&record.sales_category)
        {
            return false;
        }
        true
    }

    /// Produce the restricted view of a dataset.
    ///
    /// An empty result is a valid, displayable state, not an error; the
    /// caller decides how to render it. Filtering is idempotent.
    pub fn apply(&self, records: &[GameRecord]) -> Vec<GameRecord> {
        records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, platform: &str, year: u16, genre: &str) -> GameRecord {
        GameRecord {
            rank: 1,
            name: name.to_string(),
            platform: platform.to_string(),
            year,
            genre: genre.to_string(),
            publisher: "Nintendo".to_string(),
            na_sales: 1.0,
            eu_sales: 0.5,
            jp_sales: 0.25,
            other_sales: 0.25,
            global_sales: 2.0,
            dominant_region: Region::Na,
            sales_category: "Media".to_string(),
        }
    }

    fn dataset() -> Vec<GameRecord> {
        vec![
            record("A", "Wii", 1998, "Sports"),
            record("B", "PS2", 2004, "Action"),
            record("C", "Wii", 2006, "Sports"),
            record("D", "X360", 2009, "Shooter"),
            record("E", "PS3", 2012, "Action"),
        ]
    }

    #[test]
    fn test_no_criteria_is_identity() {
        let records = dataset();
        let filtered = FilterCriteria::new().apply(&records);

        assert_eq!(filtered, records);
    }

    #[test]
    fn test_year_range() {
        let criteria = FilterCriteria::new().with_year_range(2000, 2010);
        let filtered = criteria.apply(&dataset());

        let names: Vec<&str> = filtered.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C", "D"]);
        assert!(filtered.iter().all(|r| r.year >= 2000 && r.year <= 2010));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let criteria = FilterCriteria::new()
            .with_year_range(2000, 2010)
            .with_genres(["Action", "Shooter"]);

        let once = criteria.apply(&dataset());
        let twice = criteria.apply(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_criteria_and_compose() {
        let criteria = FilterCriteria::new()
            .with_year_range(2000, 2012)
            .with_platforms(["Wii", "PS3"])
            .with_genres(["Action"]);

        let filtered = criteria.apply(&dataset());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "E");
    }

    #[test]
    fn test_unknown_value_gives_empty_result() {
        let criteria = FilterCriteria::new().with_platforms(["Dreamcast"]);
        let filtered = criteria.apply(&dataset());

        // Valid empty state, not an error.
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_region_criterion() {
        let mut records = dataset();
        records[3].dominant_region = Region::Jp;

        let criteria = FilterCriteria::new().with_regions([Region::Jp]);
        let filtered = criteria.apply(&records);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "D");
    }

    #[test]
    fn test_json_criteria() {
        let criteria = FilterCriteria::from_json(
            r#"{ "year_range": [2000, 2010], "genres": ["Sports"], "regions": ["Norteamérica"] }"#,
        )
        .unwrap();

        assert_eq!(criteria.year_range, Some((2000, 2010)));
        assert_eq!(criteria.genres, vec!["Sports"]);
        assert_eq!(criteria.regions, vec![Region::Na]);
    }

    #[test]
    fn test_unknown_json_key_rejected() {
        let result = FilterCriteria::from_json(r#"{ "genre": ["Sports"] }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_is_unrestricted() {
        assert!(FilterCriteria::new().is_unrestricted());
        assert!(!FilterCriteria::new().with_year_range(2000, 2001).is_unrestricted());
    }
}
