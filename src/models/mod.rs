//! Domain models for the sales analytics core.
//!
//! This module contains the data structures shared across the crate:
//!
//! - [`GameRecord`] - one row of the sales dataset
//! - [`Region`] - the four sales regions with their display labels
//!
//! The dataset is an ordered `Vec<GameRecord>` treated as read-only by
//! every analysis operation: filters and aggregations always return new
//! values, never mutate their input.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Region
// =============================================================================

/// One of the four sales regions tracked per record.
///
/// Display labels follow the dataset's Spanish convention
/// (`Norteamérica`, `Europa`, `Japón`, `Otros`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    /// North America
    Na,
    /// Europe
    Eu,
    /// Japan
    Jp,
    /// Rest of the world
    Other,
}

impl Region {
    /// All regions in canonical order.
    pub const ALL: [Region; 4] = [Region::Na, Region::Eu, Region::Jp, Region::Other];

    /// Parse a region from a code or display name.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_uppercase();
        match normalized.as_str() {
            "NA" | "NA_SALES" | "NORTEAMÉRICA" | "NORTEAMERICA" | "NORTH AMERICA" => {
                Some(Self::Na)
            }
            "EU" | "EU_SALES" | "EUROPA" | "EUROPE" => Some(Self::Eu),
            "JP" | "JP_SALES" | "JAPÓN" | "JAPON" | "JAPAN" => Some(Self::Jp),
            "OTHER" | "OTHER_SALES" | "OTROS" | "REST OF WORLD" => Some(Self::Other),
            _ => None,
        }
    }

    /// Short region code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Na => "NA",
            Self::Eu => "EU",
            Self::Jp => "JP",
            Self::Other => "Other",
        }
    }

    /// Display label as used by the dataset and the reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Na => "Norteamérica",
            Self::Eu => "Europa",
            Self::Jp => "Japón",
            Self::Other => "Otros",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::from_name(s).ok_or_else(|| format!("unknown region '{}'", s))
    }
}

impl Serialize for Region {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Region {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Region::from_name(&s)
            .ok_or_else(|| de::Error::custom(format!("unknown region '{}'", s)))
    }
}

// =============================================================================
// Game Record
// =============================================================================

/// One game in the sales dataset.
///
/// Field names map 1:1 onto the CSV schema. `Global_Sales` is nominally the
/// sum of the four regional columns; the core trusts this invariant and
/// never re-validates it. `Dominant_Region` and `Sales_Category` are
/// derived upstream of this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Global sales rank (not contiguous after filtering).
    #[serde(rename = "Rank")]
    pub rank: u32,

    /// Game title.
    #[serde(rename = "Name")]
    pub name: String,

    /// Hardware platform.
    #[serde(rename = "Platform")]
    pub platform: String,

    /// Release year. Some exports carry it as a float ("2006.0");
    /// it is truncated to an integer on the way in.
    #[serde(rename = "Year", deserialize_with = "de_year")]
    pub year: u16,

    /// Genre category.
    #[serde(rename = "Genre")]
    pub genre: String,

    /// Publishing company.
    #[serde(rename = "Publisher")]
    pub publisher: String,

    /// North America sales, millions of units.
    #[serde(rename = "NA_Sales")]
    pub na_sales: f64,

    /// Europe sales, millions of units.
    #[serde(rename = "EU_Sales")]
    pub eu_sales: f64,

    /// Japan sales, millions of units.
    #[serde(rename = "JP_Sales")]
    pub jp_sales: f64,

    /// Rest-of-world sales, millions of units.
    #[serde(rename = "Other_Sales")]
    pub other_sales: f64,

    /// Worldwide sales, millions of units.
    #[serde(rename = "Global_Sales")]
    pub global_sales: f64,

    /// Region with the highest sales for this record (derived upstream).
    #[serde(rename = "Dominant_Region")]
    pub dominant_region: Region,

    /// Bucketed sales-volume classification (derived upstream).
    #[serde(rename = "Sales_Category")]
    pub sales_category: String,
}

impl GameRecord {
    /// Sales figure for a single region.
    pub fn regional_sales(&self, region: Region) -> f64 {
        match region {
            Region::Na => self.na_sales,
            Region::Eu => self.eu_sales,
            Region::Jp => self.jp_sales,
            Region::Other => self.other_sales,
        }
    }
}

/// Accept "2006", "2006.0" or a numeric value for the year column.
fn de_year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let trimmed = raw.trim();

    if let Ok(year) = trimmed.parse::<u16>() {
        return Ok(year);
    }
    if let Ok(year) = trimmed.parse::<f64>() {
        if year.fract() == 0.0 && year >= 0.0 && year <= u16::MAX as f64 {
            return Ok(year as u16);
        }
    }
    Err(de::Error::custom(format!("invalid year '{}'", raw)))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_from_name() {
        assert_eq!(Region::from_name("NA"), Some(Region::Na));
        assert_eq!(Region::from_name("Norteamérica"), Some(Region::Na));
        assert_eq!(Region::from_name("japón"), Some(Region::Jp));
        assert_eq!(Region::from_name("Otros"), Some(Region::Other));
        assert_eq!(Region::from_name("Atlantis"), None);
    }

    #[test]
    fn test_region_roundtrip() {
        for region in Region::ALL {
            assert_eq!(Region::from_name(region.label()), Some(region));
            assert_eq!(Region::from_name(region.code()), Some(region));
        }
    }

    #[test]
    fn test_record_csv_deserialization() {
        let csv = "Rank,Name,Platform,Year,Genre,Publisher,NA_Sales,EU_Sales,JP_Sales,Other_Sales,Global_Sales,Dominant_Region,Sales_Category\n\
                   1,Wii Sports,Wii,2006.0,Sports,Nintendo,41.49,29.02,3.77,8.46,82.74,Norteamérica,Alta";
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let record: GameRecord = reader.deserialize().next().unwrap().unwrap();

        assert_eq!(record.name, "Wii Sports");
        assert_eq!(record.year, 2006);
        assert_eq!(record.dominant_region, Region::Na);
        assert_eq!(record.regional_sales(Region::Eu), 29.02);
    }

    #[test]
    fn test_region_json_key() {
        let json = serde_json::to_string(&Region::Na).unwrap();
        assert_eq!(json, "\"Norteamérica\"");
    }
}
