//! Dataset loader with encoding and delimiter auto-detection.
//!
//! Reads the cleaned video-game sales CSV into a [`Dataset`]. The loader
//! validates the header against the required schema before touching any
//! row, so a malformed export fails fast with the full list of missing
//! columns instead of surfacing a field error deep inside an aggregation.

use crate::error::{LoadError, LoadResult};
use crate::models::GameRecord;
use std::path::Path;

/// Columns every dataset file must carry.
pub const REQUIRED_COLUMNS: [&str; 13] = [
    "Rank",
    "Name",
    "Platform",
    "Year",
    "Genre",
    "Publisher",
    "NA_Sales",
    "EU_Sales",
    "JP_Sales",
    "Other_Sales",
    "Global_Sales",
    "Dominant_Region",
    "Sales_Category",
];

/// A loaded dataset with parse metadata.
///
/// The record list is read-only for the rest of the crate; every analysis
/// operation derives new values from it.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Parsed records, in file order.
    pub records: Vec<GameRecord>,
    /// Detected encoding.
    pub encoding: String,
    /// Detected delimiter.
    pub delimiter: char,
    /// Column headers, in file order.
    pub headers: Vec<String>,
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding.
pub fn decode_content(bytes: &[u8], encoding: &str) -> LoadResult<String> {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8(bytes.to_vec())
            .map_err(|_| LoadError::Encoding("utf-8".to_string())),
        "iso-8859-1" | "latin-1" | "latin1" => {
            Ok(encoding_rs::ISO_8859_15.decode(bytes).0.to_string())
        }
        "windows-1252" | "cp1252" => {
            Ok(encoding_rs::WINDOWS_1252.decode(bytes).0.to_string())
        }
        _ => {
            // Fallback: UTF-8 with lossy conversion
            Ok(String::from_utf8_lossy(bytes).to_string())
        }
    }
}

/// Detect the delimiter by counting occurrences in the first line.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Check the header row against [`REQUIRED_COLUMNS`].
///
/// Returns every missing column at once so the caller sees the whole
/// problem, not just the first field the parser happened to need.
pub fn validate_schema(headers: &[String]) -> LoadResult<()> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .map(|col| col.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(LoadError::MissingColumns(missing))
    }
}

/// Load a dataset file with auto-detection of encoding and delimiter.
///
/// # Example
/// ```ignore
/// let dataset = load_dataset("data/vgsales_clean.csv")?;
/// println!("{} records ({}, '{}')", dataset.records.len(),
///     dataset.encoding, dataset.delimiter);
/// ```
pub fn load_dataset<P: AsRef<Path>>(path: P) -> LoadResult<Dataset> {
    let bytes = std::fs::read(path.as_ref())?;
    load_dataset_bytes(&bytes)
}

/// Load a dataset from raw CSV bytes with auto-detection.
pub fn load_dataset_bytes(bytes: &[u8]) -> LoadResult<Dataset> {
    if bytes.is_empty() {
        return Err(LoadError::EmptyFile);
    }

    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = detect_delimiter(&content);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_matches('"').to_string())
        .collect();

    validate_schema(&headers)?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: GameRecord = row?;
        records.push(record);
    }

    if records.is_empty() {
        return Err(LoadError::EmptyFile);
    }

    Ok(Dataset {
        records,
        encoding,
        delimiter,
        headers,
    })
}
