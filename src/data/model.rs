use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};

// ---------------------------------------------------------------------------
// CellValue – a single cell of the raw source table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell as read from CSV or Parquet, before the schema
/// is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Interpret the cell as a number. Numeric strings are accepted since
    /// some exports quote every field.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) if v.is_finite() => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Borrow the text of a string cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// RawTable – loader output
// ---------------------------------------------------------------------------

/// Headers and rows exactly as they appear in the source resource.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    /// Every row has `headers.len()` cells.
    pub rows: Vec<Vec<CellValue>>,
}

// ---------------------------------------------------------------------------
// EarthquakeRecord – one row of the cleaned catalog
// ---------------------------------------------------------------------------

/// A single event that survived cleaning.
///
/// Coordinates, depth and magnitude are guaranteed to satisfy the quality
/// gates in [`crate::data::quality`]; `region` is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeRecord {
    pub date: Option<NaiveDate>,
    /// Origin time, when the source carries one.
    pub time: Option<NaiveTime>,
    pub year: Option<i32>,
    pub latitude: f64,
    pub longitude: f64,
    /// Kilometres.
    pub depth: f64,
    /// The `xM` column.
    pub magnitude: f64,
    pub location: String,
    pub region: String,
    /// Columns outside the canonical schema, carried through untouched.
    pub extras: BTreeMap<String, CellValue>,
}

// ---------------------------------------------------------------------------
// Catalog – the cleaned, immutable dataset
// ---------------------------------------------------------------------------

/// The full cleaned dataset. Built once per load and never mutated.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub records: Vec<EarthquakeRecord>,
    /// Names of the pass-through columns, in source order.
    pub extra_columns: Vec<String>,
    pub source: PathBuf,
}

impl Catalog {
    /// Number of events.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest year among dated events.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let mut years = self.records.iter().filter_map(|r| r.year);
        let first = years.next()?;
        Some(years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }

    /// Smallest and largest magnitude.
    pub fn magnitude_bounds(&self) -> Option<(f64, f64)> {
        min_max(self.records.iter().map(|r| r.magnitude))
    }

    /// Deepest event, in kilometres.
    pub fn max_depth(&self) -> Option<f64> {
        min_max(self.records.iter().map(|r| r.depth)).map(|(_, hi)| hi)
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a record with sensible defaults for tests elsewhere in the crate.
    pub(crate) fn record(region: &str, year: i32, magnitude: f64, depth: f64) -> EarthquakeRecord {
        EarthquakeRecord {
            date: NaiveDate::from_ymd_opt(year, 1, 1),
            time: None,
            year: Some(year),
            latitude: 39.0,
            longitude: 35.0,
            depth,
            magnitude,
            location: region.to_string(),
            region: region.to_string(),
            extras: BTreeMap::new(),
        }
    }

    #[test]
    fn cell_as_f64_accepts_numeric_strings() {
        assert_eq!(CellValue::String(" 38.5 ".into()).as_f64(), Some(38.5));
        assert_eq!(CellValue::Integer(7).as_f64(), Some(7.0));
        assert_eq!(CellValue::String("north".into()).as_f64(), None);
        assert_eq!(CellValue::Float(f64::NAN).as_f64(), None);
        assert_eq!(CellValue::Null.as_f64(), None);
    }

    #[test]
    fn bounds_ignore_undated_events() {
        let mut undated = record("Van", 1990, 4.0, 10.0);
        undated.date = None;
        undated.year = None;
        let catalog = Catalog {
            records: vec![
                record("Van", 2001, 3.1, 5.0),
                undated,
                record("Izmir", 1999, 6.2, 120.0),
            ],
            extra_columns: Vec::new(),
            source: PathBuf::from("test.csv"),
        };

        assert_eq!(catalog.year_bounds(), Some((1999, 2001)));
        assert_eq!(catalog.magnitude_bounds(), Some((3.1, 6.2)));
        assert_eq!(catalog.max_depth(), Some(120.0));
    }

    #[test]
    fn empty_catalog_has_no_bounds() {
        let catalog = Catalog {
            records: Vec::new(),
            extra_columns: Vec::new(),
            source: PathBuf::new(),
        };
        assert!(catalog.is_empty());
        assert_eq!(catalog.year_bounds(), None);
        assert_eq!(catalog.magnitude_bounds(), None);
        assert_eq!(catalog.max_depth(), None);
    }
}
