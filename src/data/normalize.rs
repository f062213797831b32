use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate, NaiveTime};

use super::error::{CatalogError, Result};
use super::model::{CellValue, RawTable};

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Canonical column names used after renaming.
pub mod column {
    pub const DATE: &str = "Date";
    pub const LATITUDE: &str = "Latitude";
    pub const LONGITUDE: &str = "Longitude";
    pub const DEPTH: &str = "Depth";
    pub const LOCATION: &str = "Location";
    pub const MAGNITUDE: &str = "xM";
}

/// Source header → canonical header. Anything not listed passes through.
pub const COLUMN_RENAMES: [(&str, &str); 5] = [
    ("Olus tarihi", column::DATE),
    ("Enlem", column::LATITUDE),
    ("Boylam", column::LONGITUDE),
    ("Derinlik", column::DEPTH),
    ("Yer", column::LOCATION),
];

/// Pass-through column holding the origin time of day, when present.
pub const ORIGIN_TIME_COLUMN: &str = "Olus zamani";

/// Strict template for the date column.
pub const DATE_FORMAT: &str = "%Y.%m.%d";

/// Replacement for a missing location.
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// Map a source header to its canonical name.
pub fn canonical_name(header: &str) -> &str {
    COLUMN_RENAMES
        .iter()
        .find(|(source, _)| *source == header)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(header)
}

/// Column positions resolved once against the renamed headers.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    date: usize,
    latitude: usize,
    longitude: usize,
    depth: usize,
    location: usize,
    magnitude: usize,
    origin_time: Option<usize>,
    /// (position, name) of every column outside the canonical six.
    extras: Vec<(usize, String)>,
}

impl Schema {
    pub fn resolve(headers: &[String]) -> Result<Self> {
        let renamed: Vec<&str> = headers.iter().map(|h| canonical_name(h)).collect();
        let canonical = [
            column::DATE,
            column::LATITUDE,
            column::LONGITUDE,
            column::DEPTH,
            column::LOCATION,
            column::MAGNITUDE,
        ];

        for (i, name) in renamed.iter().enumerate() {
            if canonical.contains(name) && renamed[..i].contains(name) {
                return Err(CatalogError::DuplicateColumn(name.to_string()));
            }
        }

        let find = |name: &'static str| {
            renamed
                .iter()
                .position(|h| *h == name)
                .ok_or(CatalogError::MissingColumn(name))
        };

        let (positions, names): (Vec<usize>, Vec<&str>) = renamed
            .iter()
            .enumerate()
            .filter(|(_, h)| !canonical.contains(*h))
            .map(|(i, h)| (i, *h))
            .unzip();
        let extras = positions.into_iter().zip(unique_names(&names)).collect();

        Ok(Schema {
            date: find(column::DATE)?,
            latitude: find(column::LATITUDE)?,
            longitude: find(column::LONGITUDE)?,
            depth: find(column::DEPTH)?,
            location: find(column::LOCATION)?,
            magnitude: find(column::MAGNITUDE)?,
            origin_time: renamed.iter().position(|h| *h == ORIGIN_TIME_COLUMN),
            extras,
        })
    }

    /// Names of the pass-through columns, in source order.
    pub fn extra_columns(&self) -> Vec<String> {
        self.extras.iter().map(|(_, name)| name.clone()).collect()
    }
}

/// Suffix repeated names with `.1`, `.2`, … so every pass-through column
/// keeps its own key. A suffix never reuses a name already in the header.
fn unique_names(names: &[&str]) -> Vec<String> {
    let mut taken: BTreeSet<String> = names.iter().map(|n| n.to_string()).collect();
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();

    names
        .iter()
        .map(|&name| {
            let count = seen.entry(name).or_insert(0);
            let unique = if *count == 0 {
                name.to_string()
            } else {
                let mut n = *count;
                loop {
                    let candidate = format!("{name}.{n}");
                    if !taken.contains(&candidate) {
                        *count = n;
                        break candidate;
                    }
                    n += 1;
                }
            };
            *count += 1;
            taken.insert(unique.clone());
            unique
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Normalized rows
// ---------------------------------------------------------------------------

/// A row with canonical, typed fields but before any quality gate runs.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub year: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub depth: Option<f64>,
    pub magnitude: Option<f64>,
    pub location: String,
    pub extras: BTreeMap<String, CellValue>,
}

/// Apply `schema` to one raw row.
pub fn normalize_row(schema: &Schema, row: &[CellValue]) -> NormalizedRow {
    static NULL: CellValue = CellValue::Null;
    let cell = |i: usize| row.get(i).unwrap_or(&NULL);

    let date = parse_date(cell(schema.date));
    let location = match cell(schema.location) {
        CellValue::Null => UNKNOWN_LOCATION.to_string(),
        other => other.to_string(),
    };

    NormalizedRow {
        date,
        time: schema.origin_time.and_then(|i| parse_time(cell(i))),
        year: date.map(|d| d.year()),
        latitude: cell(schema.latitude).as_f64(),
        longitude: cell(schema.longitude).as_f64(),
        depth: cell(schema.depth).as_f64(),
        magnitude: cell(schema.magnitude).as_f64(),
        location,
        extras: schema
            .extras
            .iter()
            .map(|(i, name)| (name.clone(), cell(*i).clone()))
            .collect(),
    }
}

/// Resolve the schema and normalize every row of `table`.
pub fn normalize(table: &RawTable) -> Result<(Schema, Vec<NormalizedRow>)> {
    let schema = Schema::resolve(&table.headers)?;
    let rows = table
        .rows
        .iter()
        .map(|row| normalize_row(&schema, row))
        .collect();
    Ok((schema, rows))
}

/// Parse a `YYYY.MM.DD` date. Anything else, including non-string cells,
/// yields `None`.
pub fn parse_date(cell: &CellValue) -> Option<NaiveDate> {
    let text = cell.as_str()?.trim();
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

fn parse_time(cell: &CellValue) -> Option<NaiveTime> {
    let text = cell.as_str()?.trim();
    NaiveTime::parse_from_str(text, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn turkish_headers() -> Vec<String> {
        headers(&[
            "No",
            "Olus tarihi",
            "Olus zamani",
            "Enlem",
            "Boylam",
            "Derinlik",
            "xM",
            "Yer",
        ])
    }

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    #[test]
    fn renames_only_mapped_headers() {
        assert_eq!(canonical_name("Enlem"), "Latitude");
        assert_eq!(canonical_name("Yer"), "Location");
        assert_eq!(canonical_name("MD"), "MD");
        assert_eq!(canonical_name("xM"), "xM");
    }

    #[test]
    fn schema_keeps_unmapped_columns_as_extras() {
        let schema = Schema::resolve(&turkish_headers()).unwrap();
        assert_eq!(schema.extra_columns(), vec!["No", "Olus zamani"]);
    }

    #[test]
    fn schema_accepts_canonical_headers() {
        let h = headers(&["Date", "Latitude", "Longitude", "Depth", "Location", "xM"]);
        let schema = Schema::resolve(&h).unwrap();
        assert!(schema.extra_columns().is_empty());
    }

    #[test]
    fn missing_column_is_fatal() {
        let h = headers(&["Olus tarihi", "Enlem", "Boylam", "Yer", "xM"]);
        let err = Schema::resolve(&h).unwrap_err();
        assert!(matches!(err, CatalogError::MissingColumn("Depth")));
    }

    #[test]
    fn duplicate_after_rename_is_fatal() {
        let h = headers(&["Enlem", "Latitude", "Boylam", "Derinlik", "Yer", "xM", "Olus tarihi"]);
        let err = Schema::resolve(&h).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateColumn(name) if name == "Latitude"));
    }

    #[test]
    fn repeated_pass_through_columns_get_suffixes() {
        let h = headers(&[
            "MD",
            "Olus tarihi",
            "Enlem",
            "Boylam",
            "Derinlik",
            "xM",
            "Yer",
            "MD",
            "",
            "",
        ]);
        let schema = Schema::resolve(&h).unwrap();
        assert_eq!(schema.extra_columns(), vec!["MD", "MD.1", "", ".1"]);

        let row: Vec<CellValue> = (0..h.len() as i64).map(CellValue::Integer).collect();
        let norm = normalize_row(&schema, &row);
        assert_eq!(norm.extras.len(), 4);
        assert_eq!(norm.extras.get("MD"), Some(&CellValue::Integer(0)));
        assert_eq!(norm.extras.get("MD.1"), Some(&CellValue::Integer(7)));
    }

    #[test]
    fn suffix_skips_names_already_in_the_header() {
        assert_eq!(unique_names(&["MD.1", "MD", "MD"]), vec!["MD.1", "MD", "MD.2"]);
    }

    #[test]
    fn date_uses_strict_template() {
        let date = parse_date(&s("2023.02.06")).unwrap();
        assert_eq!(date.year(), 2023);
        assert_eq!(parse_date(&s("06-02-2023")), None);
        assert_eq!(parse_date(&s("2023-02-06")), None);
        assert_eq!(parse_date(&CellValue::Integer(20230206)), None);
        assert_eq!(parse_date(&CellValue::Null), None);
    }

    #[test]
    fn row_with_bad_date_is_kept_with_null_year() {
        let schema = Schema::resolve(&turkish_headers()).unwrap();
        let row = vec![
            CellValue::Integer(1),
            s("06-02-2023"),
            s("01:17:32.82"),
            CellValue::Float(37.17),
            CellValue::Float(37.03),
            CellValue::Float(8.6),
            CellValue::Float(7.7),
            s("PAZARCIK (KAHRAMANMARAS)"),
        ];
        let norm = normalize_row(&schema, &row);

        assert_eq!(norm.date, None);
        assert_eq!(norm.year, None);
        assert_eq!(norm.latitude, Some(37.17));
        assert_eq!(norm.magnitude, Some(7.7));
        assert_eq!(norm.time, NaiveTime::from_hms_milli_opt(1, 17, 32, 820));
        assert_eq!(norm.extras.get("No"), Some(&CellValue::Integer(1)));
    }

    #[test]
    fn null_location_becomes_unknown() {
        let schema = Schema::resolve(&turkish_headers()).unwrap();
        let row = vec![
            CellValue::Integer(2),
            s("1999.08.17"),
            CellValue::Null,
            CellValue::Float(40.7),
            CellValue::Float(29.9),
            CellValue::Float(17.0),
            CellValue::Float(7.4),
            CellValue::Null,
        ];
        let norm = normalize_row(&schema, &row);

        assert_eq!(norm.location, UNKNOWN_LOCATION);
        assert_eq!(norm.year, Some(1999));
        assert_eq!(norm.time, None);
    }
}
