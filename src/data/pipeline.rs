use std::path::{Path, PathBuf};

use super::error::Result;
use super::model::{Catalog, EarthquakeRecord, RawTable};
use super::{loader, normalize, quality, region};

/// Load a catalog file and run the full cleaning pipeline over it.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let table = loader::load_file(path)?;
    let catalog = clean_table(&table, path.to_path_buf())?;
    log::info!(
        "Loaded {} events from {} ({} extra columns)",
        catalog.len(),
        path.display(),
        catalog.extra_columns.len()
    );
    Ok(catalog)
}

/// Normalize, gate and label every row of a raw table.
///
/// Rows failing a quality gate are dropped without trace.
pub fn clean_table(table: &RawTable, source: PathBuf) -> Result<Catalog> {
    let (schema, rows) = normalize::normalize(table)?;

    let records = rows
        .into_iter()
        .filter_map(|row| {
            let accepted = quality::check(&row)?;
            let region = region::extract_region(&row.location);
            Some(EarthquakeRecord {
                date: row.date,
                time: row.time,
                year: row.year,
                latitude: accepted.latitude,
                longitude: accepted.longitude,
                depth: accepted.depth,
                magnitude: accepted.magnitude,
                location: row.location,
                region,
                extras: row.extras,
            })
        })
        .collect();

    Ok(Catalog {
        records,
        extra_columns: schema.extra_columns(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_csv;

    const SAMPLE: &str = "\
No,Olus tarihi,Enlem,Boylam,Derinlik,xM,Yer
1,2023.02.06,37.17,37.03,8.6,7.7,PAZARCIK (KAHRAMANMARAS)
2,06-02-2023,38.02,37.20,10.0,7.6,Elbistan-Ekinozu
3,2020.01.24,38.36,39.06,6.7,6.8,Sivrice Elazig
4,2020.01.24,50.00,39.06,6.7,6.8,outside box
5,2020.01.24,38.00,39.06,-1.0,4.0,negative depth
6,2020.01.24,38.00,39.06,5.0,0.0,zero magnitude
7,2011.10.23,38.72,43.51,19.0,7.2,
8,2011.10.23,,43.51,19.0,7.2,no latitude
";

    #[test]
    fn cleaning_applies_every_stage() {
        let table = read_csv(SAMPLE.as_bytes()).unwrap();
        let catalog = clean_table(&table, PathBuf::from("sample.csv")).unwrap();

        let regions: Vec<&str> = catalog.records.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(regions, vec!["KAHRAMANMARAS", "Ekinozu", "Sivrice", "Unknown"]);

        // Bad date keeps the row with no year.
        assert_eq!(catalog.records[1].year, None);
        assert_eq!(catalog.records[0].year, Some(2023));
        assert_eq!(catalog.records[3].location, "Unknown");
        assert_eq!(catalog.extra_columns, vec!["No"]);
    }

    #[test]
    fn cleaned_rows_satisfy_quality_gates() {
        let table = read_csv(SAMPLE.as_bytes()).unwrap();
        let catalog = clean_table(&table, PathBuf::from("sample.csv")).unwrap();

        for r in &catalog.records {
            assert!((35.0..=43.0).contains(&r.latitude));
            assert!((25.0..=45.0).contains(&r.longitude));
            assert!(r.depth >= 0.0);
            assert!(r.magnitude > 0.0);
            assert!(!r.region.is_empty());
        }
    }
}
