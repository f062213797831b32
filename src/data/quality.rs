//! Fixed data-quality gates applied once while cleaning.

use std::ops::RangeInclusive;

use super::normalize::NormalizedRow;

/// Approximate national bounding box, inclusive.
pub const LATITUDE_BOUNDS: RangeInclusive<f64> = 35.0..=43.0;
pub const LONGITUDE_BOUNDS: RangeInclusive<f64> = 25.0..=45.0;

/// Validated numeric fields of a row that passed every gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accepted {
    pub latitude: f64,
    pub longitude: f64,
    pub depth: f64,
    pub magnitude: f64,
}

/// Run every gate; `None` means the row is dropped.
pub fn check(row: &NormalizedRow) -> Option<Accepted> {
    let latitude = row.latitude.filter(|v| LATITUDE_BOUNDS.contains(v))?;
    let longitude = row.longitude.filter(|v| LONGITUDE_BOUNDS.contains(v))?;
    let depth = row.depth.filter(|v| *v >= 0.0)?;
    let magnitude = row.magnitude.filter(|v| *v > 0.0)?;
    Some(Accepted {
        latitude,
        longitude,
        depth,
        magnitude,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn row(lat: Option<f64>, lon: Option<f64>, depth: Option<f64>, mag: Option<f64>) -> NormalizedRow {
        NormalizedRow {
            date: None,
            time: None,
            year: None,
            latitude: lat,
            longitude: lon,
            depth,
            magnitude: mag,
            location: "Unknown".into(),
            extras: BTreeMap::new(),
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(check(&row(Some(35.0), Some(25.0), Some(0.0), Some(0.1))).is_some());
        assert!(check(&row(Some(43.0), Some(45.0), Some(700.0), Some(9.0))).is_some());
    }

    #[test]
    fn out_of_box_coordinates_are_dropped() {
        assert!(check(&row(Some(34.99), Some(30.0), Some(5.0), Some(4.0))).is_none());
        assert!(check(&row(Some(43.01), Some(30.0), Some(5.0), Some(4.0))).is_none());
        assert!(check(&row(Some(39.0), Some(24.9), Some(5.0), Some(4.0))).is_none());
        assert!(check(&row(Some(39.0), Some(45.1), Some(5.0), Some(4.0))).is_none());
    }

    #[test]
    fn missing_fields_are_dropped() {
        assert!(check(&row(None, Some(30.0), Some(5.0), Some(4.0))).is_none());
        assert!(check(&row(Some(39.0), None, Some(5.0), Some(4.0))).is_none());
        assert!(check(&row(Some(39.0), Some(30.0), None, Some(4.0))).is_none());
        assert!(check(&row(Some(39.0), Some(30.0), Some(5.0), None)).is_none());
    }

    #[test]
    fn negative_depth_and_zero_magnitude_are_dropped() {
        assert!(check(&row(Some(39.0), Some(30.0), Some(-0.1), Some(4.0))).is_none());
        assert!(check(&row(Some(39.0), Some(30.0), Some(5.0), Some(0.0))).is_none());
        assert!(check(&row(Some(39.0), Some(30.0), Some(5.0), Some(-1.0))).is_none());
    }
}
