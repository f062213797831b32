//! Heuristic region labels derived from free-text locations.
//!
//! Rules, first match wins:
//! 1. the trimmed text of the first `( ... )` group
//! 2. otherwise, with a `-` present, the first word of the last segment
//! 3. otherwise the first word of the whole string
//!
//! An empty result from any rule becomes [`UNKNOWN_REGION`]. Labels are not
//! normalized: "Van (Ercis)" and "Ercis-Van" name the same area differently.

use once_cell::sync::Lazy;
use regex::Regex;

pub const UNKNOWN_REGION: &str = "Unknown";

static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)]+)\)").expect("parenthetical pattern is valid"));

/// Derive the region label for a location string.
pub fn extract_region(location: &str) -> String {
    let label = if let Some(caps) = PARENTHETICAL.captures(location) {
        caps.get(1).map_or("", |m| m.as_str().trim())
    } else if location.contains('-') {
        location
            .rsplit('-')
            .next()
            .and_then(|last| last.split_whitespace().next())
            .unwrap_or("")
    } else {
        location.split_whitespace().next().unwrap_or("")
    };

    if label.is_empty() {
        UNKNOWN_REGION.to_string()
    } else {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parenthetical_wins() {
        assert_eq!(extract_region("Van (Ercis)"), "Ercis");
        assert_eq!(extract_region("PAZARCIK (KAHRAMANMARAS)"), "KAHRAMANMARAS");
        assert_eq!(extract_region("Elbistan-Nurhak ( Malatya )"), "Malatya");
    }

    #[test]
    fn only_first_parenthetical_counts() {
        assert_eq!(extract_region("A (First) B (Second)"), "First");
    }

    #[test]
    fn hyphen_takes_first_word_of_last_segment() {
        assert_eq!(extract_region("Malatya-Doganyol"), "Doganyol");
        assert_eq!(extract_region("Ege Denizi - Midilli Adasi"), "Midilli");
        assert_eq!(extract_region("A-B-C D"), "C");
    }

    #[test]
    fn falls_back_to_first_word() {
        assert_eq!(extract_region("Hakkari Yuksekova"), "Hakkari");
        assert_eq!(extract_region("  Bingol  "), "Bingol");
    }

    #[test]
    fn degenerate_inputs_are_unknown() {
        assert_eq!(extract_region(""), UNKNOWN_REGION);
        assert_eq!(extract_region("   "), UNKNOWN_REGION);
        assert_eq!(extract_region("Foo-"), UNKNOWN_REGION);
        assert_eq!(extract_region("( )"), UNKNOWN_REGION);
    }

    #[test]
    fn unmatched_paren_is_plain_text() {
        assert_eq!(extract_region("Van (Ercis"), "Van");
        assert_eq!(extract_region("()-Tatvan"), "Tatvan");
    }

    #[test]
    fn extraction_is_deterministic() {
        let input = "Sindirgi-Balikesir (Gokceler)";
        assert_eq!(extract_region(input), extract_region(input));
    }
}
