//! World-class tally with graphic cross-check.
//!
//! Counts assets per world-class code and, for planet classes, how many of
//! them carry a space graphic whose leading token matches the code. Codes
//! are kept in lexicographic order for stable report output.

use crate::models::{Asset, WorldClass};
use serde::Serialize;
use std::collections::BTreeMap;

/// Occurrence counts for one world-class code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassCount {
    /// Number of assets carrying this code.
    pub count: usize,
    /// Number of those whose space graphic matches the code. Stays zero
    /// for station classes, which are exempt from the graphic check.
    pub matching: usize,
}

impl ClassCount {
    /// Percentage of assets whose graphic does not match the code,
    /// rounded up.
    pub fn mismatch_percentage(&self) -> u32 {
        ((self.count - self.matching) as f64 / self.count as f64 * 100.0).ceil() as u32
    }
}

/// Per-code occurrence tally over the non-virtual assets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassTally {
    /// Counts keyed by class code, in lexicographic order.
    pub classes: BTreeMap<String, ClassCount>,
}

impl ClassTally {
    /// Tally the given assets. The caller is expected to have filtered
    /// out virtual assets already; assets without a class code are
    /// skipped.
    pub fn tally<'a>(assets: impl IntoIterator<Item = &'a Asset>) -> Self {
        let mut classes: BTreeMap<String, ClassCount> = BTreeMap::new();

        for asset in assets {
            let Some(ref code) = asset.world_class else {
                continue;
            };

            let entry = classes.entry(code.clone()).or_default();
            entry.count += 1;

            // Station classes are labelled from configuration instead of
            // being checked against their graphic.
            if matches!(WorldClass::from_code(code), WorldClass::Planet(_))
                && gfx_matches_class(asset.gfx.space.as_deref(), code)
            {
                entry.matching += 1;
            }
        }

        Self { classes }
    }
}

/// Check whether a space graphic's leading token equals the class code.
///
/// Space graphics are named `<class><nn>.<ext>`; the leading token is the
/// part of the file stem before the first digit.
fn gfx_matches_class(gfx: Option<&str>, code: &str) -> bool {
    let Some(gfx) = gfx else {
        return false;
    };
    let stem = gfx.split('.').next().unwrap_or(gfx);
    let token_len = stem
        .char_indices()
        .find(|(_, c)| c.is_ascii_digit())
        .map_or(stem.len(), |(i, _)| i);
    &stem[..token_len] == code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coords, Gfx};

    fn classed_asset(name: &str, class: &str, gfx: Option<&str>) -> Asset {
        Asset {
            name: name.to_string(),
            pos: Coords::default(),
            hide: 0.0,
            population: 0,
            world_class: Some(class.to_string()),
            gfx: Gfx {
                space: gfx.map(String::from),
            },
            is_virtual: false,
        }
    }

    #[test]
    fn test_gfx_leading_token_matching() {
        assert!(gfx_matches_class(Some("A00.webp"), "A"));
        assert!(gfx_matches_class(Some("M3.png"), "M"));
        assert!(!gfx_matches_class(Some("B12.webp"), "A"));
        assert!(!gfx_matches_class(None, "A"));
    }

    #[test]
    fn test_tally_counts_and_matches() {
        let assets = vec![
            classed_asset("P1", "A", Some("A00.webp")),
            classed_asset("P2", "A", Some("B04.webp")),
            classed_asset("P3", "A", Some("A17.webp")),
            classed_asset("P4", "M", Some("M01.webp")),
        ];

        let tally = ClassTally::tally(&assets);
        let a = tally.classes.get("A").unwrap();
        assert_eq!(a.count, 3);
        assert_eq!(a.matching, 2);
        let m = tally.classes.get("M").unwrap();
        assert_eq!(m.count, 1);
        assert_eq!(m.matching, 1);
    }

    #[test]
    fn test_station_classes_skip_graphic_check() {
        let assets = vec![classed_asset("Depot", "0", Some("0x.webp"))];

        let tally = ClassTally::tally(&assets);
        let zero = tally.classes.get("0").unwrap();
        assert_eq!(zero.count, 1);
        assert_eq!(zero.matching, 0);
    }

    #[test]
    fn test_unclassed_assets_are_skipped() {
        let mut asset = classed_asset("Nameless", "A", None);
        asset.world_class = None;

        let tally = ClassTally::tally(&[asset]);
        assert!(tally.classes.is_empty());
    }

    #[test]
    fn test_mismatch_percentage_rounds_up() {
        let count = ClassCount {
            count: 10,
            matching: 7,
        };
        assert_eq!(count.mismatch_percentage(), 30);

        // 2/3 mismatched rounds 66.7 up to 67.
        let count = ClassCount {
            count: 3,
            matching: 1,
        };
        assert_eq!(count.mismatch_percentage(), 67);

        let count = ClassCount {
            count: 5,
            matching: 5,
        };
        assert_eq!(count.mismatch_percentage(), 0);
    }

    #[test]
    fn test_codes_are_sorted_lexicographically() {
        let assets = vec![
            classed_asset("P1", "M", Some("M00.webp")),
            classed_asset("P2", "A", Some("A00.webp")),
            classed_asset("S1", "0", None),
        ];

        let tally = ClassTally::tally(&assets);
        let codes: Vec<&String> = tally.classes.keys().collect();
        assert_eq!(codes, vec!["0", "A", "M"]);
    }
}
