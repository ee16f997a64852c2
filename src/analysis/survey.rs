//! Single-pass surveys over the loaded record collections.
//!
//! Each survey folds every record into one accumulator per metric, then
//! finalizes the accumulators into the summary structure handed to the
//! renderer.

use super::aggregator::{
    AnalysisError, MetricAccumulator, MetricSummary, NonZeroMetricAccumulator,
    NonZeroMetricSummary,
};
use super::tally::ClassTally;
use crate::models::Universe;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// Metric summaries for the star system collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemStats {
    /// Spatial radius.
    pub radius: MetricSummary,
    /// Nebula density.
    pub nebula_density: MetricSummary,
    /// Nebula volatility.
    pub nebula_volatility: MetricSummary,
    /// Sensor interference.
    pub interference: MetricSummary,
    /// Background star count.
    pub stars: MetricSummary,
    /// Outbound jump count, with zero-jump systems diverted.
    pub jumps: NonZeroMetricSummary,
    /// Non-virtual assets per system, with empty systems diverted.
    pub asset_links: NonZeroMetricSummary,
}

/// Survey every star system in load order.
///
/// The asset collection is consulted only to resolve which of a system's
/// listed assets are non-virtual; no record is mutated.
pub fn analyze_systems(universe: &Universe) -> Result<SystemStats, AnalysisError> {
    let real_assets: HashSet<&str> = universe
        .assets
        .iter()
        .filter(|a| !a.is_virtual)
        .map(|a| a.name.as_str())
        .collect();

    let mut radius = MetricAccumulator::new("radius");
    let mut nebula_density = MetricAccumulator::new("nebula density");
    let mut nebula_volatility = MetricAccumulator::new("nebula volatility");
    let mut interference = MetricAccumulator::new("interference");
    let mut stars = MetricAccumulator::new("stars");
    let mut jumps = NonZeroMetricAccumulator::new("jumps");
    let mut asset_links = NonZeroMetricAccumulator::new("assets per system");

    for ssys in &universe.systems {
        radius.observe(ssys.radius, &ssys.name);
        nebula_density.observe(ssys.nebula.density, &ssys.name);
        nebula_volatility.observe(ssys.nebula.volatility, &ssys.name);
        interference.observe(ssys.interference, &ssys.name);
        stars.observe(f64::from(ssys.stars), &ssys.name);
        jumps.observe(ssys.jumps.len() as f64, &ssys.name);

        let links = ssys
            .assets
            .iter()
            .filter(|name| real_assets.contains(name.as_str()))
            .count();
        asset_links.observe(links as f64, &ssys.name);
    }

    debug!("Surveyed {} systems", universe.systems.len());

    Ok(SystemStats {
        radius: radius.summarize()?,
        nebula_density: nebula_density.summarize()?,
        nebula_volatility: nebula_volatility.summarize()?,
        interference: interference.summarize()?,
        stars: stars.summarize()?,
        jumps: jumps.summarize()?,
        asset_links: asset_links.summarize()?,
    })
}

/// Metric summaries and the class tally for the asset collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetStats {
    /// Straight-line distance from the system origin.
    pub orbit: MetricSummary,
    /// Detection difficulty.
    pub hide: MetricSummary,
    /// Population, with uninhabited assets diverted.
    pub population: NonZeroMetricSummary,
    /// World-class tally.
    pub classes: ClassTally,
}

/// Survey every non-virtual asset in load order.
///
/// Virtual assets are filtered out before any accumulation, so they never
/// contribute to an extremum, a moment, or the class tally.
pub fn analyze_assets(universe: &Universe) -> Result<AssetStats, AnalysisError> {
    let surveyed: Vec<_> = universe.assets.iter().filter(|a| !a.is_virtual).collect();

    let mut orbit = MetricAccumulator::new("orbit");
    let mut hide = MetricAccumulator::new("hide");
    let mut population = NonZeroMetricAccumulator::new("population");

    for asset in &surveyed {
        orbit.observe(asset.orbit(), &asset.name);
        hide.observe(asset.hide, &asset.name);
        population.observe(asset.population as f64, &asset.name);
    }

    let classes = ClassTally::tally(surveyed.iter().copied());

    debug!(
        "Surveyed {} assets ({} virtual excluded)",
        surveyed.len(),
        universe.assets.len() - surveyed.len()
    );

    Ok(AssetStats {
        orbit: orbit.summarize()?,
        hide: hide.summarize()?,
        population: population.summarize()?,
        classes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Asset, Coords, Gfx, Nebula, SSystem};

    fn system(name: &str, radius: f64, jumps: &[&str], assets: &[&str]) -> SSystem {
        SSystem {
            name: name.to_string(),
            pos: Coords::default(),
            radius,
            stars: 250,
            interference: 10.0,
            nebula: Nebula {
                density: 100.0,
                volatility: 20.0,
            },
            jumps: jumps.iter().map(|s| s.to_string()).collect(),
            assets: assets.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn asset(name: &str, x: f64, y: f64, population: u64, virtual_: bool) -> Asset {
        Asset {
            name: name.to_string(),
            pos: Coords { x, y },
            hide: 1.0,
            population,
            world_class: Some("A".to_string()),
            gfx: Gfx {
                space: Some("A00.webp".to_string()),
            },
            is_virtual: virtual_,
        }
    }

    #[test]
    fn test_system_survey_jump_counts() {
        let universe = Universe {
            systems: vec![
                system("S1", 8000.0, &[], &["Beacon"]),
                system("S2", 9000.0, &[], &["Beacon"]),
                system("S3", 10000.0, &["a", "b", "c"], &["Beacon", "Depot"]),
                system("S4", 11000.0, &["a"], &["Depot"]),
            ],
            assets: vec![
                asset("Beacon", 10.0, 0.0, 0, false),
                asset("Depot", 20.0, 0.0, 100, false),
            ],
        };

        let stats = analyze_systems(&universe).unwrap();
        assert_eq!(stats.jumps.least_nonzero.value, 1.0);
        assert_eq!(stats.jumps.least_nonzero.holders, vec!["S4"]);
        assert_eq!(stats.jumps.zero_holders, vec!["S1", "S2"]);
        assert_eq!(stats.jumps.mean, 1.0);
        assert_eq!(stats.radius.max.holders, vec!["S4"]);
        assert_eq!(stats.radius.min.holders, vec!["S1"]);
    }

    #[test]
    fn test_asset_links_count_only_real_assets() {
        let universe = Universe {
            systems: vec![
                system("Hub", 5000.0, &["x"], &["Port", "Marker", "Rock"]),
                system("Fringe", 5000.0, &["x"], &["Marker"]),
            ],
            assets: vec![
                asset("Port", 100.0, 0.0, 5000, false),
                asset("Rock", 200.0, 0.0, 0, false),
                asset("Marker", 0.0, 0.0, 0, true),
            ],
        };

        let stats = analyze_systems(&universe).unwrap();
        assert_eq!(stats.asset_links.max.value, 2.0);
        assert_eq!(stats.asset_links.max.holders, vec!["Hub"]);
        assert_eq!(stats.asset_links.zero_holders, vec!["Fringe"]);
    }

    #[test]
    fn test_virtual_assets_excluded_everywhere() {
        let mut marker = asset("Marker", 9999.0, 9999.0, 1_000_000, true);
        marker.hide = 500.0;

        let universe = Universe {
            systems: Vec::new(),
            assets: vec![
                asset("Outpost", 30.0, 40.0, 1000, false),
                asset("Colony", 60.0, 80.0, 2000, false),
                marker,
            ],
        };

        let stats = analyze_assets(&universe).unwrap();
        assert_eq!(stats.population.max.value, 2000.0);
        assert_eq!(stats.population.max.holders, vec!["Colony"]);
        assert_eq!(stats.orbit.max.value, 100.0);
        assert_eq!(stats.orbit.max.holders, vec!["Colony"]);
        assert_eq!(stats.hide.max.holders, vec!["Outpost", "Colony"]);
        assert_eq!(stats.classes.classes.get("A").unwrap().count, 2);
        assert_eq!(stats.population.count, 2);
    }

    #[test]
    fn test_population_inhabited_only_statistics() {
        let universe = Universe {
            systems: Vec::new(),
            assets: vec![
                asset("Mining Rig", 10.0, 0.0, 0, false),
                asset("Colony", 20.0, 0.0, 3000, false),
                asset("Capital", 30.0, 0.0, 9000, false),
            ],
        };

        let stats = analyze_assets(&universe).unwrap();
        assert_eq!(stats.population.mean, 4000.0);
        assert_eq!(stats.population.nonzero_mean, 6000.0);
        assert_eq!(stats.population.zero_holders, vec!["Mining Rig"]);
        assert_eq!(stats.population.least_nonzero.holders, vec!["Colony"]);
    }

    #[test]
    fn test_empty_universe_fails() {
        let universe = Universe::default();
        assert!(analyze_systems(&universe).is_err());
        assert!(analyze_assets(&universe).is_err());
    }
}
