//! Text report generation.
//!
//! This module renders the computed summaries into the human-readable
//! report. It performs no computation of its own beyond selecting labels
//! and joining name lists.

use crate::analysis::{ClassTally, ExtremumSet, MetricSummary, NonZeroMetricSummary};
use crate::config::LabelConfig;
use crate::models::{Report, ReportMetadata, WorldClass};
use anyhow::Result;

/// Generate the complete text report.
pub fn generate_text_report(report: &Report, labels: &LabelConfig) -> String {
    let mut output = String::new();

    output.push_str(&generate_header_section(&report.metadata));
    output.push_str(&generate_system_section(report));
    output.push_str(&generate_asset_section(report));
    output.push_str(&generate_class_section(&report.assets.classes, labels));

    output
}

/// Generate the report header.
fn generate_header_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("Data ranges report\n");
    section.push_str("==================\n");
    section.push_str(&format!("Data root: {}\n", metadata.data_root));
    section.push_str(&format!(
        "Generated: {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "Systems: {} | Assets: {} ({} virtual excluded)\n\n",
        metadata.systems_loaded, metadata.assets_loaded, metadata.virtual_assets
    ));

    section
}

/// Generate the star system sections.
fn generate_system_section(report: &Report) -> String {
    let stats = &report.systems;
    let mut section = String::new();

    section.push_str(&stat_line("Radius", &stats.radius));
    section.push_str(&extremum_line(
        "The largest system radius",
        "is",
        &stats.radius.max,
    ));
    section.push_str(&extremum_line(
        "The smallest system radius",
        "is",
        &stats.radius.min,
    ));
    section.push('\n');

    section.push_str(&stat_line("Nebula density", &stats.nebula_density));
    section.push_str(&extremum_line(
        "The densest nebula",
        "is",
        &stats.nebula_density.max,
    ));
    section.push('\n');

    section.push_str(&stat_line("Nebula volatility", &stats.nebula_volatility));
    section.push_str(&extremum_line(
        "The most volatile nebula",
        "is",
        &stats.nebula_volatility.max,
    ));
    section.push('\n');

    section.push_str(&stat_line("Interference", &stats.interference));
    section.push_str(&extremum_line(
        "The peak interference",
        "is",
        &stats.interference.max,
    ));
    section.push('\n');

    section.push_str(&stat_line("Stars", &stats.stars));
    section.push_str(&extremum_line(
        "The most starry skies",
        "are",
        &stats.stars.max,
    ));
    section.push_str(&extremum_line(
        "The least starry skies",
        "are",
        &stats.stars.min,
    ));
    section.push('\n');

    section.push_str(&nonzero_stat_line("Jumps", &stats.jumps));
    section.push_str(&extremum_line(
        "The most outbound jumps",
        "are",
        &stats.jumps.max,
    ));
    section.push_str(&extremum_line(
        "The fewest outbound jumps (greater than zero)",
        "are",
        &stats.jumps.least_nonzero,
    ));
    section.push_str(&count_line(
        stats.jumps.zero_holders.len(),
        "system has no outbound jumps",
        "systems have no outbound jumps",
    ));
    section.push('\n');

    section.push_str(&nonzero_stat_line("Assets per system", &stats.asset_links));
    section.push_str(&extremum_line(
        "The most assets",
        "are",
        &stats.asset_links.max,
    ));
    section.push_str(&extremum_line(
        "The fewest assets (greater than zero)",
        "are",
        &stats.asset_links.least_nonzero,
    ));
    section.push_str(&count_line(
        stats.asset_links.zero_holders.len(),
        "system contains no assets",
        "systems contain no assets",
    ));
    section.push('\n');

    section
}

/// Generate the asset sections.
fn generate_asset_section(report: &Report) -> String {
    let stats = &report.assets;
    let mut section = String::new();

    section.push_str(&stat_line("Orbit", &stats.orbit));
    section.push_str(&extremum_line("The biggest orbit", "is", &stats.orbit.max));
    section.push_str(&extremum_line("The smallest orbit", "is", &stats.orbit.min));
    section.push('\n');

    section.push_str(&stat_line("Difficulty in sensing", &stats.hide));
    section.push_str(&extremum_line("The best hidden", "is", &stats.hide.max));
    section.push_str(&extremum_line("The worst hidden", "is", &stats.hide.min));
    section.push('\n');

    section.push_str(&format!(
        "Population (everywhere): μ={}, σ={}\n",
        stats.population.mean, stats.population.std_dev
    ));
    section.push_str(&format!(
        "Population (inhabited only): μ={}, σ={}\n",
        stats.population.nonzero_mean, stats.population.nonzero_std_dev
    ));
    section.push_str(&extremum_line(
        "The biggest population",
        "is",
        &stats.population.max,
    ));
    section.push_str(&extremum_line(
        "The smallest population (greater than zero)",
        "is",
        &stats.population.least_nonzero,
    ));
    section.push_str(&count_line(
        stats.population.zero_holders.len(),
        "asset is uninhabited",
        "assets are uninhabited",
    ));
    section.push('\n');

    section
}

/// Generate the world-class tally section, one sorted line per code.
fn generate_class_section(tally: &ClassTally, labels: &LabelConfig) -> String {
    let mut section = String::new();

    for (code, count) in &tally.classes {
        let class = WorldClass::from_code(code);
        let detail = match class {
            WorldClass::Station(_) => labels.station_label(code).to_string(),
            WorldClass::Planet(_) => {
                format!("{}% don't match their class", count.mismatch_percentage())
            }
        };
        section.push_str(&format!(
            "There are {} class {} {}s ({}).\n",
            count.count,
            code,
            class.noun(),
            detail
        ));
    }

    section
}

/// `<Metric>: μ=<mean>, σ=<stddev>` line.
fn stat_line(label: &str, summary: &MetricSummary) -> String {
    format!("{}: μ={}, σ={}\n", label, summary.mean, summary.std_dev)
}

/// The zero-inclusive `μ=/σ=` line for a zero-diverting metric.
fn nonzero_stat_line(label: &str, summary: &NonZeroMetricSummary) -> String {
    format!("{}: μ={}, σ={}\n", label, summary.mean, summary.std_dev)
}

/// `<label> (<value>) is/are found in <list>.` line.
fn extremum_line(label: &str, verb: &str, set: &ExtremumSet) -> String {
    format!(
        "{} ({}) {} found in {}.\n",
        label,
        set.value,
        verb,
        liststr(&set.holders)
    )
}

/// A count line with singular/plural phrasing.
fn count_line(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}.\n", count, singular)
    } else {
        format!("{} {}.\n", count, plural)
    }
}

/// Join names with commas and a final "and".
fn liststr(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze_assets, analyze_systems};
    use crate::models::{Asset, Coords, Gfx, Nebula, SSystem, Universe};
    use chrono::Utc;

    fn test_universe() -> Universe {
        let system = |name: &str, radius: f64, jumps: usize, assets: &[&str]| SSystem {
            name: name.to_string(),
            pos: Coords::default(),
            radius,
            stars: 300,
            interference: 50.0,
            nebula: Nebula {
                density: 200.0,
                volatility: 10.0,
            },
            jumps: (0..jumps).map(|i| format!("J{i}")).collect(),
            assets: assets.iter().map(|s| s.to_string()).collect(),
        };

        let asset = |name: &str, class: &str, gfx: &str, population: u64| Asset {
            name: name.to_string(),
            pos: Coords { x: 30.0, y: 40.0 },
            hide: 12.0,
            population,
            world_class: Some(class.to_string()),
            gfx: Gfx {
                space: Some(gfx.to_string()),
            },
            is_virtual: false,
        };

        Universe {
            systems: vec![
                system("Kestrel", 8000.0, 2, &["Harbor", "Relay"]),
                system("Vega Drift", 8000.0, 0, &["Dust Rock"]),
            ],
            assets: vec![
                asset("Harbor", "A", "A00.webp", 40000),
                asset("Relay", "1", "station01.webp", 0),
                asset("Dust Rock", "A", "B00.webp", 250),
            ],
        }
    }

    fn test_report() -> Report {
        let universe = test_universe();
        Report {
            metadata: crate::models::ReportMetadata {
                data_root: "./dat".to_string(),
                generated_at: Utc::now(),
                systems_loaded: universe.systems.len(),
                assets_loaded: universe.assets.len(),
                virtual_assets: 0,
                duration_seconds: 0.1,
            },
            systems: analyze_systems(&universe).unwrap(),
            assets: analyze_assets(&universe).unwrap(),
        }
    }

    #[test]
    fn test_liststr_joining() {
        let one = vec!["A".to_string()];
        let two = vec!["A".to_string(), "B".to_string()];
        let three = vec!["A".to_string(), "B".to_string(), "C".to_string()];

        assert_eq!(liststr(&one), "A");
        assert_eq!(liststr(&two), "A and B");
        assert_eq!(liststr(&three), "A, B and C");
    }

    #[test]
    fn test_text_report_surfaces_every_section() {
        let report = test_report();
        let text = generate_text_report(&report, &LabelConfig::default());

        assert!(text.contains("Radius: μ=8000, σ=0"));
        assert!(text.contains("The largest system radius (8000) is found in Kestrel and Vega Drift."));
        assert!(text.contains("The most outbound jumps (2) are found in Kestrel."));
        assert!(text.contains("1 system has no outbound jumps."));
        assert!(text.contains("The biggest population (40000) is found in Harbor."));
        assert!(text.contains(
            "The smallest population (greater than zero) (250) is found in Dust Rock."
        ));
        assert!(text.contains("1 asset is uninhabited."));
    }

    #[test]
    fn test_class_lines_are_sorted_and_labelled() {
        let report = test_report();
        let text = generate_text_report(&report, &LabelConfig::default());

        // One A-class planet of two has a matching graphic: 50% mismatch.
        assert!(text.contains("There are 1 class 1 stations (military)."));
        assert!(text.contains("There are 2 class A planets (50% don't match their class)."));

        let station_line = text.find("class 1 station").unwrap();
        let planet_line = text.find("class A planet").unwrap();
        assert!(station_line < planet_line);
    }

    #[test]
    fn test_json_report_round_trips_summaries() {
        let report = test_report();
        let json = generate_json_report(&report).unwrap();

        assert!(json.contains("\"metadata\""));
        assert!(json.contains("\"systems\""));
        assert!(json.contains("\"zero_holders\""));
        assert!(json.contains("\"classes\""));
    }
}
