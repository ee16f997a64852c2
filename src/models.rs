//! Data models for the statistics reporter.
//!
//! This module contains the typed record structures supplied by the loader
//! (star systems and assets) and the top-level report structure handed to
//! the renderer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 2D position in system space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    /// Horizontal coordinate.
    #[serde(default)]
    pub x: f64,
    /// Vertical coordinate.
    #[serde(default)]
    pub y: f64,
}

impl Coords {
    /// Straight-line distance from the system origin.
    pub fn distance(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Nebula conditions within a star system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nebula {
    /// Nebula density.
    #[serde(default)]
    pub density: f64,
    /// Nebula volatility.
    #[serde(default)]
    pub volatility: f64,
}

/// A star system record.
///
/// `name` and `radius` are required; everything else defaults to the
/// empty/zero value when absent from the record file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SSystem {
    /// System name (reporting identity, not uniqueness-enforced).
    pub name: String,
    /// Position of the system on the universe map.
    #[serde(default)]
    pub pos: Coords,
    /// Spatial radius of the system.
    pub radius: f64,
    /// Number of background stars.
    #[serde(default)]
    pub stars: u32,
    /// Sensor interference level.
    #[serde(default)]
    pub interference: f64,
    /// Nebula conditions.
    #[serde(default)]
    pub nebula: Nebula,
    /// Names of systems reachable via outbound jump points.
    #[serde(default)]
    pub jumps: Vec<String>,
    /// Names of assets located in this system.
    #[serde(default)]
    pub assets: Vec<String>,
}

/// An asset record (planet, station, or virtual presence marker).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    /// Asset name (reporting identity).
    pub name: String,
    /// Position within its host system.
    #[serde(default)]
    pub pos: Coords,
    /// Detection difficulty score; higher is better hidden.
    #[serde(default)]
    pub hide: f64,
    /// Resident population.
    #[serde(default)]
    pub population: u64,
    /// World class code (e.g. "A" for a planet class, "0" for a station
    /// class). Absent on virtual assets.
    #[serde(default, rename = "class")]
    pub world_class: Option<String>,
    /// Rendered graphics, keyed by usage.
    #[serde(default)]
    pub gfx: Gfx,
    /// Virtual assets are placeholder presence markers and are excluded
    /// from every asset-level aggregation.
    #[serde(default, rename = "virtual")]
    pub is_virtual: bool,
}

impl Asset {
    /// Straight-line distance of the asset from the system origin.
    pub fn orbit(&self) -> f64 {
        self.pos.distance()
    }
}

/// Rendered graphic identifiers for an asset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Gfx {
    /// The in-space graphic, named `<class><nn>.<ext>` by convention.
    #[serde(default)]
    pub space: Option<String>,
}

/// A world class code, resolved into its station/planet variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorldClass {
    /// Numeric codes denote station types; the label for each code comes
    /// from external configuration.
    Station(String),
    /// Letter codes denote planet classes.
    Planet(String),
}

impl WorldClass {
    /// Resolve a raw class code into its variant. Codes consisting solely
    /// of ASCII digits are station classes.
    pub fn from_code(code: &str) -> Self {
        if !code.is_empty() && code.chars().all(|c| c.is_ascii_digit()) {
            WorldClass::Station(code.to_string())
        } else {
            WorldClass::Planet(code.to_string())
        }
    }

    /// The raw class code.
    pub fn code(&self) -> &str {
        match self {
            WorldClass::Station(code) | WorldClass::Planet(code) => code,
        }
    }

    /// The noun used for this kind of asset in report lines.
    pub fn noun(&self) -> &'static str {
        match self {
            WorldClass::Station(_) => "station",
            WorldClass::Planet(_) => "planet",
        }
    }
}

impl fmt::Display for WorldClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class {} {}", self.code(), self.noun())
    }
}

/// The fully loaded record collections, materialized before aggregation.
#[derive(Debug, Clone, Default)]
pub struct Universe {
    /// Star systems, in load order.
    pub systems: Vec<SSystem>,
    /// Assets, in load order.
    pub assets: Vec<Asset>,
}

impl Universe {
    /// Number of non-virtual assets.
    pub fn surveyed_assets(&self) -> usize {
        self.assets.iter().filter(|a| !a.is_virtual).count()
    }
}

/// Metadata about a generated report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Root directory the records were loaded from.
    pub data_root: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of star systems loaded.
    pub systems_loaded: usize,
    /// Number of assets loaded (virtual included).
    pub assets_loaded: usize,
    /// Number of virtual assets excluded from aggregation.
    pub virtual_assets: usize,
    /// Duration of the load-and-aggregate run in seconds.
    pub duration_seconds: f64,
}

/// The complete statistics report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Metadata about the run.
    pub metadata: ReportMetadata,
    /// System-level metric summaries.
    pub systems: crate::analysis::SystemStats,
    /// Asset-level metric summaries and the class tally.
    pub assets: crate::analysis::AssetStats,
}
