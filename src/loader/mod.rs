//! Record file discovery and parsing.
//!
//! The loader walks the data root for system and asset record files,
//! parses each one into its typed record, and validates cross-references
//! before the collections are handed to the analysis pass. Files are
//! visited in sorted order so that the load order, and therefore every
//! tie-holder list downstream, is reproducible across runs.

use crate::models::{Asset, SSystem, Universe};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Errors raised while loading record files. None are recovered; partial
/// statistics over a broken data set would be misleading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A directory or file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A record file was missing a required field or carried a value of
    /// the wrong type.
    #[error("malformed record in {path}: {source}")]
    Malformed {
        /// Path of the offending record file.
        path: String,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// A system listed an asset that no asset record file defines.
    #[error("system `{system}` references unknown asset `{asset}`")]
    DanglingAsset {
        /// System holding the reference.
        system: String,
        /// The unresolved asset name.
        asset: String,
    },
}

/// Loader directory layout options.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Subdirectory holding system records.
    pub systems_dir: String,
    /// Subdirectory holding asset records.
    pub assets_dir: String,
    /// Record file extension (without dot).
    pub extension: String,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            systems_dir: "ssys".to_string(),
            assets_dir: "assets".to_string(),
            extension: "json".to_string(),
        }
    }
}

/// Loads the record collections from a data root.
pub struct Loader {
    root: PathBuf,
    options: LoaderOptions,
}

impl Loader {
    /// Create a loader over the given data root.
    pub fn new(root: PathBuf, options: LoaderOptions) -> Self {
        Self { root, options }
    }

    /// Load both record collections and validate cross-references.
    pub fn load(&self) -> Result<Universe, LoadError> {
        let systems: Vec<SSystem> = self.load_records(&self.options.systems_dir)?;
        let assets: Vec<Asset> = self.load_records(&self.options.assets_dir)?;

        info!(
            "Loaded {} systems and {} assets from {}",
            systems.len(),
            assets.len(),
            self.root.display()
        );

        let universe = Universe { systems, assets };
        self.validate(&universe)?;
        Ok(universe)
    }

    /// Parse every record file under one subdirectory, in sorted order.
    fn load_records<T: DeserializeOwned>(&self, dir: &str) -> Result<Vec<T>, LoadError> {
        let dir_path = self.root.join(dir);
        let mut records = Vec::new();

        for entry in WalkDir::new(&dir_path).sort_by_file_name() {
            let entry = entry.map_err(|e| LoadError::Io {
                path: dir_path.display().to_string(),
                source: e.into(),
            })?;

            if !entry.file_type().is_file() || !self.matches_extension(entry.path()) {
                continue;
            }

            debug!("Parsing {}", entry.path().display());
            records.push(self.parse_record(entry.path())?);
        }

        Ok(records)
    }

    /// Read and parse a single record file.
    fn parse_record<T: DeserializeOwned>(&self, path: &Path) -> Result<T, LoadError> {
        let content = fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        serde_json::from_str(&content).map_err(|e| LoadError::Malformed {
            path: path.display().to_string(),
            source: e,
        })
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ext == self.options.extension)
    }

    /// Every asset listed by a system must resolve to a loaded asset.
    fn validate(&self, universe: &Universe) -> Result<(), LoadError> {
        let known: HashSet<&str> = universe.assets.iter().map(|a| a.name.as_str()).collect();

        for ssys in &universe.systems {
            for asset in &ssys.assets {
                if !known.contains(asset.as_str()) {
                    return Err(LoadError::DanglingAsset {
                        system: ssys.name.clone(),
                        asset: asset.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_root(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join(name)
    }

    #[test]
    fn test_load_fixture_universe() {
        let loader = Loader::new(fixture_root("universe"), LoaderOptions::default());
        let universe = loader.load().unwrap();

        assert_eq!(universe.systems.len(), 3);
        assert_eq!(universe.assets.len(), 4);
        assert_eq!(universe.surveyed_assets(), 3);

        // Files are visited in sorted order, so load order is stable.
        let names: Vec<&str> = universe.systems.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Arcturus", "Delta Pavonis", "Hakoya"]);
    }

    #[test]
    fn test_fixture_record_fields() {
        let loader = Loader::new(fixture_root("universe"), LoaderOptions::default());
        let universe = loader.load().unwrap();

        let arcturus = &universe.systems[0];
        assert_eq!(arcturus.radius, 9500.0);
        assert_eq!(arcturus.stars, 320);
        assert_eq!(arcturus.jumps.len(), 2);

        let marker = universe
            .assets
            .iter()
            .find(|a| a.name == "Arcturus Presence")
            .unwrap();
        assert!(marker.is_virtual);
    }

    #[test]
    fn test_malformed_record_is_rejected() {
        let loader = Loader::new(fixture_root("malformed"), LoaderOptions::default());
        let err = loader.load().unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
    }

    #[test]
    fn test_dangling_asset_reference_is_rejected() {
        let loader = Loader::new(fixture_root("dangling"), LoaderOptions::default());
        let err = loader.load().unwrap_err();
        match err {
            LoadError::DanglingAsset { system, asset } => {
                assert_eq!(system, "Lost Nebula");
                assert_eq!(asset, "Ghost Station");
            }
            other => panic!("expected DanglingAsset, got {other:?}"),
        }
    }
}
