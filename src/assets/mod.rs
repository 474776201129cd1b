//! Instrument metadata catalog.
//!
//! Loaded once at startup from a two-column-per-segment CSV
//! (`asset,name,segment`). A missing or malformed file is a fatal startup
//! error; the engine cannot name signals without it.

use crate::config::ScanMode;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CatalogRow {
    asset: String,
    name: String,
    segment: String,
}

/// Mapping from raw instrument identifiers to display names, split by
/// market segment.
#[derive(Debug, Default, Clone)]
pub struct AssetCatalog {
    standard: HashMap<String, String>,
    otc: HashMap<String, String>,
}

impl AssetCatalog {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let mut reader = csv::Reader::from_path(path.as_ref()).map_err(|e| {
            format!(
                "Missing or unreadable asset file '{}': {}",
                path.as_ref().display(),
                e
            )
        })?;

        let mut catalog = AssetCatalog::default();
        for row in reader.deserialize::<CatalogRow>() {
            let row = row.map_err(|e| format!("Malformed asset file row: {}", e))?;
            let asset = row.asset.trim().to_string();
            let name = row.name.trim().to_string();
            if asset.is_empty() || name.is_empty() {
                continue;
            }
            match row.segment.trim().to_ascii_lowercase().as_str() {
                "otc" => {
                    catalog.otc.insert(asset, name);
                }
                "standard" | "op" => {
                    catalog.standard.insert(asset, name);
                }
                other => {
                    return Err(format!("Unknown segment '{}' for asset {}", other, asset).into())
                }
            }
        }

        if catalog.standard.is_empty() && catalog.otc.is_empty() {
            return Err("Asset file contains no instruments".into());
        }
        Ok(catalog)
    }

    pub fn from_maps(standard: HashMap<String, String>, otc: HashMap<String, String>) -> Self {
        Self { standard, otc }
    }

    /// Display name for an instrument, falling back to the raw identifier.
    pub fn display_name<'a>(&'a self, instrument: &'a str) -> &'a str {
        self.standard
            .get(instrument)
            .or_else(|| self.otc.get(instrument))
            .map(|s| s.as_str())
            .unwrap_or(instrument)
    }

    /// Instrument identifiers in scope for the given scan mode, sorted.
    pub fn instruments_for(&self, mode: ScanMode) -> Vec<String> {
        let mut out: Vec<String> = match mode {
            ScanMode::Standard => self.standard.keys().cloned().collect(),
            ScanMode::Otc => self.otc.keys().cloned().collect(),
            ScanMode::All => {
                let mut set: Vec<String> = self
                    .standard
                    .keys()
                    .chain(self.otc.keys())
                    .cloned()
                    .collect();
                set.sort();
                set.dedup();
                set
            }
        };
        out.sort();
        out.dedup();
        out
    }

    pub fn len(&self) -> usize {
        self.standard.len() + self.otc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.standard.is_empty() && self.otc.is_empty()
    }
}
