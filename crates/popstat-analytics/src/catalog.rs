//! Region catalog: native region identifiers to canonical codes.
//!
//! The catalog is built once from [`RegionConfig`] and never changes. The
//! nationwide pseudo-region is known to the catalog but is not one of its
//! entries.

use std::collections::HashMap;

use popstat_model::config::DEFAULT_REGIONS;
use popstat_model::{AnalysisError, RegionConfig, RegionId, Result};
use serde::Serialize;

/// One real region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub native_id: RegionId,
    pub code: String,
}

/// Immutable lookup between native identifiers and canonical codes.
#[derive(Debug, Clone)]
pub struct RegionCatalog {
    entries: Vec<CatalogEntry>,
    by_native: HashMap<String, usize>,
    by_code: HashMap<String, usize>,
    nationwide: String,
}

impl RegionCatalog {
    /// Builds the catalog, rejecting blank, repeated or reserved identifiers.
    pub fn from_config(config: &RegionConfig) -> Result<Self> {
        let nationwide = config.nationwide.trim().to_string();
        if nationwide.is_empty() {
            return Err(config_error("nationwide region identifier is empty"));
        }

        let mut entries = Vec::with_capacity(config.entries.len());
        for entry in &config.entries {
            let native_id = RegionId::new(entry.native_id.as_str())?;
            let code = entry.code.trim();
            if code.is_empty() {
                return Err(config_error(format!(
                    "region {native_id} has an empty canonical code"
                )));
            }
            if native_id.as_str() == nationwide {
                return Err(config_error(format!(
                    "nationwide region {nationwide} must not be a catalog entry"
                )));
            }
            entries.push(CatalogEntry {
                native_id,
                code: code.to_string(),
            });
        }

        let catalog = Self::build(entries, nationwide);
        if catalog.by_native.len() != catalog.entries.len() {
            return Err(config_error("duplicate native region identifier"));
        }
        if catalog.by_code.len() != catalog.entries.len() {
            return Err(config_error("duplicate canonical region code"));
        }
        Ok(catalog)
    }

    fn build(entries: Vec<CatalogEntry>, nationwide: String) -> Self {
        let mut by_native = HashMap::with_capacity(entries.len());
        let mut by_code = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            by_native.entry(entry.native_id.to_string()).or_insert(idx);
            by_code.entry(entry.code.clone()).or_insert(idx);
        }
        Self {
            entries,
            by_native,
            by_code,
            nationwide,
        }
    }

    /// Canonical code of a native region, `None` for unknown regions and for
    /// the nationwide pseudo-region.
    pub fn canonical_code(&self, region: &str) -> Option<&str> {
        self.by_native
            .get(region.trim())
            .map(|&idx| self.entries[idx].code.as_str())
    }

    /// Native identifier of a canonical code.
    pub fn native_id(&self, code: &str) -> Option<&RegionId> {
        self.by_code
            .get(code.trim())
            .map(|&idx| &self.entries[idx].native_id)
    }

    pub fn is_nationwide(&self, region: &str) -> bool {
        region.trim() == self.nationwide
    }

    pub fn nationwide(&self) -> &str {
        &self.nationwide
    }

    /// Catalog position of a canonical code; used to order region columns.
    pub fn position(&self, code: &str) -> Option<usize> {
        self.by_code.get(code).copied()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RegionCatalog {
    fn default() -> Self {
        let defaults = RegionConfig::default();
        let entries = DEFAULT_REGIONS
            .iter()
            .filter_map(|(native, code)| {
                RegionId::new(*native).ok().map(|native_id| CatalogEntry {
                    native_id,
                    code: (*code).to_string(),
                })
            })
            .collect();
        Self::build(entries, defaults.nationwide)
    }
}

fn config_error(message: impl Into<String>) -> AnalysisError {
    AnalysisError::Config {
        message: message.into(),
    }
}
