//! Configuration for population analysis.
//!
//! The configuration is built once at startup (defaults, optionally
//! overridden by a TOML file) and then only borrowed. Nothing in the engine
//! mutates it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Native region identifiers and canonical codes of the default catalog.
pub const DEFAULT_REGIONS: [(&str, &str); 17] = [
    ("서울", "Seoul"),
    ("부산", "Busan"),
    ("대구", "Daegu"),
    ("인천", "Incheon"),
    ("광주", "Gwangju"),
    ("대전", "Daejeon"),
    ("울산", "Ulsan"),
    ("세종", "Sejong"),
    ("경기", "Gyeonggi"),
    ("강원", "Gangwon"),
    ("충북", "Chungbuk"),
    ("충남", "Chungnam"),
    ("전북", "Jeonbuk"),
    ("전남", "Jeonnam"),
    ("경북", "Gyeongbuk"),
    ("경남", "Gyeongnam"),
    ("제주", "Jeju"),
];

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub columns: ColumnNames,
    pub regions: RegionConfig,
    pub analysis: AnalysisOptions,
}

impl AnalysisConfig {
    /// Parses a TOML document; absent keys keep their defaults.
    pub fn from_toml_str(source: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| AnalysisError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&source).map_err(|e| AnalysisError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Source column names of the five recognized columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub region: String,
    pub year: String,
    pub population: String,
    pub births: String,
    pub deaths: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            region: "지역".to_string(),
            year: "연도".to_string(),
            population: "인구".to_string(),
            births: "출생아수(명)".to_string(),
            deaths: "사망자수(명)".to_string(),
        }
    }
}

impl ColumnNames {
    /// All five names in source order (region, year, population, births, deaths).
    pub fn required(&self) -> [&str; 5] {
        [
            &self.region,
            &self.year,
            &self.population,
            &self.births,
            &self.deaths,
        ]
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionEntry {
    pub native_id: String,
    pub code: String,
}

impl RegionEntry {
    pub fn new(native_id: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            native_id: native_id.into(),
            code: code.into(),
        }
    }
}

/// Reserved regions, the sentinel token and the region lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    /// Identifier of the nationwide aggregate row.
    pub nationwide: String,
    /// The one region whose sentinel cells are rewritten to zero.
    pub sentinel_zero_region: String,
    /// Placeholder token for an unrecorded value.
    pub sentinel: String,
    pub entries: Vec<RegionEntry>,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            nationwide: "전국".to_string(),
            sentinel_zero_region: "세종".to_string(),
            sentinel: "-".to_string(),
            entries: DEFAULT_REGIONS
                .iter()
                .map(|(native, code)| RegionEntry::new(*native, *code))
                .collect(),
        }
    }
}

/// Caller conventions for the derived tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Number of ranked changes to keep (ties with the last one are kept too).
    pub top_n: usize,
    /// Distance in years between the two snapshot reference years.
    pub snapshot_window: u16,
    /// Explicit earlier snapshot year; derived from the window when unset.
    pub year_a: Option<i32>,
    /// Explicit later snapshot year; the latest dataset year when unset.
    pub year_b: Option<i32>,
    /// Year to extrapolate the national population to.
    pub target_year: i32,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            top_n: 100,
            snapshot_window: 4,
            year_a: None,
            year_b: None,
            target_year: 2035,
        }
    }
}

impl AnalysisOptions {
    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    #[must_use]
    pub fn with_target_year(mut self, year: i32) -> Self {
        self.target_year = year;
        self
    }

    #[must_use]
    pub fn with_snapshot_years(mut self, year_a: i32, year_b: i32) -> Self {
        self.year_a = Some(year_a);
        self.year_b = Some(year_b);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_seventeen_regions() {
        let config = AnalysisConfig::default();
        assert_eq!(config.regions.entries.len(), 17);
        assert_eq!(config.regions.nationwide, "전국");
        assert_eq!(config.analysis.top_n, 100);
        assert_eq!(config.analysis.snapshot_window, 4);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AnalysisConfig::from_toml_str(
            r#"
            [columns]
            region = "region"

            [analysis]
            top_n = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.columns.region, "region");
        assert_eq!(config.columns.year, "연도");
        assert_eq!(config.analysis.top_n, 10);
        assert_eq!(config.analysis.target_year, 2035);
        assert_eq!(config.regions.entries.len(), 17);
    }
}
