#![deny(unsafe_code)]

use std::fmt;

use crate::AnalysisError;

/// Region identifier exactly as supplied by the source dataset (trimmed).
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    pub fn new(value: impl Into<String>) -> Result<Self, AnalysisError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AnalysisError::InvalidRegionId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RegionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_id_trims() {
        let id = RegionId::new("  서울 ").unwrap();
        assert_eq!(id.as_str(), "서울");
    }

    #[test]
    fn region_id_rejects_blank() {
        assert!(matches!(
            RegionId::new("   "),
            Err(AnalysisError::InvalidRegionId(_))
        ));
    }
}
