//! Sentinel repair for the one region with historically incomplete data.
//!
//! Sejong was created mid-series, so its early rows carry the sentinel token
//! in every numeric column. Those cells mean "no population yet" and become
//! `0`. The same token in any other region means "unrecorded" and is left for
//! numeric coercion to turn into a missing value.

/// Rewrites a sentinel cell to `"0"` when the row belongs to `zero_region`.
///
/// Returns true when the cell was rewritten.
pub fn repair_sentinel(
    region: &str,
    cell: &mut Option<String>,
    zero_region: &str,
    sentinel: &str,
) -> bool {
    if region.trim() != zero_region.trim() {
        return false;
    }
    match cell {
        Some(value) if value.trim() == sentinel => {
            *value = "0".to_string();
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_only_for_zero_region() {
        let mut cell = Some("-".to_string());
        assert!(repair_sentinel("세종", &mut cell, "세종", "-"));
        assert_eq!(cell.as_deref(), Some("0"));

        let mut other = Some("-".to_string());
        assert!(!repair_sentinel("서울", &mut other, "세종", "-"));
        assert_eq!(other.as_deref(), Some("-"));
    }

    #[test]
    fn leaves_values_and_nulls() {
        let mut value = Some("1234".to_string());
        assert!(!repair_sentinel("세종", &mut value, "세종", "-"));
        assert_eq!(value.as_deref(), Some("1234"));

        let mut null = None;
        assert!(!repair_sentinel("세종", &mut null, "세종", "-"));
        assert!(null.is_none());
    }

    #[test]
    fn matches_padded_sentinel() {
        let mut cell = Some(" - ".to_string());
        assert!(repair_sentinel(" 세종", &mut cell, "세종", "-"));
        assert_eq!(cell.as_deref(), Some("0"));
    }
}
