//! Numeric coercion of population cells.
//!
//! Counts are non-negative and finite. Anything else coerces to missing.

/// Parse a count cell to `f64`.
///
/// Handles common numeric formats:
/// - Standard numbers: "123", "45.67"
/// - Thousands separators: "1,234,567"
/// - Whitespace: "  123  "
/// - Scientific notation: "5.1e7"
///
/// Returns None for empty cells, unparseable text, NaN, infinities and
/// negative values.
pub fn parse_count(value: &str) -> Option<f64> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return None;
    }

    let cleaned = trimmed
        .replace(',', "")
        .replace(' ', "")
        .replace('\u{a0}', "");

    let parsed: f64 = cleaned.parse().ok()?;
    if !parsed.is_finite() || parsed < 0.0 {
        return None;
    }
    // "-0" parses to negative zero
    Some(if parsed == 0.0 { 0.0 } else { parsed })
}

/// Parse a year cell. Only plain integers are accepted.
pub fn parse_year(value: &str) -> Option<i32> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i32>().ok()
}
