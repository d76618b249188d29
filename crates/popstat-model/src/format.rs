//! Number formatting for presentation.
//!
//! Formatting never replaces the raw value; callers that sort or recompute use
//! the `f64` fields directly.

/// Formats a number rounded to an integer with `,` thousands separators.
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let grouped = group_digits(&digits);
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Like [`format_thousands`] but always carries a sign (`+0` for zero).
pub fn format_signed(value: f64) -> String {
    let formatted = format_thousands(value);
    if formatted.starts_with('-') || !value.is_finite() {
        formatted
    } else {
        format!("+{formatted}")
    }
}

/// Formats an optional count, `-` when missing.
pub fn format_count(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), format_thousands)
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
