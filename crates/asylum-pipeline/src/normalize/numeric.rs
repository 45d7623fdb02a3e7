//! Numeric coercion for text cells.

/// Coerce a text cell to a number
///
/// Grouping separators (`,`) are stripped before parsing. Absent, blank,
/// unparsable and non-finite input all read as `0.0`.
pub fn coerce_number(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return 0.0;
    };

    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return 0.0;
    }

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}
