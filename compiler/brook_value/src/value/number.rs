//! Invariant-culture number parsing and formatting.

/// Largest magnitude printed as a plain integer. Beyond this `f64` can no
/// longer represent every integer, so the shortest float form is used.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Format a number the invariant way: integral values without a fraction
/// (`3`, not `3.0`), everything else in shortest round-trip form.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER {
        // Also normalizes -0 to 0.
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Parse a number the invariant way.
///
/// Surrounding whitespace is ignored. Anything that is not a finite decimal
/// number yields `None`; callers substitute `0`.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}
