//! Numeric coercion of raw cell text and number formatting for display.

use regex::Regex;
use std::sync::OnceLock;

use super::ERROR_SENTINEL;

fn leading_float_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*([+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
            .expect("leading float regex must compile")
    })
}

/// Parse the longest numeric prefix of `raw` ("3.5kg" -> 3.5, "x" -> None).
pub fn parse_leading_float(raw: &str) -> Option<f64> {
    let caps = leading_float_re().captures(raw)?;
    caps[1].parse::<f64>().ok()
}

/// Numeric value of a cell's raw text; non-numeric text counts as 0.
pub fn coerce_number(raw: &str) -> f64 {
    parse_leading_float(raw).unwrap_or(0.0)
}

/// Whether raw text is non-empty and parses as a finite number.
pub fn is_numeric_text(raw: &str) -> bool {
    !raw.is_empty() && parse_leading_float(raw).is_some_and(f64::is_finite)
}

/// Format a number as its shortest round-tripping decimal string.
///
/// Magnitudes outside `[1e-6, 1e21)` use exponent notation with an explicit
/// sign (`1e+21`, `1.5e-7`).
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return ERROR_SENTINEL.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return n.to_string();
    }

    let exp = format!("{:e}", n);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exp,
    }
}
