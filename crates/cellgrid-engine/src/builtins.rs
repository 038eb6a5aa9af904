//! Built-in spreadsheet functions and their metadata.
//!
//! Conventions:
//! - Spreadsheet-facing built-in names are ALL CAPS (e.g. `SUM`, `UPPER`).
//! - Range builtins take exactly one `start:end` argument and reduce the raw
//!   values of the expanded cells to a number.
//! - Text builtins take exactly one cell identifier and transform its raw value.
//! - If you add a new built-in, add it to `RANGE_BUILTINS` or `TEXT_BUILTINS`;
//!   the call regex is derived from both tables.

use regex::Regex;
use std::sync::OnceLock;

use crate::engine::{coerce_number, is_numeric_text};

pub struct RangeBuiltin {
    pub sheet_name: &'static str,
    #[allow(dead_code)]
    pub description: &'static str,
    pub apply: fn(&[&str]) -> f64,
}

pub struct TextBuiltin {
    pub sheet_name: &'static str,
    #[allow(dead_code)]
    pub description: &'static str,
    pub apply: fn(&str) -> String,
}

pub const RANGE_BUILTINS: &[RangeBuiltin] = &[
    RangeBuiltin {
        sheet_name: "SUM",
        description: "Sum of numeric values in a cell range",
        apply: sum,
    },
    RangeBuiltin {
        sheet_name: "AVERAGE",
        description: "Average of numeric values in a cell range",
        apply: average,
    },
    RangeBuiltin {
        sheet_name: "MAX",
        description: "Maximum numeric value in a cell range",
        apply: max,
    },
    RangeBuiltin {
        sheet_name: "MIN",
        description: "Minimum numeric value in a cell range",
        apply: min,
    },
    RangeBuiltin {
        sheet_name: "COUNT",
        description: "Count of cells holding a number",
        apply: count,
    },
];

pub const TEXT_BUILTINS: &[TextBuiltin] = &[
    TextBuiltin {
        sheet_name: "TRIM",
        description: "Strip surrounding whitespace",
        apply: trim,
    },
    TextBuiltin {
        sheet_name: "UPPER",
        description: "Convert to upper case",
        apply: upper,
    },
    TextBuiltin {
        sheet_name: "LOWER",
        description: "Convert to lower case",
        apply: lower,
    },
];

/// Regex that matches a whole expression consisting of one built-in call,
/// like `SUM(A1:B5)` or `UPPER(C2)`.
///
/// Captures:
/// - group 1: function name (e.g. `SUM`)
/// - group 2: raw argument text (e.g. `A1:B5`)
pub fn fn_call_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let names = RANGE_BUILTINS
            .iter()
            .map(|b| b.sheet_name)
            .chain(TEXT_BUILTINS.iter().map(|b| b.sheet_name))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"^({})\((.*)\)$", names)).expect("built-in call regex must compile")
    })
}

pub fn range_builtin(sheet_name: &str) -> Option<&'static RangeBuiltin> {
    RANGE_BUILTINS.iter().find(|b| b.sheet_name == sheet_name)
}

pub fn text_builtin(sheet_name: &str) -> Option<&'static TextBuiltin> {
    TEXT_BUILTINS.iter().find(|b| b.sheet_name == sheet_name)
}

fn sum(values: &[&str]) -> f64 {
    values.iter().map(|v| coerce_number(v)).sum()
}

fn average(values: &[&str]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    sum(values) / values.len() as f64
}

fn max(values: &[&str]) -> f64 {
    values
        .iter()
        .map(|v| coerce_number(v))
        .reduce(f64::max)
        .unwrap_or(0.0)
}

fn min(values: &[&str]) -> f64 {
    values
        .iter()
        .map(|v| coerce_number(v))
        .reduce(f64::min)
        .unwrap_or(0.0)
}

fn count(values: &[&str]) -> f64 {
    values.iter().filter(|v| is_numeric_text(v)).count() as f64
}

fn trim(value: &str) -> String {
    value.trim().to_string()
}

fn upper(value: &str) -> String {
    value.to_uppercase()
}

fn lower(value: &str) -> String {
    value.to_lowercase()
}
