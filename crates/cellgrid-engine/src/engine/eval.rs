//! Formula evaluation.
//!
//! Dispatch order for an expression (the text after `=`):
//! 1. Range builtin call: `SUM(A1:B5)`
//! 2. Text builtin call: `UPPER(A1)`
//! 3. Bare cell reference: `A1`
//! 4. Arithmetic over numbers and cell references: `A1*2+B3`

use log::debug;
use regex::Regex;
use std::sync::OnceLock;

use super::arith::eval_arithmetic;
use super::cell::Sheet;
use super::cell_ref::CellRef;
use super::format::format_number;
use super::range::CellRange;
use crate::builtins::{fn_call_re, range_builtin, text_builtin};
use crate::error::{EvalError, EvalResult};

/// Value shown in place of a formula that failed to evaluate.
pub const ERROR_SENTINEL: &str = "#ERROR!";

/// Evaluate cell text against a sheet snapshot.
///
/// Text that does not start with `=` is returned unchanged. Any evaluation
/// failure yields [`ERROR_SENTINEL`]; this function never fails.
pub fn evaluate(formula: &str, sheet: &Sheet) -> String {
    match try_evaluate(formula, sheet) {
        Ok(value) => value,
        Err(err) => {
            debug!("formula {:?} evaluated to {}: {}", formula, ERROR_SENTINEL, err);
            ERROR_SENTINEL.to_string()
        }
    }
}

/// Evaluate cell text, reporting why a formula failed.
pub fn try_evaluate(formula: &str, sheet: &Sheet) -> EvalResult<String> {
    let Some(expression) = formula.strip_prefix('=') else {
        return Ok(formula.to_string());
    };
    let expression = expression.trim();

    if let Some(caps) = fn_call_re().captures(expression) {
        let name = &caps[1];
        let argument = caps[2].trim();
        if let Some(builtin) = range_builtin(name) {
            return eval_range_call(name, argument, builtin.apply, sheet);
        }
        if let Some(builtin) = text_builtin(name) {
            let cell_ref = CellRef::from_str(argument).ok_or_else(|| bad_argument(name, argument))?;
            return Ok((builtin.apply)(sheet.raw_value(&cell_ref)));
        }
    }

    if bare_ref_re().is_match(expression) {
        if let Some(cell_ref) = CellRef::from_str(expression) {
            return Ok(sheet.raw_value(&cell_ref).to_string());
        }
    }

    let value = eval_arithmetic(expression, sheet)?;
    Ok(format_number(value))
}

fn eval_range_call(
    name: &str,
    argument: &str,
    apply: fn(&[&str]) -> f64,
    sheet: &Sheet,
) -> EvalResult<String> {
    let range = CellRange::parse(argument).ok_or_else(|| bad_argument(name, argument))?;
    let cells = range.cells()?;
    let values: Vec<&str> = cells.iter().map(|r| sheet.raw_value(r)).collect();

    let result = apply(&values);
    if !result.is_finite() {
        return Err(EvalError::NonFinite);
    }
    Ok(format_number(result))
}

fn bad_argument(function: &str, argument: &str) -> EvalError {
    EvalError::BadArgument {
        function: function.to_string(),
        argument: argument.to_string(),
    }
}

fn bare_ref_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z]+[0-9]+$").expect("bare reference regex must compile"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Cell;

    fn sheet(cells: &[(&str, &str)]) -> Sheet {
        cells
            .iter()
            .map(|(id, value)| (CellRef::from_str(id).unwrap(), Cell::new_literal(value)))
            .collect()
    }

    #[test]
    fn test_literal_passthrough() {
        let s = sheet(&[("A1", "1")]);
        for text in ["", "hello", "42", " =A1", "A1+1", "#ERROR!"] {
            assert_eq!(evaluate(text, &s), text);
        }
    }

    #[test]
    fn test_sum() {
        assert_eq!(evaluate("=SUM(A1:A1)", &sheet(&[("A1", "5")])), "5");
        let s = sheet(&[("A1", "1"), ("B1", "2"), ("A2", "3"), ("B2", "4")]);
        assert_eq!(evaluate("=SUM(A1:B2)", &s), "10");
        assert_eq!(evaluate("=SUM(A1:B1)", &s), "3");
    }

    #[test]
    fn test_average_max_min() {
        let s = sheet(&[("A1", "2"), ("A2", "x"), ("A3", "7")]);
        assert_eq!(evaluate("=AVERAGE(A1:A3)", &s), "3");
        assert_eq!(evaluate("=MAX(A1:A3)", &s), "7");
        assert_eq!(evaluate("=MIN(A1:A3)", &s), "0");
        assert_eq!(evaluate("=AVERAGE(A1:A1)", &Sheet::new()), "0");
    }

    #[test]
    fn test_reversed_range_reduces_to_zero() {
        let s = sheet(&[("A1", "2"), ("A2", "3")]);
        assert_eq!(evaluate("=SUM(A2:A1)", &s), "0");
        assert_eq!(evaluate("=AVERAGE(A2:A1)", &s), "0");
        assert_eq!(evaluate("=MAX(A2:A1)", &s), "0");
    }

    #[test]
    fn test_count() {
        assert_eq!(evaluate("=COUNT(A1:B1)", &sheet(&[("A1", "5"), ("B1", "x")])), "1");
        assert_eq!(evaluate("=COUNT(A1:C1)", &sheet(&[("A1", "")])), "0");
    }

    #[test]
    fn test_text_functions() {
        assert_eq!(evaluate("=UPPER(A1)", &sheet(&[("A1", "abc")])), "ABC");
        assert_eq!(evaluate("=LOWER(A1)", &sheet(&[("A1", "MiXeD")])), "mixed");
        assert_eq!(evaluate("=TRIM(A1)", &sheet(&[("A1", "  hi  ")])), "hi");
        assert_eq!(evaluate("=TRIM(B9)", &Sheet::new()), "");
    }

    #[test]
    fn test_bad_function_arguments() {
        let s = sheet(&[("A1", "5")]);
        assert_eq!(evaluate("=SUM(A1)", &s), ERROR_SENTINEL);
        assert_eq!(evaluate("=UPPER(A1:A2)", &s), ERROR_SENTINEL);
        assert_eq!(evaluate("=SUM(A1:A2)+SUM(B1:B2)", &s), ERROR_SENTINEL);
        assert!(matches!(
            try_evaluate("=SUM(A1)", &s),
            Err(EvalError::BadArgument { .. })
        ));
    }

    #[test]
    fn test_bare_reference() {
        let s = sheet(&[("A1", "hello"), ("AB12", "far")]);
        assert_eq!(evaluate("=A1", &s), "hello");
        assert_eq!(evaluate("=AB12", &s), "far");
        assert_eq!(evaluate("=C3", &s), "");
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(evaluate("=A1+B1", &sheet(&[("A1", "2"), ("B1", "3")])), "5");
        assert_eq!(evaluate("=A1+B1", &sheet(&[("A1", "x"), ("B1", "3")])), "3");
        assert_eq!(evaluate("=A1/4", &sheet(&[("A1", "10")])), "2.5");
        assert_eq!(evaluate("= 1 + 2 * 3", &Sheet::new()), "7");
        assert_eq!(evaluate("=0.1+0.2", &Sheet::new()), "0.30000000000000004");
    }

    #[test]
    fn test_arithmetic_errors() {
        let s = sheet(&[("A1", "2")]);
        assert_eq!(evaluate("=A1+", &s), ERROR_SENTINEL);
        assert_eq!(evaluate("=A1/0", &s), ERROR_SENTINEL);
        assert_eq!(evaluate("=(A1", &s), ERROR_SENTINEL);
        assert_eq!(evaluate("=", &s), ERROR_SENTINEL);
        assert_eq!(evaluate("=process.exit()", &s), ERROR_SENTINEL);
        assert_eq!(try_evaluate("=1/0", &s), Err(EvalError::NonFinite));
    }

    #[test]
    fn test_oversized_range_is_error() {
        assert_eq!(evaluate("=SUM(A1:A1000001)", &Sheet::new()), ERROR_SENTINEL);
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let s = sheet(&[("A1", "3"), ("A2", "4")]);
        let first = evaluate("=A1*A2+1", &s);
        assert_eq!(first, "13");
        for _ in 0..5 {
            assert_eq!(evaluate("=A1*A2+1", &s), first);
        }
    }
}
