//! Reference extraction from formula strings.
//!
//! Two ways of asking "does this formula mention that cell":
//! - [`mentions_cell_text`]: plain substring test on the identifier. Cheap, and
//!   what the store uses by default, but `=SUM(AA1:AA2)` mentions `A1` and
//!   `=SUM(A1:A3)` does not mention `A2`.
//! - [`references_cell`]: token-based. Identifiers must match exactly and range
//!   interiors count.

use regex::Regex;
use std::sync::OnceLock;

use super::cell_ref::CellRef;
use super::range::CellRange;

/// A formula reference: a single cell or a range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reference {
    Cell(CellRef),
    Range(CellRange),
}

impl Reference {
    pub fn covers(&self, cell: &CellRef) -> bool {
        match self {
            Reference::Cell(r) => r == cell,
            Reference::Range(range) => range.contains(cell),
        }
    }
}

/// Regex matching a cell identifier token, optionally followed by `:end`.
///
/// Captures:
/// - group 1: start (or only) cell identifier
/// - group 2: end cell identifier, if a range
pub fn reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"([A-Z]+[0-9]+)(?:\s*:\s*([A-Z]+[0-9]+))?")
            .expect("reference regex must compile")
    })
}

/// Extract all references in a formula, in order of appearance.
pub fn extract_references(formula: &str) -> Vec<Reference> {
    let mut refs = Vec::new();
    for caps in reference_re().captures_iter(formula) {
        let Some(start) = CellRef::from_str(&caps[1]) else {
            continue;
        };
        match caps.get(2).and_then(|m| CellRef::from_str(m.as_str())) {
            Some(end) => refs.push(Reference::Range(CellRange::new(start, end))),
            None => refs.push(Reference::Cell(start)),
        }
    }
    refs
}

/// Token-exact test: the formula names `target` directly or through a range.
pub fn references_cell(formula: &str, target: &CellRef) -> bool {
    extract_references(formula)
        .iter()
        .any(|reference| reference.covers(target))
}

/// Substring test on the identifier text.
pub fn mentions_cell_text(formula: &str, target: &CellRef) -> bool {
    formula.contains(&target.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(id: &str) -> CellRef {
        CellRef::from_str(id).unwrap()
    }

    #[test]
    fn test_extract_references_cells_and_ranges() {
        let refs = extract_references("=SUM(A1:B2)+C3*AA10");
        assert_eq!(
            refs,
            vec![
                Reference::Range(CellRange::new(cell("A1"), cell("B2"))),
                Reference::Cell(cell("C3")),
                Reference::Cell(cell("AA10")),
            ]
        );
    }

    #[test]
    fn test_substring_matching_has_false_positives() {
        assert!(mentions_cell_text("=SUM(AA1:AA2)", &cell("A1")));
        assert!(mentions_cell_text("=A10+1", &cell("A1")));
        assert!(!mentions_cell_text("=SUM(A1:A3)", &cell("A2")));
    }

    #[test]
    fn test_exact_matching() {
        assert!(!references_cell("=SUM(AA1:AA2)", &cell("A1")));
        assert!(!references_cell("=A10+1", &cell("A1")));
        assert!(references_cell("=SUM(A1:A3)", &cell("A2")));
        assert!(references_cell("=B1*2", &cell("B1")));
        assert!(!references_cell("=B1*2", &cell("B2")));
    }
}
