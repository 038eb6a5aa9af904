//! Store configuration.
//!
//! Loaded from TOML; every key is optional:
//!
//! ```toml
//! rows = 100
//! cols = 26
//! propagation = "substring"   # or "exact_reference"
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::error::Result;
use cellgrid_engine::engine::{CellRef, mentions_cell_text, references_cell};

pub const DEFAULT_ROWS: usize = 100;
pub const DEFAULT_COLS: usize = 26;

/// How the propagation pass decides that a formula mentions the edited cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropagationMode {
    /// The formula text contains the identifier as a substring.
    #[default]
    Substring,
    /// The formula names the cell as a whole token or inside a range.
    ExactReference,
}

impl PropagationMode {
    pub fn mentions(self, formula: &str, cell_ref: &CellRef) -> bool {
        match self {
            PropagationMode::Substring => mentions_cell_text(formula, cell_ref),
            PropagationMode::ExactReference => references_cell(formula, cell_ref),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub rows: usize,
    pub cols: usize,
    pub propagation: PropagationMode,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            propagation: PropagationMode::default(),
        }
    }
}

impl StoreConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
