//! JSON sheet persistence.
//!
//! The sheet is one object keyed by cell identifier:
//!
//! ```json
//! {
//!   "A1": { "value": "5", "formula": "", "style": { "bold": false, ... } },
//!   "B1": { "value": "6", "formula": "=A1+1", "style": { ... } }
//! }
//! ```
//!
//! Missing per-cell fields fall back to defaults. Keys are written in row-major
//! order.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{CellgridError, Result};
use cellgrid_engine::engine::{Cell, CellRef, Sheet};

/// Parse a sheet JSON file
pub fn parse_json(path: &Path) -> Result<Sheet> {
    let content = fs::read_to_string(path)?;
    parse_json_content(&content)
}

/// Parse sheet JSON from a string. Fails without partial results on malformed
/// JSON or an invalid cell identifier.
pub fn parse_json_content(content: &str) -> Result<Sheet> {
    let raw: HashMap<String, Cell> = serde_json::from_str(content)?;

    let mut sheet = Sheet::new();
    for (id, cell) in raw {
        let cell_ref = CellRef::from_str(&id).ok_or(CellgridError::InvalidCellId(id))?;
        sheet.insert(cell_ref, cell);
    }
    Ok(sheet)
}

/// Write a sheet to a JSON file
pub fn write_json(path: &Path, sheet: &Sheet) -> Result<()> {
    let content = write_json_content(sheet)?;
    fs::write(path, content)?;
    Ok(())
}

/// Write a sheet to a JSON string
pub fn write_json_content(sheet: &Sheet) -> Result<String> {
    Ok(serde_json::to_string_pretty(&SheetJson(sheet))?)
}

struct SheetJson<'a>(&'a Sheet);

impl Serialize for SheetJson<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let refs = self.0.sorted_refs();
        let mut map = serializer.serialize_map(Some(refs.len()))?;
        for cell_ref in refs {
            if let Some(cell) = self.0.get(&cell_ref) {
                map.serialize_entry(&cell_ref.to_string(), cell)?;
            }
        }
        map.end()
    }
}
