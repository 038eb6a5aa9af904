use super::SheetStore;
use crate::error::{CellgridError, Result};
use crate::storage::{parse_json, write_json};
use log::{debug, warn};
use std::path::{Path, PathBuf};

impl SheetStore {
    /// Save to current file path.
    /// Returns the path saved to.
    pub fn save_file(&mut self) -> Result<PathBuf> {
        let Some(path) = &self.file_path else {
            return Err(CellgridError::NoFilePath);
        };

        write_json(path, &self.sheet)?;
        self.modified = false;
        debug!("saved {} cells to {}", self.sheet.len(), path.display());
        Ok(path.clone())
    }

    /// Save to `path` and make it the current file path.
    pub fn save_file_as(&mut self, path: &Path) -> Result<PathBuf> {
        write_json(path, &self.sheet)?;
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        debug!("saved {} cells to {}", self.sheet.len(), path.display());
        Ok(path.to_path_buf())
    }

    /// Load from file, replacing the whole sheet.
    ///
    /// Stored values are taken as the cached results of their formulas; nothing
    /// is re-evaluated. A file that fails to read or parse leaves the store
    /// untouched.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let sheet = match parse_json(path) {
            Ok(sheet) => sheet,
            Err(err) => {
                warn!("rejected sheet file {}: {}", path.display(), err);
                return Err(err);
            }
        };

        self.replace_sheet(sheet);
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        debug!("loaded {} cells from {}", self.sheet.len(), path.display());
        Ok(())
    }
}
