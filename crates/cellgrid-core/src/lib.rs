//! cellgrid-core - UI-agnostic sheet store + storage.

pub mod config;
pub mod error;
pub mod storage;
pub mod store;

pub use config::{PropagationMode, StoreConfig};
pub use error::{CellgridError, Result};
pub use store::{CellUpdate, GridPos, Selection, SheetStore, StylePatch};

pub use cellgrid_engine::engine::CellRef;
