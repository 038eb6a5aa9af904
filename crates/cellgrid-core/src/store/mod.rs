//! Sheet state and operations (UI-agnostic).

mod io;
mod ops;
mod selection;
mod state;

pub use ops::StylePatch;
pub use selection::{GridPos, Selection};
pub use state::{CellUpdate, SheetStore};
