//! cellgrid - formula engine and cell store in one crate.

pub use cellgrid_core::{
    CellRef, CellUpdate, CellgridError, GridPos, PropagationMode, Result, Selection, SheetStore,
    StoreConfig, StylePatch, config, storage, store,
};
pub use cellgrid_engine::{
    Cell, CellRange, CellStyle, ERROR_SENTINEL, EvalError, EvalResult, Sheet, builtins, engine,
    evaluate, try_evaluate,
};
