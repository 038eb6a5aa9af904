//! End-to-end store scenarios: edits, propagation, structure changes, persistence.

use cellgrid::{
    CellRef, CellStyle, CellUpdate, GridPos, PropagationMode, Selection, SheetStore, StoreConfig,
    StylePatch,
};
use std::path::PathBuf;

struct Cleanup(PathBuf);

impl Drop for Cleanup {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

fn temp_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "cellgrid_it_{}_{}_{}.json",
        tag,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos(),
    ))
}

fn cell(id: &str) -> CellRef {
    CellRef::from_str(id).unwrap()
}

#[test]
fn test_edit_recomputes_direct_dependents_only() {
    let mut store = SheetStore::new();
    store.commit_input(&cell("A1"), "1");
    store.commit_input(&cell("B1"), "=A1+1");
    store.commit_input(&cell("C1"), "=B1+1");

    store.update_cell(&cell("A1"), CellUpdate::value("5"));
    assert_eq!(store.display_value(&cell("B1")), "6");
    assert_eq!(store.display_value(&cell("C1")), "3");

    // A second edit to B1 brings C1 up to date.
    store.commit_input(&cell("B1"), "=A1+1");
    assert_eq!(store.display_value(&cell("C1")), "7");
}

#[test]
fn test_clearing_formula_keeps_literal_value() {
    let mut store = SheetStore::new();
    store.commit_input(&cell("A1"), "=2*3");
    store.update_cell(&cell("A1"), CellUpdate::formula(""));
    let a1 = store.cell(&cell("A1")).unwrap();
    assert_eq!(a1.value, "6");
    assert!(!a1.has_formula());
}

#[test]
fn test_delete_row_shifts_everything_below() {
    let mut store = SheetStore::new();
    for row in 1..=6 {
        store.commit_input(&cell(&format!("A{row}")), &format!("r{row}"));
        store.commit_input(&cell(&format!("C{row}")), &row.to_string());
    }
    let rows_before = store.row_count();

    store.delete_row(2).unwrap();

    assert_eq!(store.row_count(), rows_before - 1);
    for row in 1..=2 {
        assert_eq!(store.display_value(&cell(&format!("A{row}"))), format!("r{row}"));
    }
    for row in 3..=5 {
        assert_eq!(store.display_value(&cell(&format!("A{row}"))), format!("r{}", row + 1));
        assert_eq!(store.display_value(&cell(&format!("C{row}"))), (row + 1).to_string());
    }
    assert!(store.cell(&cell("A6")).is_none());
}

#[test]
fn test_exact_reference_mode_from_toml() {
    let config = StoreConfig::from_toml_str("propagation = \"exact_reference\"").unwrap();
    let mut store = SheetStore::with_config(&config);
    assert_eq!(store.propagation(), PropagationMode::ExactReference);

    store.commit_input(&cell("A1"), "1");
    store.commit_input(&cell("A2"), "2");
    store.commit_input(&cell("B1"), "=SUM(A1:A2)");
    store.commit_input(&cell("A2"), "10");
    assert_eq!(store.display_value(&cell("B1")), "11");
}

#[test]
fn test_selection_scoped_cleanup() {
    let mut store = SheetStore::new();
    for (row, name) in ["ann", "bob", "ann", "cy"].iter().enumerate() {
        store.commit_input(&CellRef::new(0, row), name);
    }
    store.set_selection(Selection::new(
        GridPos::new(0, 0),
        GridPos::new(3, 0),
        GridPos::new(0, 0),
    ));

    assert_eq!(store.find_and_replace("ann", "anne"), 2);
    assert_eq!(store.remove_duplicates(), 1);
    let names: Vec<String> = (0..3)
        .map(|row| store.display_value(&CellRef::new(0, row)))
        .collect();
    assert_eq!(names, vec!["anne", "bob", "cy"]);
}

#[test]
fn test_json_round_trip_through_files() {
    let path = temp_path("round_trip");
    let _cleanup = Cleanup(path.clone());

    let mut store = SheetStore::new();
    store.commit_input(&cell("A1"), "3");
    store.commit_input(&cell("B1"), "=A1*A1");
    store.commit_input(&cell("C2"), "note");
    store.set_selection(Selection::single(1, 2));
    store.apply_formatting(StylePatch {
        bold: Some(true),
        font_size: Some(20.0),
        background_color: Some("#eeeeee".to_string()),
        ..Default::default()
    });
    store.save_file_as(&path).unwrap();

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved["B1"]["formula"], "=A1*A1");
    assert_eq!(saved["B1"]["value"], "9");
    assert_eq!(saved["C2"]["style"]["fontSize"], 20.0);
    assert_eq!(saved["C2"]["style"]["backgroundColor"], "#eeeeee");

    let reloaded = SheetStore::with_file(path.clone(), &StoreConfig::default()).unwrap();
    assert_eq!(*reloaded.snapshot(), *store.snapshot());
    let c2 = reloaded.cell(&cell("C2")).unwrap();
    assert_eq!(
        c2.style,
        CellStyle {
            bold: true,
            font_size: 20.0,
            background_color: "#eeeeee".to_string(),
            ..CellStyle::default()
        }
    );
}
