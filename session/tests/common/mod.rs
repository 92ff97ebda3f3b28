//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for grid session integration tests.

use engine::{CellValue, Column, Dataset, Schema};
use session::{Clipboard, GridSession, MemoryClipboard, MemoryStore};

/// A session over the three-row catalog from the end-to-end scenario:
/// two Books rows and one Games row.
pub fn catalog_session() -> GridSession<MemoryStore> {
    catalog_session_with_store(MemoryStore::new())
}

pub fn catalog_session_with_store(store: MemoryStore) -> GridSession<MemoryStore> {
    GridSession::new(
        catalog_dataset(),
        store,
        Box::new(MemoryClipboard::new()),
        Box::new(MemoryClipboard::new()),
    )
}

/// A session over the built-in six-row orders dataset.
pub fn orders_session() -> GridSession<MemoryStore> {
    GridSession::new(
        engine::sample::orders_dataset(),
        MemoryStore::new(),
        Box::new(MemoryClipboard::new()),
        Box::new(MemoryClipboard::new()),
    )
}

pub fn catalog_dataset() -> Dataset {
    let schema = Schema::new(vec![
        Column::categorical("cat", "Category"),
        Column::categorical("pub", "Publisher"),
        Column::numeric("orders", "Orders"),
    ]);
    let rows = vec![
        vec![CellValue::text("Books"), CellValue::text("X"), CellValue::Number(10.0)],
        vec![CellValue::text("Books"), CellValue::text("Y"), CellValue::Number(20.0)],
        vec![CellValue::text("Games"), CellValue::text("Z"), CellValue::Number(5.0)],
    ];
    Dataset::new(schema, rows)
}

/// Clipboard that always rejects writes.
pub struct BrokenClipboard;

impl Clipboard for BrokenClipboard {
    fn write_text(&mut self, _text: &str) -> Result<(), String> {
        Err("clipboard unavailable".to_string())
    }
}

/// Clipboard that records every accepted write.
#[derive(Default)]
pub struct SpyClipboard {
    pub writes: std::rc::Rc<std::cell::RefCell<Vec<String>>>,
}

impl Clipboard for SpyClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), String> {
        self.writes.borrow_mut().push(text.to_string());
        Ok(())
    }
}
