//! Fuzz target for view engine operations.
//!
//! Drives a ViewEngine with an arbitrary sequence of user actions over a
//! parsed dataset. No action sequence may panic.

#![no_main]

use std::sync::Arc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tabwise::view::GridPoint;
use tabwise::{Parser, ViewConfig, ViewEngine};

#[derive(Debug, Arbitrary)]
enum Action {
    Search(String),
    ToggleSort(u8),
    Page(u8),
    PointerDown { row: u8, col: u8, extend: bool },
    PointerEnter { row: u8, col: u8 },
    PointerUp,
    SelectRow(u8),
    SelectColumn(u8),
    BeginEdit { row: u8, col: u8 },
    Stage(String),
    Commit,
    Cancel,
    AddRow,
    DeleteRow(u8),
    Stats,
}

#[derive(Debug, Arbitrary)]
struct Input {
    csv: String,
    page_size: u8,
    actions: Vec<Action>,
}

fuzz_target!(|input: Input| {
    let Ok(dataset) = Parser::new().parse_bytes(input.csv.as_bytes(), "fuzz") else {
        return;
    };
    let config = ViewConfig::default().with_page_size(usize::from(input.page_size).max(1));
    let mut view = ViewEngine::with_config(Arc::new(dataset), config);

    for action in input.actions.into_iter().take(64) {
        match action {
            Action::Search(term) => view.set_search(term),
            Action::ToggleSort(col) => {
                if let Some(key) = view.columns().get(usize::from(col)).cloned() {
                    view.toggle_sort(&key);
                }
            }
            Action::Page(page) => view.set_page(usize::from(page)),
            Action::PointerDown { row, col, extend } => {
                view.pointer_down(GridPoint::cell(row.into(), col.into()), extend)
            }
            Action::PointerEnter { row, col } => {
                view.pointer_enter(GridPoint::cell(row.into(), col.into()))
            }
            Action::PointerUp => view.pointer_up(),
            Action::SelectRow(row) => view.select_row(row.into(), false),
            Action::SelectColumn(col) => view.select_column(col.into()),
            Action::BeginEdit { row, col } => {
                view.begin_edit_at(row.into(), col.into());
            }
            Action::Stage(text) => view.stage_edit(text),
            Action::Commit => {
                view.commit_edit();
            }
            Action::Cancel => view.cancel_edit(),
            Action::AddRow => {
                view.add_row();
            }
            Action::DeleteRow(index) => {
                view.delete_row(index.into());
            }
            Action::Stats => {
                let _ = view.stats();
            }
        }
    }
});
