//! CLI command implementations.

pub mod compare;
pub mod export;
pub mod keys;
pub mod view;

use std::path::Path;

use colored::Colorize;
use tabwise::{CellValue, Row, SortSpec, Tabwise, TabwiseConfig, ViewEngine};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Widest a rendered column may get before values are truncated.
const MAX_CELL_WIDTH: usize = 24;

/// Build the library facade, from a configuration file if one was given.
pub fn load_tabwise(config: Option<&Path>) -> Result<Tabwise, Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => TabwiseConfig::from_json_file(path)?,
        None => TabwiseConfig::default(),
    };
    Ok(Tabwise::with_config(config)?)
}

/// Apply `--search` and `--sort`/`--desc` to a view.
pub fn apply_query(
    view: &mut ViewEngine,
    search: Option<String>,
    sort: Option<String>,
    desc: bool,
) -> CommandResult {
    if let Some(term) = search {
        view.set_search(term);
    }
    if let Some(key) = sort {
        let key = key.to_lowercase();
        if !view.dataset().has_column(&key) {
            return Err(format!(
                "Unknown column: {}. Available: {}",
                key,
                view.columns().join(", ")
            )
            .into());
        }
        let spec = if desc {
            SortSpec::descending(key)
        } else {
            SortSpec::ascending(key)
        };
        view.set_sort(Some(spec));
    }
    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

/// Print rows as an aligned text table.
///
/// `label` heads the leading gutter column (row indices, usually), and
/// `is_selected(row, col)` highlights cells by displayed position.
pub fn print_table<'a>(
    label: &str,
    columns: &[String],
    rows: impl IntoIterator<Item = (String, &'a Row)>,
    is_selected: impl Fn(usize, usize) -> bool,
) {
    let rows: Vec<(String, &Row)> = rows.into_iter().collect();

    let gutter = rows
        .iter()
        .map(|(g, _)| g.chars().count())
        .chain(std::iter::once(label.chars().count()))
        .max()
        .unwrap_or(0);

    let widths: Vec<usize> = columns
        .iter()
        .map(|c| {
            rows.iter()
                .map(|(_, r)| r.get(c).to_text().chars().count())
                .chain(std::iter::once(c.chars().count()))
                .max()
                .unwrap_or(0)
                .min(MAX_CELL_WIDTH)
        })
        .collect();

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(c, &w)| format!("{:<w$}", truncate(c, w), w = w))
        .collect();
    println!(
        "{:>g$}  {}",
        label.dimmed(),
        header.join("  ").cyan().bold(),
        g = gutter
    );

    for (r, (gutter_text, row)) in rows.iter().enumerate() {
        let cells: Vec<String> = columns
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(c, (col, &w))| {
                let value = row.get(col);
                let text = format!("{:<w$}", truncate(&value.to_text(), w), w = w);
                if is_selected(r, c) {
                    text.black().on_yellow().to_string()
                } else {
                    match value {
                        CellValue::Number(_) => text.green().to_string(),
                        _ => text,
                    }
                }
            })
            .collect();
        println!("{:>g$}  {}", gutter_text.dimmed(), cells.join("  "), g = gutter);
    }
}
