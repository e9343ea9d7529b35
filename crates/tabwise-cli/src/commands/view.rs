//! View command - search, sort, page through, and select cells of a file.

use std::path::PathBuf;

use colored::Colorize;
use tabwise::view::GridPoint;
use tabwise::{AggregateStats, Tabwise, ViewEngine};

use super::{apply_query, print_table, CommandResult};
use crate::cli::CellRange;

pub struct ViewArgs {
    pub file: PathBuf,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub desc: bool,
    pub page: usize,
    pub page_size: Option<usize>,
    pub all: bool,
    pub select: Option<CellRange>,
    pub column: Option<String>,
    pub json: bool,
}

fn grid_point((row, col): (usize, Option<usize>)) -> GridPoint {
    match col {
        Some(col) => GridPoint::cell(row, col),
        None => GridPoint::whole_row(row),
    }
}

pub fn run(tabwise: &Tabwise, args: ViewArgs) -> CommandResult {
    let dataset = tabwise.load(&args.file)?;

    let mut config = tabwise.config().view.clone();
    if args.all {
        config = config.full();
    } else if let Some(page_size) = args.page_size {
        config = config.with_page_size(page_size);
    }
    config.validate()?;

    let mut view = ViewEngine::with_config(dataset, config);
    apply_query(&mut view, args.search, args.sort, args.desc)?;
    view.set_page(args.page);

    if let Some(range) = args.select {
        view.pointer_down(grid_point(range.start), false);
        view.pointer_enter(grid_point(range.end));
        view.pointer_up();
    } else if let Some(column) = args.column {
        let column = column.to_lowercase();
        let position = view
            .dataset()
            .column_position(&column)
            .ok_or_else(|| format!("Unknown column: {}", column))?;
        view.select_column(position);
    }

    let stats = view.stats();

    if args.json {
        let rows: Vec<_> = view
            .displayed_rows()
            .map(|r| serde_json::json!({ "index": r.index, "row": &r.row }))
            .collect();
        let output = serde_json::json!({
            "source": view.dataset().metadata(),
            "columns": view.columns(),
            "search": view.search(),
            "sort": view.sort(),
            "page": view.page(),
            "page_count": view.page_count(),
            "visible_rows": view.visible_count(),
            "rows": rows,
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let metadata = view.dataset().metadata();
    println!(
        "{} {} ({} rows, {} columns)",
        "Viewing".cyan().bold(),
        metadata.source_name.white(),
        metadata.row_count,
        view.dataset().column_count()
    );
    println!();

    if view.displayed_count() == 0 {
        println!("{}", "No rows match.".yellow());
    } else {
        print_table(
            "#",
            view.columns(),
            view.displayed_rows().map(|r| (r.index.to_string(), &r.row)),
            |row, col| view.is_selected(row, col),
        );
    }

    println!();
    println!(
        "Page {}/{} - {} of {} rows visible",
        view.page(),
        view.page_count(),
        view.visible_count().to_string().white().bold(),
        view.dataset().row_count()
    );

    if let Some(stats) = stats {
        print_stats(&stats);
    }

    Ok(())
}

fn print_stats(stats: &AggregateStats) {
    println!();
    println!("{}", "Selection:".yellow().bold());
    println!("  Cells:   {}", stats.cell_count);
    println!("  Numeric: {}", stats.numeric_count);
    if let Some(numeric) = &stats.numeric {
        println!("  Sum:     {}", numeric.sum.to_string().green());
        println!("  Mean:    {}", numeric.mean);
        println!("  Median:  {}", numeric.median);
        println!("  Min:     {}", numeric.min);
        println!("  Max:     {}", numeric.max);
    }
}
