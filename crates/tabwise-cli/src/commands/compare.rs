//! Compare command - join two files on a key and report the differences.

use std::path::PathBuf;

use colored::Colorize;
use tabwise::{Comparison, FieldDiff, FieldStatus, Row, Tabwise};

use super::{print_table, CommandResult};
use crate::cli::Bucket;

pub struct CompareArgs {
    pub left: PathBuf,
    pub right: PathBuf,
    pub key: Option<String>,
    pub show: Bucket,
    pub diff: Option<usize>,
    pub left_label: Option<String>,
    pub right_label: Option<String>,
    pub json: bool,
}

pub fn run(tabwise: &Tabwise, args: CompareArgs) -> CommandResult {
    let mut config = tabwise.config().clone();
    if let Some(label) = args.left_label {
        config.compare.left_label = label;
    }
    if let Some(label) = args.right_label {
        config.compare.right_label = label;
    }
    let tabwise = Tabwise::with_config(config)?;

    let left = tabwise.load(&args.left)?;
    let right = tabwise.load(&args.right)?;
    let mut engine = tabwise.compare(left, right);
    if let Some(key) = &args.key {
        engine.set_key(&key.to_lowercase())?;
    }
    let comparison = engine.comparison()?;

    let diff = match args.diff {
        Some(n) => Some(comparison.diff_match(n).ok_or_else(|| {
            format!(
                "No matched row {}; there are {} matches",
                n,
                comparison.matches().len()
            )
        })?),
        None => None,
    };

    if args.json {
        let mut output = serde_json::json!({
            "key": comparison.key(),
            "labels": comparison.labels(),
            "summary": comparison.summary(),
            "merged_columns": comparison.merged_columns(),
        });
        if matches!(args.show, Bucket::Matches | Bucket::All) {
            output["matches"] = serde_json::to_value(comparison.matches())?;
        }
        if matches!(args.show, Bucket::Left | Bucket::All) {
            output["unique_left"] = serde_json::to_value(comparison.unique_left())?;
        }
        if matches!(args.show, Bucket::Right | Bucket::All) {
            output["unique_right"] = serde_json::to_value(comparison.unique_right())?;
        }
        if let Some(diff) = &diff {
            output["diff"] = serde_json::to_value(diff)?;
        }
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_summary(comparison);

    if matches!(args.show, Bucket::Matches | Bucket::All) {
        print_bucket("Matches", comparison.merged_columns(), comparison.matches());
    }
    if matches!(args.show, Bucket::Left | Bucket::All) {
        let title = format!("Only in {}", comparison.labels().left);
        print_bucket(&title, comparison.left_columns(), comparison.unique_left());
    }
    if matches!(args.show, Bucket::Right | Bucket::All) {
        let title = format!("Only in {}", comparison.labels().right);
        print_bucket(&title, comparison.right_columns(), comparison.unique_right());
    }

    if let (Some(n), Some(diff)) = (args.diff, &diff) {
        print_diff(comparison, n, diff);
    }

    Ok(())
}

fn print_summary(comparison: &Comparison) {
    let summary = comparison.summary();
    let labels = comparison.labels();

    println!(
        "{} {} {}",
        "Comparing on".cyan().bold(),
        comparison.key().white().bold(),
        format!("({} vs {})", labels.left, labels.right).dimmed()
    );
    println!();
    println!("  Matched:       {}", summary.matches.to_string().green());
    println!(
        "  Only in {}: {}",
        labels.left,
        summary.left_only.to_string().yellow()
    );
    println!(
        "  Only in {}: {}",
        labels.right,
        summary.right_only.to_string().yellow()
    );
    if summary.shadowed_right > 0 {
        println!(
            "  {} {} rows in {} share a key with a later row and were not compared",
            "Note:".yellow().bold(),
            summary.shadowed_right,
            labels.right
        );
    }
}

fn print_bucket(title: &str, columns: &[String], rows: &[Row]) {
    println!();
    println!("{} ({})", title.yellow().bold(), rows.len());
    if rows.is_empty() {
        return;
    }
    print_table(
        "#",
        columns,
        rows.iter().enumerate().map(|(i, r)| (i.to_string(), r)),
        |_, _| false,
    );
}

fn print_diff(comparison: &Comparison, n: usize, diff: &[FieldDiff]) {
    let labels = comparison.labels();
    println!();
    println!("{} {}", "Diff of match".yellow().bold(), n);

    for field in diff {
        let marker = match field.status {
            FieldStatus::Mismatch => "≠".red().bold(),
            FieldStatus::Match => "=".green(),
        };
        let delta = field
            .delta
            .map(|d| format!(" (Δ {:+})", d).cyan().to_string())
            .unwrap_or_default();
        println!(
            "  {} {}: {}={} {}={}{}",
            marker,
            field.column.white().bold(),
            labels.left,
            field.left,
            labels.right,
            field.right,
            delta
        );
    }
}
