//! Keys command - list join key candidates for two files.

use std::path::PathBuf;

use colored::Colorize;
use tabwise::{Tabwise, TabwiseError};

use super::CommandResult;

pub fn run(tabwise: &Tabwise, left: PathBuf, right: PathBuf) -> CommandResult {
    let left = tabwise.load(&left)?;
    let right = tabwise.load(&right)?;
    let engine = tabwise.compare(left, right);

    let candidates = engine.candidate_keys();
    if candidates.is_empty() {
        return Err(TabwiseError::Incomparable {
            left: engine.left().metadata().source_name.clone(),
            right: engine.right().metadata().source_name.clone(),
        }
        .into());
    }

    println!(
        "{} {} and {}",
        "Shared columns of".cyan().bold(),
        engine.left().metadata().source_name.white(),
        engine.right().metadata().source_name.white()
    );
    for column in &candidates {
        if Some(column.as_str()) == engine.key() {
            println!("  {} {}", column.green().bold(), "(default key)".dimmed());
        } else {
            println!("  {}", column);
        }
    }

    Ok(())
}
