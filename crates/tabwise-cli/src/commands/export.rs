//! Export command - write a filtered/sorted view or a comparison bucket.

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use tabwise::{Dataset, ExportFormat, Tabwise, ViewConfig, ViewEngine};

use super::{apply_query, CommandResult};
use crate::cli::Bucket;

pub struct ExportArgs {
    pub file: PathBuf,
    pub output: PathBuf,
    pub format: Option<ExportFormat>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub desc: bool,
    pub against: Option<PathBuf>,
    pub key: Option<String>,
    pub bucket: Bucket,
}

/// The dataset to export: the file itself, or one bucket of a comparison.
fn source_dataset(tabwise: &Tabwise, args: &ExportArgs) -> Result<Arc<Dataset>, Box<dyn std::error::Error>> {
    let left = tabwise.load(&args.file)?;
    let Some(right_path) = &args.against else {
        return Ok(left);
    };

    let right = tabwise.load(right_path)?;
    let mut engine = tabwise.compare(left, right);
    if let Some(key) = &args.key {
        engine.set_key(&key.to_lowercase())?;
    }
    let comparison = engine.comparison()?;

    let dataset = match args.bucket {
        Bucket::Matches => comparison.matches_dataset(),
        Bucket::Left => comparison.unique_left_dataset(),
        Bucket::Right => comparison.unique_right_dataset(),
        Bucket::None | Bucket::All => {
            return Err(format!(
                "Cannot export bucket '{}'; choose matches, left, or right",
                args.bucket
            )
            .into());
        }
    };
    Ok(Arc::new(dataset))
}

pub fn run(tabwise: &Tabwise, args: ExportArgs) -> CommandResult {
    let format = args
        .format
        .or_else(|| ExportFormat::from_path(&args.output))
        .unwrap_or_default();

    let dataset = source_dataset(tabwise, &args)?;
    let mut view = ViewEngine::with_config(dataset, ViewConfig::default().full().with_editable(false));
    apply_query(&mut view, args.search, args.sort, args.desc)?;

    let table = view.export_visible();
    table.save(&args.output, format)?;

    println!(
        "{} {} rows to {} ({})",
        "Exported".green().bold(),
        table.rows.len(),
        args.output.display().to_string().white(),
        format
    );

    Ok(())
}
