//! Tabwise CLI - explore, edit, and compare delimited datasets.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default = if verbose { "tabwise=debug" } else { "tabwise=warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = commands::load_tabwise(cli.config.as_deref()).and_then(|tabwise| {
        match cli.command {
            Commands::View {
                file,
                search,
                sort,
                desc,
                page,
                page_size,
                all,
                select,
                column,
                json,
            } => commands::view::run(
                &tabwise,
                commands::view::ViewArgs {
                    file,
                    search,
                    sort,
                    desc,
                    page,
                    page_size,
                    all,
                    select,
                    column,
                    json,
                },
            ),

            Commands::Keys { left, right } => commands::keys::run(&tabwise, left, right),

            Commands::Compare {
                left,
                right,
                key,
                show,
                diff,
                left_label,
                right_label,
                json,
            } => commands::compare::run(
                &tabwise,
                commands::compare::CompareArgs {
                    left,
                    right,
                    key,
                    show,
                    diff,
                    left_label,
                    right_label,
                    json,
                },
            ),

            Commands::Export {
                file,
                output,
                format,
                search,
                sort,
                desc,
                against,
                key,
                bucket,
            } => commands::export::run(
                &tabwise,
                commands::export::ExportArgs {
                    file,
                    output,
                    format,
                    search,
                    sort,
                    desc,
                    against,
                    key,
                    bucket,
                },
            ),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
