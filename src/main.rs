//! `awesome-index`: parse a curated awesome-list, index it, and query it.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and install logging ([`logging`]).
//! 2. Load config ([`config::load_config`]); config errors exit `1`.
//! 3. Load the source document ([`source`]); on failure, continue with an empty catalog.
//! 4. Normalize it into a [`models::Catalog`] ([`normalize`], [`parser`], [`classify`]).
//! 5. Build the flat index and facets into a [`snapshot::Snapshot`] ([`index`]).
//! 6. Filter, search and sort ([`query::run_query`]).
//! 7. Render the requested report ([`report`]).

mod classify;
mod cli;
mod config;
mod detector;
mod index;
mod logging;
mod models;
mod normalize;
mod parser;
mod query;
mod report;
mod snapshot;
mod source;

use std::time::SystemTime;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use cli::{Cli, ReportFormat};
use config::load_config;
use models::Catalog;
use normalize::normalize;
use query::run_query;
use query::sort::SortMode;
use snapshot::{Snapshot, SnapshotStore};
use source::SourceLocation;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let location = SourceLocation::parse(&cli.source);

    // Configuration problems are fatal
    let config = load_config(&location.base_dir(), cli.config.as_deref())?;
    let classifier = config.classifier()?;
    let options = config.normalize_options();

    let store = SnapshotStore::new(Snapshot::build(
        Catalog::empty(&options.default_title),
        location.to_string(),
    ));

    // An unreadable source is not: report it and carry on with the empty snapshot
    let show_progress = !cli.quiet && matches!(cli.report, ReportFormat::Terminal);
    match source::load(&location, show_progress).await {
        Ok(loaded) => {
            let catalog = normalize(&loaded.document, &classifier, &options);
            store.publish(Snapshot::build(catalog, loaded.origin));
        }
        Err(err) => {
            eprintln!("{} {:#}", "warning:".yellow().bold(), err);
        }
    }

    let snapshot = store.current();
    tracing::debug!(generation = store.generation(), origin = %snapshot.origin, "querying snapshot");

    if cli.facets {
        match cli.report {
            ReportFormat::Terminal => report::terminal::render_facets(&snapshot, cli.quiet),
            ReportFormat::Json => report::json::render_facets(&snapshot)?,
        }
        return Ok(());
    }

    let criteria = cli.criteria();
    let sort = cli
        .sort
        .as_ref()
        .map(SortMode::from)
        .unwrap_or(config.search.default_sort);

    let results = run_query(
        &snapshot.index.entries,
        &criteria,
        sort,
        &cli.search,
        SystemTime::now(),
    );

    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render(
                &snapshot,
                &results,
                &criteria,
                sort,
                cli.verbose,
                cli.quiet,
            )?;
        }
        ReportFormat::Json => {
            report::json::render(&snapshot, &results, &criteria, sort, &cli.search)?;
        }
    }

    Ok(())
}
