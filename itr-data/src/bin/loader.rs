use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use itr_core::db::{MemoryStoreFactory, StoreConfig, StoreRegistry};
use itr_core::forms::IncomeForms;
use itr_core::{AggregationReader, KeyValueStore};
use itr_data::LineItemLoader;
use itr_db_sqlite::SqliteStoreFactory;

/// Load schedule line items from a CSV file into the store.
///
/// The CSV file should have the following columns:
/// - schedule: salary, house-property, business-profession, capital-gains,
///   other-sources or deductions
/// - line: 1-based line number (empty for deductions)
/// - label: optional line description
/// - field: field name, or the section code for deductions
/// - amount: the amount, e.g. "12,00,000"
///
/// Every touched schedule is saved, replacing its stored total.
#[derive(Parser, Debug)]
#[command(name = "itr-data-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing line items
    #[arg(short, long)]
    file: PathBuf,

    /// Store backend (sqlite or memory)
    #[arg(short, long, default_value = "sqlite")]
    backend: String,

    /// Database path or sqlite: URL
    #[arg(short, long, default_value = "itr.db")]
    database: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut registry = StoreRegistry::new();
    registry.register(Box::new(SqliteStoreFactory));
    registry.register(Box::new(MemoryStoreFactory));

    let config = StoreConfig {
        backend: args.backend.clone(),
        connection_string: args.database.clone(),
    };
    let store: Arc<dyn KeyValueStore> = Arc::from(
        registry
            .create(&config)
            .await
            .with_context(|| format!("Failed to open store: {}", args.database))?,
    );

    println!("Loading line items from: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = LineItemLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} records from CSV", records.len());

    let mut forms = IncomeForms::open(store.clone())
        .await
        .context("Failed to read saved deductions")?;

    let summary = LineItemLoader::load(&mut forms, &records)
        .await
        .context("Failed to load line items")?;

    for (schedule, total) in &summary.saved {
        println!("  {:<22} {}", schedule.as_str(), total);
    }

    let gti = AggregationReader::new(store.as_ref())
        .read_gti()
        .await
        .context("Failed to read gross total income")?;

    println!(
        "Saved {} schedules. Gross total income is now {}.",
        summary.saved.len(),
        gti
    );

    Ok(())
}
