//! CLI tool for resetting and inspecting the MMABooks store.
//!
//! Provides commands for:
//! - Table row counts after a reset
//! - The customer/state join report
//! - Seed file export and validation

mod cli;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mmabooks_core::config::DbConfig;
use mmabooks_core::entity::{Customer, State};
use mmabooks_core::seed::{self, SeedData};
use mmabooks_core::{DataContext, Database};

use cli::{Cli, Commands, SeedAction};

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut config = DbConfig::from_env();
    if let Some(path) = cli.seed {
        config.seed_path = Some(path);
    }

    match cli.command {
        Commands::Counts => print_counts(config),
        Commands::JoinReport { limit } => print_join_report(config, limit),
        Commands::Seed { action } => match action {
            SeedAction::Export { path } => {
                let data = load_seed(&config)?;
                seed::write_seed_file(&path, &data, &config)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                tracing::info!("Exported seed to {}", path.display());
                Ok(())
            }
            SeedAction::Check { path } => {
                let data = seed::load_seed_file(&path, &config)
                    .with_context(|| format!("invalid seed file {}", path.display()))?;
                let tables = data.into_tables().context("seed data violates constraints")?;
                for (table, count) in tables.row_counts() {
                    println!("{:<12} {:>6}", table, count);
                }
                tracing::info!("Seed file {} is valid", path.display());
                Ok(())
            }
        },
    }
}

fn load_seed(config: &DbConfig) -> Result<SeedData> {
    let data = match &config.seed_path {
        Some(path) => seed::load_seed_file(path, config)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => SeedData::builtin()?,
    };
    Ok(data)
}

fn open(config: DbConfig) -> Result<Arc<Database>> {
    let db = Database::open_seeded(config).context("failed to open database")?;
    Ok(Arc::new(db))
}

fn print_counts(config: DbConfig) -> Result<()> {
    let db = open(config)?;
    for table in db.table_names() {
        println!("{:<12} {:>6}", table, db.record_count(table)?);
    }
    Ok(())
}

fn print_join_report(config: DbConfig, limit: Option<usize>) -> Result<()> {
    let ctx = DataContext::new(open(config)?);
    let rows = ctx
        .query::<Customer>()
        .join(
            ctx.query::<State>(),
            |c| c.state_code.clone(),
            |s| s.state_code.clone(),
            |c, s| (c.customer_id, c.name.clone(), s.state_name.clone()),
        )
        .order_by(|(_, _, state_name)| state_name.clone());

    let total = rows.count();
    for (customer_id, name, state_name) in rows.take(limit.unwrap_or(usize::MAX)) {
        println!("{:>5}  {:<32} {}", customer_id, name, state_name);
    }
    tracing::info!("{} customers matched a state", total);
    Ok(())
}
