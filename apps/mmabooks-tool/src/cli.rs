use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON seed file to load instead of the built-in dataset
    #[arg(long, global = true)]
    pub seed: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reset the store and print the row count of every table
    Counts,

    /// Print customers joined with their state, ordered by state name
    JoinReport {
        /// Maximum number of rows to print
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Seed file import and export
    Seed {
        #[command(subcommand)]
        action: SeedAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum SeedAction {
    /// Write the active seed dataset to a JSON file
    Export {
        /// Destination path
        path: PathBuf,
    },

    /// Verify a seed file's version, checksum and foreign keys
    Check {
        /// Seed file to check
        path: PathBuf,
    },
}
