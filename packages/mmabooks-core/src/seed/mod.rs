//! Seed dataset restored by the reset procedure, and its JSON file format.

mod builtin;
pub mod io_utils;

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use crate::config::DbConfig;
use crate::entity::{Account, Customer, Equipment, Invoice, Product, State, Supplier};
use crate::error::DbError;
use crate::schema::Tables;
use crate::table::{validation, Table};

use io_utils::{classify_io_error, retry_io_operation};

/// Current seed file format version.
pub const SEED_FILE_VERSION: u32 = 1;

/// Baseline rows of every table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub states: Vec<State>,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub suppliers: Vec<Supplier>,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
}

impl SeedData {
    /// Builds the table snapshot, validating keys, columns and foreign keys.
    pub fn into_tables(self) -> Result<Tables, DbError> {
        let tables = Tables {
            states: Table::from_rows(self.states)?,
            accounts: Table::from_rows(self.accounts)?,
            customers: Table::from_rows(self.customers)?,
            invoices: Table::from_rows(self.invoices)?,
            products: Table::from_rows(self.products)?,
            suppliers: Table::from_rows(self.suppliers)?,
            equipment: Table::from_rows(self.equipment)?,
        };
        validation::check_foreign_keys(&tables)?;
        Ok(tables)
    }

    /// Captures the rows of a snapshot.
    pub fn from_tables(tables: &Tables) -> Self {
        Self {
            states: tables.states.rows().cloned().collect(),
            accounts: tables.accounts.rows().cloned().collect(),
            customers: tables.customers.rows().cloned().collect(),
            invoices: tables.invoices.rows().cloned().collect(),
            products: tables.products.rows().cloned().collect(),
            suppliers: tables.suppliers.rows().cloned().collect(),
            equipment: tables.equipment.rows().cloned().collect(),
        }
    }

    /// CRC32 of the canonical JSON encoding.
    pub fn checksum(&self) -> Result<u32, DbError> {
        let bytes =
            serde_json::to_vec(self).map_err(|e| DbError::SerializationError(e.to_string()))?;
        let mut hasher = Hasher::new();
        hasher.update(&bytes);
        Ok(hasher.finalize())
    }
}

/// Seed file format for persistence.
#[derive(Debug, Serialize, Deserialize)]
pub struct SeedFile {
    /// Format version
    pub version: u32,
    /// Checksum of `data` for corruption detection
    pub checksum: u32,
    pub data: SeedData,
}

/// Loads and verifies a seed file.
pub fn load_seed_file(path: &Path, config: &DbConfig) -> Result<SeedData, DbError> {
    let raw = retry_io_operation(
        || fs::read(path).map_err(|e| classify_io_error(e, "Failed to read seed file")),
        config.io_max_retries,
        config.io_retry_delay_ms,
        "load_seed_file",
    )?;

    let file: SeedFile = serde_json::from_slice(&raw)
        .map_err(|e| DbError::SerializationError(format!("{}: {}", path.display(), e)))?;

    if file.version != SEED_FILE_VERSION {
        return Err(DbError::DataCorruption(format!(
            "Unsupported seed file version {} in {}",
            file.version,
            path.display()
        )));
    }

    let actual = file.data.checksum()?;
    if actual != file.checksum {
        return Err(DbError::DataCorruption(format!(
            "Checksum mismatch in {}: expected {:08x}, got {:08x}",
            path.display(),
            file.checksum,
            actual
        )));
    }

    tracing::debug!("Loaded seed file {}", path.display());
    Ok(file.data)
}

/// Writes `data` as a seed file via a temporary file and atomic rename.
pub fn write_seed_file(path: &Path, data: &SeedData, config: &DbConfig) -> Result<(), DbError> {
    let file = SeedFile {
        version: SEED_FILE_VERSION,
        checksum: data.checksum()?,
        data: data.clone(),
    };
    let json = serde_json::to_string_pretty(&file)
        .map_err(|e| DbError::SerializationError(e.to_string()))?;

    retry_io_operation(
        || write_atomically(path, json.as_bytes()),
        config.io_max_retries,
        config.io_retry_delay_ms,
        "write_seed_file",
    )
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), DbError> {
    let temp_path = path.with_extension("json.tmp");

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .map_err(|e| classify_io_error(e, "Failed to create seed directory"))?;
    }

    let mut file = File::create(&temp_path)
        .map_err(|e| classify_io_error(e, "Failed to create temp file"))?;
    file.write_all(bytes)
        .map_err(|e| classify_io_error(e, "Failed to write seed file"))?;
    file.sync_all()
        .map_err(|e| classify_io_error(e, "Failed to sync seed file"))?;

    // Atomic rename
    fs::rename(&temp_path, path).map_err(|e| classify_io_error(e, "Failed to rename seed file"))
}
