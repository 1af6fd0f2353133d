//! Database configuration.

use std::path::PathBuf;

/// Name of the stored procedure that restores the seed dataset.
pub const RESET_PROCEDURE: &str = "usp_testingResetData";

/// Environment variable overriding [`DbConfig::seed_path`].
pub const SEED_PATH_ENV: &str = "MMABOOKS_SEED_PATH";

/// Environment variable overriding [`DbConfig::max_rows_per_table`].
pub const MAX_ROWS_ENV: &str = "MMABOOKS_MAX_ROWS";

/// Database configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// JSON seed file (None = built-in seed)
    pub seed_path: Option<PathBuf>,
    /// Name the reset procedure is registered under
    pub reset_procedure: String,
    /// Maximum rows per table accepted by a commit (default: unlimited)
    pub max_rows_per_table: usize,
    /// Maximum retry attempts for transient I/O errors
    pub io_max_retries: u32,
    /// Delay between retry attempts in milliseconds
    pub io_retry_delay_ms: u64,
}

impl DbConfig {
    /// Builds a configuration from the defaults overlaid with environment
    /// variables. Unparsable values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(path) = std::env::var_os(SEED_PATH_ENV) {
            if !path.is_empty() {
                config.seed_path = Some(PathBuf::from(path));
            }
        }

        if let Ok(raw) = std::env::var(MAX_ROWS_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => config.max_rows_per_table = limit,
                _ => tracing::warn!("Ignoring invalid {}={:?}", MAX_ROWS_ENV, raw),
            }
        }

        config
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            seed_path: None,
            reset_procedure: RESET_PROCEDURE.to_string(),
            max_rows_per_table: usize::MAX,
            io_max_retries: 3,      // Default retry attempts
            io_retry_delay_ms: 100, // 100ms delay between retries
        }
    }
}
