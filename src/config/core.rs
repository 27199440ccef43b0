use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::record::{SheetLayout, DEFAULT_TIMESTAMP_FORMAT};

pub const DEFAULT_WORKSHEET: &str = "Avaliacoes_Acumulacao1";
pub const DEFAULT_STORE_PATH: &str = "avaliacoes.json";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Root configuration structure for hoardrisk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HoardriskConfig {
    /// Backing worksheet settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Form behaviour settings
    #[serde(default)]
    pub form: FormConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Workbook file; relative paths resolve against the config file's directory
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    /// Logical worksheet name inside the workbook
    #[serde(default = "default_worksheet")]
    pub worksheet: String,

    /// How long a read of the worksheet may be served from memory
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            worksheet: default_worksheet(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

impl StoreConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
    /// Column set written to the worksheet
    #[serde(default)]
    pub layout: SheetLayout,

    /// Reset the form after a successful save in interactive sessions
    #[serde(default = "default_clear_after_save")]
    pub clear_after_save: bool,

    /// chrono strftime pattern for the `timestamp` column
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            layout: SheetLayout::default(),
            clear_after_save: default_clear_after_save(),
            timestamp_format: default_timestamp_format(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

fn default_worksheet() -> String {
    DEFAULT_WORKSHEET.to_string()
}

fn default_cache_ttl_secs() -> u64 {
    DEFAULT_CACHE_TTL_SECS
}

fn default_clear_after_save() -> bool {
    true
}

fn default_timestamp_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}
