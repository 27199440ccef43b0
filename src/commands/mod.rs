//! CLI command implementations for hoardrisk.
//!
//! Available commands:
//! - **init**: Write a default `.hoardrisk.toml`
//! - **assess**: Record an assessment from flags or an interactive session
//! - **classify**: Classify scores without touching the worksheet
//! - **verify-headers**: Check the worksheet header row
//! - **list**: Show stored assessments

pub mod assess;
pub mod classify;
pub mod init;
pub mod list;
pub mod verify_headers;

pub use assess::run_assess;
pub use classify::{render_summary, run_classify};
pub use init::init_config;
pub use list::run_list;
pub use verify_headers::run_verify_headers;

use crate::config::HoardriskConfig;
use crate::recorder::Recorder;
use crate::store::JsonWorkbookStore;

/// Recorder over the configured workbook file.
pub fn open_recorder(config: &HoardriskConfig) -> Recorder<JsonWorkbookStore> {
    log::debug!(
        "Opening worksheet '{}' in {}",
        config.store.worksheet,
        config.store.path.display()
    );
    Recorder::new(
        JsonWorkbookStore::new(&config.store.path, &config.store.worksheet),
        config.form.layout,
        config.store.cache_ttl(),
    )
}
