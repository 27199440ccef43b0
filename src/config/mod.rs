//! Configuration for hoardrisk.
//!
//! Settings come from `.hoardrisk.toml`, discovered by walking up from the
//! working directory, or from the path given with `--config`.

mod core;
mod loader;
pub mod validation;

pub use self::core::{
    FormConfig, HoardriskConfig, StoreConfig, DEFAULT_CACHE_TTL_SECS, DEFAULT_STORE_PATH,
    DEFAULT_WORKSHEET,
};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from,
    parse_and_validate_config, user_config_path, LoadedConfig, CONFIG_FILE_NAME,
};
pub use validation::{validate_config, ConfigIssue};
