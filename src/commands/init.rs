use crate::config::CONFIG_FILE_NAME;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"# Hoardrisk Configuration

[store]
# Workbook file; relative paths resolve against this file's directory
path = "avaliacoes.json"
worksheet = "Avaliacoes_Acumulacao1"
# Seconds a worksheet read may be reused before reloading
cache_ttl_secs = 300

[form]
# "basic" or "detailed" (adds the vector/animal columns)
layout = "basic"
clear_after_save = true
timestamp_format = "%Y-%m-%d %H:%M:%S"
"#;

/// Write the default configuration into `dir`. Returns the file written.
pub fn init_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    log::info!("Created {}", config_path.display());

    Ok(config_path)
}
