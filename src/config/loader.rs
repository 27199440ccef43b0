use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::HoardriskConfig;
use super::validation::validate_config;
use crate::core::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".hoardrisk.toml";
const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Configuration plus the file it came from, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: HoardriskConfig,
    pub source: Option<PathBuf>,
}

/// Read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> std::result::Result<HoardriskConfig, String> {
    let config = toml::from_str::<HoardriskConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    validate_config(&config).map_err(|issues| {
        let details: Vec<String> = issues.iter().map(ToString::to_string).collect();
        format!("Invalid configuration: {}", details.join("; "))
    })?;

    Ok(config)
}

/// Relative workbook paths are anchored at the directory holding the config.
fn anchor_store_path(mut config: HoardriskConfig, config_path: &Path) -> HoardriskConfig {
    if config.store.path.is_relative() {
        if let Some(dir) = config_path.parent() {
            config.store.path = dir.join(&config.store.path);
        }
    }
    config
}

/// Try loading config from a specific path; problems are logged, not fatal
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<HoardriskConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(anchor_store_path(config, config_path))
        }
        Err(e) => {
            log::warn!("{} ({}). Using defaults.", e, config_path.display());
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// User-level config location, e.g. `~/.config/hoardrisk/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hoardrisk").join("config.toml"))
}

/// Load an explicitly named config file. Unlike discovery, any problem here
/// is an error because the user asked for this file specifically.
pub fn load_config_from(path: &Path) -> Result<LoadedConfig> {
    let contents = read_config_file(path).map_err(|e| {
        Error::Configuration(format!("cannot read {}: {}", path.display(), e))
    })?;
    let config = parse_and_validate_config(&contents).map_err(Error::Configuration)?;
    Ok(LoadedConfig {
        config: anchor_store_path(config, path),
        source: Some(path.to_path_buf()),
    })
}

/// Discover configuration starting from `start`.
///
/// Search order: `start` and up to nine ancestors for `.hoardrisk.toml`,
/// then the user config directory, then built-in defaults.
pub fn discover_config(start: PathBuf) -> LoadedConfig {
    let candidates = directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .chain(user_config_path());

    for path in candidates {
        if let Some(config) = try_load_config_from_path(&path) {
            return LoadedConfig {
                config,
                source: Some(path),
            };
        }
    }

    log::debug!(
        "No config found after checking {} directories. Using default config.",
        MAX_TRAVERSAL_DEPTH
    );
    LoadedConfig {
        config: HoardriskConfig::default(),
        source: None,
    }
}

/// Resolve the effective configuration for this process.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }

    match std::env::current_dir() {
        Ok(dir) => Ok(discover_config(dir)),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            Ok(LoadedConfig {
                config: HoardriskConfig::default(),
                source: None,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SheetLayout;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_parse_partial_config_fills_defaults() {
        let config = parse_and_validate_config(indoc! {r#"
            [form]
            layout = "detailed"
        "#})
        .unwrap();
        assert_eq!(config.form.layout, SheetLayout::Detailed);
        assert!(config.form.clear_after_save);
        assert_eq!(config.store.worksheet, "Avaliacoes_Acumulacao1");
        assert_eq!(config.store.cache_ttl_secs, 300);
    }

    #[test]
    fn test_parse_rejects_invalid_values() {
        let err = parse_and_validate_config(indoc! {r#"
            [store]
            worksheet = ""
        "#})
        .unwrap_err();
        assert!(err.contains("store.worksheet"));
    }

    #[test]
    fn test_parse_rejects_offset_timestamp_pattern() {
        let err = parse_and_validate_config(indoc! {r#"
            [form]
            timestamp_format = "%Y-%m-%d %z"
        "#})
        .unwrap_err();
        assert!(err.contains("form.timestamp_format"));
    }

    #[test]
    fn test_discovery_walks_up_and_anchors_store_path() {
        let root = TempDir::new().unwrap();
        let nested = root.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            root.path().join(CONFIG_FILE_NAME),
            indoc! {r#"
                [store]
                path = "data/wb.json"
                worksheet = "Campo"
            "#},
        )
        .unwrap();

        let loaded = discover_config(nested);
        assert_eq!(loaded.source, Some(root.path().join(CONFIG_FILE_NAME)));
        assert_eq!(loaded.config.store.worksheet, "Campo");
        assert_eq!(loaded.config.store.path, root.path().join("data/wb.json"));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load_config(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert_eq!(err.code(), "E020");
    }

    #[test]
    fn test_directory_ancestors_respects_depth() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c/d"), 2).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a/b/c/d"), PathBuf::from("/a/b/c")]);
    }
}
