//! Configuration validation with error accumulation.
//!
//! Every problem is collected so a user sees all of them in one run instead
//! of fixing the file one error at a time.

use chrono::NaiveDate;

use super::HoardriskConfig;
use crate::record::render_timestamp;

/// Upper bound on the cache TTL; a day-old worksheet view is never useful.
pub const MAX_CACHE_TTL_SECS: u64 = 86_400;

/// A single configuration problem, keyed by its dotted field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A strftime pattern chrono can render for a naive local timestamp.
pub fn is_valid_timestamp_format(format: &str) -> bool {
    let sample = NaiveDate::from_ymd_opt(2026, 1, 31).and_then(|d| d.and_hms_opt(23, 59, 59));
    !format.trim().is_empty()
        && sample.is_some_and(|at| render_timestamp(at, format).is_some())
}

pub fn validate_config(config: &HoardriskConfig) -> Result<(), Vec<ConfigIssue>> {
    let mut issues = Vec::new();

    if config.store.worksheet.trim().is_empty() {
        issues.push(ConfigIssue {
            field: "store.worksheet",
            message: "worksheet name must not be empty".to_string(),
        });
    }

    if config.store.path.as_os_str().is_empty() {
        issues.push(ConfigIssue {
            field: "store.path",
            message: "workbook path must not be empty".to_string(),
        });
    }

    if config.store.cache_ttl_secs > MAX_CACHE_TTL_SECS {
        issues.push(ConfigIssue {
            field: "store.cache_ttl_secs",
            message: format!(
                "cache TTL out of range (expected: 0-{}, got: {})",
                MAX_CACHE_TTL_SECS, config.store.cache_ttl_secs
            ),
        });
    }

    if !is_valid_timestamp_format(&config.form.timestamp_format) {
        issues.push(ConfigIssue {
            field: "form.timestamp_format",
            message: format!(
                "invalid strftime pattern '{}'",
                config.form.timestamp_format
            ),
        });
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&HoardriskConfig::default()).is_ok());
    }

    #[test]
    fn test_all_issues_are_accumulated() {
        let mut config = HoardriskConfig::default();
        config.store.worksheet = "  ".to_string();
        config.store.path = PathBuf::new();
        config.store.cache_ttl_secs = MAX_CACHE_TTL_SECS + 1;
        config.form.timestamp_format = "%Y-%Q".to_string();

        let issues = validate_config(&config).unwrap_err();
        let fields: Vec<&str> = issues.iter().map(|i| i.field).collect();
        assert_eq!(
            fields,
            vec![
                "store.worksheet",
                "store.path",
                "store.cache_ttl_secs",
                "form.timestamp_format"
            ]
        );
    }

    #[test]
    fn test_timestamp_format_check() {
        assert!(is_valid_timestamp_format("%Y-%m-%d %H:%M:%S"));
        assert!(is_valid_timestamp_format("%d/%m/%Y %H:%M"));
        assert!(!is_valid_timestamp_format("%Q"));
        assert!(!is_valid_timestamp_format(""));
    }

    #[test]
    fn test_offset_specifiers_are_rejected() {
        for pattern in ["%Y-%m-%d %z", "%H:%M %:z", "%Z"] {
            assert!(!is_valid_timestamp_format(pattern), "{pattern} accepted");
        }
    }
}
