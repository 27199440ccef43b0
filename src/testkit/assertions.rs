//! Assertion macros for testing hoardrisk operations.
//!
//! - [`crate::assert_result_err!`] - Assert Result is Err and extract error
//! - [`crate::assert_contains_error!`] - Assert error message contains pattern
//! - [`crate::assert_error_code!`] - Assert a failed operation's `Error::code()`
//! - [`crate::assert_tier!`] - Assert the tier `classify` produces
//!
//! # Example
//!
//! ```rust
//! use hoardrisk::{assert_error_code, assert_tier};
//! use hoardrisk::core::{Error, StoreError};
//! use hoardrisk::scoring::RiskTier;
//!
//! let result: Result<(), Error> = Err(Error::store_read(
//!     "Avaliacoes",
//!     StoreError::Unavailable("connection reset".to_string()),
//! ));
//! let err = assert_error_code!(result, "E001");
//! assert!(err.to_string().contains("connection reset"));
//!
//! assert_tier!(20, true => RiskTier::Grave);
//! ```

/// Assert that a Result is Err and extract the error.
#[macro_export]
macro_rules! assert_result_err {
    ($result:expr) => {
        match $result {
            Ok(value) => panic!(
                "Expected Err, got Ok: {:?}\n  at {}:{}:{}",
                value,
                file!(),
                line!(),
                column!()
            ),
            Err(e) => e,
        }
    };
}

/// Assert that an error's Display output contains a pattern.
#[macro_export]
macro_rules! assert_contains_error {
    ($result:expr, $pattern:expr) => {{
        let err = $crate::assert_result_err!($result);
        let err_str = err.to_string();
        assert!(
            err_str.contains($pattern),
            "Error '{}' does not contain '{}'\n  at {}:{}:{}",
            err_str,
            $pattern,
            file!(),
            line!(),
            column!()
        );
        err
    }};
}

/// Assert that an operation failed with the given stable error code.
#[macro_export]
macro_rules! assert_error_code {
    ($result:expr, $code:expr) => {{
        let err: $crate::core::Error = $crate::assert_result_err!($result);
        assert_eq!(
            err.code(),
            $code,
            "Error '{}' has code {}, expected {}\n  at {}:{}:{}",
            err,
            err.code(),
            $code,
            file!(),
            line!(),
            column!()
        );
        err
    }};
}

/// Assert the tier assigned to `(total, has_critical)`.
#[macro_export]
macro_rules! assert_tier {
    ($total:expr, $critical:expr => $tier:expr) => {{
        let got = $crate::scoring::classify($total, $critical).tier;
        assert_eq!(
            got, $tier,
            "classify({}, {}) gave {:?}, expected {:?}",
            $total, $critical, got, $tier
        );
    }};
}
