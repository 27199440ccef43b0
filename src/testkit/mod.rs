//! Testing infrastructure for hoardrisk.
//!
//! This module provides utilities that keep tests fast and deterministic:
//!
//! - **[`FaultyStore`]**: In-memory worksheet with switchable read/write
//!   failures and backend call counters
//! - **[`FixedClock`]**: Frozen wall clock for reproducible timestamps
//! - **Assertion macros**: Extended assertions for Result and tier checks
//! - **Test helpers**: Factory functions for forms, records and recorders
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use hoardrisk::testkit::{memory_recorder, record_with, FaultyStore};
//!
//! let store = Arc::new(FaultyStore::new("Avaliacoes"));
//! let recorder = memory_recorder(&store);
//!
//! store.fail_writes(true);
//! assert!(recorder.append_and_persist(&record_with("Ana", [0, 0, 0, 0, 0])).is_err());
//! assert!(store.snapshot().is_empty());
//! ```

pub mod assertions;
pub mod helpers;
pub mod mock_store;

pub use helpers::{form_with, memory_recorder, record_with, FixedClock};
pub use mock_store::FaultyStore;
