//! Tabular store abstraction for the assessment worksheet.
//!
//! The backing spreadsheet is treated as an opaque table exposing exactly two
//! operations: read every row, or replace every row. There is no native
//! single-row append, so callers append by reading, concatenating in memory
//! and writing the whole table back.
//!
//! # Example
//!
//! ```rust
//! use hoardrisk::store::{Cell, Dataset, MemoryStore, TabularStore};
//!
//! let store = MemoryStore::new("Avaliacoes");
//! let mut dataset = store.read_all().unwrap();
//! dataset.append_row(vec![("nome_morador".to_string(), Cell::from("Ana"))]);
//! store.replace_all(&dataset).unwrap();
//! assert_eq!(store.read_all().unwrap().len(), 1);
//! ```

pub mod cache;
pub mod headers;
pub mod memory;
pub mod workbook;

pub use cache::CachedStore;
pub use headers::{verify_headers, HeaderReport};
pub use memory::MemoryStore;
pub use workbook::JsonWorkbookStore;

use crate::core::StoreError;
use serde::{Deserialize, Serialize};

/// A single worksheet cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Empty,
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Cell::Integer(value) => Some(*value),
            Cell::Number(value) if value.fract() == 0.0 => Some(*value as i64),
            Cell::Text(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Bool(true) => write!(f, "Sim"),
            Cell::Bool(false) => write!(f, "Não"),
            Cell::Integer(value) => write!(f, "{value}"),
            Cell::Number(value) => write!(f, "{value}"),
            Cell::Text(text) => write!(f, "{text}"),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Integer(value)
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Cell::Integer(i64::from(value))
    }
}

impl From<u8> for Cell {
    fn from(value: u8) -> Self {
        Cell::Integer(i64::from(value))
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

/// A stored row wider than its worksheet header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WideRow {
    pub row: usize,
    pub cells: usize,
    pub columns: usize,
}

/// Whole-worksheet snapshot: an ordered header plus rows aligned to it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build from raw parts, padding short rows to the header width.
    ///
    /// A row with more cells than the header cannot be aligned without
    /// dropping values, so the first such row is returned as the error.
    pub fn from_parts(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self, WideRow> {
        let width = columns.len();
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() > width)
        {
            return Err(WideRow {
                row,
                cells: cells.len(),
                columns: width,
            });
        }

        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let index = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(index))
    }

    /// Append one row given as `(column, value)` pairs.
    ///
    /// Existing columns keep their position; columns unknown to the dataset
    /// are added at the end and back-filled with empty cells for earlier rows.
    /// Existing columns the new row does not mention are left empty.
    pub fn append_row(&mut self, row: Vec<(String, Cell)>) {
        for (name, _) in &row {
            if self.column_index(name).is_none() {
                self.columns.push(name.clone());
                for existing in &mut self.rows {
                    existing.push(Cell::Empty);
                }
            }
        }

        let mut aligned = vec![Cell::Empty; self.columns.len()];
        for (name, value) in row {
            if let Some(index) = self.column_index(&name) {
                aligned[index] = value;
            }
        }
        self.rows.push(aligned);
    }

    /// Last `n` rows, oldest first.
    pub fn tail(&self, n: usize) -> &[Vec<Cell>] {
        let start = self.rows.len().saturating_sub(n);
        &self.rows[start..]
    }
}

/// A named worksheet supporting whole-table reads and writes.
pub trait TabularStore: Send + Sync {
    /// Logical worksheet name this store is bound to.
    fn worksheet(&self) -> &str;

    /// Read every row currently in the worksheet.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the backend cannot be read or decoded.
    fn read_all(&self) -> Result<Dataset, StoreError>;

    /// Replace the worksheet contents with `dataset`.
    ///
    /// Implementations must leave the previous contents intact when the
    /// write fails.
    fn replace_all(&self, dataset: &Dataset) -> Result<(), StoreError>;
}

impl<S: TabularStore + ?Sized> TabularStore for std::sync::Arc<S> {
    fn worksheet(&self) -> &str {
        (**self).worksheet()
    }

    fn read_all(&self) -> Result<Dataset, StoreError> {
        (**self).read_all()
    }

    fn replace_all(&self, dataset: &Dataset) -> Result<(), StoreError> {
        (**self).replace_all(dataset)
    }
}
