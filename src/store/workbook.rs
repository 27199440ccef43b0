//! JSON workbook backend.
//!
//! A workbook is a single JSON file holding any number of named sheets:
//!
//! ```json
//! {
//!   "sheets": {
//!     "Avaliacoes_Acumulacao1": {
//!       "columns": ["timestamp", "nome_morador"],
//!       "rows": [["2026-03-02 09:14:00", "Maria"]]
//!     }
//!   }
//! }
//! ```
//!
//! Writes go to a temporary sibling file that is then renamed over the
//! workbook, so a failed write never leaves a half-written file behind.

use super::{Dataset, TabularStore};
use crate::core::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct WorkbookFile {
    #[serde(default)]
    sheets: BTreeMap<String, Dataset>,
}

/// Worksheet stored inside a JSON workbook file.
#[derive(Debug, Clone)]
pub struct JsonWorkbookStore {
    path: PathBuf,
    worksheet: String,
}

impl JsonWorkbookStore {
    pub fn new(path: impl Into<PathBuf>, worksheet: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            worksheet: worksheet.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Load the whole workbook. A missing file is an empty workbook.
    fn load(&self) -> Result<WorkbookFile, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!(
                    "Workbook {} does not exist yet, starting empty",
                    self.path.display()
                );
                return Ok(WorkbookFile::default());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        serde_json::from_str(&contents).map_err(|e| StoreError::malformed(&self.path, e))
    }

    fn write_atomically(&self, workbook: &WorkbookFile) -> Result<(), StoreError> {
        let data =
            serde_json::to_vec_pretty(workbook).map_err(|e| StoreError::encode(&self.path, e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, &data).map_err(|e| StoreError::io(&temp_path, e))?;

        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(StoreError::io(&self.path, e));
        }
        Ok(())
    }
}

impl TabularStore for JsonWorkbookStore {
    fn worksheet(&self) -> &str {
        &self.worksheet
    }

    fn read_all(&self) -> Result<Dataset, StoreError> {
        let mut workbook = self.load()?;
        let Some(sheet) = workbook.sheets.remove(&self.worksheet) else {
            return Ok(Dataset::default());
        };
        Dataset::from_parts(sheet.columns().to_vec(), sheet.rows().to_vec()).map_err(|wide| {
            StoreError::RowTooWide {
                path: self.path.clone(),
                row: wide.row,
                cells: wide.cells,
                columns: wide.columns,
            }
        })
    }

    fn replace_all(&self, dataset: &Dataset) -> Result<(), StoreError> {
        let mut workbook = self.load()?;
        workbook
            .sheets
            .insert(self.worksheet.clone(), dataset.clone());
        self.write_atomically(&workbook)?;
        log::debug!(
            "Wrote {} rows to {}#{}",
            dataset.len(),
            self.path.display(),
            self.worksheet
        );
        Ok(())
    }
}
