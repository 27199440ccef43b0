use super::{Dataset, TabularStore};
use crate::core::StoreError;
use parking_lot::RwLock;

/// In-process worksheet, used for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    worksheet: String,
    data: RwLock<Dataset>,
}

impl MemoryStore {
    pub fn new(worksheet: impl Into<String>) -> Self {
        Self {
            worksheet: worksheet.into(),
            data: RwLock::new(Dataset::default()),
        }
    }

    pub fn with_dataset(worksheet: impl Into<String>, dataset: Dataset) -> Self {
        Self {
            worksheet: worksheet.into(),
            data: RwLock::new(dataset),
        }
    }

    /// Current contents without going through the trait.
    pub fn snapshot(&self) -> Dataset {
        self.data.read().clone()
    }
}

impl TabularStore for MemoryStore {
    fn worksheet(&self) -> &str {
        &self.worksheet
    }

    fn read_all(&self) -> Result<Dataset, StoreError> {
        Ok(self.data.read().clone())
    }

    fn replace_all(&self, dataset: &Dataset) -> Result<(), StoreError> {
        *self.data.write() = dataset.clone();
        Ok(())
    }
}
