use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{ProviderError, Record, RecordProvider, next_id};

/// Stores one entity type as a JSON array in `<data_dir>/<T::FILE_NAME>`.
///
/// A missing file reads as an empty list; the file is created on first write.
#[derive(Debug, Clone)]
pub struct JsonFileProvider<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Record> JsonFileProvider<T> {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(T::FILE_NAME),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<T>, ProviderError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "data file missing, starting empty");
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)
            .map_err(|e| ProviderError::Io(format!("{}: {}", self.path.display(), e)))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content)
            .map_err(|e| ProviderError::Parse(format!("{}: {}", self.path.display(), e)))
    }

    /// Writes through a temp file so a failed write never truncates the data.
    fn write_all(&self, records: &[T]) -> Result<(), ProviderError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| ProviderError::Io(format!("{}: {}", dir.display(), e)))?;
        }
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| ProviderError::Parse(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .map_err(|e| ProviderError::Io(format!("{}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| ProviderError::Io(format!("{}: {}", self.path.display(), e)))
    }
}

impl<T: Record> RecordProvider<T> for JsonFileProvider<T> {
    fn load_list(&mut self) -> Result<Vec<T>, ProviderError> {
        let records = self.read_all()?;
        debug!(path = %self.path.display(), count = records.len(), "loaded records");
        Ok(records)
    }

    fn create(&mut self, mut record: T) -> Result<T, ProviderError> {
        let mut records = self.read_all()?;
        record.set_id(next_id(&records));
        records.push(record.clone());
        self.write_all(&records)?;
        info!(file = T::FILE_NAME, id = record.id(), "record created");
        Ok(record)
    }

    fn update(&mut self, record: T) -> Result<T, ProviderError> {
        let mut records = self.read_all()?;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == record.id())
            .ok_or(ProviderError::NotFound(record.id()))?;
        *slot = record.clone();
        self.write_all(&records)?;
        info!(file = T::FILE_NAME, id = record.id(), "record updated");
        Ok(record)
    }

    fn delete(&mut self, id: u64) -> Result<(), ProviderError> {
        let mut records = self.read_all()?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Err(ProviderError::NotFound(id));
        }
        self.write_all(&records)?;
        info!(file = T::FILE_NAME, id, "record deleted");
        Ok(())
    }
}
