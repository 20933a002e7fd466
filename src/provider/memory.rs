use tracing::debug;

use super::{ProviderError, Record, RecordProvider, next_id};

/// Keeps records in memory. Loads can be made to fail to exercise error paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider<T> {
    records: Vec<T>,
    fail_loads: bool,
}

impl<T: Record> MemoryProvider<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records,
            fail_loads: false,
        }
    }

    /// When set, `load_list` returns `ProviderError::Unavailable`.
    pub fn set_fail_loads(&mut self, fail: bool) {
        self.fail_loads = fail;
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }
}

impl<T: Record> RecordProvider<T> for MemoryProvider<T> {
    fn load_list(&mut self) -> Result<Vec<T>, ProviderError> {
        if self.fail_loads {
            return Err(ProviderError::Unavailable("load disabled".to_string()));
        }
        debug!(count = self.records.len(), "loaded records from memory");
        Ok(self.records.clone())
    }

    fn create(&mut self, mut record: T) -> Result<T, ProviderError> {
        record.set_id(next_id(&self.records));
        self.records.push(record.clone());
        Ok(record)
    }

    fn update(&mut self, record: T) -> Result<T, ProviderError> {
        let slot = self
            .records
            .iter_mut()
            .find(|r| r.id() == record.id())
            .ok_or(ProviderError::NotFound(record.id()))?;
        *slot = record.clone();
        Ok(record)
    }

    fn delete(&mut self, id: u64) -> Result<(), ProviderError> {
        let pos = self
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or(ProviderError::NotFound(id))?;
        self.records.remove(pos);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Admin;

    fn admin(id: u64) -> Admin {
        Admin {
            id,
            ..Default::default()
        }
    }

    #[test]
    fn test_crud() {
        let mut provider = MemoryProvider::new(vec![admin(4), admin(2)]);
        let created = provider.create(admin(0)).unwrap();
        assert_eq!(created.id, 5);
        provider.delete(2).unwrap();
        assert_eq!(provider.records().len(), 2);
        assert_eq!(provider.delete(2), Err(ProviderError::NotFound(2)));
    }

    #[test]
    fn test_fail_loads() {
        let mut provider = MemoryProvider::new(vec![admin(1)]);
        provider.set_fail_loads(true);
        assert!(matches!(provider.load_list(), Err(ProviderError::Unavailable(_))));
        provider.set_fail_loads(false);
        assert_eq!(provider.load_list().unwrap().len(), 1);
    }
}
