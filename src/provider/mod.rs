//! Provider abstraction for record data sources.
//!
//! `RecordProvider` is the seam between the screens and whatever stores the
//! records: a directory of JSON files (`JsonFileProvider`) or memory
//! (`MemoryProvider`). Screens only see `Result`s; nothing here panics or
//! prompts.

mod file;
mod memory;

pub use file::JsonFileProvider;
pub use memory::MemoryProvider;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::models::{Admin, Event, Student, Teacher};
use crate::table::TableRow;
use crate::util::today;

/// Error types that can occur during provider operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// I/O error while reading/writing data.
    Io(String),
    /// Error parsing stored data.
    Parse(String),
    /// No record with this id.
    NotFound(u64),
    /// Backend refused or could not serve the request.
    Unavailable(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::Io(msg) => write!(f, "I/O error: {}", msg),
            ProviderError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ProviderError::NotFound(id) => write!(f, "Record {} not found", id),
            ProviderError::Unavailable(msg) => write!(f, "Backend unavailable: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

/// A record type that can be stored by a provider.
pub trait Record: TableRow + Serialize + DeserializeOwned {
    /// File name inside the data directory.
    const FILE_NAME: &'static str;

    fn set_id(&mut self, id: u64);

    /// Cleans form input before the record is sent to the backend.
    /// Returns every rule the input breaks.
    fn prepare_input(&mut self) -> Result<(), Vec<String>> {
        Ok(())
    }
}

impl Record for Admin {
    const FILE_NAME: &'static str = "admins.json";

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn prepare_input(&mut self) -> Result<(), Vec<String>> {
        self.sanitize();
        Ok(())
    }
}

impl Record for Student {
    const FILE_NAME: &'static str = "students.json";

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn prepare_input(&mut self) -> Result<(), Vec<String>> {
        self.sanitize();
        Ok(())
    }
}

impl Record for Teacher {
    const FILE_NAME: &'static str = "teachers.json";

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn prepare_input(&mut self) -> Result<(), Vec<String>> {
        self.sanitize();
        Ok(())
    }
}

impl Record for Event {
    const FILE_NAME: &'static str = "events.json";

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn prepare_input(&mut self) -> Result<(), Vec<String>> {
        self.apply_form(today())
            .map_err(|errors| errors.iter().map(ToString::to_string).collect())
    }
}

/// Backend client for one entity type.
pub trait RecordProvider<T: Record> {
    /// Fetches every record.
    fn load_list(&mut self) -> Result<Vec<T>, ProviderError>;

    /// Stores a new record and returns it with its assigned id.
    fn create(&mut self, record: T) -> Result<T, ProviderError>;

    /// Replaces the record with the same id.
    fn update(&mut self, record: T) -> Result<T, ProviderError>;

    /// Removes the record with this id.
    fn delete(&mut self, id: u64) -> Result<(), ProviderError>;
}

/// Next id after the largest one in `records`.
pub(crate) fn next_id<T: Record>(records: &[T]) -> u64 {
    records.iter().map(|r| r.id()).max().unwrap_or(0) + 1
}
