pub mod stores;

use crate::prelude::{AppError, Contact};
use std::fmt;
use std::fs;
use std::path::Path;

pub trait ContactStore {
    fn load(&self) -> Result<Loaded, AppError>;

    fn save(&self, contacts: &[Contact]) -> Result<(), AppError>;

    fn get_medium(&self) -> &str;
}

/// Contacts read back from a storage medium, in medium order.
#[derive(Debug, Default)]
pub struct Loaded {
    pub contacts: Vec<Contact>,
    pub skipped: Vec<MalformedRecord>,
}

/// A stored line that could not be turned into a contact. Not fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecord {
    pub line: u64,
    pub fields: usize,
    pub content: String,
}

impl fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: expected 3 fields, found {}: '{}'",
            self.line, self.fields, self.content
        )
    }
}

pub fn create_file_parent(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
