use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Contact with the name '{0}' already exists")]
    DuplicateContact(String),

    #[error("Contact with the name '{0}' not found")]
    ContactNotFound(String),

    #[error("File {} not found", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error while accessing a file or resource: {0}")]
    Io(#[from] io::Error),

    #[error("Unrecognized command: '{0}'")]
    ParseCommand(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        let kind = match err.kind() {
            csv::ErrorKind::Io(e) => e.kind(),
            _ => io::ErrorKind::InvalidData,
        };
        AppError::Io(io::Error::new(kind, err))
    }
}
