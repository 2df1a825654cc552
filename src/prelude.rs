pub use crate::cli::{Session, command, run_app};
pub use crate::domain::{
    contact::{self, Contact},
    manager::{ContactManager, LoadReport},
};
pub use crate::errors::AppError;
pub use crate::storage::{self, ContactStore, Loaded, MalformedRecord, stores::CsvStorage};
