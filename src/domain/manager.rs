use std::path::Path;

use super::*;
use super::contact::Contact;
use crate::storage::{MalformedRecord, stores::CsvStorage};
use tracing::{debug, info};

/// Ordered, in-memory collection of contacts.
///
/// Names are unique under case-insensitive comparison. Insertion order is
/// kept and is the order used by `contact_list` and by `save`.
#[derive(Debug, Default)]
pub struct ContactManager {
    mem: Vec<Contact>,
}

/// Outcome of a successful load.
#[derive(Debug)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<MalformedRecord>,
}

impl ContactManager {
    pub fn new() -> Self {
        Self { mem: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.mem.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mem.is_empty()
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.mem.iter().position(|c| c.has_name(name))
    }

    pub fn add_contact(&mut self, contact: Contact) -> Result<(), AppError> {
        if self.index_of(&contact.name).is_some() {
            return Err(AppError::DuplicateContact(contact.name));
        }

        debug!(name = %contact.name, "adding contact");
        self.mem.push(contact);
        Ok(())
    }

    pub fn find_contact(&self, name: &str) -> Result<&Contact, AppError> {
        self.index_of(name)
            .map(|idx| &self.mem[idx])
            .ok_or_else(|| AppError::ContactNotFound(name.to_string()))
    }

    /// Removes the contact matching `name` and hands it back.
    pub fn remove_contact(&mut self, name: &str) -> Result<Contact, AppError> {
        let idx = self
            .index_of(name)
            .ok_or_else(|| AppError::ContactNotFound(name.to_string()))?;

        let removed = self.mem.remove(idx);
        debug!(name = %removed.name, "removed contact");
        Ok(removed)
    }

    pub fn contact_list(&self) -> Vec<Contact> {
        self.mem.clone()
    }

    pub fn sorted_by_name(&self) -> Vec<Contact> {
        let mut contacts = self.mem.clone();
        contacts.sort_by_cached_key(|c| c.sort_key());
        contacts
    }

    pub fn filter_by_email_domain(&self, domain: &str) -> Result<Vec<Contact>, AppError> {
        let domain = domain.trim();
        if domain.is_empty() {
            return Err(AppError::Validation("No email domain provided".to_string()));
        }

        Ok(self
            .mem
            .iter()
            .filter(|c| c.email_in_domain(domain))
            .cloned()
            .collect())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AppError> {
        self.save_to(&CsvStorage::new(path))
    }

    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<LoadReport, AppError> {
        self.load_from(&CsvStorage::new(path))
    }

    pub fn save_to(&self, storage: &dyn ContactStore) -> Result<(), AppError> {
        storage.save(&self.mem)?;
        info!(
            count = self.mem.len(),
            medium = storage.get_medium(),
            "contacts saved"
        );
        Ok(())
    }

    /// Replaces the whole collection with what `storage` holds.
    ///
    /// Nothing is touched unless the storage read completes.
    pub fn load_from(&mut self, storage: &dyn ContactStore) -> Result<LoadReport, AppError> {
        let loaded = storage.load()?;

        self.mem = loaded.contacts;
        info!(
            count = self.mem.len(),
            skipped = loaded.skipped.len(),
            medium = storage.get_medium(),
            "contacts loaded"
        );

        Ok(LoadReport {
            loaded: self.mem.len(),
            skipped: loaded.skipped,
        })
    }
}
