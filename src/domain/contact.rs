use std::fmt;

use super::*;
use serde::Serialize;

/// A single entry of the agenda.
///
/// The name is the key: two contacts whose names only differ in letter case
/// are the same contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl Contact {
    /// Builds a contact from raw user input.
    ///
    /// Every field is trimmed and must not be empty afterwards. Format of
    /// phone and email is not checked.
    pub fn new(
        name: impl AsRef<str>,
        phone: impl AsRef<str>,
        email: impl AsRef<str>,
    ) -> Result<Self, AppError> {
        Ok(Contact {
            name: required_field("name", name.as_ref())?,
            phone: required_field("phone", phone.as_ref())?,
            email: required_field("email", email.as_ref())?,
        })
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Lower-cased name, used as the sort key.
    pub fn sort_key(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn email_in_domain(&self, domain: &str) -> bool {
        let suffix = format!("@{}", domain.to_lowercase());
        self.email.to_lowercase().ends_with(&suffix)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {} | Phone: {} | Email: {}",
            self.name, self.phone, self.email
        )
    }
}

fn required_field(field: &str, value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("Contact {field} is required")));
    }
    Ok(value.to_string())
}
