pub mod command;
pub mod run;

pub use run::{Session, run_app};

use crate::domain::contact::Contact;
use crate::errors::AppError;
use std::io::{BufRead, Write};

// OUTPUT FUNCTIONS
pub fn show_menu(out: &mut impl Write) -> Result<(), AppError> {
    writeln!(out, "\n--- Contact Agenda ---")?;
    writeln!(out, "1. Add Contact")?;
    writeln!(out, "2. Find Contact")?;
    writeln!(out, "3. Remove Contact")?;
    writeln!(out, "4. List All Contacts")?;
    writeln!(out, "5. List Contacts Sorted by Name")?;
    writeln!(out, "6. Find Contacts by Email Domain")?;
    writeln!(out, "7. Save to File")?;
    writeln!(out, "8. Load from File")?;
    writeln!(out, "9. Exit")?;
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

pub fn display_contacts(
    out: &mut impl Write,
    title: &str,
    contacts: &[Contact],
) -> Result<(), AppError> {
    writeln!(out, "\n-- {} --", title)?;

    if contacts.is_empty() {
        writeln!(out, "No contacts found.")?;
        return Ok(());
    }

    for contact in contacts {
        writeln!(out, "{}", contact)?;
    }
    writeln!(out, "Total: {} contact(s).", contacts.len())?;
    Ok(())
}

// INPUT FUNCTIONS

/// Prints `label` and reads one trimmed line. `None` means end of input.
pub fn prompt(
    input: &mut impl BufRead,
    out: &mut impl Write,
    label: &str,
) -> Result<Option<String>, AppError> {
    write!(out, "{}: ", label)?;
    out.flush()?;
    get_input(input)
}

pub fn get_input(input: &mut impl BufRead) -> Result<Option<String>, AppError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
