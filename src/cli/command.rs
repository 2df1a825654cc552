use crate::config::DEFAULT_CONTACTS_FILE;
use crate::errors::AppError;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rusty-agenda", version, about = "Simple Contact Agenda")]
pub struct Cli {
    /// Contacts file used for saving and loading
    #[arg(long, env = "CONTACTS_FILE", default_value = DEFAULT_CONTACTS_FILE)]
    pub file: PathBuf,

    /// Print debug logs to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Runs the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommand and their flags
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive menu (keeps contacts in memory until saved)
    Shell,

    /// Add a new contact and save the file
    Add {
        /// Contact name
        #[arg(long)]
        name: String,

        /// Contact phone number
        #[arg(long)]
        phone: String,

        /// Contact email address
        #[arg(long)]
        email: String,
    },

    /// Show the contact with this name (any letter case)
    Find {
        #[arg(long)]
        name: String,
    },

    /// Remove a contact by name and save the file
    Remove {
        #[arg(long)]
        name: String,
    },

    /// List contacts
    List {
        /// Sort ordering (default is insertion order)
        #[arg(long)]
        sort: Option<SortKey>,
    },

    /// List contacts whose email belongs to a domain, e.g. "example.com"
    Domain { domain: String },
}

/// Supported sort keys
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum SortKey {
    Name,
}

/// Entries of the interactive menu.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuOption {
    AddContact,
    FindContact,
    RemoveContact,
    ListContacts,
    ListSorted,
    FilterByDomain,
    Save,
    Load,
    Exit,
}

impl MenuOption {
    pub fn parse(input: &str) -> Result<Self, AppError> {
        match input.trim() {
            "1" => Ok(MenuOption::AddContact),
            "2" => Ok(MenuOption::FindContact),
            "3" => Ok(MenuOption::RemoveContact),
            "4" => Ok(MenuOption::ListContacts),
            "5" => Ok(MenuOption::ListSorted),
            "6" => Ok(MenuOption::FilterByDomain),
            "7" => Ok(MenuOption::Save),
            "8" => Ok(MenuOption::Load),
            "9" => Ok(MenuOption::Exit),
            other => Err(AppError::ParseCommand(other.to_string())),
        }
    }
}
