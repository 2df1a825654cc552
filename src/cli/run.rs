use crate::{
    cli::{display_contacts, get_input, prompt, show_menu},
    config, logger,
    prelude::{
        AppError, ContactManager,
        command::{Cli, Commands, MenuOption, SortKey},
        contact::Contact,
    },
};
use clap::Parser;
use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};
use tracing::debug;

pub fn run_app() -> Result<(), AppError> {
    config::load_env();

    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);
    debug!(file = %cli.file.display(), "contacts file");

    let command = cli.command.unwrap_or(Commands::Shell);
    run_command(command, &cli.file, &mut io::stdout())
}

fn load_existing(path: &Path) -> Result<ContactManager, AppError> {
    let mut manager = ContactManager::new();
    if fs::exists(path)? {
        manager.load(path)?;
    }
    Ok(manager)
}

/// Like `load_existing`, for commands that write the file back.
///
/// Saving drops every line the load skipped, so a file with malformed lines
/// is left alone.
fn load_for_update(path: &Path) -> Result<ContactManager, AppError> {
    let mut manager = ContactManager::new();
    if !fs::exists(path)? {
        return Ok(manager);
    }

    let report = manager.load(path)?;
    if !report.skipped.is_empty() {
        return Err(AppError::Validation(format!(
            "'{}' has {} malformed line(s); fix them before changing the file",
            path.display(),
            report.skipped.len()
        )));
    }
    Ok(manager)
}

/// Runs one subcommand against the contacts file.
///
/// One-shot commands load the file first when it exists, and `add` and
/// `remove` write it back. `shell` starts from an empty agenda.
pub fn run_command(command: Commands, path: &Path, out: &mut impl Write) -> Result<(), AppError> {
    match command {
        Commands::Shell => {
            let stdin = io::stdin();
            Session::new(path.to_path_buf(), stdin.lock(), out, io::stderr()).run()?;
        }

        Commands::Add { name, phone, email } => {
            let mut manager = load_for_update(path)?;
            let new_contact = Contact::new(name, phone, email)?;
            manager.add_contact(new_contact)?;
            manager.save(path)?;

            writeln!(out, "Contact added successfully")?;
        }

        Commands::Find { name } => {
            let manager = load_existing(path)?;
            let contact = manager.find_contact(&name)?;
            writeln!(out, "{}", contact)?;
        }

        Commands::Remove { name } => {
            let mut manager = load_for_update(path)?;
            let removed = manager.remove_contact(&name)?;
            manager.save(path)?;

            writeln!(out, "Contact removed successfully: {}", removed.name)?;
        }

        Commands::List { sort } => {
            let manager = load_existing(path)?;
            match sort {
                Some(SortKey::Name) => {
                    display_contacts(out, "Contacts Sorted by Name", &manager.sorted_by_name())?
                }
                None => display_contacts(out, "All Contacts", &manager.contact_list())?,
            }
        }

        Commands::Domain { domain } => {
            let manager = load_existing(path)?;
            let contacts = manager.filter_by_email_domain(&domain)?;
            display_contacts(out, &format!("Contacts in '{}'", domain.trim()), &contacts)?;
        }
    }

    Ok(())
}

enum Flow {
    Continue,
    Exit,
}

/// Interactive menu session.
///
/// Owns the agenda for its whole lifetime. Nothing reaches the file unless
/// the user picks "Save". Failed actions are reported on `errors`.
pub struct Session<R, W, E> {
    manager: ContactManager,
    path: PathBuf,
    input: R,
    output: W,
    errors: E,
}

impl<R: BufRead, W: Write, E: Write> Session<R, W, E> {
    pub fn new(path: PathBuf, input: R, output: W, errors: E) -> Self {
        Self {
            manager: ContactManager::new(),
            path,
            input,
            output,
            errors,
        }
    }

    pub fn manager(&self) -> &ContactManager {
        &self.manager
    }

    /// Loops over the menu until "Exit" or end of input.
    ///
    /// Errors from agenda operations are printed and the loop goes on. Only
    /// failures to talk to the console end the session.
    pub fn run(&mut self) -> Result<(), AppError> {
        loop {
            show_menu(&mut self.output)?;

            let Some(choice) = get_input(&mut self.input)? else {
                break;
            };

            let outcome = MenuOption::parse(&choice).and_then(|option| self.handle(option));

            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) => writeln!(self.errors, "{}", e)?,
            }
        }

        writeln!(self.output, "\nBye!")?;
        Ok(())
    }

    fn ask(&mut self, label: &str) -> Result<Option<String>, AppError> {
        prompt(&mut self.input, &mut self.output, label)
    }

    fn ask_name(&mut self) -> Result<Option<String>, AppError> {
        let Some(name) = self.ask("Name")? else {
            return Ok(None);
        };
        if name.is_empty() {
            return Err(AppError::Validation("Contact name is required".to_string()));
        }
        Ok(Some(name))
    }

    fn handle(&mut self, option: MenuOption) -> Result<Flow, AppError> {
        match option {
            MenuOption::AddContact => {
                writeln!(self.output, "\n-- Add Contact --")?;
                let Some(name) = self.ask("Name")? else {
                    return Ok(Flow::Exit);
                };
                let Some(phone) = self.ask("Phone")? else {
                    return Ok(Flow::Exit);
                };
                let Some(email) = self.ask("Email")? else {
                    return Ok(Flow::Exit);
                };

                let new_contact = Contact::new(name, phone, email)?;
                self.manager.add_contact(new_contact)?;
                writeln!(self.output, "Contact added successfully!")?;
            }

            MenuOption::FindContact => {
                writeln!(self.output, "\n-- Find Contact --")?;
                let Some(name) = self.ask_name()? else {
                    return Ok(Flow::Exit);
                };

                let contact = self.manager.find_contact(&name)?;
                writeln!(self.output, "Contact found:\n{}", contact)?;
            }

            MenuOption::RemoveContact => {
                writeln!(self.output, "\n-- Remove Contact --")?;
                let Some(name) = self.ask_name()? else {
                    return Ok(Flow::Exit);
                };

                let removed = self.manager.remove_contact(&name)?;
                writeln!(self.output, "Contact removed successfully: {}", removed.name)?;
            }

            MenuOption::ListContacts => {
                display_contacts(&mut self.output, "All Contacts", &self.manager.contact_list())?;
            }

            MenuOption::ListSorted => {
                display_contacts(
                    &mut self.output,
                    "Contacts Sorted by Name",
                    &self.manager.sorted_by_name(),
                )?;
            }

            MenuOption::FilterByDomain => {
                writeln!(self.output, "\n-- Find by Email Domain --")?;
                let Some(domain) = self.ask("Domain (e.g. gmail.com)")? else {
                    return Ok(Flow::Exit);
                };

                let contacts = self.manager.filter_by_email_domain(&domain)?;
                display_contacts(
                    &mut self.output,
                    &format!("Contacts in '{}'", domain),
                    &contacts,
                )?;
            }

            MenuOption::Save => {
                self.manager.save(&self.path)?;
                writeln!(
                    self.output,
                    "Saved {} contact(s) to '{}'",
                    self.manager.len(),
                    self.path.display()
                )?;
            }

            MenuOption::Load => {
                let report = self.manager.load(&self.path)?;

                for malformed in &report.skipped {
                    writeln!(self.output, "Skipped malformed {}", malformed)?;
                }
                writeln!(
                    self.output,
                    "Loaded {} contact(s) from '{}'",
                    report.loaded,
                    self.path.display()
                )?;
                display_contacts(&mut self.output, "All Contacts", &self.manager.contact_list())?;
            }

            MenuOption::Exit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }
}
