use dotenv::dotenv;

/// Where contacts are saved to and loaded from when neither `--file` nor
/// `CONTACTS_FILE` says otherwise.
pub const DEFAULT_CONTACTS_FILE: &str = "./.instance/contacts.csv";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter(verbose: bool) -> &'static str {
    if verbose {
        "rusty_agenda=debug"
    } else {
        "rusty_agenda=warn"
    }
}

/// Reads `.env` from the working directory into the process environment.
/// A missing file is fine.
pub fn load_env() {
    dotenv().ok();
}
