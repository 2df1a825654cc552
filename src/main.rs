use std::process::exit;

use rusty_agenda::prelude::run_app;

fn main() {
    if let Err(e) = run_app() {
        eprintln!("Error: {e}");
        exit(1);
    }
}
