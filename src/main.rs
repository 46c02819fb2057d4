use std::process::exit;

use colored::Colorize;

fn main() {
    if let Err(e) = rosterview::app::run_cli() {
        eprintln!("{} {}", "[ERR]".bold().red(), e);
        exit(1);
    }
}
