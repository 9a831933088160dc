//! Terminal output utilities

use console::style;

use crate::exec::Invocation;

/// Print an error message to stderr
pub fn print_error(message: &str) {
    eprintln!("{}: {}", style("error").red().bold(), message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{}: {}", style("success").green().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{}: {}", style("info").blue().bold(), message);
}

/// Echo an external command before it runs
pub fn print_command(invocation: &Invocation) {
    println!("{} {}", style(">").cyan().bold(), invocation);
}

/// Print a diagnostic line, only in verbose mode
pub fn print_verbose(verbose: bool, message: &str) {
    if verbose {
        eprintln!("{}", style(message).dim());
    }
}
