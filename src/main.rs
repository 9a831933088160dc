//! cmakew - a small CMake wrapper for quick configure/build/test/run loops
//!
//! ## Architecture
//!
//! ```text
//! cli.rs → commands/ → build/ (cmake, ctest, artifact search) → exec/ (processes)
//! ```

mod build;
mod cli;
mod commands;
mod config;
mod error;
mod exec;
mod utils;

use clap::Parser;

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = cli.execute() {
        error::report(&err);
        std::process::exit(error::exit_code_for(&err));
    }
}
