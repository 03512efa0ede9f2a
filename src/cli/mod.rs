//! Command-line interface: argument parsing, commands, menu and output.

pub mod commands;
pub mod display;
pub mod output;
pub mod session;
pub mod types;
pub mod view;

pub use types::{Cli, Commands};

/// Print `err` for the operator and exit with status 1.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({ "error": format!("{err:#}") });
        println!(
            "{}",
            serde_json::to_string_pretty(&body).unwrap_or_default()
        );
    } else {
        eprintln!("{} {err:#}", display::error_header("Error:"));
    }
    std::process::exit(1);
}
