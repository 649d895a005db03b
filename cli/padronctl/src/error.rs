//! Error handling and display for the CLI.

use colored::Colorize;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{invalid} of {total} inputs are not valid RUTs")]
    InvalidInputs { invalid: usize, total: usize },

    #[error("{rejected} of {total} import records were rejected")]
    ImportRejected { rejected: usize, total: usize },
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        match cli_err {
            CliError::InvalidInputs { .. } => {
                eprintln!(
                    "\n{}",
                    "Hint: a RUT is digits, a hyphen and one check character, e.g. 12.345.678-5."
                        .yellow()
                );
            }
            CliError::ImportRejected { .. } => {
                eprintln!(
                    "\n{}",
                    "Hint: the reason for each rejected record is listed above.".yellow()
                );
            }
        }
    } else {
        // anyhow context chain, e.g. the io error under "failed to read ..."
        for cause in err.chain().skip(1) {
            eprintln!("  {} {}", "Caused by:".dimmed(), cause);
        }
    }
}
