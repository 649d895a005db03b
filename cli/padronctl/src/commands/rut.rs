//! RUT commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use padron_rut::Rut;
use serde::Serialize;
use tabled::Tabled;

use crate::error::CliError;
use crate::output::{display_option, print_output, print_single};

use super::CommandContext;

/// RUT commands.
#[derive(Debug, Args)]
pub struct RutCommand {
    #[command(subcommand)]
    command: RutSubcommand,
}

#[derive(Debug, Subcommand)]
enum RutSubcommand {
    /// Validate one or more RUTs and show their normalized form.
    Validate(ValidateArgs),

    /// Compute the check digit for a numeric root.
    CheckDigit(CheckDigitArgs),
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// RUTs to validate, e.g. 12.345.678-5.
    #[arg(required = true)]
    inputs: Vec<String>,
}

#[derive(Debug, Args)]
struct CheckDigitArgs {
    /// Root digits without separators.
    root: u64,
}

impl RutCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        match self.command {
            RutSubcommand::Validate(args) => validate(ctx, args),
            RutSubcommand::CheckDigit(args) => check_digit(ctx, args),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
struct ValidationRow {
    #[tabled(rename = "Input")]
    input: String,

    #[tabled(rename = "Valid")]
    valid: bool,

    #[tabled(rename = "Normalized", display = "display_option")]
    normalized: Option<String>,

    #[tabled(rename = "Formatted", display = "display_option")]
    formatted: Option<String>,

    #[tabled(rename = "Reason", display = "display_option")]
    reason: Option<String>,
}

impl ValidationRow {
    fn check(input: String) -> Self {
        match Rut::parse(&input) {
            Ok(rut) => Self {
                input,
                valid: true,
                normalized: Some(rut.to_string()),
                formatted: Some(rut.dotted()),
                reason: None,
            },
            Err(err) => Self {
                input,
                valid: false,
                normalized: None,
                formatted: None,
                reason: Some(err.reason().to_string()),
            },
        }
    }
}

fn validate(ctx: &CommandContext, args: ValidateArgs) -> Result<()> {
    let rows: Vec<ValidationRow> = args.inputs.into_iter().map(ValidationRow::check).collect();
    print_output(&rows, ctx.format);

    let invalid = rows.iter().filter(|r| !r.valid).count();
    if invalid > 0 {
        return Err(CliError::InvalidInputs {
            invalid,
            total: rows.len(),
        }
        .into());
    }
    Ok(())
}

#[derive(Debug, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
struct CheckDigitRow {
    #[tabled(rename = "Root")]
    root: u64,

    #[tabled(rename = "Check Digit")]
    check_digit: String,

    #[tabled(rename = "RUT")]
    rut: String,

    #[tabled(rename = "Formatted")]
    formatted: String,
}

fn check_digit(ctx: &CommandContext, args: CheckDigitArgs) -> Result<()> {
    let rut = Rut::from_root(args.root);
    let row = CheckDigitRow {
        root: rut.root(),
        check_digit: rut.check_digit().to_string(),
        rut: rut.hyphenated(),
        formatted: rut.dotted(),
    };
    print_single(&row, ctx.format);
    Ok(())
}
