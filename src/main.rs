//! Command-line front end: `verify`, `guess` and `checksum`.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use cnid_guess::{EndBound, Guesser, IdError, checksum_char, verify_id_number};

mod cli;
mod logging;

use crate::cli::{ChecksumArgs, Cli, Command, GuessArgs, LogFormatArg, VerifyArgs};
use crate::logging::{LogConfig, LogFormat, init_logging};

const EXIT_INVALID: u8 = 1;
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(error) = init_logging(&log_config_from_cli(&cli)) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::from(EXIT_USAGE);
    }

    let result = match &cli.command {
        Command::Verify(args) => Ok(run_verify(args)),
        Command::Guess(args) => run_guess(args),
        Command::Checksum(args) => run_checksum(args),
    };
    result.unwrap_or_else(|error| {
        eprintln!("error: {error:#}");
        ExitCode::from(EXIT_USAGE)
    })
}

fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    LogConfig::default()
        .with_level_filter(cli.verbosity.tracing_level_filter())
        .with_env_filter(!cli.verbosity.is_present())
        .with_format(format)
        .with_ansi(!cli.no_color && io::stderr().is_terminal())
}

/// Prints one verdict per number; any invalid or malformed number makes the exit code 1.
fn run_verify(args: &VerifyArgs) -> ExitCode {
    let mut all_valid = true;
    for number in &args.id_numbers {
        let (line, valid) = verify_line(number);
        println!("{line}");
        all_valid &= valid;
    }
    if all_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_INVALID)
    }
}

/// Verifies one number with the verdict also logged, and renders its stdout line.
fn verify_line(number: &str) -> (String, bool) {
    match verify_id_number(number, true) {
        Ok(true) => (format!("{number}: valid"), true),
        Ok(false) => (format!("{number}: invalid"), false),
        Err(IdError::InvalidLength { expected, actual }) => (
            format!("{number}: malformed (expected {expected} characters, got {actual})"),
            false,
        ),
        Err(error) => (format!("{number}: malformed ({error})"), false),
    }
}

fn run_guess(args: &GuessArgs) -> anyhow::Result<ExitCode> {
    let end_bound = if args.inclusive_end {
        EndBound::Inclusive
    } else {
        EndBound::Exclusive
    };
    let report = Guesser::new(&args.head, &args.tail)
        .and_then(|guesser| {
            guesser
                .birthday_prefix(&args.birthday_prefix)
                .end_bound(end_bound)
                .run()
        })
        .with_context(|| {
            format!(
                "cannot guess the birth date of {}********{} (prefix {:?})",
                args.head, args.tail, args.birthday_prefix
            )
        })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
        for candidate in &report.candidates {
            println!("{candidate}");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_checksum(args: &ChecksumArgs) -> anyhow::Result<ExitCode> {
    let symbol = checksum_char(&args.body).with_context(|| format!("cannot complete {:?}", args.body))?;
    println!("{}{symbol}", args.body);
    Ok(ExitCode::SUCCESS)
}
