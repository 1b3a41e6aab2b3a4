//! CLI argument definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};

#[derive(Parser)]
#[command(
    name = "cnid-guess",
    version,
    about = "Verify Chinese citizen ID numbers and guess an obscured birth date",
    long_about = "Verify Chinese citizen ID numbers against their checksum and embedded \
                  birth date, or recover the birth date of a number whose middle eight \
                  digits are hidden by trying every date that produces a valid number."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v shows every date tried, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Log output format on stderr.
    #[arg(long = "log-format", value_enum, default_value = "compact", global = true)]
    pub log_format: LogFormatArg,

    /// Disable ANSI colors in log output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Verify one or more 18-character ID numbers.
    Verify(VerifyArgs),

    /// Find every birth date that completes HEAD + YYYYMMDD + TAIL into a valid number.
    Guess(GuessArgs),

    /// Print the checksum symbol completing a 17-digit number.
    Checksum(ChecksumArgs),
}

#[derive(Args)]
pub struct VerifyArgs {
    /// ID numbers to verify.
    #[arg(value_name = "ID_NUMBER", required = true)]
    pub id_numbers: Vec<String>,
}

#[derive(Args)]
pub struct GuessArgs {
    /// Head of the ID number (region code), must be 6 digits.
    pub head: String,

    /// Tail of the ID number (sequence and checksum), must be 4 characters.
    pub tail: String,

    /// Known leading digits of the birth date, `YYYYMMDD` order (default: none).
    #[arg(
        long = "birthday-prefix",
        alias = "birthday_prefix",
        value_name = "PREFIX",
        default_value = ""
    )]
    pub birthday_prefix: String,

    /// Also try the last date of the range.
    ///
    /// By default the search stops one day before the end of the range, so a
    /// complete 8-digit prefix tries no date at all.
    #[arg(long = "inclusive-end")]
    pub inclusive_end: bool,

    /// Print the report as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct ChecksumArgs {
    /// First 17 digits of an ID number.
    #[arg(value_name = "BODY")]
    pub body: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
