use std::fmt::Display;

use clap::{error::ErrorKind, value_parser, CommandFactory, Parser};

/// Standard input filename
const STDIN_FILE: &str = "-";

const USAGE_SHORT: &str = r#"
This program accepts two minutes of carrier-level samples from a WWVB receiver, one byte per sample (0 or 1), at the given sampling --rate, and decodes the time of day and date.

See --help for more details.
"#;

const USAGE_LONG: &str = r#"
This program accepts two minutes of carrier-level samples from a WWVB receiver, one byte per sample (0 or 1), at the given sampling --rate, and decodes the time of day and date.

Each byte is one sample of the receiver's carrier-level output: 0 while the carrier power is reduced and 1 while it is at full power. At the default rate of 40 Hz, two minutes is 4800 bytes. Input beyond two minutes is ignored.

Decode a saved capture with

    wwvbdec --file capture.bin

or pipe samples from an acquisition program

    wwvb_sampler --rate 40 | wwvbdec -r 40 --save capture.bin

Every decode ends with a summary line and a confidence label:

  LIKELY OK     every second closely matched an ideal symbol
  NOT RELIABLE  some second was a marginal match
  PROBABLY BAD  some second was a poor match, or a field failed

The program exits successfully whenever a decode completes, even a PROBABLY BAD one.
"#;

const ADVANCED: &str = "Advanced Decoder Options";

/// Top-level program arguments
#[derive(Parser, Clone, Debug)]
#[command(version)]
#[command(about, long_about = None)]
#[command(after_help = USAGE_SHORT, after_long_help = USAGE_LONG)]
#[command(max_term_width = 100)]
pub struct Args {
    /// Verbosity level (-vvv for more)
    #[arg(short, long, default_value_t = 0, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print NOTHING, not even the decoded time
    #[arg(short, long)]
    pub quiet: bool,

    /// Sampling rate (Hz)
    ///
    /// Must place a whole number of samples in 200, 500, and
    /// 800 ms. Any multiple of 10 Hz will do.
    #[arg(short, long, default_value_t = 40)]
    #[arg(value_parser = value_parser!(u32).range(10..))]
    pub rate: u32,

    /// Input file (or "-" for stdin)
    ///
    /// One byte per sample, 0 or 1, at --rate.
    #[arg(long, default_value_t = STDIN_FILE.to_string())]
    pub file: String,

    /// Save the samples read to this file
    ///
    /// The saved file can be decoded again later with --file.
    #[arg(short = 'o', long)]
    pub save: Option<String>,

    /// Print the located frame, one second per row
    ///
    /// If the frame was found correctly, the first second is a
    /// marker and each symbol can be read by eye.
    #[arg(short, long)]
    pub print_frame: bool,

    /// Score every candidate frame start in full
    #[arg(long)]
    #[arg(hide_short_help = true)]
    #[arg(help_heading = ADVANCED)]
    pub no_prune: bool,

    /// Worst-second errors for NOT RELIABLE (samples)
    #[arg(long)]
    #[arg(hide_short_help = true)]
    #[arg(help_heading = ADVANCED)]
    pub unreliable_errors: Option<u32>,

    /// Worst-second errors for PROBABLY BAD (samples)
    #[arg(long)]
    #[arg(hide_short_help = true)]
    #[arg(help_heading = ADVANCED)]
    pub bad_errors: Option<u32>,
}

impl Args {
    /// Return true if the user requests input from stdin
    pub fn input_is_stdin(&self) -> bool {
        self.file == STDIN_FILE
    }

    /// Return true if the user overrides any confidence threshold
    pub fn has_custom_thresholds(&self) -> bool {
        self.unreliable_errors.is_some() || self.bad_errors.is_some()
    }
}

/// A program-level error with exit code
#[derive(Debug)]
pub struct CliError {
    error: anyhow::Error,
    exit_code: i32,
}

impl CliError {
    /// Create new error with a custom exit code
    pub fn new(error: anyhow::Error, code: i32) -> CliError {
        CliError {
            error,
            exit_code: code,
        }
    }

    /// Print this error to the terminal
    ///
    /// Errors from clap are printed verbatim. Other types of errors
    /// are printed indirectly via clap's fancy formatter.
    pub fn print(&self) -> std::io::Result<()> {
        if let Some(e) = self.error.downcast_ref::<clap::Error>() {
            e.print()
        } else {
            Args::command()
                .error(ErrorKind::Format, self.to_string())
                .print()
        }
    }

    /// Print this error to the terminal and exit
    pub fn exit(&self) -> ! {
        drop(self.print());
        std::process::exit(self.exit_code);
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.error)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> CliError {
        CliError::new(err, 1)
    }
}

impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> CliError {
        let code = if err.use_stderr() { 1 } else { 0 };
        CliError::new(err.into(), code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clap() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_args() {
        let args = Args::try_parse_from(["wwvbdec"]).expect("defaults");
        assert_eq!(40, args.rate);
        assert!(args.input_is_stdin());
        assert!(!args.has_custom_thresholds());
        assert_eq!(None, args.save);

        let args = Args::try_parse_from([
            "wwvbdec",
            "-r",
            "100",
            "--file",
            "capture.bin",
            "-p",
            "--bad-errors",
            "30",
        ])
        .expect("valid args");
        assert_eq!(100, args.rate);
        assert!(!args.input_is_stdin());
        assert!(args.print_frame);
        assert!(args.has_custom_thresholds());
        assert_eq!(Some(30), args.bad_errors);

        assert!(Args::try_parse_from(["wwvbdec", "-r", "0"]).is_err());
    }
}
