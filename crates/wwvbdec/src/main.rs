use std::io;

use anyhow::{anyhow, Context};
use clap::Parser;
use log::{info, LevelFilter};

use wwvbtime::{ConfidenceThresholds, Timing, WwvbDecoder, WwvbDecoderBuilder};

mod app;
mod cli;

use cli::{Args, CliError};

fn main() {
    match wwvbdec() {
        Ok(()) => {}
        Err(cli_error) => cli_error.exit(),
    }
}

fn wwvbdec() -> Result<(), CliError> {
    // Parse options and start logging
    let args = Args::try_parse()?;
    log_setup(&args);

    // create the decoder
    let decoder = decoder_setup(&args)?;

    // file setup: locks stdin in case we need it
    let stdin = io::stdin();
    let stdin_handle = stdin.lock();
    let inbuf = file_setup(&args, stdin_handle)?;

    // read one capture
    let samples = app::read_capture(inbuf, decoder.timing())?;
    if let Some(path) = &args.save {
        app::save_capture(path, &samples)?;
    }

    app::run(&args, &decoder, &samples)?;
    Ok(())
}

fn log_setup(args: &Args) {
    if args.quiet {
        // no logging
        return;
    } else if std::env::var_os("RUST_LOG").is_none() {
        // parameter controls
        let log_filter = match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            3 | _ => LevelFilter::Trace,
        };

        pretty_env_logger::formatted_builder()
            .filter_module("wwvbtime", log_filter)
            .filter_module("wwvbdec", log_filter)
            .init();
    } else {
        // environment controls
        pretty_env_logger::init();
    }
}

fn decoder_setup(args: &Args) -> Result<WwvbDecoder, anyhow::Error> {
    let mut builder = WwvbDecoderBuilder::new(args.rate);
    builder.with_pruning(!args.no_prune);

    if args.has_custom_thresholds() {
        // unspecified thresholds keep their default
        let timing = Timing::new(args.rate).with_context(|| format!("bad --rate {}", args.rate))?;
        let default = ConfidenceThresholds::for_timing(&timing);
        builder.with_confidence_thresholds(
            args.unreliable_errors.unwrap_or(default.unreliable()),
            args.bad_errors.unwrap_or(default.bad()),
        );
    }

    let decoder = builder
        .build()
        .with_context(|| format!("bad --rate {}", args.rate))?;
    info!(
        "WWVB decoder at {} Hz, confidence thresholds {}/{}",
        decoder.sample_rate(),
        decoder.confidence_thresholds().unreliable(),
        decoder.confidence_thresholds().bad()
    );
    Ok(decoder)
}

fn file_setup<'stdin>(
    args: &Args,
    stdin: std::io::StdinLock<'stdin>,
) -> Result<Box<dyn io::BufRead + 'stdin>, anyhow::Error> {
    if args.input_is_stdin() {
        info!("WWVB decoder reading standard input");
        if !is_terminal(&std::io::stdin()) {
            Ok(Box::new(io::BufReader::new(stdin)))
        } else {
            Err(anyhow!(
                "cowardly refusing to read samples from a terminal.

Pipe carrier-level samples from a WWVB receiver into this
program, or decode a saved capture with --file."
            ))
        }
    } else {
        info!("WWVB decoder reading file: \"{}\"", &args.file);
        Ok(Box::new(io::BufReader::new(
            std::fs::File::open(&args.file)
                .with_context(|| format!("Unable to open --file \"{}\"", args.file))?,
        )))
    }
}

#[cfg(not(target_os = "windows"))]
fn is_terminal<S>(stream: &S) -> bool
where
    S: std::os::fd::AsRawFd,
{
    terminal_size::terminal_size_using_fd(stream.as_raw_fd()).is_some()
}

#[cfg(target_os = "windows")]
fn is_terminal<S>(stream: &S) -> bool
where
    S: std::os::windows::io::AsRawHandle,
{
    terminal_size::terminal_size_using_handle(stream.as_raw_handle()).is_some()
}
