//! Capture replay and decode reporting
//!
//! The report looks like this:
//!
//! ```txt
//! Found frame at sample 1166, score 0
//!
//!   Field    Value  Score   Mean  Worst
//!   hours       12      0   0.00     00
//!   minutes     35      0   0.00     00
//!   …
//!   Total decode score 0/0.00-00 (lower is better)
//!
//!   Summary: 12:35 UT1 on 02/29/2024 - 00 LIKELY OK
//! ```
//!
//! Scores count sample errors. `Mean` is the score per second
//! of the field, and `Worst` is the score of the field's
//! worst second.

use std::io::{self, Read, Write};

use anyhow::Context;
use chrono::SecondsFormat;
use log::{info, warn};
use wwvbtime::{Decoded, FieldScore, Timing, WwvbDecoder};

use crate::cli::Args;

/// Seconds of samples to read
pub const CAPTURE_SECONDS: usize = 120;

/// Run the application
///
/// Decodes the `samples` with a fully-initialized `decoder`
/// and prints the report, unless `args` asks for quiet.
pub fn run(args: &Args, decoder: &WwvbDecoder, samples: &[u8]) -> Result<(), anyhow::Error> {
    let decoded = decoder
        .decode(samples)
        .context("unable to decode capture")?;

    if args.quiet {
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(
        &mut out,
        decoder.timing(),
        samples,
        &decoded,
        args.print_frame,
    )
    .context("unable to write report")?;
    out.flush()?;
    Ok(())
}

/// Read one capture from `input`
///
/// Reads up to [`CAPTURE_SECONDS`] of samples. Shorter input is
/// accepted, with a warning if it holds less than one frame.
pub fn read_capture<R>(input: R, timing: &Timing) -> Result<Vec<u8>, anyhow::Error>
where
    R: Read,
{
    let capacity = CAPTURE_SECONDS * timing.samples_per_second();
    let mut samples = Vec::with_capacity(capacity);
    input
        .take(capacity as u64)
        .read_to_end(&mut samples)
        .context("unable to read samples")?;

    if samples.len() < timing.samples_per_frame() {
        warn!(
            "input likely too short: {} samples, but one frame is {}",
            samples.len(),
            timing.samples_per_frame()
        );
    } else {
        info!(
            "read {} samples ({:.1} s)",
            samples.len(),
            samples.len() as f32 / timing.samples_per_second() as f32
        );
    }

    Ok(samples)
}

/// Save a capture to `path`
pub fn save_capture(path: &str, samples: &[u8]) -> Result<(), anyhow::Error> {
    std::fs::write(path, samples).with_context(|| format!("Unable to write --save \"{}\"", path))?;
    info!("saved {} samples to \"{}\"", samples.len(), path);
    Ok(())
}

/// Write the decode report
pub fn write_report<W>(
    out: &mut W,
    timing: &Timing,
    samples: &[u8],
    decoded: &Decoded,
    print_frame: bool,
) -> io::Result<()>
where
    W: Write,
{
    let frame = decoded.frame();

    writeln!(
        out,
        "Found frame at sample {}, score {}",
        decoded.sync().offset,
        decoded.sync().score
    )?;
    writeln!(out)?;

    if print_frame {
        write_frame(out, timing, samples, frame.offset())?;
        writeln!(out)?;
    }

    writeln!(out, "  Field    Value  Score   Mean  Worst")?;
    for field in frame.fields() {
        match field.score() {
            FieldScore::Valid(score) => writeln!(
                out,
                "  {:<7} {:>6} {:>6} {:>6.2}     {:02}",
                field.name(),
                field.value(),
                score,
                field.mean_score().unwrap_or(0.0),
                field.worst_score()
            )?,
            FieldScore::Failed => writeln!(
                out,
                "  {:<7} {:>6} {:>6} {:>6}     {:02}",
                field.name(),
                "-",
                "FAIL",
                "-",
                field.worst_score()
            )?,
        }
    }

    write!(
        out,
        "  Total decode score {}/{:.2}-{:02}",
        frame.total_score(),
        frame.mean_score(),
        frame.worst_score()
    )?;
    if frame.is_complete() {
        writeln!(out, " (lower is better)")?;
    } else {
        writeln!(out, " ({} fields FAILED)", frame.failed_fields())?;
    }
    writeln!(out)?;

    writeln!(out, "  Summary: {}", decoded)?;
    if let Some(utc) = decoded.utc_datetime() {
        writeln!(
            out,
            "  UTC:     {}",
            utc.to_rfc3339_opts(SecondsFormat::Secs, true)
        )?;
    }

    Ok(())
}

// Print the frame with one second of samples per row
//
// If the frame start is correct, the first row is a marker.
fn write_frame<W>(out: &mut W, timing: &Timing, samples: &[u8], offset: usize) -> io::Result<()>
where
    W: Write,
{
    writeln!(out, "   Sec Sample  Samples in Second")?;
    writeln!(out, "   --- ------  {}", "-".repeat(timing.samples_per_second()))?;

    let frame = &samples[offset..offset + timing.samples_per_frame()];
    for (sec, second) in frame.chunks(timing.samples_per_second()).enumerate() {
        write!(out, "   {:03} ({:04}): ", sec, offset + timing.second_offset(sec))?;
        for sa in second {
            write!(out, "{}", (*sa != 0) as u8)?;
        }
        writeln!(out)?;
    }

    Ok(())
}
