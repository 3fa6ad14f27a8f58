//! # wwvbtime: WWVB Time Code Decoding
//!
//! This crate decodes the time code broadcast by
//! [WWVB](https://en.wikipedia.org/wiki/WWVB), the 60 kHz
//! time signal station of the United States, from a buffer
//! of carrier-level samples.
//!
//! ## Disclaimer
//!
//! This crate is dual-licensed MIT and Apache 2.0. Read these licenses
//! carefully as they may affect your rights.
//!
//! This crate has not been certified as a time reference for any purpose.
//! Every decode reports a confidence; check it.
//!
//! ## Example
//!
//! You will first need a WWVB receiver module which reports
//! the carrier level as a logic signal. Sample that signal at
//! a steady rate, such as 40 Hz, for two minutes. Store one
//! byte per sample: `0` while the carrier power is reduced
//! and `1` while it is at full power. Obtaining the samples
//! is beyond the scope of this crate.
//!
//! ```
//! use wwvbtime::{Confidence, FieldKind, WwvbDecoderBuilder};
//!
//! # let two_minutes_of_samples = || {
//! #     use wwvbtime::{frame_symbols, render, Timing};
//! #     let symbols = frame_symbols(&[(FieldKind::Hours, 13), (FieldKind::DayOfYear, 1)]);
//! #     let mut out = render(&Timing::default(), &symbols);
//! #     let second_minute = out.clone();
//! #     out.extend(second_minute);
//! #     out
//! # };
//! let decoder = WwvbDecoderBuilder::new(40)   // samples per second
//!     .with_confidence_thresholds(7, 10)      // worst-second sample errors
//!     .build()
//!     .expect("unsupported sampling rate");
//!
//! let samples: Vec<u8> = two_minutes_of_samples();
//! let decoded = decoder.decode(&samples).expect("need at least one minute");
//!
//! if decoded.confidence() == Confidence::LikelyOk {
//!     println!("{}", decoded);
//! }
//! assert_eq!(Some(13), decoded.frame().value(FieldKind::Hours));
//! ```
//!
//! The decoder never gives up on a buffer which is long enough.
//! Even noise has *some* best-matching frame. Instead of failing,
//! every part of the decode carries an error score: the number of
//! samples which disagree with an ideal signal. Lower is better.
//!
//! * Each [field](FieldResult) reports its total score and the
//!   score of its single worst second. A field fails as a whole
//!   if any of its seconds looks like a position marker.
//! * The [frame](Frame) reports the total score of all fields.
//! * The [`Decoded`] output labels the whole decode with a
//!   [`Confidence`].
//!
//! ## Background
//!
//! WWVB sends one symbol per second by reducing its carrier power
//! at the start of each second. The length of the reduced-power
//! segment is the symbol: 200 ms for a zero, 500 ms for a one, and
//! 800 ms for a position marker. Sixty symbols make a frame, which
//! begins at the top of each minute and contains the time of day,
//! day of year, year, and some status flags.
//!
//! ## Crate features
//!
//! * `chrono`: Convert decoded frames to true UTC timestamps.
//!   If enabled, `chrono` becomes part of this crate's public API.
//!

mod builder;
mod calendar;
mod codes;
mod confidence;
mod decoder;
mod field;
mod frame;
mod locator;
mod symbol;
mod waveform;

pub use builder::WwvbDecoderBuilder;
pub use calendar::{days_in_year, month_day, CalendarOutOfRange, DateErr, MonthDay};
pub use codes::{frame_symbols, CodeEntry, ConstantSecond, FieldKind, FRAME_CONSTANTS};
pub use confidence::{Confidence, ConfidenceThresholds};
pub use decoder::{Decoded, WwvbDecoder};
pub use field::{decode_field, FieldResult, FieldScore};
pub use frame::{decode_frame, DecodeErr, Frame};
pub use locator::{FrameLocator, FrameSync};
pub use symbol::{classify, template_errors, SymbolDecision, SymbolScores};
pub use waveform::{
    render, render_symbol, InvalidSampleRate, Symbol, Timing, DEFAULT_SAMPLE_RATE, FRAME_SECONDS,
};
