//! Full decoder chain

use std::fmt;

#[cfg(feature = "chrono")]
use chrono::{DateTime, TimeZone, Utc};

#[cfg(not(test))]
use log::{info, warn};

#[cfg(test)]
use std::println as info;
#[cfg(test)]
use std::println as warn;

use crate::calendar::{month_day, DateErr, MonthDay};
use crate::codes::FieldKind;
use crate::confidence::{Confidence, ConfidenceThresholds};
use crate::frame::{decode_frame, DecodeErr, Frame};
use crate::locator::{FrameLocator, FrameSync};
use crate::waveform::Timing;

/// A complete WWVB decoder
///
/// The decoder takes a buffer of carrier-level samples and
/// performs the following operations:
///
/// 1. Frame synchronization: find the sample which best
///    matches the start of a frame
/// 2. Field decoding: decode every field of the frame which
///    starts at that sample
/// 3. Calendar conversion: turn the day of year into a
///    month and day
/// 4. Confidence classification
///
/// To create the decoder, first create its Builder:
///
/// ```
/// use wwvbtime::WwvbDecoderBuilder;
///
/// let decoder = WwvbDecoderBuilder::new(40).build().expect("bad rate");
/// assert_eq!(decoder.sample_rate(), 40);
/// ```
///
/// The decoder holds no state between calls. The buffer
/// should contain at least two minutes of samples so that
/// one whole frame is certain to be present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WwvbDecoder {
    timing: Timing,
    locator: FrameLocator,
    thresholds: ConfidenceThresholds,
}

impl WwvbDecoder {
    pub(crate) fn new(timing: Timing, prune: bool, thresholds: ConfidenceThresholds) -> Self {
        Self {
            timing,
            locator: FrameLocator::new(timing, prune),
            thresholds,
        }
    }

    /// Decode the best frame in `samples`
    ///
    /// Each sample is the carrier level: `0` for reduced
    /// power and `1` for full power. The whole buffer is
    /// searched for the start of a frame, and that frame is
    /// decoded.
    ///
    /// Decoding errors within the frame do not cause this
    /// method to fail. Failed fields and poor matches are
    /// reported in the output. This method fails only if
    /// `samples` is too short to hold a frame.
    pub fn decode(&self, samples: &[u8]) -> Result<Decoded, DecodeErr> {
        let sync = self.locate(samples)?;
        let frame = self.decode_at(samples, sync.offset)?;

        let date = frame_date(&frame);
        if let Err(e) = &date {
            warn!("decode: no calendar date: {}", e);
        }

        let confidence = self.thresholds.classify(frame.worst_score());
        let out = Decoded {
            sync,
            frame,
            date,
            confidence,
        };

        match confidence {
            Confidence::LikelyOk => info!("decode: {}", out),
            _ => warn!("decode: low confidence: {}", out),
        }
        Ok(out)
    }

    /// Find the start of a frame in `samples`
    pub fn locate(&self, samples: &[u8]) -> Result<FrameSync, DecodeErr> {
        self.locator.locate(samples)
    }

    /// Decode the frame which starts at sample `offset`
    pub fn decode_at(&self, samples: &[u8], offset: usize) -> Result<Frame, DecodeErr> {
        decode_frame(samples, offset, &self.timing)
    }

    /// Sampling rate (Hz)
    pub fn sample_rate(&self) -> u32 {
        self.timing.sample_rate()
    }

    /// Sample timing
    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Frame locator
    pub fn locator(&self) -> &FrameLocator {
        &self.locator
    }

    /// Confidence thresholds
    pub fn confidence_thresholds(&self) -> &ConfidenceThresholds {
        &self.thresholds
    }
}

/// Output of a complete decode
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    sync: FrameSync,
    frame: Frame,
    date: Result<MonthDay, DateErr>,
    confidence: Confidence,
}

impl Decoded {
    /// Located start of frame and its score
    pub fn sync(&self) -> &FrameSync {
        &self.sync
    }

    /// Decoded frame
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Calendar date
    ///
    /// Fails if the day-of-year or leap-year field failed to
    /// decode, or if the decoded day of year does not exist.
    pub fn date(&self) -> Result<MonthDay, DateErr> {
        self.date
    }

    /// Decode confidence
    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    /// Hour of day (UTC), if decoded
    pub fn hour(&self) -> Option<u32> {
        self.frame.value(FieldKind::Hours)
    }

    /// Minute of hour, if decoded
    pub fn minute(&self) -> Option<u32> {
        self.frame.value(FieldKind::Minutes)
    }

    /// Full year, if decoded
    ///
    /// WWVB sends only the last two digits of the year. They
    /// are taken to be in the 21st century.
    pub fn year(&self) -> Option<i32> {
        self.frame
            .value(FieldKind::Year)
            .map(|yy| 2000 + yy as i32)
    }

    /// UTC timestamp of the start of the frame
    ///
    /// Requires every time and date field to have decoded to
    /// a real time. Returns `None` otherwise.
    #[cfg(feature = "chrono")]
    pub fn utc_datetime(&self) -> Option<DateTime<Utc>> {
        let date = self.date.ok()?;
        Utc.with_ymd_and_hms(
            self.year()?,
            date.month as u32,
            date.day as u32,
            self.hour()?,
            self.minute()?,
            0,
        )
        .single()
    }
}

impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} UT1 on ",
            Digits(self.hour(), 2),
            Digits(self.minute(), 2)
        )?;
        match self.date {
            Ok(date) => write!(f, "{}", date)?,
            Err(_) => f.write_str("??/??")?,
        }
        write!(
            f,
            "/{} - {:02} {}",
            Digits(self.year().map(|yr| yr as u32), 4),
            self.frame.worst_score(),
            self.confidence
        )
    }
}

// Calendar date of the frame, from its day-of-year and leap-year fields
fn frame_date(frame: &Frame) -> Result<MonthDay, DateErr> {
    let day = frame
        .value(FieldKind::DayOfYear)
        .ok_or(DateErr::FieldFailed(FieldKind::DayOfYear))?;
    let leap_year = frame
        .value(FieldKind::LeapYear)
        .ok_or(DateErr::FieldFailed(FieldKind::LeapYear))?;
    Ok(month_day(day, leap_year != 0)?)
}

// Zero-padded number, or dashes if it did not decode
struct Digits(Option<u32>, usize);

impl fmt::Display for Digits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(val) => write!(f, "{:0width$}", val, width = self.1),
            None => f.write_str(&"-".repeat(self.1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::builder::WwvbDecoderBuilder;
    use crate::calendar::CalendarOutOfRange;
    use crate::codes::frame_symbols;
    use crate::field::FieldScore;
    use crate::waveform::{render, Symbol};

    const LEAP_DAY: &[(FieldKind, u32)] = &[
        (FieldKind::Hours, 12),
        (FieldKind::Minutes, 34),
        (FieldKind::DayOfYear, 60),
        (FieldKind::Year, 24),
        (FieldKind::LeapYear, 1),
        (FieldKind::LeapSecond, 0),
        (FieldKind::Dst, 0),
    ];

    const NEXT_MINUTE: &[(FieldKind, u32)] = &[
        (FieldKind::Hours, 12),
        (FieldKind::Minutes, 35),
        (FieldKind::DayOfYear, 60),
        (FieldKind::Year, 24),
        (FieldKind::LeapYear, 1),
        (FieldKind::LeapSecond, 0),
        (FieldKind::Dst, 0),
    ];

    // two minutes of samples, beginning partway through a frame
    fn make_capture(timing: &Timing, skip: usize) -> Vec<u8> {
        let mut out = render(timing, &frame_symbols(LEAP_DAY));
        out.extend(render(timing, &frame_symbols(NEXT_MINUTE)));
        out.extend(render(timing, &frame_symbols(LEAP_DAY)));
        out.drain(0..skip);
        out.truncate(2 * timing.samples_per_frame());
        out
    }

    #[test]
    fn test_decode_capture() {
        let decoder = WwvbDecoderBuilder::default().build().expect("valid rate");
        let samples = make_capture(decoder.timing(), 1234);
        assert_eq!(4800, samples.len());

        let out = decoder.decode(&samples).expect("long enough");
        assert_eq!(2400 - 1234, out.sync().offset);
        assert_eq!(0, out.sync().score);
        assert_eq!(Some(12), out.hour());
        assert_eq!(Some(35), out.minute());
        assert_eq!(Some(2024), out.year());
        assert_eq!(Ok(MonthDay { month: 2, day: 29 }), out.date());
        assert_eq!(0, out.frame().total_score());
        assert_eq!(Confidence::LikelyOk, out.confidence());
        assert_eq!("12:35 UT1 on 02/29/2024 - 00 LIKELY OK", format!("{}", out));
    }

    #[test]
    fn test_decode_noisy() {
        let decoder = WwvbDecoderBuilder::default().build().expect("valid rate");
        let mut samples = make_capture(decoder.timing(), 100);

        // at most one error in any second
        for sa in samples.iter_mut().step_by(97) {
            *sa ^= 1;
        }

        let out = decoder.decode(&samples).expect("long enough");
        assert_eq!(2300, out.sync().offset);
        assert_eq!(Some(35), out.minute());
        assert_eq!(Ok(MonthDay { month: 2, day: 29 }), out.date());
        assert!(out.frame().worst_score() <= 1);
        assert_eq!(Confidence::LikelyOk, out.confidence());
    }

    #[test]
    fn test_decode_low_confidence() {
        let decoder = WwvbDecoderBuilder::default().build().expect("valid rate");
        let mut samples = render(decoder.timing(), &frame_symbols(LEAP_DAY));

        // eight errors in the 40-minute bit, which is zero
        let start = decoder.timing().second_offset(1);
        for sa in samples[start + 30..start + 38].iter_mut() {
            *sa ^= 1;
        }

        let out = decoder.decode(&samples).expect("long enough");
        assert_eq!(0, out.sync().offset);
        assert_eq!(Some(34), out.minute());
        assert_eq!(8, out.frame().worst_score());
        assert_eq!(Confidence::NotReliable, out.confidence());
    }

    #[test]
    fn test_decode_failed_day() {
        let decoder = WwvbDecoderBuilder::default().build().expect("valid rate");
        let mut symbols = frame_symbols(LEAP_DAY);
        symbols[26] = Symbol::Marker;
        let samples = render(decoder.timing(), &symbols);

        let out = decoder.decode(&samples).expect("long enough");
        assert_eq!(
            FieldScore::Failed,
            out.frame().field(FieldKind::DayOfYear).score()
        );
        assert_eq!(Err(DateErr::FieldFailed(FieldKind::DayOfYear)), out.date());
        assert_eq!(Confidence::ProbablyBad, out.confidence());
        assert_eq!(Some(12), out.hour());
        assert_eq!("12:34 UT1 on ??/??/2024 - 40 PROBABLY BAD", format!("{}", out));
    }

    #[test]
    fn test_decode_failed_leap_year() {
        // day 60 is only a date once the leap year indicator is known
        let decoder = WwvbDecoderBuilder::default().build().expect("valid rate");
        let mut symbols = frame_symbols(LEAP_DAY);
        symbols[55] = Symbol::Marker;
        let samples = render(decoder.timing(), &symbols);

        let out = decoder.decode(&samples).expect("long enough");
        assert_eq!(None, out.frame().value(FieldKind::LeapYear));
        assert_eq!(Some(60), out.frame().value(FieldKind::DayOfYear));
        assert_eq!(Err(DateErr::FieldFailed(FieldKind::LeapYear)), out.date());
        assert_eq!("12:34 UT1 on ??/??/2024 - 40 PROBABLY BAD", format!("{}", out));

        #[cfg(feature = "chrono")]
        assert_eq!(None, out.utc_datetime());
    }

    #[test]
    fn test_decode_day_out_of_range() {
        let decoder = WwvbDecoderBuilder::default().build().expect("valid rate");
        let mut day = LEAP_DAY.to_vec();
        day[2] = (FieldKind::DayOfYear, 366);
        day[4] = (FieldKind::LeapYear, 0);
        let samples = render(decoder.timing(), &frame_symbols(&day));

        let out = decoder.decode(&samples).expect("long enough");
        assert_eq!(
            Err(DateErr::OutOfRange(CalendarOutOfRange {
                day: 366,
                leap_year: false
            })),
            out.date()
        );
        assert_eq!(Confidence::LikelyOk, out.confidence());
    }

    #[test]
    fn test_display_failed_time() {
        let decoder = WwvbDecoderBuilder::default().build().expect("valid rate");
        let mut symbols = frame_symbols(LEAP_DAY);
        symbols[13] = Symbol::Marker;
        symbols[3] = Symbol::Marker;
        symbols[53] = Symbol::Marker;
        let samples = render(decoder.timing(), &symbols);

        let out = decoder.decode(&samples).expect("long enough");
        assert_eq!(None, out.hour());
        assert_eq!(None, out.minute());
        assert_eq!(None, out.year());
        assert_eq!("--:-- UT1 on 02/29/---- - 40 PROBABLY BAD", format!("{}", out));
    }

    #[test]
    fn test_display_wide_year() {
        // BCD weights can sum past 99
        let decoder = WwvbDecoderBuilder::default().build().expect("valid rate");
        let mut day = LEAP_DAY.to_vec();
        day[3] = (FieldKind::Year, 165);
        let samples = render(decoder.timing(), &frame_symbols(&day));

        let out = decoder.decode(&samples).expect("long enough");
        assert_eq!(Some(2165), out.year());
        assert_eq!("12:34 UT1 on 02/29/2165 - 00 LIKELY OK", format!("{}", out));
    }

    #[test]
    fn test_decode_no_signal() {
        // a carrier which never returns to full power looks like
        // nothing but markers
        let decoder = WwvbDecoderBuilder::default().build().expect("valid rate");
        let samples = vec![0u8; 4800];

        let out = decoder.decode(&samples).expect("long enough");
        assert_eq!(0, out.sync().offset);
        assert_eq!(7, out.frame().failed_fields());
        assert!(out.date().is_err());
        assert_eq!(Confidence::ProbablyBad, out.confidence());
    }

    #[test]
    fn test_decode_too_short() {
        let decoder = WwvbDecoderBuilder::new(10).build().expect("valid rate");
        assert_eq!(
            Err(DecodeErr::InputTooShort {
                len: 599,
                required: 600
            }),
            decoder.decode(&[1u8; 599])
        );
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn test_utc_datetime() {
        let decoder = WwvbDecoderBuilder::default().build().expect("valid rate");
        let samples = render(decoder.timing(), &frame_symbols(LEAP_DAY));

        let out = decoder.decode(&samples).expect("long enough");
        assert_eq!(
            Utc.with_ymd_and_hms(2024, 2, 29, 12, 34, 0).single(),
            out.utc_datetime()
        );

        let samples = vec![0u8; 2400];
        let out = decoder.decode(&samples).expect("long enough");
        assert_eq!(None, out.utc_datetime());
    }
}
