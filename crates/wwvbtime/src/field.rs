//! Field decoding

use std::fmt;

use crate::codes::FieldKind;
use crate::symbol::classify;
use crate::waveform::{Symbol, Timing};

/// Aggregate error score of a decoded field
///
/// A `Valid` score is the total number of sample errors
/// across all of the field's seconds. A `Failed` field
/// contained a second which looked like a marker; it
/// orders after every `Valid` score, no matter how large.
///
/// ```
/// use wwvbtime::FieldScore;
///
/// assert!(FieldScore::Valid(0) < FieldScore::Valid(1));
/// assert!(FieldScore::Valid(u32::MAX) < FieldScore::Failed);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldScore {
    /// Sum of per-second error scores
    Valid(u32),

    /// Decode failure: a data second decoded as a marker
    Failed,
}

impl FieldScore {
    /// Numeric score, if the field decoded
    pub fn value(&self) -> Option<u32> {
        match self {
            Self::Valid(score) => Some(*score),
            Self::Failed => None,
        }
    }

    /// True if the field failed to decode
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl fmt::Display for FieldScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(score) => score.fmt(f),
            Self::Failed => "FAIL".fmt(f),
        }
    }
}

/// One decoded field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldResult {
    kind: FieldKind,
    value: u32,
    score: FieldScore,
    worst_score: u32,
}

impl FieldResult {
    /// Which field this is
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Short field name
    pub fn name(&self) -> &'static str {
        self.kind.as_str()
    }

    /// Decoded value
    ///
    /// A failed field always reads as zero. Check
    /// [`is_valid()`](#method.is_valid) or use
    /// [`valid_value()`](#method.valid_value) to tell the
    /// difference.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Decoded value, if the field decoded
    pub fn valid_value(&self) -> Option<u32> {
        if self.is_valid() {
            Some(self.value)
        } else {
            None
        }
    }

    /// Aggregate error score
    pub fn score(&self) -> FieldScore {
        self.score
    }

    /// Error score of the single worst second in the field
    ///
    /// For a failed field, this is one full second of
    /// samples: the largest possible score.
    pub fn worst_score(&self) -> u32 {
        self.worst_score
    }

    /// True unless a second in the field decoded as a marker
    pub fn is_valid(&self) -> bool {
        !self.score.is_failed()
    }

    /// Number of seconds in the field
    pub fn code_len(&self) -> usize {
        self.kind.code().len()
    }

    /// Mean error score per second
    ///
    /// Returns `None` for a failed field.
    pub fn mean_score(&self) -> Option<f32> {
        self.score
            .value()
            .map(|score| score as f32 / self.code_len() as f32)
    }
}

/// Decode one field of the frame which starts at `frame_offset`
///
/// Each of the field's seconds is classified. If every second
/// is a data bit, the field value is the sum of the weights of
/// all the one bits. If *any* second is a marker, the field
/// fails as a whole: its value is zero, its score is
/// [`FieldScore::Failed`], and its worst score is one full
/// second of samples.
///
/// Panics if `samples` does not contain a complete frame at
/// `frame_offset`.
pub fn decode_field(
    samples: &[u8],
    frame_offset: usize,
    timing: &Timing,
    kind: FieldKind,
) -> FieldResult {
    let mut value = 0u32;
    let mut score = 0u32;
    let mut worst_score = 0u32;

    for entry in kind.code() {
        let start = frame_offset + timing.second_offset(entry.second as usize);
        let decision = classify(samples, start, timing);
        match decision.symbol.bit() {
            Some(bit) => {
                value += entry.weight as u32 * bit;
                score += decision.score;
                worst_score = u32::max(worst_score, decision.score);
            }
            None => {
                debug_assert_eq!(Symbol::Marker, decision.symbol);
                return FieldResult {
                    kind,
                    value: 0,
                    score: FieldScore::Failed,
                    worst_score: timing.samples_per_second() as u32,
                };
            }
        }
    }

    FieldResult {
        kind,
        value,
        score: FieldScore::Valid(score),
        worst_score,
    }
}
