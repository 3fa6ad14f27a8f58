//! Frame decoding

use arrayvec::ArrayVec;
use strum::{EnumCount, IntoEnumIterator};
use thiserror::Error;

#[cfg(not(test))]
use log::{debug, warn};

#[cfg(test)]
use std::println as debug;
#[cfg(test)]
use std::println as warn;

use crate::codes::FieldKind;
use crate::field::{decode_field, FieldResult};
use crate::waveform::Timing;

/// Error decoding a sample buffer
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DecodeErr {
    /// Not enough samples for one complete frame
    ///
    /// `len` samples were available from the requested start,
    /// but a frame requires `required` samples.
    #[error("sample buffer too short: {len} samples available, {required} required for one frame")]
    InputTooShort { len: usize, required: usize },
}

/// A decoded WWVB frame
///
/// Holds one [`FieldResult`] for every [`FieldKind`]. Each
/// field is decoded independently of the others.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Frame {
    offset: usize,
    fields: [FieldResult; FieldKind::COUNT],
}

impl Frame {
    /// Sample index of the first second of the frame
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Result for the given field
    pub fn field(&self, kind: FieldKind) -> &FieldResult {
        &self.fields[kind as usize]
    }

    /// Decoded value of the given field, if it decoded
    pub fn value(&self, kind: FieldKind) -> Option<u32> {
        self.field(kind).valid_value()
    }

    /// Iterate over all field results, in reporting order
    pub fn fields(&self) -> impl Iterator<Item = &FieldResult> {
        self.fields.iter()
    }

    /// Total error score
    ///
    /// Sum of the scores of every field which decoded. Failed
    /// fields are counted by
    /// [`failed_fields()`](#method.failed_fields) instead.
    pub fn total_score(&self) -> u32 {
        self.fields.iter().filter_map(|f| f.score().value()).sum()
    }

    /// Number of fields which failed to decode
    pub fn failed_fields(&self) -> usize {
        self.fields.iter().filter(|f| !f.is_valid()).count()
    }

    /// True if every field decoded
    pub fn is_complete(&self) -> bool {
        self.failed_fields() == 0
    }

    /// Worst single-second error score across all fields
    pub fn worst_score(&self) -> u32 {
        self.fields
            .iter()
            .map(|f| f.worst_score())
            .max()
            .unwrap_or(0)
    }

    /// Total number of data seconds across all fields
    pub fn code_len(&self) -> usize {
        self.fields.iter().map(|f| f.code_len()).sum()
    }

    /// Mean error score per data second, over all fields
    /// which decoded
    pub fn mean_score(&self) -> f32 {
        let decoded_len: usize = self
            .fields
            .iter()
            .filter(|f| f.is_valid())
            .map(|f| f.code_len())
            .sum();
        if decoded_len == 0 {
            0.0
        } else {
            self.total_score() as f32 / decoded_len as f32
        }
    }
}

/// Decode the frame which starts at sample `offset`
///
/// Every field is decoded. Fields which fail are reported
/// as failed; they do not cause this function to fail. An
/// error is returned only if `samples` does not contain a
/// complete frame starting at `offset`.
pub fn decode_frame(samples: &[u8], offset: usize, timing: &Timing) -> Result<Frame, DecodeErr> {
    let required = timing.samples_per_frame();
    let len = samples.len().saturating_sub(offset);
    if len < required {
        return Err(DecodeErr::InputTooShort { len, required });
    }

    let fields = FieldKind::iter()
        .map(|kind| decode_field(samples, offset, timing, kind))
        .collect::<ArrayVec<FieldResult, { FieldKind::COUNT }>>()
        .into_inner()
        .expect(PANIC_EXPECT_FIELDS);

    let frame = Frame { offset, fields };
    for field in frame.fields() {
        if field.is_valid() {
            debug!(
                "frame: field {}: value {}, score {}, worst {}",
                field.name(),
                field.value(),
                field.score(),
                field.worst_score()
            );
        } else {
            warn!(
                "frame: field {}: decode failure: marker in data second",
                field.name()
            );
        }
    }

    Ok(frame)
}

const PANIC_EXPECT_FIELDS: &str = "expected one result per field";
