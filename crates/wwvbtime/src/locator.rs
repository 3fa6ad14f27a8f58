//! Frame synchronization
//!
//! WWVB has no out-of-band framing. The start of the frame
//! must be found in the samples themselves. The
//! [`FrameLocator`] tries every sample as a possible start
//! of frame and scores it against the seconds which are the
//! same in every frame: the [`FRAME_CONSTANTS`]. The sample
//! with the lowest total error score wins.
//!
//! This search always finds *something*. Even noise has a
//! best-matching offset, although its score will be poor.

#[cfg(not(test))]
use log::debug;

#[cfg(test)]
use std::println as debug;

use crate::codes::FRAME_CONSTANTS;
use crate::frame::DecodeErr;
use crate::symbol::template_errors;
use crate::waveform::Timing;

/// Located start of frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameSync {
    /// Sample index of the first second of the frame
    pub offset: usize,

    /// Total error score over the constant seconds
    ///
    /// Lower is better. Zero is a perfect match.
    pub score: u32,
}

/// Start-of-frame search
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameLocator {
    // sample timing
    timing: Timing,

    // abandon an offset once it cannot win
    prune: bool,
}

impl FrameLocator {
    /// New frame locator
    ///
    /// If `prune` is set, the score of each candidate offset
    /// is abandoned as soon as it exceeds the best score found
    /// so far. This changes only the running time, never the
    /// result.
    pub fn new(timing: Timing, prune: bool) -> Self {
        Self { timing, prune }
    }

    /// Sample timing
    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// True if candidate offsets are pruned
    pub fn is_pruning(&self) -> bool {
        self.prune
    }

    /// Find the best start of frame in `samples`
    ///
    /// Every offset which leaves room for a full frame is
    /// tried, from the first sample onward. The offset with
    /// the lowest score is returned. When several offsets
    /// share the lowest score, the earliest one wins.
    ///
    /// If `samples` is shorter than one frame, an error is
    /// returned and no search is made.
    pub fn locate(&self, samples: &[u8]) -> Result<FrameSync, DecodeErr> {
        let required = self.timing.samples_per_frame();
        if samples.len() < required {
            return Err(DecodeErr::InputTooShort {
                len: samples.len(),
                required,
            });
        }

        // the first offset always fits
        let mut best = FrameSync {
            offset: 0,
            score: self.constant_errors(samples, 0, None),
        };
        for offset in 1..=(samples.len() - required) {
            let limit = if self.prune { Some(best.score) } else { None };

            let score = self.constant_errors(samples, offset, limit);
            if score < best.score {
                best = FrameSync { offset, score };
            }
        }

        debug!(
            "locate: frame at sample {} with score {} ({} candidates)",
            best.offset,
            best.score,
            samples.len() - required + 1
        );
        Ok(best)
    }

    // Score the constant seconds of a frame starting at `offset`
    //
    // If `limit` is given, stop as soon as the running sum
    // exceeds it. The partial sum returned is then still
    // greater than `limit`.
    fn constant_errors(&self, samples: &[u8], offset: usize, limit: Option<u32>) -> u32 {
        let mut sum = 0u32;
        for constant in FRAME_CONSTANTS.iter() {
            let start = offset + self.timing.second_offset(constant.second as usize);
            sum += template_errors(samples, start, &self.timing, constant.symbol);
            if let Some(limit) = limit {
                if sum > limit {
                    break;
                }
            }
        }
        sum
    }
}
