//! Symbol classification
//!
//! A one-second window of samples is compared against the
//! ideal waveform of each [`Symbol`]. The comparison counts
//! the samples which disagree with the ideal waveform: the
//! *error score*. Zero is a perfect match. The largest
//! possible score is one full second of samples.

use crate::waveform::{is_high, Symbol, Timing};

/// A classified one-second window
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SymbolDecision {
    /// Best-matching symbol
    pub symbol: Symbol,

    /// Error score of `symbol`
    pub score: u32,
}

/// Error scores of one window against every symbol
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SymbolScores {
    /// Errors with respect to a `Symbol::Zero`
    pub zero: u32,

    /// Errors with respect to a `Symbol::One`
    pub one: u32,

    /// Errors with respect to a `Symbol::Marker`
    pub marker: u32,
}

impl SymbolScores {
    /// Score the window of `samples` which begins at `start`
    ///
    /// Panics if `samples` does not contain one full second
    /// of samples at `start`.
    pub fn measure(samples: &[u8], start: usize, timing: &Timing) -> Self {
        Self {
            zero: template_errors(samples, start, timing, Symbol::Zero),
            one: template_errors(samples, start, timing, Symbol::One),
            marker: template_errors(samples, start, timing, Symbol::Marker),
        }
    }

    /// Choose the best-matching symbol
    ///
    /// A `One` must beat a `Zero` outright; ties go to `Zero`.
    /// The winner is then challenged by `Marker`, which must
    /// also win outright. On ambiguous windows this ordering
    /// decides the symbol, so it must not be replaced with a
    /// plain three-way minimum.
    pub fn decide(&self) -> SymbolDecision {
        let data = if self.one < self.zero {
            SymbolDecision {
                symbol: Symbol::One,
                score: self.one,
            }
        } else {
            SymbolDecision {
                symbol: Symbol::Zero,
                score: self.zero,
            }
        };

        if self.marker < data.score {
            SymbolDecision {
                symbol: Symbol::Marker,
                score: self.marker,
            }
        } else {
            data
        }
    }

    /// Error score for the given `symbol`
    pub fn get(&self, symbol: Symbol) -> u32 {
        match symbol {
            Symbol::Zero => self.zero,
            Symbol::One => self.one,
            Symbol::Marker => self.marker,
        }
    }
}

/// Classify the one-second window which begins at `start`
///
/// Panics if `samples` does not contain one full second of
/// samples at `start`.
pub fn classify(samples: &[u8], start: usize, timing: &Timing) -> SymbolDecision {
    SymbolScores::measure(samples, start, timing).decide()
}

/// Count errors with respect to one ideal symbol
///
/// Counts the samples in the one-second window at `start`
/// which differ from the ideal waveform of `template`: high
/// samples in its low segment plus low samples in its high
/// segment.
///
/// Panics if `samples` does not contain one full second of
/// samples at `start`.
pub fn template_errors(samples: &[u8], start: usize, timing: &Timing, template: Symbol) -> u32 {
    let window = &samples[start..start + timing.samples_per_second()];
    let (low, high) = window.split_at(timing.low_len(template));

    let errs_low = low.iter().filter(|s| is_high(**s)).count();
    let errs_high = high.iter().filter(|s| !is_high(**s)).count();
    (errs_low + errs_high) as u32
}
