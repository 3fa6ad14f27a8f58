use crate::confidence::ConfidenceThresholds;
use crate::decoder::WwvbDecoder;
use crate::waveform::{InvalidSampleRate, Timing, DEFAULT_SAMPLE_RATE};

/// Builds a WWVB decoder
///
/// The builder comes with a sensible set of default options.
/// All you really need to provide is the sampling rate of
/// your receiver's carrier-level output. The
/// [`WwvbDecoder`](struct.WwvbDecoder.html) was designed
/// around a sampling rate of 40 Hz (one sample every 25 ms).
///
/// The API specified by the builder is part of this crate's
/// API. The actual default values are *not*, however, and
/// are subject to revision in any minor release. If you
/// care very strongly about a setting, be sure to configure
/// it here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WwvbDecoderBuilder {
    sample_rate: u32,
    prune: bool,
    confidence: Option<ConfidenceThresholds>,
}

impl WwvbDecoderBuilder {
    /// New decoder with "sensible" defaults
    ///
    /// The only mandatory parameter is the `sample_rate`, in
    /// Hz. The sampling rate must divide each WWVB symbol
    /// segment (200, 500, and 800 ms) into a whole number of
    /// samples. Any multiple of 10 Hz will do.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            prune: true,
            confidence: None,
        }
    }

    /// Build a decoder
    ///
    /// Fails if the sampling rate cannot represent the WWVB
    /// symbols exactly.
    pub fn build(&self) -> Result<WwvbDecoder, InvalidSampleRate> {
        let timing = Timing::new(self.sample_rate)?;
        let thresholds = self
            .confidence
            .unwrap_or_else(|| ConfidenceThresholds::for_timing(&timing));
        Ok(WwvbDecoder::new(timing, self.prune, thresholds))
    }

    /// Sampling rate (Hz)
    pub fn with_sample_rate(&mut self, sample_rate: u32) -> &mut Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Frame search pruning
    ///
    /// When enabled, the frame search abandons each candidate
    /// start of frame as soon as it scores worse than the best
    /// candidate so far. Pruning makes the search faster and
    /// never changes its result. It is enabled by default.
    pub fn with_pruning(&mut self, prune: bool) -> &mut Self {
        self.prune = prune;
        self
    }

    /// Confidence thresholds (samples)
    ///
    /// A decode whose worst second has at least `unreliable`
    /// sample errors is reported as `NotReliable`. At least
    /// `bad` errors is reported as `ProbablyBad`. `bad` is
    /// raised to `unreliable` if it is lower.
    ///
    /// By default, the thresholds scale with the sampling
    /// rate and are 7 and 10 samples at 40 Hz.
    pub fn with_confidence_thresholds(&mut self, unreliable: u32, bad: u32) -> &mut Self {
        self.confidence = Some(ConfidenceThresholds::new(unreliable, bad));
        self
    }

    /// Use the default confidence thresholds for the sampling rate
    pub fn with_default_confidence_thresholds(&mut self) -> &mut Self {
        self.confidence = None;
        self
    }

    /// Sampling rate (Hz)
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Frame search pruning
    pub fn pruning(&self) -> bool {
        self.prune
    }

    /// Custom confidence thresholds, if any
    pub fn confidence_thresholds(&self) -> Option<ConfidenceThresholds> {
        self.confidence
    }
}

impl std::default::Default for WwvbDecoderBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}
