//! Decode confidence

use std::fmt;

use strum::EnumMessage;

use crate::waveform::Timing;

/// How far a decode can be trusted
///
/// Confidence is judged from the single worst second in the
/// decoded frame. A low-confidence decode is still a
/// complete decode; the label is advisory.
///
/// Confidence levels are ordered from best to worst:
///
/// ```
/// use wwvbtime::Confidence;
///
/// assert!(Confidence::LikelyOk < Confidence::NotReliable);
/// assert!(Confidence::NotReliable < Confidence::ProbablyBad);
/// assert_eq!("LIKELY OK", Confidence::LikelyOk.as_display_str());
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum_macros::EnumMessage,
    strum_macros::IntoStaticStr,
)]
pub enum Confidence {
    /// Every second closely matched its symbol
    #[strum(serialize = "ok", detailed_message = "LIKELY OK")]
    LikelyOk,

    /// Some second was a marginal match
    #[strum(serialize = "unreliable", detailed_message = "NOT RELIABLE")]
    NotReliable,

    /// Some second was a poor match, or a field failed
    #[strum(serialize = "bad", detailed_message = "PROBABLY BAD")]
    ProbablyBad,
}

impl Confidence {
    /// Human-readable label, like "`NOT RELIABLE`"
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }

    /// Short machine-readable label, like "`unreliable`"
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_display_str().fmt(f)
    }
}

/// Worst-second score thresholds
///
/// Scores are counted in samples, so sensible thresholds
/// depend on the sampling rate. The defaults are 7/40 and
/// 10/40 of one second's worth of samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConfidenceThresholds {
    unreliable: u32,
    bad: u32,
}

impl ConfidenceThresholds {
    /// Custom thresholds
    ///
    /// A worst-second score of at least `unreliable` is
    /// `NotReliable`; at least `bad` is `ProbablyBad`. `bad`
    /// is raised to `unreliable` if it is lower.
    pub fn new(unreliable: u32, bad: u32) -> Self {
        Self {
            unreliable,
            bad: u32::max(bad, unreliable),
        }
    }

    /// Default thresholds for the given timing
    pub fn for_timing(timing: &Timing) -> Self {
        let sps = timing.samples_per_second() as u64;
        Self::new((sps * 7 / 40) as u32, (sps * 10 / 40) as u32)
    }

    /// Classify a worst-second error score
    pub fn classify(&self, worst_score: u32) -> Confidence {
        if worst_score < self.unreliable {
            Confidence::LikelyOk
        } else if worst_score < self.bad {
            Confidence::NotReliable
        } else {
            Confidence::ProbablyBad
        }
    }

    /// Lowest `NotReliable` score
    pub fn unreliable(&self) -> u32 {
        self.unreliable
    }

    /// Lowest `ProbablyBad` score
    pub fn bad(&self) -> u32 {
        self.bad
    }
}

impl std::default::Default for ConfidenceThresholds {
    fn default() -> Self {
        Self::for_timing(&Timing::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let thresh = ConfidenceThresholds::default();
        assert_eq!(7, thresh.unreliable());
        assert_eq!(10, thresh.bad());

        assert_eq!(Confidence::LikelyOk, thresh.classify(0));
        assert_eq!(Confidence::LikelyOk, thresh.classify(6));
        assert_eq!(Confidence::NotReliable, thresh.classify(7));
        assert_eq!(Confidence::NotReliable, thresh.classify(9));
        assert_eq!(Confidence::ProbablyBad, thresh.classify(10));
        assert_eq!(Confidence::ProbablyBad, thresh.classify(40));
    }

    #[test]
    fn test_scaled_thresholds() {
        let timing = Timing::new(200).expect("valid rate");
        let thresh = ConfidenceThresholds::for_timing(&timing);
        assert_eq!(35, thresh.unreliable());
        assert_eq!(50, thresh.bad());

        // largest valid rate
        let timing = Timing::new(4_294_967_290).expect("valid rate");
        let thresh = ConfidenceThresholds::for_timing(&timing);
        assert_eq!(751_619_275, thresh.unreliable());
        assert_eq!(1_073_741_822, thresh.bad());
    }

    #[test]
    fn test_custom_thresholds() {
        let thresh = ConfidenceThresholds::new(5, 2);
        assert_eq!(5, thresh.bad());
        assert_eq!(Confidence::LikelyOk, thresh.classify(4));
        assert_eq!(Confidence::ProbablyBad, thresh.classify(5));
    }

    #[test]
    fn test_labels() {
        assert_eq!("PROBABLY BAD", format!("{}", Confidence::ProbablyBad));
        assert_eq!("unreliable", Confidence::NotReliable.as_str());
    }
}
