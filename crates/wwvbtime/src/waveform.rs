//! Waveform parameters and reference symbols for WWVB
//!
//! WWVB sends one symbol per second by reducing its carrier
//! power at the top of the second and restoring it some time
//! later. The receiver reports the carrier level as a single
//! bit: `0` while the power is reduced and `1` once it is
//! restored. The length of the reduced-power segment encodes
//! the symbol.

use thiserror::Error;

/// Seconds in one WWVB frame
pub const FRAME_SECONDS: usize = 60;

/// Default sampling rate (Hz)
///
/// One sample every 25 ms.
pub const DEFAULT_SAMPLE_RATE: u32 = 40;

/// One-second WWVB symbol
///
/// Each symbol is a low-then-high pair of segments which
/// together occupy exactly one second.
///
/// ```txt
/// Zero:   __________‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾
/// One:    ____________________________‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾
/// Marker: ________________________________________‾‾‾‾‾‾‾‾‾‾
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Data bit `0`: 200 ms low, 800 ms high
    Zero,

    /// Data bit `1`: 500 ms low, 500 ms high
    One,

    /// Position marker: 800 ms low, 200 ms high
    ///
    /// Markers occupy fixed seconds of every frame. They
    /// never carry data.
    Marker,
}

impl Symbol {
    /// Duration of the reduced-power segment, in milliseconds
    pub const fn low_millis(&self) -> u32 {
        match self {
            Self::Zero => 200,
            Self::One => 500,
            Self::Marker => 800,
        }
    }

    /// Data bit value
    ///
    /// Returns `None` for a `Marker`, which is not a data bit.
    pub const fn bit(&self) -> Option<u32> {
        match self {
            Self::Zero => Some(0),
            Self::One => Some(1),
            Self::Marker => None,
        }
    }
}

/// The sampling rate cannot represent WWVB symbols
///
/// The sampling rate must place a whole number of samples
/// in every 200 ms, 500 ms, and 800 ms segment.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[error("sample rate {0} Hz does not evenly divide the 200/500/800 ms symbol segments")]
pub struct InvalidSampleRate(pub u32);

/// Sample timing
///
/// Converts seconds and symbol segments into sample counts
/// for a validated sampling rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Timing {
    samples_per_second: usize,
}

impl Timing {
    /// Timing for the given `sample_rate`, in Hz
    ///
    /// Fails unless every symbol segment spans a whole
    /// number of samples. Any nonzero multiple of 10 Hz
    /// works.
    pub fn new(sample_rate: u32) -> Result<Self, InvalidSampleRate> {
        const SEGMENTS_MS: [u32; 3] = [200, 500, 800];

        if sample_rate == 0
            || SEGMENTS_MS
                .iter()
                .any(|ms| (sample_rate as u64 * *ms as u64) % 1000 != 0)
        {
            return Err(InvalidSampleRate(sample_rate));
        }

        Ok(Self {
            samples_per_second: sample_rate as usize,
        })
    }

    /// Sampling rate (Hz)
    pub fn sample_rate(&self) -> u32 {
        self.samples_per_second as u32
    }

    /// Samples in one second, which is one symbol
    ///
    /// This is also the largest error score any one
    /// symbol can have.
    pub fn samples_per_second(&self) -> usize {
        self.samples_per_second
    }

    /// Samples in one complete 60-second frame
    pub fn samples_per_frame(&self) -> usize {
        self.samples_per_second * FRAME_SECONDS
    }

    /// Sample offset of the given `second` into a frame
    pub fn second_offset(&self, second: usize) -> usize {
        second * self.samples_per_second
    }

    /// Length of the low segment of `symbol`, in samples
    pub fn low_len(&self, symbol: Symbol) -> usize {
        self.samples_per_second * symbol.low_millis() as usize / 1000
    }

    /// Length of the high segment of `symbol`, in samples
    pub fn high_len(&self, symbol: Symbol) -> usize {
        self.samples_per_second - self.low_len(symbol)
    }
}

impl std::default::Default for Timing {
    fn default() -> Self {
        Self {
            samples_per_second: DEFAULT_SAMPLE_RATE as usize,
        }
    }
}

/// Is the sample a high (full carrier power) sample?
///
/// Samples are `0` or `1`. Any nonzero value is high.
#[inline]
pub fn is_high(sample: u8) -> bool {
    sample != 0
}

/// Append the ideal waveform for `symbol` to `out`
///
/// Exactly one second of samples is appended.
pub fn render_symbol(timing: &Timing, symbol: Symbol, out: &mut Vec<u8>) {
    out.extend(std::iter::repeat(0u8).take(timing.low_len(symbol)));
    out.extend(std::iter::repeat(1u8).take(timing.high_len(symbol)));
}

/// Render ideal waveforms for a sequence of symbols
///
/// Produces one second of samples per symbol, in order.
/// Useful for building reference captures and for testing
/// receivers.
pub fn render<'s, I>(timing: &Timing, symbols: I) -> Vec<u8>
where
    I: IntoIterator<Item = &'s Symbol>,
{
    let mut out = Vec::new();
    for symbol in symbols {
        render_symbol(timing, *symbol, &mut out);
    }
    out
}
