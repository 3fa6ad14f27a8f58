//! WWVB frame layout
//!
//! A frame is sixty one-second symbols. Some seconds always
//! carry the same symbol: position markers and unused bits,
//! which are always zero. These are listed in
//! [`FRAME_CONSTANTS`] and are used to find the start of a
//! frame. The remaining seconds carry weighted data bits
//! which are grouped into the fields of [`FieldKind`].
//!
//! More information on the WWVB time code may be found in
//! NIST Special Publication 432, "NIST Time and Frequency
//! Services."

use std::fmt;

use strum::{EnumMessage, IntoEnumIterator};

use crate::waveform::{Symbol, FRAME_SECONDS};

/// One weighted bit of a field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CodeEntry {
    /// Seconds into the frame
    pub second: u8,

    /// Value added to the field when this bit is one
    pub weight: u16,
}

/// A second with a fixed symbol in every frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConstantSecond {
    /// Seconds into the frame
    pub second: u8,

    /// Symbol always sent in this second
    pub symbol: Symbol,
}

/// A decoded quantity in the WWVB frame
///
/// Fields are listed in reporting order. Each field's
/// short name is available `.as_ref()` or via `Display`,
/// and a description is available via
/// [`description()`](#method.description).
///
/// ```
/// use wwvbtime::FieldKind;
///
/// assert_eq!("day", FieldKind::DayOfYear.as_ref());
/// assert_eq!("Leap year indicator", FieldKind::LeapYear.description());
/// assert_eq!(Ok(FieldKind::Minutes), "minutes".parse());
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
    strum_macros::EnumCount,
    strum_macros::EnumIter,
    strum_macros::EnumMessage,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
)]
pub enum FieldKind {
    /// Hour of the day, UTC (0–23)
    #[strum(serialize = "hours", detailed_message = "Hour of day (UTC)")]
    Hours,

    /// Minute of the hour (0–59)
    #[strum(serialize = "minutes", detailed_message = "Minute of hour")]
    Minutes,

    /// Day of the year, starting from 1 on January 1
    #[strum(serialize = "day", detailed_message = "Day of year")]
    DayOfYear,

    /// Last two digits of the year
    #[strum(serialize = "year", detailed_message = "Year of century")]
    Year,

    /// Set during leap years
    #[strum(serialize = "lyi", detailed_message = "Leap year indicator")]
    LeapYear,

    /// Set when a leap second will be inserted at the end of the month
    #[strum(serialize = "lsw", detailed_message = "Leap second warning")]
    LeapSecond,

    /// Daylight saving time status
    ///
    /// * `0`: standard time in effect
    /// * `1`: DST ends today
    /// * `2`: DST begins today
    /// * `3`: DST in effect
    #[strum(serialize = "dst", detailed_message = "Daylight saving time status")]
    Dst,
}

impl FieldKind {
    /// Weighted bits which make up this field
    ///
    /// Entries are listed from the most significant weight to
    /// the least significant.
    pub fn code(&self) -> &'static [CodeEntry] {
        match self {
            Self::Hours => HOURS_CODE,
            Self::Minutes => MINUTES_CODE,
            Self::DayOfYear => DAY_CODE,
            Self::Year => YEAR_CODE,
            Self::LeapYear => LYI_CODE,
            Self::LeapSecond => LSW_CODE,
            Self::Dst => DST_CODE,
        }
    }

    /// Short field name, like "`day`"
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Human-readable description, like "`Day of year`"
    pub fn description(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }

    /// Encode `value` into this field's seconds
    ///
    /// Bits are assigned greedily from the most significant
    /// weight down, which yields the BCD encoding WWVB uses.
    /// Any remainder that the field cannot represent is
    /// dropped.
    pub fn encode(&self, value: u32) -> impl Iterator<Item = (u8, Symbol)> {
        let mut remaining = value;
        self.code().iter().map(move |entry| {
            let weight = entry.weight as u32;
            if remaining >= weight {
                remaining -= weight;
                (entry.second, Symbol::One)
            } else {
                (entry.second, Symbol::Zero)
            }
        })
    }
}

impl AsRef<str> for FieldKind {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_str().fmt(f)
    }
}

/// Seconds with a fixed symbol in every frame
///
/// Seven position markers and eleven unused bits, which are
/// always sent as zero.
pub const FRAME_CONSTANTS: [ConstantSecond; 18] = [
    marker(0),
    zero(4),
    marker(9),
    zero(10),
    zero(11),
    zero(14),
    marker(19),
    zero(20),
    zero(21),
    zero(24),
    marker(29),
    zero(34),
    zero(35),
    marker(39),
    zero(44),
    marker(49),
    zero(54),
    marker(59),
];

/// Symbols for one whole frame with the given field values
///
/// Fields which are not listed in `values` are sent as zero.
/// Seconds which belong to no field carry their constant
/// symbol, or a zero.
///
/// ```
/// use wwvbtime::{frame_symbols, FieldKind, Symbol};
///
/// let symbols = frame_symbols(&[(FieldKind::Minutes, 40)]);
/// assert_eq!(Symbol::Marker, symbols[0]);
/// assert_eq!(Symbol::One, symbols[1]);
/// assert_eq!(Symbol::Zero, symbols[2]);
/// ```
pub fn frame_symbols(values: &[(FieldKind, u32)]) -> [Symbol; FRAME_SECONDS] {
    let mut out = [Symbol::Zero; FRAME_SECONDS];
    for constant in FRAME_CONSTANTS.iter() {
        out[constant.second as usize] = constant.symbol;
    }

    for kind in FieldKind::iter() {
        let value = values
            .iter()
            .find(|(k, _v)| *k == kind)
            .map(|(_k, v)| *v)
            .unwrap_or(0);
        for (second, symbol) in kind.encode(value) {
            out[second as usize] = symbol;
        }
    }

    out
}

const fn entry(second: u8, weight: u16) -> CodeEntry {
    CodeEntry { second, weight }
}

const fn marker(second: u8) -> ConstantSecond {
    ConstantSecond {
        second,
        symbol: Symbol::Marker,
    }
}

const fn zero(second: u8) -> ConstantSecond {
    ConstantSecond {
        second,
        symbol: Symbol::Zero,
    }
}

const MINUTES_CODE: &[CodeEntry] = &[
    entry(1, 40),
    entry(2, 20),
    entry(3, 10),
    entry(5, 8),
    entry(6, 4),
    entry(7, 2),
    entry(8, 1),
];

const HOURS_CODE: &[CodeEntry] = &[
    entry(12, 20),
    entry(13, 10),
    entry(15, 8),
    entry(16, 4),
    entry(17, 2),
    entry(18, 1),
];

const DAY_CODE: &[CodeEntry] = &[
    entry(22, 200),
    entry(23, 100),
    entry(25, 80),
    entry(26, 40),
    entry(27, 20),
    entry(28, 10),
    entry(30, 8),
    entry(31, 4),
    entry(32, 2),
    entry(33, 1),
];

const YEAR_CODE: &[CodeEntry] = &[
    entry(45, 80),
    entry(46, 40),
    entry(47, 20),
    entry(48, 10),
    entry(50, 8),
    entry(51, 4),
    entry(52, 2),
    entry(53, 1),
];

const LYI_CODE: &[CodeEntry] = &[entry(55, 1)];

const LSW_CODE: &[CodeEntry] = &[entry(56, 1)];

const DST_CODE: &[CodeEntry] = &[entry(57, 2), entry(58, 1)];
