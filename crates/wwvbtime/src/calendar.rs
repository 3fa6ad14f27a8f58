//! Day-of-year to calendar date conversion

use std::fmt;

use thiserror::Error;

use crate::codes::FieldKind;

/// Cumulative days at the end of each month, common year
const MONTH_END_DAYS: [u16; 12] = [31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365];

/// Month and day of month
///
/// Both are numbered from one: January 1 is
/// `MonthDay { month: 1, day: 1 }`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    /// Month of year (1–12)
    pub month: u8,

    /// Day of month (1–31)
    pub day: u8,
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.day)
    }
}

/// A day-of-year which does not exist
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[error("day of year {day} does not exist in a {}", year_kind(.leap_year))]
pub struct CalendarOutOfRange {
    /// The requested day of year
    pub day: u32,

    /// True if a leap year was requested
    pub leap_year: bool,
}

/// No calendar date for a decoded frame
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DateErr {
    /// A field which the date depends on failed to decode
    #[error("{0} field failed to decode")]
    FieldFailed(FieldKind),

    /// The decoded day of year does not exist
    #[error(transparent)]
    OutOfRange(#[from] CalendarOutOfRange),
}

fn year_kind(leap_year: &bool) -> &'static str {
    if *leap_year {
        "leap year"
    } else {
        "common year"
    }
}

/// Number of days in a year
pub fn days_in_year(leap_year: bool) -> u32 {
    MONTH_END_DAYS[11] as u32 + leap_year as u32
}

/// Convert a day of year to a month and day
///
/// `day_of_year` counts from 1 on January 1. In a leap year,
/// day 60 is February 29 and every later day shifts by one.
///
/// ```
/// use wwvbtime::{month_day, MonthDay};
///
/// assert_eq!(Ok(MonthDay { month: 2, day: 29 }), month_day(60, true));
/// assert_eq!(Ok(MonthDay { month: 3, day: 1 }), month_day(60, false));
/// assert!(month_day(366, false).is_err());
/// ```
pub fn month_day(day_of_year: u32, leap_year: bool) -> Result<MonthDay, CalendarOutOfRange> {
    if day_of_year < 1 || day_of_year > days_in_year(leap_year) {
        return Err(CalendarOutOfRange {
            day: day_of_year,
            leap_year,
        });
    }

    let month = (1..=12u8)
        .find(|month| month_end(*month, leap_year) >= day_of_year)
        .expect(PANIC_EXPECT_MONTH);
    Ok(MonthDay {
        month,
        day: (day_of_year - month_end(month - 1, leap_year)) as u8,
    })
}

// Cumulative days at the end of `month`, or zero before January
//
// In a leap year, February and every later month end one day later.
fn month_end(month: u8, leap_year: bool) -> u32 {
    match month {
        0 => 0,
        _ => MONTH_END_DAYS[month as usize - 1] as u32 + (leap_year && month >= 2) as u32,
    }
}

const PANIC_EXPECT_MONTH: &str = "day of year in range must fall in some month";

#[cfg(test)]
mod tests {
    use super::*;

    fn md(month: u8, day: u8) -> Result<MonthDay, CalendarOutOfRange> {
        Ok(MonthDay { month, day })
    }

    #[test]
    fn test_year_ends() {
        assert_eq!(md(1, 1), month_day(1, false));
        assert_eq!(md(1, 1), month_day(1, true));
        assert_eq!(md(12, 31), month_day(365, false));
        assert_eq!(md(12, 30), month_day(365, true));
        assert_eq!(md(12, 31), month_day(366, true));
    }

    #[test]
    fn test_leap_boundary() {
        // January is never shifted
        assert_eq!(md(1, 31), month_day(31, true));
        assert_eq!(md(2, 1), month_day(32, true));

        // February gains its 29th day
        assert_eq!(md(2, 28), month_day(59, true));
        assert_eq!(md(2, 29), month_day(60, true));
        assert_eq!(md(3, 1), month_day(61, true));

        // common year has no February 29
        assert_eq!(md(2, 28), month_day(59, false));
        assert_eq!(md(3, 1), month_day(60, false));

        // later months shift by one
        assert_eq!(md(3, 31), month_day(91, true));
        assert_eq!(md(3, 31), month_day(90, false));
        assert_eq!(md(7, 4), month_day(185, false));
        assert_eq!(md(7, 4), month_day(186, true));
        assert_eq!(md(12, 1), month_day(336, true));
    }

    #[test]
    fn test_every_day_is_consistent() {
        for leap_year in [false, true] {
            let mut last = MonthDay { month: 0, day: 0 };
            for day in 1..=days_in_year(leap_year) {
                let this = month_day(day, leap_year).expect("in range");
                assert!(this > last);
                if this.month == last.month {
                    assert_eq!(last.day + 1, this.day);
                } else {
                    assert_eq!(1, this.day);
                }
                last = this;
            }
        }
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            Err(CalendarOutOfRange {
                day: 0,
                leap_year: false
            }),
            month_day(0, false)
        );
        assert_eq!(
            Err(CalendarOutOfRange {
                day: 366,
                leap_year: false
            }),
            month_day(366, false)
        );
        assert_eq!(
            Err(CalendarOutOfRange {
                day: 367,
                leap_year: true
            }),
            month_day(367, true)
        );
        assert!(month_day(799, true).is_err());
    }

    #[test]
    fn test_month_end() {
        assert_eq!(0, month_end(0, true));
        assert_eq!(31, month_end(1, true));
        assert_eq!(59, month_end(2, false));
        assert_eq!(60, month_end(2, true));
        assert_eq!(366, month_end(12, true));
    }

    #[test]
    fn test_display() {
        assert_eq!("02/29", format!("{}", MonthDay { month: 2, day: 29 }));
        assert_eq!(
            "day of year 366 does not exist in a common year",
            format!(
                "{}",
                CalendarOutOfRange {
                    day: 366,
                    leap_year: false
                }
            )
        );
        assert_eq!(
            "lyi field failed to decode",
            format!("{}", DateErr::FieldFailed(FieldKind::LeapYear))
        );
        assert_eq!(
            "day of year 0 does not exist in a leap year",
            format!(
                "{}",
                DateErr::from(CalendarOutOfRange {
                    day: 0,
                    leap_year: true
                })
            )
        );
    }
}
