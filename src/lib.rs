mod consts;
mod guess;
mod id_number;
mod prelude;
mod range;
mod types;

pub use consts::*;
pub use guess::{CandidateSet, GuessError, GuessReport, Guesser, guess_birthday};
pub use id_number::{
    IdError, IdNumber, IdNumberError, checksum_char, verify_date, verify_id_number,
    verify_verification_bit,
};
pub use range::{BirthDateRange, Days, EndBound, RangeError, get_start_end_date, get_start_end_date_at};
pub use types::{Month, Year};

use crate::prelude::*;
use chrono::{Datelike, NaiveDate};
use std::str::FromStr;

/// A concrete calendar date, as embedded in a citizen ID number.
///
/// Wraps a [`NaiveDate`] whose year is kept within `1..=MAX_YEAR`, and displays
/// as the compact `YYYYMMDD` form used inside the number itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}{:02}{:02}", "_0.year()", "_0.month()", "_0.day()")]
pub struct BirthDate(NaiveDate);

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0:?} (expected YYYYMMDD)")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year:04}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
}

impl std::error::Error for ParseError {}

impl BirthDate {
    /// Builds a date from raw components, validating each against the calendar.
    ///
    /// # Errors
    /// Returns the `ParseError` of the first component that is out of range.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        NaiveDate::from_ymd_opt(i32::from(year.get()), u32::from(month.get()), u32::from(day))
            .map(Self)
            .ok_or(ParseError::InvalidDay {
                year: year.get(),
                month: month.get(),
                day,
            })
    }

    /// Today's date on the local clock.
    ///
    /// # Errors
    /// Only fails if the system clock reports a year outside `1..=9999`.
    pub fn today() -> Result<Self, ParseError> {
        Self::try_from(chrono::Local::now().date_naive())
    }

    // Construction keeps the year in `1..=MAX_YEAR`, so the narrowing casts are lossless.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn year(&self) -> u16 {
        self.0.year() as u16
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn month(&self) -> u8 {
        self.0.month() as u8
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn day(&self) -> u8 {
        self.0.day() as u8
    }

    /// The following calendar day, or `None` past `MAX_YEAR`-12-31.
    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().and_then(|next| Self::try_from(next).ok())
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(&self, other: &Self) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }

    fn parse_u16(s: &str) -> Result<u16, ParseError> {
        s.parse::<u16>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    fn parse_u8(s: &str) -> Result<u8, ParseError> {
        s.parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

impl FromStr for BirthDate {
    type Err = ParseError;

    /// Parses the strict compact form: exactly eight ASCII digits, `YYYYMMDD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != COMPACT_DATE_LEN || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        }
        let year = Self::parse_u16(&s[..YEAR_DIGITS])?;
        let month = Self::parse_u8(&s[YEAR_DIGITS..YEAR_MONTH_DIGITS])?;
        let day = Self::parse_u8(&s[YEAR_MONTH_DIGITS..])?;
        Self::from_ymd(year, month, day)
    }
}

impl TryFrom<NaiveDate> for BirthDate {
    type Error = ParseError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        let year = u16::try_from(date.year()).map_err(|_| ParseError::InvalidFormat(date.to_string()))?;
        Year::new(year)?;
        Ok(Self(date))
    }
}

impl From<BirthDate> for NaiveDate {
    fn from(date: BirthDate) -> Self {
        date.0
    }
}

impl serde::Serialize for BirthDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_parse_compact() {
        let d = "19900307".parse::<BirthDate>().unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (1990, 3, 7));
        assert_eq!(d.to_string(), "19900307");
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        for input in ["", "1990037", "199003071", "1990-3-7", "1990030a", " 9900307", "１９９００３０７"] {
            assert!(
                matches!(input.parse::<BirthDate>(), Err(ParseError::InvalidFormat(_))),
                "{input:?} should be rejected as a format error"
            );
        }
    }

    #[test]
    fn test_parse_rejects_impossible_dates() {
        assert!(matches!("00000101".parse::<BirthDate>(), Err(ParseError::InvalidYear(0))));
        assert!(matches!("19901301".parse::<BirthDate>(), Err(ParseError::InvalidMonth(13))));
        assert!(matches!("19900001".parse::<BirthDate>(), Err(ParseError::InvalidMonth(0))));
        assert!(matches!("19900931".parse::<BirthDate>(), Err(ParseError::InvalidDay { .. })));
        assert!(matches!("19000229".parse::<BirthDate>(), Err(ParseError::InvalidDay { .. })));
        assert!("20000229".parse::<BirthDate>().is_ok());
    }

    #[test]
    fn test_display_pads_small_years() {
        assert_eq!(date(987, 1, 5).to_string(), "09870105");
    }

    #[test]
    fn test_succ_rolls_over() {
        assert_eq!(date(1990, 3, 7).succ(), Some(date(1990, 3, 8)));
        assert_eq!(date(1990, 4, 30).succ(), Some(date(1990, 5, 1)));
        assert_eq!(date(2000, 2, 28).succ(), Some(date(2000, 2, 29)));
        assert_eq!(date(1900, 2, 28).succ(), Some(date(1900, 3, 1)));
        assert_eq!(date(1999, 12, 31).succ(), Some(date(2000, 1, 1)));
        assert_eq!(date(9999, 12, 31).succ(), None);
    }

    #[test]
    fn test_days_until() {
        assert_eq!(date(1990, 3, 7).days_until(&date(1990, 3, 7)), 0);
        assert_eq!(date(1990, 3, 1).days_until(&date(1990, 3, 9)), 8);
        assert_eq!(date(2000, 1, 1).days_until(&date(2001, 1, 1)), 366);
        assert_eq!(date(1900, 1, 1).days_until(&date(1901, 1, 1)), 365);
        assert_eq!(date(1990, 3, 9).days_until(&date(1990, 3, 1)), -8);
    }

    #[test]
    fn test_days_until_matches_succ_walk() {
        let start = date(1999, 11, 15);
        let mut current = start;
        for expected in 0..500 {
            assert_eq!(start.days_until(&current), expected);
            current = current.succ().unwrap();
        }
    }

    #[test]
    fn test_ordering_is_chronological() {
        assert!(date(1990, 12, 31) < date(1991, 1, 1));
        assert!(date(1991, 1, 31) < date(1991, 2, 1));
        assert!(date(1991, 2, 1) < date(1991, 2, 2));
    }

    #[test]
    fn test_from_naive_date() {
        let naive = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(BirthDate::try_from(naive).unwrap(), date(2024, 2, 29));
        assert_eq!(NaiveDate::from(date(2024, 2, 29)), naive);

        let too_late = NaiveDate::from_ymd_opt(10_000, 1, 1).unwrap();
        assert!(matches!(BirthDate::try_from(too_late), Err(ParseError::InvalidYear(10_000))));
        let before_common_era = NaiveDate::from_ymd_opt(-1, 1, 1).unwrap();
        assert!(matches!(BirthDate::try_from(before_common_era), Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_leap_days() {
        struct TestCase {
            year: u16,
            is_leap: bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year: 2024,
                is_leap: true,
                description: "divisible by 4",
            },
            TestCase {
                year: 2023,
                is_leap: false,
                description: "not divisible by 4",
            },
            TestCase {
                year: 1900,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 2000,
                is_leap: true,
                description: "divisible by 400",
            },
        ];

        for case in &cases {
            assert_eq!(
                BirthDate::from_ymd(case.year, 2, 29).is_ok(),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description
            );
        }
    }

    #[test]
    fn test_serializes_as_compact_string() {
        let json = serde_json::to_string(&date(1990, 3, 7)).unwrap();
        assert_eq!(json, r#""19900307""#);
        assert_eq!(serde_json::to_string(&date(987, 1, 5)).unwrap(), r#""09870105""#);
    }
}
