use std::iter::FusedIterator;

use serde::Serialize;

use crate::{
    BirthDate, DATE_PREFIX_MAX_LEN, DECEMBER, JANUARY, MAX_DAY, MAX_MONTH, MIN_DAY, ParseError,
    SEARCH_FLOOR_YEAR, YEAR_DIGITS, YEAR_MONTH_DIGITS, prelude::*,
};

/// A closed interval of birth dates. The start is never after the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct BirthDateRange {
    start: BirthDate,
    end: BirthDate,
}

/// Whether the last date of a range takes part in an enumeration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EndBound {
    /// Stop one day before the end date (`start + n` for `n in 0..days()`).
    #[default]
    Exclusive,
    /// Visit the end date as well.
    Inclusive,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: BirthDate, end: BirthDate },

    #[error("birthday prefix {prefix:?} has {len} characters, at most {max} allowed", max = DATE_PREFIX_MAX_LEN)]
    PrefixTooLong { prefix: String, len: usize },

    #[error("birthday prefix {0:?} must contain only digits")]
    NonDigit(String),

    /// A boundary computed from the prefix is not a calendar date.
    #[error("no valid range for this prefix: {bound} date {date} is not a calendar date ({source})")]
    InvalidBoundary {
        bound: &'static str,
        date: String,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    ParseError(#[from] ParseError),
}

impl BirthDateRange {
    /// Creates a new date range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if start > end.
    pub fn new(start: BirthDate, end: BirthDate) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> BirthDate {
        self.start
    }

    pub const fn end(&self) -> BirthDate {
        self.end
    }

    pub const fn dates(&self) -> (BirthDate, BirthDate) {
        (self.start, self.end)
    }

    pub fn contains(&self, date: &BirthDate) -> bool {
        self.start <= *date && *date <= self.end
    }

    /// Whole days between start and end; zero for a single-day range.
    pub fn days(&self) -> u64 {
        self.start.days_until(&self.end).unsigned_abs()
    }

    /// Walks the range one calendar day at a time from the start date.
    pub fn iter(&self, end_bound: EndBound) -> Days {
        let remaining = match end_bound {
            EndBound::Exclusive => self.days(),
            EndBound::Inclusive => self.days() + 1,
        };
        Days {
            next: Some(self.start),
            remaining,
        }
    }
}

/// Iterator over consecutive dates, produced by [`BirthDateRange::iter`].
#[derive(Debug, Clone)]
pub struct Days {
    next: Option<BirthDate>,
    remaining: u64,
}

impl Iterator for Days {
    type Item = BirthDate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next?;
        self.next = current.succ();
        self.remaining -= 1;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Days {}

impl FusedIterator for Days {}

/// Derives the search range for a birthday prefix, using today's local date as the ceiling.
///
/// # Errors
/// See [`get_start_end_date_at`].
pub fn get_start_end_date(date_prefix: &str) -> Result<BirthDateRange, RangeError> {
    get_start_end_date_at(date_prefix, BirthDate::today()?)
}

/// Derives every `YYYYMMDD` date consistent with a left-anchored prefix of 0-8 digits.
///
/// Missing digits are padded with `0` for the start and `9` for the end:
///
/// - empty: `1900-01-01` to December 31st of `today`'s year
/// - 1-4 digits: a partial year, January 1st to December 31st
/// - 5-6 digits: a partial month clamped to `1..=12`, days 1 to 31
/// - 7-8 digits: a partial day clamped to `1..=31`, month taken as given
///
/// The day clamp ignores month length, so `199002` yields an end of February 31st,
/// which is rejected. The end is finally lowered to `today` if it lies in the future.
///
/// # Errors
/// `PrefixTooLong` and `NonDigit` for malformed prefixes, `InvalidBoundary` when either
/// bound is not a calendar date, `InvalidRange` when the whole prefix lies after `today`
/// (the guesser turns that into an empty search).
pub fn get_start_end_date_at(date_prefix: &str, today: BirthDate) -> Result<BirthDateRange, RangeError> {
    let len = date_prefix.chars().count();
    if len > DATE_PREFIX_MAX_LEN {
        return Err(RangeError::PrefixTooLong {
            prefix: date_prefix.to_owned(),
            len,
        });
    }
    if !date_prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RangeError::NonDigit(date_prefix.to_owned()));
    }

    let first = u16::from(JANUARY);
    let last = u16::from(DECEMBER);
    let (min_day, max_day) = (u16::from(MIN_DAY), u16::from(MAX_DAY));

    let (start, end) = match len {
        0 => (
            (SEARCH_FLOOR_YEAR, first, min_day),
            (today.year(), last, max_day),
        ),
        1..=YEAR_DIGITS => (
            (padded(date_prefix, YEAR_DIGITS, b'0'), first, min_day),
            (padded(date_prefix, YEAR_DIGITS, b'9'), last, max_day),
        ),
        5..=YEAR_MONTH_DIGITS => {
            let year = padded(&date_prefix[..YEAR_DIGITS], YEAR_DIGITS, b'0');
            let month = &date_prefix[YEAR_DIGITS..];
            (
                (year, padded(month, 2, b'0').max(first), min_day),
                (year, padded(month, 2, b'9').min(u16::from(MAX_MONTH)), max_day),
            )
        }
        _ => {
            let year = padded(&date_prefix[..YEAR_DIGITS], YEAR_DIGITS, b'0');
            let month = padded(&date_prefix[YEAR_DIGITS..YEAR_MONTH_DIGITS], 2, b'0');
            let day = &date_prefix[YEAR_MONTH_DIGITS..];
            (
                (year, month, padded(day, 2, b'0').max(min_day)),
                (year, month, padded(day, 2, b'9').min(max_day)),
            )
        }
    };

    let start = boundary("start", start)?;
    let end = boundary("end", end)?;
    BirthDateRange::new(start, end.min(today))
}

// Reads `part` as a number of `width` digits, filling the missing low digits with `fill`.
fn padded(part: &str, width: usize, fill: u8) -> u16 {
    part.bytes()
        .chain(std::iter::repeat(fill))
        .take(width)
        .fold(0, |acc, digit| acc * 10 + u16::from(digit - b'0'))
}

fn boundary(bound: &'static str, (year, month, day): (u16, u16, u16)) -> Result<BirthDate, RangeError> {
    let invalid = |source| RangeError::InvalidBoundary {
        bound,
        date: format!("{year:04}{month:02}{day:02}"),
        source,
    };
    let month_u8 = u8::try_from(month).map_err(|_| invalid(ParseError::InvalidFormat(month.to_string())))?;
    let day_u8 = u8::try_from(day).map_err(|_| invalid(ParseError::InvalidFormat(day.to_string())))?;
    BirthDate::from_ymd(year, month_u8, day_u8).map_err(invalid)
}

impl Serialize for BirthDateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
