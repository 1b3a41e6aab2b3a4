//! Exhaustive search for the birth date hidden in a partially obscured ID number.
//!
//! The known head (region code) and tail (sequence digits and checksum) are joined
//! with every date of a [`BirthDateRange`]; each candidate is run through
//! [`verify_id_number`] and the ones that pass are collected.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use crate::id_number::verdict;
use crate::{
    BirthDate, BirthDateRange, CHECKSUM_SYMBOLS, EndBound, HEAD_LEN, IdError, RangeError,
    TAIL_LEN, get_start_end_date_at, verify_id_number,
};

/// Every number that passed validation, unique and in lexical (hence date) order.
pub type CandidateSet = BTreeSet<String>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuessError {
    #[error("head must be {expected} characters, got {0}", expected = HEAD_LEN)]
    HeadLength(usize),

    #[error("tail must be {expected} characters, got {0}", expected = TAIL_LEN)]
    TailLength(usize),

    #[error("head {0:?} must contain only digits")]
    HeadNonDigit(String),

    #[error("tail {0:?} must be three digits followed by a digit or 'X'")]
    TailInvalid(String),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Id(#[from] IdError),
}

/// Outcome of one search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuessReport {
    /// `None` when the birthday prefix lies entirely after today.
    pub range: Option<BirthDateRange>,
    /// Dates tried before the search finished or was cancelled.
    pub attempts: u64,
    pub candidates: CandidateSet,
    pub cancelled: bool,
}

impl fmt::Display for GuessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "All guesses finished, get {} candidates are {:?}",
            self.candidates.len(),
            self.candidates
        )
    }
}

/// Configures and runs a birth date search.
///
/// ```ignore
/// let report = Guesser::new("110105", "7972")?
///     .birthday_prefix("199003")
///     .run()?;
/// ```
#[derive(Debug, Clone)]
pub struct Guesser {
    head: String,
    tail: String,
    birthday_prefix: String,
    today: Option<BirthDate>,
    end_bound: EndBound,
    cancel: Option<Arc<AtomicBool>>,
}

impl Guesser {
    /// # Errors
    /// Rejects a head that is not six digits, or a tail that is not three digits
    /// followed by a checksum symbol.
    pub fn new(head: &str, tail: &str) -> Result<Self, GuessError> {
        let head_len = head.chars().count();
        if head_len != HEAD_LEN {
            return Err(GuessError::HeadLength(head_len));
        }
        let tail_len = tail.chars().count();
        if tail_len != TAIL_LEN {
            return Err(GuessError::TailLength(tail_len));
        }
        if !head.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GuessError::HeadNonDigit(head.to_owned()));
        }
        let mut tail_chars = tail.chars();
        let sequence_ok = tail_chars.by_ref().take(TAIL_LEN - 1).all(|c| c.is_ascii_digit());
        let checksum_ok = tail_chars.next().is_some_and(|c| CHECKSUM_SYMBOLS.contains(&c));
        if !(sequence_ok && checksum_ok) {
            return Err(GuessError::TailInvalid(tail.to_owned()));
        }
        Ok(Self {
            head: head.to_owned(),
            tail: tail.to_owned(),
            birthday_prefix: String::new(),
            today: None,
            end_bound: EndBound::default(),
            cancel: None,
        })
    }

    /// Narrows the search to dates starting with these `YYYYMMDD` digits.
    #[must_use]
    pub fn birthday_prefix(mut self, prefix: &str) -> Self {
        prefix.clone_into(&mut self.birthday_prefix);
        self
    }

    /// Fixes the date the search range is clamped to, instead of the local clock.
    #[must_use]
    pub const fn today(mut self, today: BirthDate) -> Self {
        self.today = Some(today);
        self
    }

    #[must_use]
    pub const fn end_bound(mut self, end_bound: EndBound) -> Self {
        self.end_bound = end_bound;
        self
    }

    /// Stops the search at the next date once `flag` is set.
    #[must_use]
    pub fn cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// The closed date range this search covers.
    ///
    /// # Errors
    /// Propagates the `RangeError` for a prefix with no valid range, including
    /// `InvalidRange` for a prefix after today.
    pub fn range(&self) -> Result<BirthDateRange, GuessError> {
        let today = match self.today {
            Some(today) => today,
            None => BirthDate::today().map_err(RangeError::from)?,
        };
        Ok(get_start_end_date_at(&self.birthday_prefix, today)?)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Tries every date of the range and collects the numbers that validate.
    ///
    /// An empty candidate set is a normal outcome, including for a prefix that
    /// lies entirely in the future: nothing is tried and the report has no range.
    ///
    /// # Errors
    /// Fails before the first attempt if the birthday prefix yields no valid range.
    pub fn run(&self) -> Result<GuessReport, GuessError> {
        let span = info_span!("guess", head = %self.head, tail = %self.tail, prefix = %self.birthday_prefix);
        let _enter = span.enter();

        let range = match self.range() {
            Ok(range) => {
                info!(%range, days = range.days(), end_bound = ?self.end_bound, "searching birth dates");
                Some(range)
            }
            Err(GuessError::Range(RangeError::InvalidRange { start, end })) => {
                info!(%start, %end, "birthday prefix lies after today, nothing to search");
                None
            }
            Err(error) => return Err(error),
        };

        let mut report = GuessReport {
            range,
            attempts: 0,
            candidates: CandidateSet::new(),
            cancelled: false,
        };
        for date in range.into_iter().flat_map(|range| range.iter(self.end_bound)) {
            if self.is_cancelled() {
                warn!(attempts = report.attempts, "search cancelled at {date}");
                report.cancelled = true;
                break;
            }
            let candidate = format!("{}{date}{}", self.head, self.tail);
            let valid = verify_id_number(&candidate, false)?;
            report.attempts += 1;
            debug!("Guess {date}, result is {}", verdict(valid));
            if valid {
                info!(%candidate, "candidate found");
                report.candidates.insert(candidate);
            }
        }

        info!(attempts = report.attempts, "{report}");
        Ok(report)
    }
}

/// Searches every birth date allowed by `birthday_prefix` (possibly empty) and
/// returns the full ID numbers that validate.
///
/// # Errors
/// See [`Guesser::new`] and [`Guesser::run`].
pub fn guess_birthday(head: &str, tail: &str, birthday_prefix: &str) -> Result<CandidateSet, GuessError> {
    Guesser::new(head, tail)?
        .birthday_prefix(birthday_prefix)
        .run()
        .map(|report| report.candidates)
}
