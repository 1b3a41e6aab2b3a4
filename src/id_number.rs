//! Checksum and birth date validation of 18-character citizen ID numbers.
//!
//! Layout: `[0,6)` region code, `[6,14)` birth date as `YYYYMMDD`, `[14,17)` sequence
//! digits, `[17]` checksum symbol. The checksum is the entry of [`CHECKSUM_SYMBOLS`]
//! selected by the weighted digit sum of the first 17 characters modulo 11.

use std::str::FromStr;

use serde::Serialize;

use crate::{
    BIRTH_DATE_FIELD, BirthDate, CHECKSUM_MODULUS, CHECKSUM_SYMBOLS, CHECKSUM_WEIGHTS,
    ID_BODY_LEN, ID_NUMBER_LEN, prelude::*,
};

/// Input that breaks a precondition of the validators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The string does not have the number of characters the operation requires.
    #[error("expected {expected} characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A position that must hold a decimal digit holds something else.
    #[error("non-digit {found:?} at position {position}")]
    NonDigit { position: usize, found: char },
}

fn check_len(s: &str, expected: usize) -> Result<(), IdError> {
    let actual = s.chars().count();
    if actual == expected {
        Ok(())
    } else {
        Err(IdError::InvalidLength { expected, actual })
    }
}

fn weighted_sum(body: &str) -> Result<u32, IdError> {
    body.chars()
        .zip(CHECKSUM_WEIGHTS)
        .enumerate()
        .try_fold(0, |sum, (position, (found, weight))| {
            let digit = found.to_digit(10).ok_or(IdError::NonDigit { position, found })?;
            Ok(sum + digit * weight)
        })
}

/// Checks that characters `[6,14)` form a real `YYYYMMDD` calendar date.
///
/// # Errors
/// Returns `IdError::InvalidLength` unless `number` is exactly 18 characters.
pub fn verify_date(number: &str) -> Result<bool, IdError> {
    check_len(number, ID_NUMBER_LEN)?;
    let field: String = number
        .chars()
        .skip(BIRTH_DATE_FIELD.start)
        .take(BIRTH_DATE_FIELD.len())
        .collect();
    Ok(field.parse::<BirthDate>().is_ok())
}

/// Checks the 18th character against the checksum of the first 17.
///
/// A non-digit among the first 17 characters can never produce a valid number
/// and yields `Ok(false)`. The comparison is case-sensitive: only `'X'` is accepted.
///
/// # Errors
/// Returns `IdError::InvalidLength` unless `number` is exactly 18 characters.
pub fn verify_verification_bit(number: &str) -> Result<bool, IdError> {
    check_len(number, ID_NUMBER_LEN)?;
    let mut chars = number.chars();
    let body: String = chars.by_ref().take(ID_BODY_LEN).collect();
    let Ok(sum) = weighted_sum(&body) else {
        return Ok(false);
    };
    Ok(chars.next() == Some(CHECKSUM_SYMBOLS[(sum % CHECKSUM_MODULUS) as usize]))
}

/// Computes the checksum symbol completing a 17-digit body.
///
/// # Errors
/// Returns `IdError::InvalidLength` unless `body` has 17 characters and
/// `IdError::NonDigit` for the first character that is not a decimal digit.
pub fn checksum_char(body: &str) -> Result<char, IdError> {
    check_len(body, ID_BODY_LEN)?;
    let sum = weighted_sum(body)?;
    Ok(CHECKSUM_SYMBOLS[(sum % CHECKSUM_MODULUS) as usize])
}

/// Full validation: the embedded birth date must exist and the checksum must match.
///
/// With `show_result` set, the verdict is also reported at `info` level.
///
/// # Errors
/// Returns `IdError::InvalidLength` unless `number` is exactly 18 characters.
pub fn verify_id_number(number: &str, show_result: bool) -> Result<bool, IdError> {
    let valid = verify_date(number)? && verify_verification_bit(number)?;
    if show_result {
        tracing::info!(number, valid, "Verifying {number}, {}", verdict(valid));
    }
    Ok(valid)
}

pub(crate) const fn verdict(valid: bool) -> &'static str {
    if valid { "valid" } else { "invalid" }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdNumberError {
    #[error(transparent)]
    Malformed(#[from] IdError),

    #[error("{0} is not a valid ID number (bad birth date or checksum)")]
    Invalid(String),
}

/// An ID number that passed [`verify_id_number`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Deref)]
#[display(fmt = "{number}")]
pub struct IdNumber {
    #[deref]
    number: String,
    birth_date: BirthDate,
}

impl IdNumber {
    /// Validates `number` and wraps it.
    ///
    /// # Errors
    /// `IdNumberError::Malformed` for a wrong length, `IdNumberError::Invalid` when the
    /// birth date or checksum test fails.
    pub fn new(number: &str) -> Result<Self, IdNumberError> {
        if !verify_id_number(number, false)? {
            return Err(IdNumberError::Invalid(number.to_owned()));
        }
        // A passing number is all ASCII, so byte ranges line up with positions.
        let birth_date = number[BIRTH_DATE_FIELD]
            .parse()
            .map_err(|_| IdNumberError::Invalid(number.to_owned()))?;
        Ok(Self {
            number: number.to_owned(),
            birth_date,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.number
    }

    pub const fn birth_date(&self) -> BirthDate {
        self.birth_date
    }

    pub fn checksum(&self) -> char {
        self.number[ID_BODY_LEN..].chars().next().unwrap_or_default()
    }

    pub fn into_string(self) -> String {
        self.number
    }
}

impl FromStr for IdNumber {
    type Err = IdNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim())
    }
}

impl TryFrom<&str> for IdNumber {
    type Error = IdNumberError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IdNumber> for String {
    fn from(id: IdNumber) -> Self {
        id.into_string()
    }
}

impl Serialize for IdNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.number)
    }
}
