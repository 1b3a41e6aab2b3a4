use std::ops::Range;

/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Largest day number any month can have, used when clamping a partial day
pub const MAX_DAY: u8 = 31;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Width of a compact `YYYYMMDD` date
pub const COMPACT_DATE_LEN: usize = 8;
/// Width of the year part of a compact date
pub const YEAR_DIGITS: usize = 4;
/// Width of the year and month parts of a compact date
pub const YEAR_MONTH_DIGITS: usize = 6;

/// Longest accepted birthday prefix (a complete `YYYYMMDD`)
pub const DATE_PREFIX_MAX_LEN: usize = COMPACT_DATE_LEN;

/// Earliest year searched when no birthday prefix is given
pub const SEARCH_FLOOR_YEAR: u16 = 1900;

/// Length of a citizen ID number in characters
pub const ID_NUMBER_LEN: usize = 18;
/// Number of characters covered by the checksum
pub const ID_BODY_LEN: usize = 17;
/// Administrative region code
pub const REGION_CODE_FIELD: Range<usize> = 0..6;
/// Birth date as `YYYYMMDD`
pub const BIRTH_DATE_FIELD: Range<usize> = 6..14;

/// Known leading part of an obscured number (the region code)
pub const HEAD_LEN: usize = REGION_CODE_FIELD.end;
/// Known trailing part of an obscured number (sequence plus checksum)
pub const TAIL_LEN: usize = ID_NUMBER_LEN - BIRTH_DATE_FIELD.end;

/// Per-position weights of the first 17 characters
pub const CHECKSUM_WEIGHTS: [u32; ID_BODY_LEN] = [7, 9, 10, 5, 8, 4, 2, 1, 6, 3, 7, 9, 10, 5, 8, 4, 2];

/// Modulus applied to the weighted sum
pub const CHECKSUM_MODULUS: u32 = 11;

/// Checksum symbol indexed by `weighted_sum % CHECKSUM_MODULUS`
pub const CHECKSUM_SYMBOLS: [char; CHECKSUM_MODULUS as usize] =
    ['1', '0', 'X', '9', '8', '7', '6', '5', '4', '3', '2'];
