//! Integration tests for the public validation and search API.

use cnid_guess::{
    BirthDate, EndBound, GuessError, Guesser, IdError, IdNumber, RangeError, checksum_char,
    get_start_end_date, get_start_end_date_at, guess_birthday, verify_date, verify_id_number,
    verify_verification_bit,
};

fn date(year: u16, month: u8, day: u8) -> BirthDate {
    BirthDate::from_ymd(year, month, day).unwrap()
}

#[test]
fn test_validators_agree_on_known_numbers() {
    for number in ["110105199003077972", "110105199003317972", "44030120000224123X"] {
        assert_eq!(verify_date(number), Ok(true), "{number}");
        assert_eq!(verify_verification_bit(number), Ok(true), "{number}");
        assert_eq!(verify_id_number(number, true), Ok(true), "{number}");
        assert!(IdNumber::new(number).is_ok(), "{number}");
    }
}

#[test]
fn test_repeated_verification_is_stable() {
    let number = "110105199003077977";
    let first = verify_id_number(number, false);
    assert_eq!(first, Ok(false));
    for _ in 0..3 {
        assert_eq!(verify_id_number(number, false), first);
    }
}

#[test]
fn test_wrong_length_never_yields_a_verdict() {
    assert!(matches!(
        verify_id_number("1101051990030779", false),
        Err(IdError::InvalidLength { expected: 18, actual: 16 })
    ));
}

#[test]
fn test_checksum_completes_a_number() {
    let body = "11010519900307797";
    let number = format!("{body}{}", checksum_char(body).unwrap());
    assert_eq!(number, "110105199003077972");
    assert_eq!(verify_id_number(&number, false), Ok(true));
}

#[test]
fn test_default_range_spans_1900_to_today() {
    let today = date(2026, 10, 18);
    let range = get_start_end_date_at("", today).unwrap();
    assert_eq!(range.start(), date(1900, 1, 1));
    assert_eq!(range.end(), today);

    let range = get_start_end_date("").unwrap();
    assert_eq!(range.start(), date(1900, 1, 1));
    assert_eq!(range.end(), BirthDate::today().unwrap());
}

#[test]
fn test_decade_prefix_pads_year() {
    let range = get_start_end_date_at("202", date(2030, 1, 1)).unwrap();
    assert_eq!(range.dates(), (date(2020, 1, 1), date(2029, 12, 31)));
}

#[test]
fn test_full_prefix_round_trip() {
    let report = Guesser::new("110105", "7972")
        .unwrap()
        .birthday_prefix("19900307")
        .end_bound(EndBound::Inclusive)
        .run()
        .unwrap();
    assert_eq!(report.candidates.len(), 1);
    assert!(report.candidates.contains("110105199003077972"));
}

#[test]
fn test_guess_recovers_known_birth_date() {
    let candidates = guess_birthday("110105", "7972", "1990030").unwrap();
    assert_eq!(candidates.into_iter().collect::<Vec<_>>(), ["110105199003077972"]);
}

#[test]
fn test_guess_with_no_match_is_empty_not_an_error() {
    let candidates = guess_birthday("110105", "7972", "1990020").unwrap();
    assert!(candidates.is_empty());
}

#[test]
fn test_guess_reports_unusable_prefix() {
    let error = guess_birthday("110105", "7972", "199002").unwrap_err();
    assert!(matches!(error, GuessError::Range(RangeError::InvalidBoundary { .. })));
    assert!(error.to_string().contains("no valid range for this prefix"));
}

#[test]
fn test_guess_with_future_prefix_is_empty_not_an_error() {
    let candidates = guess_birthday("110105", "7972", "9999").unwrap();
    assert!(candidates.is_empty());

    let report = Guesser::new("110105", "7972")
        .unwrap()
        .birthday_prefix("2027")
        .today(date(2026, 10, 18))
        .run()
        .unwrap();
    assert_eq!(report.attempts, 0);
    assert!(report.range.is_none());
    assert!(report.candidates.is_empty());
}
