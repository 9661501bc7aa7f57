#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]

use super::*;
use knot_parse::{EngineError, FailureKind};
use pretty_assertions::assert_eq;

fn read(source: &str) -> Result<Vec<f64>, ListError> {
    parse(source, ParseConfig::default())
}

#[test]
fn test_numbers_with_whitespace() {
    assert_eq!(read("1, 2.5 ,-3").unwrap(), vec![1.0, 2.5, -3.0]);
    assert_eq!(read("\t42\t").unwrap(), vec![42.0]);
}

#[test]
fn test_empty_input_is_empty_list() {
    assert_eq!(read("").unwrap(), Vec::<f64>::new());
}

#[test]
fn test_blank_input_is_empty_list() {
    assert_eq!(read("   ").unwrap(), Vec::<f64>::new());
    assert_eq!(read(" \t ").unwrap(), Vec::<f64>::new());
}

#[test]
fn test_trailing_comma_is_rejected() {
    let err = read("1,2,").unwrap_err();
    let ListError::Parse(ParseError::TrailingInput { position, len, .. }) = &err else {
        panic!("expected trailing input, got {err:?}");
    };
    assert_eq!((*position, *len), (3, 4));
}

#[test]
fn test_bad_item_points_at_it() {
    let err = read("1,x").unwrap_err();
    let ListError::Parse(parse_err) = &err else {
        panic!("expected parse error, got {err:?}");
    };
    assert_eq!(parse_err.position(), 1);
    assert!(matches!(
        parse_err.failure().map(|f| &f.kind),
        Some(FailureKind::Expected(_))
    ));
}

#[test]
fn test_repetition_limit() {
    let config = ParseConfig::default().with_max_repetitions(3);
    let err = parse("1,2,3,4,5", config).unwrap_err();

    assert!(matches!(
        err,
        ListError::Parse(ParseError::Engine(EngineError::RepetitionLimit { limit: 3, .. }))
    ));
    assert_eq!(parse("1,2,3", config).unwrap(), vec![1.0, 2.0, 3.0]);
}
