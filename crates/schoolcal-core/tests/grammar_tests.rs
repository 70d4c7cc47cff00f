//! Tests for block-calendar line classification and the date-prefix rules.

use schoolcal_core::config::BlockConfig;
use schoolcal_core::grammar::month_number;
use schoolcal_core::{classify, BlockGrammar, ExtractError, LineKind, SchoolYear};

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[test]
fn school_year_header() {
    assert_eq!(
        classify("2020-2021 SCHOOL YEAR CALENDAR"),
        LineKind::SchoolYearHeader(SchoolYear::new(2020, 2021))
    );
}

#[test]
fn school_year_must_start_the_line() {
    assert_eq!(classify("Revised 2020-2021"), LineKind::PlainText);
}

#[test]
fn month_headers_in_three_casings() {
    assert_eq!(classify("september"), LineKind::MonthBlockHeader(9));
    assert_eq!(classify("September 2020"), LineKind::MonthBlockHeader(9));
    assert_eq!(classify("  SEPTEMBER"), LineKind::MonthBlockHeader(9));
    assert_eq!(classify("SePtEmBeR"), LineKind::PlainText);
}

#[test]
fn abbreviated_month_is_not_a_header() {
    assert_eq!(classify("Sept 2020"), LineKind::PlainText);
}

#[test]
fn end_of_calendar_marker() {
    assert_eq!(classify("Color Key: holidays in red"), LineKind::EndOfCalendar);
    assert_eq!(classify("   Color Key:"), LineKind::EndOfCalendar);
}

#[test]
fn dated_line_is_an_event() {
    assert_eq!(classify("9/1 Labor Day"), LineKind::DateRangeEvent);
    assert_eq!(classify("Staff day 8/31"), LineKind::DateRangeEvent);
}

#[test]
fn endnote_line() {
    assert_eq!(
        classify("*NH: No School Holiday"),
        LineKind::EndnoteLine {
            marker: "NH*".to_string(),
            text: "No School Holiday".to_string(),
        }
    );
}

#[test]
fn undated_prose_is_plain_text() {
    assert_eq!(classify("S M T W Th F S"), LineKind::PlainText);
}

#[test]
fn month_number_lookup() {
    assert_eq!(month_number("january"), Some(1));
    assert_eq!(month_number("December"), Some(12));
    assert_eq!(month_number("MAY"), Some(5));
    assert_eq!(month_number("Mayday"), None);
}

// ---------------------------------------------------------------------------
// Date prefixes and subjects
// ---------------------------------------------------------------------------

fn prefix(event: &str) -> &str {
    let grammar = BlockGrammar::default();
    &event[..grammar.date_prefix_len(event)]
}

#[test]
fn single_date_prefix() {
    assert_eq!(prefix("9/1 Labor Day"), "9/1");
}

#[test]
fn dashed_range_prefix() {
    assert_eq!(prefix("9/4-9/6 Orientation"), "9/4-9/6");
    assert_eq!(prefix("9/4 - 9/6 Orientation"), "9/4 - 9/6");
}

#[test]
fn comma_list_with_colon() {
    assert_eq!(
        prefix("11/25, 11/27-11/28: Thanksgiving Recess"),
        "11/25, 11/27-11/28:"
    );
}

#[test]
fn dates_separated_by_words_are_not_one_prefix() {
    assert_eq!(prefix("9/1 Labor Day, 9/4 Orientation"), "9/1");
}

#[test]
fn subject_stops_at_next_date() {
    let grammar = BlockGrammar::default();
    let body = " Labor Day, 9/4 Orientation";
    assert_eq!(&body[..grammar.subject_end(body)], " Labor Day, ");
}

#[test]
fn subject_stops_at_day_number_legend() {
    let grammar = BlockGrammar::default();
    let body = " Orientation 10 11 12";
    assert_eq!(&body[..grammar.subject_end(body)], " Orientation");
}

#[test]
fn subject_stops_at_weekday_legend() {
    let grammar = BlockGrammar::default();
    let body = " Columbus Day S M T W Th F S 1 2 3";
    assert_eq!(&body[..grammar.subject_end(body)], " Columbus Day");
}

#[test]
fn term_end_label_found() {
    let grammar = BlockGrammar::default();
    let line = "1/18 MLK Day Term 2: 1/29";
    assert_eq!(grammar.term_end_start(line), Some(12));

    let line = "11/11 Veterans Day MARKING TERM END DATES: Term 1: 11/13";
    assert_eq!(grammar.term_end_start(line), Some(18));
}

#[test]
fn bad_configured_pattern_is_reported() {
    let config = BlockConfig {
        legend_trailer: "(unclosed".to_string(),
        ..BlockConfig::default()
    };
    match BlockGrammar::new(&config) {
        Err(ExtractError::InvalidPattern { name, .. }) => assert_eq!(name, "legend_trailer"),
        other => panic!("expected InvalidPattern, got {other:?}"),
    }
}
