//! Tests for cross-document ordering and the `extract` entry point.

use chrono::{NaiveDate, NaiveDateTime};
use schoolcal_core::config::DEFAULT_UID_NAMESPACE;
use schoolcal_core::{assemble, extract, CalendarEvent, EventAssembler, ExtractConfig, Layout};

fn at(month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn event(start: NaiveDateTime, summary: &str) -> CalendarEvent {
    CalendarEvent::timed(start, start, summary, "", &DEFAULT_UID_NAMESPACE)
}

#[test]
fn sorts_by_start() {
    let sorted = assemble(vec![
        event(at(10, 2, 9), "b"),
        event(at(9, 1, 9), "a"),
        event(at(10, 2, 8), "c"),
    ]);
    let summaries: Vec<&str> = sorted.iter().map(|e| e.summary.as_str()).collect();
    assert_eq!(summaries, vec!["a", "c", "b"]);
}

#[test]
fn ties_keep_encounter_order() {
    let mut assembler = EventAssembler::new();
    assembler.push(vec![event(at(9, 1, 0), "first"), event(at(9, 2, 0), "later")]);
    assembler.push(vec![event(at(9, 1, 0), "second")]);
    assert_eq!(assembler.len(), 3);

    let summaries: Vec<String> = assembler.finish().into_iter().map(|e| e.summary).collect();
    assert_eq!(summaries, vec!["first", "second", "later"]);
}

#[test]
fn empty_assembler() {
    let assembler = EventAssembler::new();
    assert!(assembler.is_empty());
    assert!(assembler.finish().is_empty());
}

#[test]
fn extract_block_layout_is_sorted() {
    let text = "<p>2020-2021</p>\n<p>SEPTEMBER</p>\n<p>9/21 Picture Day 9/7 Labor Day</p>";
    let events = extract(text, Layout::Block, &ExtractConfig::default()).unwrap();
    let summaries: Vec<&str> = events.iter().map(|e| e.summary.as_str()).collect();
    assert_eq!(summaries, vec!["Labor Day", "Picture Day"]);
}

#[test]
fn extract_list_layout() {
    let text = "<p>October 5 2020 Mon</p><p>Advising 10:00am</p>";
    let events = extract(text, Layout::List, &ExtractConfig::default()).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].start, at(10, 5, 10));
    assert_eq!(events[0].end, Some(at(10, 5, 11)));
}

#[test]
fn extraction_is_idempotent() {
    let text = "<p>2020-2021</p><p>MARCH</p><p>3/2 Staff Day 3/15-3/19 Spring Break</p>";
    let first = extract(text, Layout::Block, &ExtractConfig::default()).unwrap();
    let second = extract(text, Layout::Block, &ExtractConfig::default()).unwrap();
    let uids = |events: &[CalendarEvent]| events.iter().map(|e| e.uid.clone()).collect::<Vec<_>>();
    assert_eq!(uids(&first), uids(&second));
}

#[test]
fn serialized_field_names() {
    let value = serde_json::to_value(event(at(9, 1, 8), "Open House")).unwrap();
    let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["start", "end", "allDay", "summary", "description", "uid"]);
    assert_eq!(value["start"], "2020-09-01T08:00:00");
}

#[test]
fn partial_json_config_keeps_defaults() {
    let config = ExtractConfig::from_json(r#"{"list": {"default_duration_minutes": 30}}"#).unwrap();
    assert_eq!(config.list.default_duration_minutes, 30);
    assert_eq!(config.list.bullet_markers, vec!["&bull;", "\u{2022}"]);
    assert_eq!(config.fragments.paragraph_open, "<p>");
}

#[test]
fn malformed_json_config_is_an_error() {
    assert!(ExtractConfig::from_json("{not json").is_err());
}
