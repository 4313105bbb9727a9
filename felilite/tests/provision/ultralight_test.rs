#[path = "../common/mod.rs"]
mod common;

use felilite::provision::ultralight::{self, CLEAR_PAGE, EMPTY_NDEF_TLV};
use felilite::tag::TagTechnology;
use felilite::test_support::SimulatedUltralight;

#[test]
fn raw_format_large_tag() {
    common::init_logging();
    let mut tag = SimulatedUltralight::new(48);
    let report = ultralight::raw_format(&mut tag).unwrap();

    assert_eq!(tag.page(4), Some(EMPTY_NDEF_TLV));
    for page in 5..=39 {
        assert_eq!(tag.page(page), Some([0x00, 0x00, 0xfe, 0x00]), "page {}", page);
    }
    assert_eq!(tag.page(40), Some([0xaa; 4]));
    assert_eq!(report.required_pages, 12);
    assert_eq!(report.extended.succeeded, 24);
    assert!(!tag.is_connected());
    assert_eq!(tag.close_calls, 1);
}

#[test]
fn raw_format_small_tag_stops_at_end_of_memory() {
    let mut tag = SimulatedUltralight::new(16);
    let report = ultralight::raw_format(&mut tag).unwrap();

    assert_eq!(tag.page(15), Some(CLEAR_PAGE));
    assert_eq!(report.extended.failed, 1);
    assert_eq!(report.extended.skipped, 23);
    assert_eq!(tag.writes.last(), Some(&16));
}

#[test]
fn extended_page_failure_stops_extended_phase() {
    let mut tag = SimulatedUltralight::new(48);
    tag.fail_pages.insert(20);
    let report = ultralight::raw_format(&mut tag).unwrap();

    assert_eq!(report.extended.succeeded, 4);
    assert_eq!(report.extended.failed, 1);
    assert_eq!(report.extended.skipped, 19);
    assert_eq!(tag.page(21), Some([0xaa; 4]));
}

#[test]
fn required_page_failure_fails_and_still_closes() {
    let mut tag = SimulatedUltralight::new(48);
    tag.fail_pages.insert(9);
    assert!(ultralight::raw_format(&mut tag).is_err());
    assert_eq!(tag.page(10), Some([0xaa; 4]));
    assert_eq!(tag.close_calls, 1);
}

#[test]
fn close_failure_is_not_fatal() {
    let mut tag = SimulatedUltralight::new(16);
    tag.fail_close = true;
    assert!(ultralight::raw_format(&mut tag).is_ok());
}
