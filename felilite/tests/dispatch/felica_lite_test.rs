#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use felilite::Error;
use felilite::config::{Config, Intent};
use felilite::dispatch::{Dispatcher, Outcome};
use felilite::ndef::AttributeInfo;
use felilite::test_support::{SimulatedFelicaLite, SimulatedTag};
use felilite::transport::Transport;
use felilite::types::{BlockData, BlockNumber, SystemCode};

fn felica_tag() -> SimulatedTag {
    SimulatedTag::felica_lite(SimulatedFelicaLite::new(common::fixtures::sample_idm()))
}

#[test]
fn ndef_format_polls_then_formats_with_empty_message() {
    common::init_logging();
    let config = Config::builder()
        .response_timeout(Duration::from_millis(400))
        .build()
        .unwrap();
    let mut tag = felica_tag();

    let outcome = Dispatcher::new(&config)
        .dispatch(&mut tag, Intent::NdefFormat)
        .unwrap();
    match outcome {
        Outcome::FelicaLite(report) => assert_eq!(report.message_len, Some(3)),
        other => panic!("expected felica lite outcome, got {:?}", other),
    }

    let card = tag.felica.as_ref().unwrap();
    assert_eq!(card.requests[0], common::fixtures::frame("06 00 88 b4 00 00"));
    assert_eq!(card.block(BlockNumber::MC).as_bytes()[3], 0x01);
    assert_eq!(
        card.block(BlockNumber::PAD0),
        AttributeInfo::with_message_len(3).unwrap().to_block()
    );
    assert_eq!(&card.block(BlockNumber::PAD1).as_bytes()[..3], &[0xd0, 0x00, 0x00]);
    assert_eq!(card.timeout, Some(Duration::from_millis(400)));
    assert!(!card.is_open());
}

#[test]
fn raw_format_erases_felica_lite() {
    let config = Config::default();
    let mut tag = felica_tag();
    let outcome = Dispatcher::new(&config)
        .dispatch(&mut tag, Intent::RawFormat)
        .unwrap();
    assert!(matches!(outcome, Outcome::FelicaLite(ref r) if r.zero_fill.succeeded == 14));

    let card = tag.felica.as_ref().unwrap();
    assert_eq!(card.block(BlockNumber::MC).as_bytes()[3], 0x00);
    assert_eq!(card.block(BlockNumber::PAD13), BlockData::ZERO);
}

#[test]
fn polling_failure_aborts_before_any_write() {
    let config = Config::default();
    let mut tag = felica_tag();
    tag.felica.as_mut().unwrap().mute_polling = true;

    assert!(matches!(
        Dispatcher::new(&config).dispatch(&mut tag, Intent::NdefFormat),
        Err(Error::Timeout)
    ));
    let card = tag.felica.as_ref().unwrap();
    assert_eq!(card.requests.len(), 1);
    assert!(!card.is_open());
}

#[test]
fn non_lite_felica_is_unsupported() {
    let config = Config::default();
    let card = SimulatedFelicaLite::new(common::fixtures::sample_idm())
        .with_system_code(SystemCode::NFC_F);
    let mut tag = SimulatedTag::felica_lite(card);

    assert!(matches!(
        Dispatcher::new(&config).dispatch(&mut tag, Intent::RawFormat),
        Err(Error::UnsupportedCardType(_))
    ));
    assert!(tag.felica.as_ref().unwrap().requests.is_empty());
}

#[test]
fn close_failure_fails_successful_run() {
    let config = Config::default();
    let mut tag = felica_tag();
    tag.felica.as_mut().unwrap().fail_close = true;

    assert!(matches!(
        Dispatcher::new(&config).dispatch(&mut tag, Intent::RawFormat),
        Err(Error::Transport(_))
    ));
    // the card was still erased
    assert_eq!(
        tag.felica.as_ref().unwrap().block(BlockNumber::PAD0),
        BlockData::ZERO
    );
}
