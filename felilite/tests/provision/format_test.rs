#[path = "../common/mod.rs"]
mod common;

use felilite::Error;
use felilite::ndef::{AttributeInfo, NdefMessage};
use felilite::session::Session;
use felilite::test_support::SimulatedFelicaLite;
use felilite::types::{BlockData, BlockNumber, SystemCode};

fn card() -> SimulatedFelicaLite {
    SimulatedFelicaLite::new(common::fixtures::sample_idm())
}

fn pad(n: u8) -> BlockNumber {
    BlockNumber::pad(n).unwrap()
}

#[test]
fn format_without_message() -> anyhow::Result<()> {
    common::init_logging();
    let mut card = card();
    let idm = card.idm;
    let report = {
        let mut session = Session::new(&mut card, idm)?.connect()?;
        session.format(None)?
    };

    assert_eq!(card.block(BlockNumber::MC).as_bytes()[3], 0x01);
    assert_eq!(card.block(pad(0)), AttributeInfo::empty().to_block());
    for n in 1..=13 {
        assert_eq!(card.block(pad(n)), BlockData::ZERO, "PAD{}", n);
    }
    assert_eq!(report.message_len, None);
    assert_eq!(report.zero_fill.succeeded, 13);
    assert!(report.is_complete());
    Ok(())
}

#[test]
fn format_with_32_byte_message() -> anyhow::Result<()> {
    let message: Vec<u8> = (0x40..0x60).collect();
    let mut card = card();
    let idm = card.idm;
    let report = {
        let mut session = Session::new(&mut card, idm)?.connect()?;
        session.format(Some(&message))?
    };

    let header = card.block(pad(0));
    assert_eq!(&header.as_bytes()[11..14], &[0x00, 0x00, 0x20]);
    assert_eq!(&header.as_bytes()[14..16], &[0x00, 0x43]);
    assert_eq!(&card.block(pad(1)).as_bytes()[..], &message[..16]);
    assert_eq!(&card.block(pad(2)).as_bytes()[..], &message[16..]);
    for n in 3..=13 {
        assert_eq!(card.block(pad(n)), BlockData::ZERO, "PAD{}", n);
    }
    assert_eq!(report.message_len, Some(32));
    assert_eq!(report.message_blocks.succeeded, 13);
    assert_eq!(report.zero_fill.attempted(), 0);
    Ok(())
}

#[test]
fn format_with_empty_ndef_message() -> anyhow::Result<()> {
    let message = NdefMessage::empty().to_bytes();
    let mut card = card();
    let idm = card.idm;
    let report = {
        let mut session = Session::new(&mut card, idm)?.connect()?;
        session.format(Some(&message))?
    };

    let header = card.block(pad(0));
    assert_eq!(&header.as_bytes()[11..], &[0x00, 0x00, 0x03, 0x00, 0x26]);
    let mut first = [0u8; 16];
    first[..3].copy_from_slice(&[0xd0, 0x00, 0x00]);
    assert_eq!(card.block(pad(1)), BlockData::from_bytes(first));
    assert_eq!(report.message_blocks.succeeded, 2);
    assert_eq!(report.zero_fill.succeeded, 11);
    Ok(())
}

#[test]
fn mc_read_failure_writes_nothing() {
    let mut card = card();
    card.fail_reads.insert(BlockNumber::MC);
    let idm = card.idm;
    {
        let mut session = Session::new(&mut card, idm).unwrap().connect().unwrap();
        let err = session.format(None).unwrap_err();
        assert!(err.is_validation());
    }
    assert!(card.written_blocks().is_empty());
}

#[test]
fn header_write_failure_fails_format() {
    let mut card = card();
    card.fail_writes.insert(pad(0));
    let idm = card.idm;
    {
        let mut session = Session::new(&mut card, idm).unwrap().connect().unwrap();
        assert!(matches!(
            session.format(None),
            Err(Error::StatusFlag { .. })
        ));
    }
    assert_eq!(card.written_blocks(), vec![BlockNumber::MC, pad(0)]);
}

#[test]
fn content_block_failure_is_tolerated() -> anyhow::Result<()> {
    let mut card = card();
    card.fail_writes.insert(pad(7));
    let idm = card.idm;
    let report = {
        let mut session = Session::new(&mut card, idm)?.connect()?;
        session.format(None)?
    };

    assert_eq!(report.zero_fill.succeeded, 12);
    assert_eq!(report.zero_fill.failed, 1);
    assert!(!report.is_complete());
    assert_eq!(card.block(pad(7)), BlockData::from_bytes([0xaa; 16]));
    assert_eq!(card.block(pad(8)), BlockData::ZERO);
    Ok(())
}

#[test]
fn link_loss_during_zero_fill_skips_the_rest() -> anyhow::Result<()> {
    let mut card = card();
    // read MC, write MC, write PAD0, PAD1, PAD2 answered; PAD3 is lost
    card.link_lost_after = Some(5);
    let idm = card.idm;
    let report = {
        let mut session = Session::new(&mut card, idm)?.connect()?;
        session.format(None)?
    };

    assert_eq!(report.zero_fill.succeeded, 2);
    assert_eq!(report.zero_fill.failed, 1);
    assert_eq!(report.zero_fill.skipped, 10);
    assert_eq!(card.requests.len(), 6);
    Ok(())
}

#[test]
fn link_loss_before_header_fails_format() {
    let mut card = card();
    card.link_lost_after = Some(2);
    let idm = card.idm;
    let mut session = Session::new(&mut card, idm).unwrap().connect().unwrap();
    assert!(matches!(session.format(None), Err(Error::LinkLost)));
}

#[test]
fn oversized_message_is_dropped() -> anyhow::Result<()> {
    let mut card = card();
    let idm = card.idm;
    let report = {
        let mut session = Session::new(&mut card, idm)?.connect()?;
        session.format(Some(&[0x55; 209]))?
    };

    assert!(report.message_dropped);
    assert_eq!(report.message_len, None);
    assert_eq!(card.block(pad(0)), AttributeInfo::empty().to_block());
    assert_eq!(card.block(pad(1)), BlockData::ZERO);
    Ok(())
}

#[test]
fn other_system_code_is_unsupported_and_silent() {
    let mut card = card().with_system_code(SystemCode::NFC_F);
    let idm = card.idm;
    {
        let mut session = Session::new(&mut card, idm).unwrap().connect().unwrap();
        assert!(matches!(
            session.format(None),
            Err(Error::UnsupportedCardType(_))
        ));
    }
    assert!(card.requests.is_empty());
}
