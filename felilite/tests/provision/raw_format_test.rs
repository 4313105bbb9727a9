#[path = "../common/mod.rs"]
mod common;

use felilite::session::Session;
use felilite::test_support::SimulatedFelicaLite;
use felilite::types::{BlockData, BlockNumber};

fn ndef_card() -> SimulatedFelicaLite {
    let mut card = SimulatedFelicaLite::new(common::fixtures::sample_idm());
    let mut mc = card.block(BlockNumber::MC);
    mc.as_bytes_mut()[3] = 0x01;
    card.blocks.insert(BlockNumber::MC, mc);
    card
}

#[test]
fn raw_format_disables_ndef_and_erases() -> anyhow::Result<()> {
    common::init_logging();
    let mut card = ndef_card();
    let idm = card.idm;
    let report = {
        let mut session = Session::new(&mut card, idm)?.connect()?;
        session.raw_format()?
    };

    assert_eq!(card.block(BlockNumber::MC).as_bytes()[3], 0x00);
    // the rest of MC is preserved
    assert_eq!(&card.block(BlockNumber::MC).as_bytes()[..2], &[0xff, 0xff]);
    for n in 0..=13 {
        assert_eq!(card.block(BlockNumber::pad(n).unwrap()), BlockData::ZERO);
    }
    assert_eq!(report.zero_fill.succeeded, 14);
    Ok(())
}

#[test]
fn raw_format_tolerates_pad_failure() -> anyhow::Result<()> {
    let mut card = ndef_card();
    card.fail_writes.insert(BlockNumber::PAD4);
    let idm = card.idm;
    let report = {
        let mut session = Session::new(&mut card, idm)?.connect()?;
        session.raw_format()?
    };

    assert_eq!(report.zero_fill.failed, 1);
    assert_eq!(report.zero_fill.succeeded, 13);
    assert_eq!(card.block(BlockNumber::PAD4), BlockData::from_bytes([0xaa; 16]));
    assert_eq!(card.block(BlockNumber::PAD13), BlockData::ZERO);
    Ok(())
}

#[test]
fn mc_write_failure_fails_raw_format() {
    let mut card = ndef_card();
    card.fail_writes.insert(BlockNumber::MC);
    let idm = card.idm;
    {
        let mut session = Session::new(&mut card, idm).unwrap().connect().unwrap();
        assert!(session.raw_format().is_err());
    }
    assert_eq!(card.written_blocks(), vec![BlockNumber::MC]);
    assert_eq!(card.block(BlockNumber::PAD0), BlockData::from_bytes([0xaa; 16]));
}

#[test]
fn mc_read_failure_writes_nothing() {
    let mut card = ndef_card();
    card.fail_reads.insert(BlockNumber::MC);
    let idm = card.idm;
    {
        let mut session = Session::new(&mut card, idm).unwrap().connect().unwrap();
        assert!(session.raw_format().is_err());
    }
    assert!(card.written_blocks().is_empty());
    assert_eq!(card.block(BlockNumber::MC).as_bytes()[3], 0x01);
}
