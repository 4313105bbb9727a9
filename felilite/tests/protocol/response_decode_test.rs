#[path = "../common/mod.rs"]
mod common;

use felilite::Error;
use felilite::protocol::codec::decode_response_frame;
use felilite::protocol::{Command, Response, decode_polling, decode_read, decode_write};
use felilite::types::{BlockElement, BlockNumber, Idm, ServiceCode};
use proptest::prelude::*;

fn read_cmd(n: u8) -> Command {
    Command::ReadWithoutEncryption {
        idm: common::fixtures::sample_idm(),
        services: vec![ServiceCode::READ_ONLY],
        blocks: (0..n).map(|b| BlockElement::from(BlockNumber::new(b))).collect(),
    }
}

#[test]
fn polling_response_yields_pmm() {
    let pmm = decode_polling(&common::fixtures::polling_frame(), &common::fixtures::sample_idm())
        .unwrap();
    assert_eq!(pmm, common::fixtures::sample_pmm());
}

#[test]
fn read_response_blocks_in_request_order() {
    let blocks: Vec<_> = (1..=3).map(common::fixtures::sample_blockdata).collect();
    let frame = common::fixtures::read_frame(&blocks);
    match decode_response_frame(&read_cmd(3), &common::fixtures::sample_idm(), &frame).unwrap() {
        Response::ReadWithoutEncryption { blocks: got, .. } => assert_eq!(got, blocks),
        other => panic!("expected read response, got {:?}", other),
    }
}

#[test]
fn length_is_checked_before_idm() {
    let mut frame = common::fixtures::write_ok_frame();
    frame[2] ^= 0xff;
    frame.push(0);
    assert!(matches!(
        decode_write(&frame, &common::fixtures::sample_idm()),
        Err(Error::FrameLengthMismatch {
            expected: 12,
            actual: 13
        })
    ));
}

#[test]
fn length_byte_must_match_frame_size() {
    let mut frame = common::fixtures::write_ok_frame();
    frame[0] = 0x00;
    assert!(matches!(
        decode_write(&frame, &common::fixtures::sample_idm()),
        Err(Error::FrameLengthMismatch {
            expected: 0,
            actual: 12
        })
    ));

    let mut frame = common::fixtures::read_frame(&[common::fixtures::sample_blockdata(0x42)]);
    frame[0] = 0xff;
    assert!(matches!(
        decode_response_frame(&read_cmd(1), &common::fixtures::sample_idm(), &frame),
        Err(Error::FrameLengthMismatch { .. })
    ));
}

#[test]
fn idm_is_checked_before_response_code() {
    let mut frame = common::fixtures::write_ok_frame();
    frame[1] = 0x07;
    let other = Idm::from_bytes([0xee; 8]);
    assert!(matches!(
        decode_write(&frame, &other),
        Err(Error::IdmMismatch { .. })
    ));
}

#[test]
fn status_flags_surface_as_status_error() {
    let mut frame = common::fixtures::write_ok_frame();
    frame[10] = 0x01;
    frame[11] = 0xa8;
    assert!(matches!(
        decode_write(&frame, &common::fixtures::sample_idm()),
        Err(Error::StatusFlag {
            status1: 0x01,
            status2: 0xa8
        })
    ));
}

#[test]
fn block_count_echo_is_checked() {
    let mut frame = common::fixtures::read_frame(&[common::fixtures::sample_blockdata(0)]);
    frame[12] = 2;
    assert!(matches!(
        decode_read(&frame, &common::fixtures::sample_idm(), 1),
        Err(Error::BlockCountMismatch {
            expected: 1,
            actual: 2
        })
    ));
}

#[test]
fn four_block_read_response_is_77_bytes() {
    let blocks: Vec<_> = (0..4).map(common::fixtures::sample_blockdata).collect();
    let frame = common::fixtures::read_frame(&blocks);
    assert_eq!(frame.len(), 13 + 4 * 16);
    // a response to six requested blocks is sized for four
    let got = decode_response_frame(&read_cmd(6), &common::fixtures::sample_idm(), &frame).unwrap();
    assert!(matches!(got, Response::ReadWithoutEncryption { ref blocks, .. } if blocks.len() == 4));
}

proptest! {
    #[test]
    fn any_single_byte_corruption_of_idm_is_rejected(pos in 2usize..10, flip in 1u8..=255) {
        let mut frame = common::fixtures::write_ok_frame();
        frame[pos] ^= flip;
        let is_idm_mismatch = matches!(
            decode_write(&frame, &common::fixtures::sample_idm()),
            Err(Error::IdmMismatch { .. })
        );
        prop_assert!(is_idm_mismatch);
    }
}
