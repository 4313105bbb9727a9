#[path = "../common/mod.rs"]
mod common;

use felilite::ndef::AttributeInfo;
use felilite::protocol::sum16;

#[test]
fn sum16_examples() {
    assert_eq!(sum16(&[]), 0x0000);
    assert_eq!(sum16(&[0x10, 0x04, 0x01, 0x00, 0x0d]), 0x0022);
    assert_eq!(sum16(&[0xff; 3]), 0x02fd);
}

#[test]
fn attribute_block_checksum_for_32_byte_message() {
    let block = AttributeInfo::with_message_len(32).unwrap().to_block();
    assert_eq!(
        block.as_bytes().to_vec(),
        common::fixtures::frame("10 04 01 00 0d 00 00 00 00 00 01 00 00 20 00 43")
    );
    assert_eq!(sum16(&block.as_bytes()[..14]), 0x0043);
}
