// felilite/src/protocol/responses/read.rs

use crate::constants::{BLOCK_SIZE, READ_RESPONSE_BASE_LEN, RESP_READ_WITHOUT_ENCRYPTION};
use crate::protocol::{Frame, parser};
use crate::types::{BlockData, Idm};
use crate::{Error, Result};

/// Offset of the echoed block count.
const BLOCK_COUNT_AT: usize = 12;

/// Decode ReadWithoutEncryption response frame (response code = 0x07)
/// Layout: len(1) + response_code(1) + idm(8) + status1(1) + status2(1)
///         + block_count(1) + blocks(N*16)
///
/// The frame length is checked before anything else, so a short frame is
/// reported as such even when it also carries an error status.
pub fn decode_read(data: &[u8], expected_idm: &Idm, block_count: usize) -> Result<Vec<BlockData>> {
    let expected_len = READ_RESPONSE_BASE_LEN + BLOCK_SIZE * block_count;
    parser::ensure_exact_len(data, expected_len)?;
    Frame::decode(data)?;
    parser::expect_idm(data, expected_idm)?;
    parser::expect_response_code(data, RESP_READ_WITHOUT_ENCRYPTION)?;
    parser::expect_status_ok(data)?;

    let echoed = usize::from(parser::byte_at(data, BLOCK_COUNT_AT)?);
    if echoed != block_count {
        return Err(Error::BlockCountMismatch {
            expected: block_count,
            actual: echoed,
        });
    }

    let mut blocks = Vec::with_capacity(block_count);
    for i in 0..block_count {
        let offset = READ_RESPONSE_BASE_LEN + i * BLOCK_SIZE;
        let slice = parser::slice_at(data, offset, BLOCK_SIZE)?;
        blocks.push(BlockData::from_slice(slice)?);
    }

    Ok(blocks)
}
