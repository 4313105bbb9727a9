// felilite/src/protocol/responses/write.rs

use crate::constants::{RESP_WRITE_WITHOUT_ENCRYPTION, WRITE_RESPONSE_LEN};
use crate::protocol::{Frame, parser};
use crate::types::Idm;
use crate::Result;

/// Decode WriteWithoutEncryption response frame (response code = 0x09).
/// Layout: len(1) + response_code(1) + idm(8) + status1(1) + status2(1)
pub fn decode_write(data: &[u8], expected_idm: &Idm) -> Result<()> {
    parser::ensure_exact_len(data, WRITE_RESPONSE_LEN)?;
    Frame::decode(data)?;
    parser::expect_idm(data, expected_idm)?;
    parser::expect_response_code(data, RESP_WRITE_WITHOUT_ENCRYPTION)?;
    parser::expect_status_ok(data)
}
