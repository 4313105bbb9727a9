// felilite/src/protocol/responses/polling.rs

use crate::constants::{POLLING_RESPONSE_LEN, RESP_POLLING};
use crate::protocol::{Frame, parser};
use crate::types::{Idm, Pmm};
use crate::Result;

/// Decode a Polling response frame (response code = 0x01)
/// Layout: len(1) + response_code(1) + idm(8) + pmm(8)
///
/// Request code 0 is always sent, so no system code trails the PMm.
pub fn decode_polling(data: &[u8], expected_idm: &Idm) -> Result<Pmm> {
    parser::ensure_exact_len(data, POLLING_RESPONSE_LEN)?;
    Frame::decode(data)?;
    parser::expect_idm(data, expected_idm)?;
    parser::expect_response_code(data, RESP_POLLING)?;

    parser::pmm_at(data, 10)
}
