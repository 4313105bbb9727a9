// felilite/src/protocol/responses/mod.rs

pub mod polling;
pub mod read;
pub mod write;

pub use polling::decode_polling;
pub use read::decode_read;
pub use write::decode_write;

use crate::constants::{
    CMD_POLLING, CMD_READ_WITHOUT_ENCRYPTION, CMD_WRITE_WITHOUT_ENCRYPTION, RESP_POLLING,
    RESP_READ_WITHOUT_ENCRYPTION, RESP_WRITE_WITHOUT_ENCRYPTION,
};
use crate::types::{BlockData, Idm, Pmm};

/// High-level Response enum. Per-command decoders live in
/// `protocol::responses::<name>.rs` and are dispatched here.
#[derive(Debug, Clone)]
pub enum Response {
    Polling { idm: Idm, pmm: Pmm },
    ReadWithoutEncryption { idm: Idm, blocks: Vec<BlockData> },
    WriteWithoutEncryption { idm: Idm },
}

impl Response {
    /// Decode a full response frame (length byte included) for the given
    /// command code. `expected_idm` is the card the command was sent to and
    /// `block_count` the number of blocks requested (reads only).
    pub fn decode(
        expected_cmd: u8,
        data: &[u8],
        expected_idm: &Idm,
        block_count: usize,
    ) -> crate::Result<Self> {
        match expected_cmd {
            CMD_POLLING => {
                let pmm = polling::decode_polling(data, expected_idm)?;
                Ok(Self::Polling {
                    idm: *expected_idm,
                    pmm,
                })
            }
            CMD_READ_WITHOUT_ENCRYPTION => {
                let blocks = read::decode_read(data, expected_idm, block_count)?;
                Ok(Self::ReadWithoutEncryption {
                    idm: *expected_idm,
                    blocks,
                })
            }
            CMD_WRITE_WITHOUT_ENCRYPTION => {
                write::decode_write(data, expected_idm)?;
                Ok(Self::WriteWithoutEncryption { idm: *expected_idm })
            }
            _ => {
                let actual = data.get(1).copied().unwrap_or(0);
                Err(crate::Error::UnexpectedResponse {
                    expected: expected_cmd.wrapping_add(1),
                    actual,
                })
            }
        }
    }

    /// Return the response code byte associated with this response variant.
    pub fn response_code(&self) -> u8 {
        match self {
            Response::Polling { .. } => RESP_POLLING,
            Response::ReadWithoutEncryption { .. } => RESP_READ_WITHOUT_ENCRYPTION,
            Response::WriteWithoutEncryption { .. } => RESP_WRITE_WITHOUT_ENCRYPTION,
        }
    }
}
