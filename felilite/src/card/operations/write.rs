// felilite/src/card/operations/write.rs

use log::debug;

use crate::protocol::{Command, Response};
use crate::session::{Connected, Session};
use crate::types::{BlockData, BlockElement, BlockNumber, ServiceCode};
use crate::{Error, Result};

/// Write one block using WriteWithoutEncryption against the read/write
/// service. `data` must hold at least 16 bytes; only the first 16 are sent.
/// Short data is rejected before anything reaches the card.
pub fn write_block(
    session: &mut Session<'_, Connected>,
    block: BlockNumber,
    data: &[u8],
) -> Result<()> {
    let data = BlockData::from_slice(data)?;
    let cmd = Command::WriteWithoutEncryption {
        idm: *session.idm(),
        service: ServiceCode::READ_WRITE,
        block: BlockElement::from(block),
        data,
    };

    match session.execute(&cmd)? {
        Response::WriteWithoutEncryption { .. } => {
            debug!("wrote block {:#04x}", block.as_u8());
            Ok(())
        }
        other => Err(Error::UnexpectedResponse {
            expected: cmd.command_code() + 1,
            actual: other.response_code(),
        }),
    }
}
