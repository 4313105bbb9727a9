// felilite/src/card/operations/read.rs

use log::{debug, warn};

use crate::constants::MAX_READ_BLOCKS;
use crate::protocol::{Command, Response};
use crate::session::{Connected, Session};
use crate::types::{BlockData, BlockElement, BlockNumber, ServiceCode};
use crate::{Error, Result};

/// Read up to four blocks using ReadWithoutEncryption against the read-only
/// service. Longer lists are truncated to the first four.
pub fn read_blocks(
    session: &mut Session<'_, Connected>,
    blocks: &[BlockNumber],
) -> Result<Vec<BlockData>> {
    if blocks.is_empty() {
        return Err(Error::InvalidParameter("block list is empty".into()));
    }
    if blocks.len() > MAX_READ_BLOCKS {
        warn!(
            "read: {} blocks requested, only the first {} are read",
            blocks.len(),
            MAX_READ_BLOCKS
        );
    }

    let elements: Vec<BlockElement> = blocks
        .iter()
        .take(MAX_READ_BLOCKS)
        .map(|&b| BlockElement::from(b))
        .collect();
    let cmd = Command::ReadWithoutEncryption {
        idm: *session.idm(),
        services: vec![ServiceCode::READ_ONLY],
        blocks: elements,
    };

    match session.execute(&cmd)? {
        Response::ReadWithoutEncryption { blocks, .. } => {
            debug!("read {} block(s)", blocks.len());
            Ok(blocks)
        }
        other => Err(Error::UnexpectedResponse {
            expected: cmd.command_code() + 1,
            actual: other.response_code(),
        }),
    }
}

/// Convenience helper that reads a single block.
pub fn read_block(session: &mut Session<'_, Connected>, block: BlockNumber) -> Result<BlockData> {
    let blocks = read_blocks(session, &[block])?;
    blocks.into_iter().next().ok_or(Error::BlockCountMismatch {
        expected: 1,
        actual: 0,
    })
}
