// felilite/src/protocol/commands/read.rs

use crate::constants::{CMD_READ_WITHOUT_ENCRYPTION, MAX_READ_BLOCKS};
use crate::types::{BlockElement, Idm, ServiceCode};

/// Encode ReadWithoutEncryption command payload (FeliCa command code 0x06)
/// Layout: command_code(1) + idm(8) + number_of_services(1) + service_code_list(2*N)
///         + number_of_blocks(1) + block_list(2*M)
///
/// FeliCa Lite answers at most four blocks per request; entries past the
/// fourth are dropped here. Callers that care should check the length first.
pub fn encode_read(idm: Idm, services: &[ServiceCode], blocks: &[BlockElement]) -> Vec<u8> {
    let blocks = &blocks[..blocks.len().min(MAX_READ_BLOCKS)];

    let mut buf = Vec::with_capacity(1 + 8 + 1 + services.len() * 2 + 1 + blocks.len() * 2);
    buf.push(CMD_READ_WITHOUT_ENCRYPTION);
    buf.extend_from_slice(idm.as_bytes());
    buf.push(services.len() as u8);

    for svc in services {
        buf.extend_from_slice(&svc.to_le_bytes());
    }

    buf.push(blocks.len() as u8);
    for blk in blocks {
        buf.extend_from_slice(&blk.encode());
    }

    buf
}
