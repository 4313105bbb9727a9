// felilite/src/protocol/commands/write.rs

use crate::constants::CMD_WRITE_WITHOUT_ENCRYPTION;
use crate::types::{BlockData, BlockElement, Idm, ServiceCode};

/// Encode WriteWithoutEncryption command payload (FeliCa command code 0x08)
/// Layout (single-block, the only form FeliCa Lite accepts):
/// command_code(1) + idm(8) + number_of_services(1) + service_code(2)
///     + number_of_blocks(1) + block_list(2) + block_data(16)
pub fn encode_write(idm: Idm, service: ServiceCode, block: BlockElement, data: BlockData) -> Vec<u8> {
    let mut buf = Vec::with_capacity(31);
    buf.push(CMD_WRITE_WITHOUT_ENCRYPTION);
    buf.extend_from_slice(idm.as_bytes());

    buf.push(1);
    buf.extend_from_slice(&service.to_le_bytes());

    buf.push(1);
    buf.extend_from_slice(&block.encode());

    buf.extend_from_slice(data.as_bytes());
    buf
}
