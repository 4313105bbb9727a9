// felilite/src/protocol/commands/mod.rs

pub mod polling;
pub mod read;
pub mod write;

pub use polling::encode_polling;
pub use read::encode_read;
pub use write::encode_write;

use crate::constants::{
    CMD_POLLING, CMD_READ_WITHOUT_ENCRYPTION, CMD_WRITE_WITHOUT_ENCRYPTION, MAX_READ_BLOCKS,
};
use crate::types::{BlockData, BlockElement, Idm, ServiceCode, SystemCode};

/// High-level Command enum. New commands should be added here and
/// their per-command encoder placed in `protocol::commands::<name>.rs`.
#[derive(Debug, Clone)]
pub enum Command {
    Polling {
        system_code: SystemCode,
        request_code: u8,
        time_slot: u8,
    },
    ReadWithoutEncryption {
        idm: Idm,
        services: Vec<ServiceCode>,
        blocks: Vec<BlockElement>,
    },
    WriteWithoutEncryption {
        idm: Idm,
        service: ServiceCode,
        block: BlockElement,
        data: BlockData,
    },
}

impl Command {
    /// FeliCa command code.
    pub fn command_code(&self) -> u8 {
        match self {
            Self::Polling { .. } => CMD_POLLING,
            Self::ReadWithoutEncryption { .. } => CMD_READ_WITHOUT_ENCRYPTION,
            Self::WriteWithoutEncryption { .. } => CMD_WRITE_WITHOUT_ENCRYPTION,
        }
    }

    /// Number of blocks the card is expected to return for this command.
    pub fn response_block_count(&self) -> usize {
        match self {
            Self::ReadWithoutEncryption { blocks, .. } => blocks.len().min(MAX_READ_BLOCKS),
            _ => 0,
        }
    }

    /// Encode the command into the raw payload (command code + params).
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Polling {
                system_code,
                request_code,
                time_slot,
            } => encode_polling(*system_code, *request_code, *time_slot),
            Self::ReadWithoutEncryption {
                idm,
                services,
                blocks,
            } => encode_read(*idm, &services[..], &blocks[..]),
            Self::WriteWithoutEncryption {
                idm,
                service,
                block,
                data,
            } => encode_write(*idm, *service, *block, *data),
        }
    }
}
