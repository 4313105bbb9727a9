// felilite/src/constants.rs
//! Common protocol constants used across the crate

/// Size of a FeliCa Lite block in bytes
pub const BLOCK_SIZE: usize = 16;

/// FeliCa Lite accepts at most four blocks per Read Without Encryption
pub const MAX_READ_BLOCKS: usize = 4;

/// Command codes
pub const CMD_POLLING: u8 = 0x00;
pub const CMD_READ_WITHOUT_ENCRYPTION: u8 = 0x06;
pub const CMD_WRITE_WITHOUT_ENCRYPTION: u8 = 0x08;

/// Response codes (command code + 1)
pub const RESP_POLLING: u8 = 0x01;
pub const RESP_READ_WITHOUT_ENCRYPTION: u8 = 0x07;
pub const RESP_WRITE_WITHOUT_ENCRYPTION: u8 = 0x09;

/// Polling request: len + code + system code(2) + request code + time slot
pub const POLLING_REQUEST_LEN: usize = 6;
/// Polling response: len + code + idm(8) + pmm(8)
pub const POLLING_RESPONSE_LEN: usize = 18;
/// Read request without block list: len + code + idm(8) + svc num + svc(2) + blk num
pub const READ_REQUEST_BASE_LEN: usize = 14;
/// Read response without block data: len + code + idm(8) + status(2) + blk num
pub const READ_RESPONSE_BASE_LEN: usize = 13;
/// Single-block write request
pub const WRITE_REQUEST_LEN: usize = 32;
/// Write response: len + code + idm(8) + status(2)
pub const WRITE_RESPONSE_LEN: usize = 12;

/// Offset of the NDEF system flag inside the MC block
pub const MC_NDEF_FLAG_OFFSET: usize = 3;
/// MC[3] value for an NDEF formatted card
pub const MC_NDEF_ENABLED: u8 = 0x01;
/// MC[3] value for a raw card
pub const MC_NDEF_DISABLED: u8 = 0x00;

/// Largest initial NDEF message that `format` will lay out (13 blocks of 16)
pub const MAX_INITIAL_MESSAGE_LEN: usize = 208;

/// Number of NDEF content blocks following the attribute block (PAD1..=PAD13)
pub const NDEF_CONTENT_BLOCKS: usize = 13;
