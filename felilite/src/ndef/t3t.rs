// felilite/src/ndef/t3t.rs
//! Type 3 Tag attribute information block (written to PAD0).

use crate::constants::{BLOCK_SIZE, MAX_INITIAL_MESSAGE_LEN, NDEF_CONTENT_BLOCKS};
use crate::protocol::sum16;
use crate::types::BlockData;
use crate::{Error, Result};

/// Mapping version 1.0
pub const VERSION: u8 = 0x10;
/// Blocks per read
pub const NBR: u8 = 0x04;
/// Blocks per write
pub const NBW: u8 = 0x01;
pub const WRITE_F_DONE: u8 = 0x00;
pub const RW_FLAG_READ_WRITE: u8 = 0x01;

/// Bytes covered by the checksum
const CHECKSUM_SPAN: usize = 14;

/// Attribute information for a FeliCa Lite NDEF layout: 13 content blocks,
/// read/write access, and the length of the stored message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeInfo {
    ln: u32,
}

impl AttributeInfo {
    /// Attribute block announcing an empty NDEF area.
    pub fn empty() -> Self {
        Self { ln: 0 }
    }

    /// Attribute block announcing a message of `len` bytes. Lengths beyond
    /// the 13 content blocks are rejected.
    pub fn with_message_len(len: usize) -> Result<Self> {
        if len > MAX_INITIAL_MESSAGE_LEN {
            return Err(Error::InvalidParameter(format!(
                "ndef message too long: {} bytes (max {})",
                len, MAX_INITIAL_MESSAGE_LEN
            )));
        }
        Ok(Self { ln: len as u32 })
    }

    pub fn message_len(&self) -> usize {
        self.ln as usize
    }

    /// Sum of bytes 0..=13.
    pub fn checksum(&self) -> u16 {
        sum16(&self.header_bytes()[..CHECKSUM_SPAN])
    }

    fn header_bytes(&self) -> [u8; BLOCK_SIZE] {
        let nmaxb = (NDEF_CONTENT_BLOCKS as u16).to_be_bytes();
        let ln = self.ln.to_be_bytes();
        [
            VERSION,
            NBR,
            NBW,
            nmaxb[0],
            nmaxb[1],
            0x00,
            0x00,
            0x00,
            0x00,
            WRITE_F_DONE,
            RW_FLAG_READ_WRITE,
            ln[1],
            ln[2],
            ln[3],
            0x00,
            0x00,
        ]
    }

    /// The 16-byte PAD0 image with the checksum in place.
    pub fn to_block(&self) -> BlockData {
        let mut bytes = self.header_bytes();
        let sum = self.checksum().to_be_bytes();
        bytes[CHECKSUM_SPAN] = sum[0];
        bytes[CHECKSUM_SPAN + 1] = sum[1];
        BlockData::from_bytes(bytes)
    }
}

impl Default for AttributeInfo {
    fn default() -> Self {
        Self::empty()
    }
}
