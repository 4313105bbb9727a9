// felilite/src/types.rs

use crate::Error;
use crate::constants::BLOCK_SIZE;
use std::convert::TryFrom;

/// IDm - Newtype Pattern (8 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Idm([u8; 8]);

impl Idm {
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for Idm {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 8] = bytes.try_into().map_err(|_| {
            Error::InvalidParameter(format!("idm must be 8 bytes, got {}", bytes.len()))
        })?;
        Ok(Self(arr))
    }
}

/// PMm - Newtype Pattern (8 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pmm([u8; 8]);

impl Pmm {
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

/// SystemCode (u16)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SystemCode(u16);

impl SystemCode {
    pub const BROADCAST: Self = Self(0xffff);
    pub const FELICA_LITE: Self = Self(0x88b4);
    pub const NFC_F: Self = Self(0x12fc);

    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Polling carries the system code high byte first.
    pub fn to_be_bytes(&self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// Platforms report the advertised system code as two bytes, high first.
    pub fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }
}

/// ServiceCode (u16)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceCode(u16);

impl ServiceCode {
    /// Read-only access to the FeliCa Lite user blocks.
    pub const READ_ONLY: Self = Self(0x000b);
    /// Read/write access to the FeliCa Lite user blocks.
    pub const READ_WRITE: Self = Self(0x0009);

    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    pub fn to_le_bytes(&self) -> [u8; 2] {
        self.0.to_le_bytes()
    }
}

/// Block number inside a two-byte block list element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::From)]
pub struct BlockNumber(u8);

impl BlockNumber {
    pub const PAD0: Self = Self(0x00);
    pub const PAD1: Self = Self(0x01);
    pub const PAD2: Self = Self(0x02);
    pub const PAD3: Self = Self(0x03);
    pub const PAD4: Self = Self(0x04);
    pub const PAD5: Self = Self(0x05);
    pub const PAD6: Self = Self(0x06);
    pub const PAD7: Self = Self(0x07);
    pub const PAD8: Self = Self(0x08);
    pub const PAD9: Self = Self(0x09);
    pub const PAD10: Self = Self(0x0a);
    pub const PAD11: Self = Self(0x0b);
    pub const PAD12: Self = Self(0x0c);
    pub const PAD13: Self = Self(0x0d);
    pub const REG: Self = Self(0x0e);
    pub const RC: Self = Self(0x80);
    pub const MAC: Self = Self(0x81);
    pub const ID: Self = Self(0x82);
    pub const D_ID: Self = Self(0x83);
    pub const SER_C: Self = Self(0x84);
    pub const SYS_C: Self = Self(0x85);
    pub const CKV: Self = Self(0x86);
    pub const CK: Self = Self(0x87);
    pub const MC: Self = Self(0x88);

    /// Any block number, named or not.
    pub const fn new(number: u8) -> Self {
        Self(number)
    }

    /// Raw block number as sent in a block list element.
    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// PADn for n in 0..=13.
    pub fn pad(n: u8) -> Option<Self> {
        (n <= Self::PAD13.0).then_some(Self(n))
    }

    /// The block `offset` positions after this one, if it still addresses a
    /// pad block.
    pub fn pad_offset(&self, offset: usize) -> Option<Self> {
        let n = usize::from(self.0).checked_add(offset)?;
        u8::try_from(n).ok().and_then(Self::pad)
    }
}

impl std::fmt::Display for BlockNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match *self {
            Self::REG => "REG",
            Self::RC => "RC",
            Self::MAC => "MAC",
            Self::ID => "ID",
            Self::D_ID => "D_ID",
            Self::SER_C => "SER_C",
            Self::SYS_C => "SYS_C",
            Self::CKV => "CKV",
            Self::CK => "CK",
            Self::MC => "MC",
            b if b <= Self::PAD13 => return write!(f, "PAD{}", b.0),
            b => return write!(f, "{:#04x}", b.0),
        };
        f.write_str(name)
    }
}

/// BlockData (16 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockData([u8; BLOCK_SIZE]);

impl BlockData {
    pub const ZERO: Self = Self([0u8; BLOCK_SIZE]);

    pub fn from_bytes(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }

    /// Take the first 16 bytes of `bytes`; shorter input is rejected.
    pub fn from_slice(bytes: &[u8]) -> crate::Result<Self> {
        let head = bytes.get(..BLOCK_SIZE).ok_or_else(|| {
            Error::InvalidParameter(format!(
                "block data must be at least {} bytes, got {}",
                BLOCK_SIZE,
                bytes.len()
            ))
        })?;
        let mut arr = [0u8; BLOCK_SIZE];
        arr.copy_from_slice(head);
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        &self.0
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8; BLOCK_SIZE] {
        &mut self.0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_spaced(self.as_bytes())
    }
}

/// Two-byte block list element: `1 LLL SSSS` then the block number, where the
/// access mode bits are always zero for FeliCa Lite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockElement {
    pub service_index: u8,
    pub block: BlockNumber,
}

impl BlockElement {
    pub fn new(service_index: u8, block: BlockNumber) -> Self {
        Self {
            service_index,
            block,
        }
    }

    pub fn encode(&self) -> [u8; 2] {
        [0x80 | (self.service_index & 0x0f), self.block.as_u8()]
    }
}

impl From<BlockNumber> for BlockElement {
    fn from(block: BlockNumber) -> Self {
        Self::new(0, block)
    }
}
