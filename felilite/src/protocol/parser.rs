// felilite/src/protocol/parser.rs
//! Bounds-checked field readers shared by the response decoders. Offsets are
//! relative to the full response frame, length byte included.

use crate::types::{Idm, Pmm};
use crate::{Error, Result};

/// Offset of the response code in every response frame.
pub const RESPONSE_CODE_AT: usize = 1;
/// Offset of the echoed IDm in every response frame.
pub const IDM_AT: usize = 2;
/// Offset of status flag 1 (status flag 2 follows).
pub const STATUS_AT: usize = 10;

/// Ensure the frame has exactly `expected` bytes.
pub fn ensure_exact_len(data: &[u8], expected: usize) -> Result<()> {
    if data.len() != expected {
        return Err(Error::FrameLengthMismatch {
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Ensure the slice has at least `min` bytes.
pub fn ensure_len(data: &[u8], min: usize) -> Result<()> {
    if data.len() < min {
        return Err(Error::FrameLengthMismatch {
            expected: min,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Return a subslice with bounds checking.
pub fn slice_at(data: &[u8], idx: usize, len: usize) -> Result<&[u8]> {
    ensure_len(data, idx + len)?;
    Ok(&data[idx..idx + len])
}

/// Read a single byte at `idx` with bounds checking.
pub fn byte_at(data: &[u8], idx: usize) -> Result<u8> {
    ensure_len(data, idx + 1)?;
    Ok(data[idx])
}

/// Parse an Idm (8 bytes) at `start` index with bounds checking.
pub fn idm_at(data: &[u8], start: usize) -> Result<Idm> {
    let s = slice_at(data, start, 8)?;
    Idm::try_from(s)
}

/// Parse a PMm (8 bytes) at `start` index with bounds checking.
pub fn pmm_at(data: &[u8], start: usize) -> Result<Pmm> {
    let s = slice_at(data, start, 8)?;
    let mut arr = [0u8; 8];
    arr.copy_from_slice(s);
    Ok(Pmm::from_bytes(arr))
}

/// Ensure the echoed IDm equals the one the command was addressed to.
pub fn expect_idm(data: &[u8], expected: &Idm) -> Result<()> {
    let actual = idm_at(data, IDM_AT)?;
    if actual != *expected {
        return Err(Error::IdmMismatch {
            expected: *expected,
            actual,
        });
    }
    Ok(())
}

/// Ensure the response code equals `expected`.
pub fn expect_response_code(data: &[u8], expected: u8) -> Result<()> {
    let actual = byte_at(data, RESPONSE_CODE_AT)?;
    if actual != expected {
        return Err(Error::UnexpectedResponse { expected, actual });
    }
    Ok(())
}

/// Ensure both status flags are zero.
pub fn expect_status_ok(data: &[u8]) -> Result<()> {
    let status1 = byte_at(data, STATUS_AT)?;
    let status2 = byte_at(data, STATUS_AT + 1)?;
    if status1 != 0 || status2 != 0 {
        return Err(Error::StatusFlag { status1, status2 });
    }
    Ok(())
}
