// felilite/src/protocol/frame.rs

use crate::{Error, Result};

/// Largest payload that still fits the one-byte length prefix.
pub const MAX_PAYLOAD_LEN: usize = u8::MAX as usize - 1;

/// FeliCa frame helper for the NFC-F transceive link.
/// Format: [Len(1)] [Payload(n)] where Len counts itself, so Len = n + 1.
/// The reader chip adds preamble, sync code and CRC on air; none of that is
/// visible at this layer.
pub struct Frame;

impl Frame {
    /// Prefix a command payload with its length byte.
    pub fn encode(payload: &[u8]) -> Result<Vec<u8>> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(Error::InvalidParameter(format!(
                "frame payload too long: {} bytes (max {})",
                payload.len(),
                MAX_PAYLOAD_LEN
            )));
        }

        let mut out = Vec::with_capacity(payload.len() + 1);
        out.push((payload.len() + 1) as u8);
        out.extend_from_slice(payload);
        Ok(out)
    }

    /// Strip and verify the length byte, returning the payload.
    pub fn decode(frame: &[u8]) -> Result<&[u8]> {
        let Some((&len, payload)) = frame.split_first() else {
            return Err(Error::FrameLengthMismatch {
                expected: 1,
                actual: 0,
            });
        };

        if usize::from(len) != frame.len() {
            return Err(Error::FrameLengthMismatch {
                expected: usize::from(len),
                actual: frame.len(),
            });
        }

        Ok(payload)
    }
}
