// felilite/src/error.rs

use thiserror::Error;

use crate::types::Idm;

/// Common error type.
///
/// Frame validation failures each get their own variant so a caller (and the
/// log) can tell a short frame from a foreign card from a card-side status
/// error. Transport-level faults are kept apart from those via
/// [`Error::is_link_lost`] and [`Error::is_validation`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("frame length mismatch: expected {expected}, got {actual}")]
    FrameLengthMismatch { expected: usize, actual: usize },

    #[error("idm mismatch: expected {}, got {}", .expected.to_hex(), .actual.to_hex())]
    IdmMismatch { expected: Idm, actual: Idm },

    #[error("felica error: status=({status1:#04x}, {status2:#04x})")]
    StatusFlag { status1: u8, status2: u8 },

    #[error("unexpected response code: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedResponse { expected: u8, actual: u8 },

    #[error("block count echo mismatch: expected {expected}, got {actual}")]
    BlockCountMismatch { expected: usize, actual: usize },

    #[error("tag link lost")]
    LinkLost,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("operation timed out")]
    Timeout,

    #[error("unsupported card type: {0}")]
    UnsupportedCardType(String),

    #[error("session state violation: {0}")]
    SessionState(String),
}

impl Error {
    /// True when the tag left the field (or the link dropped) mid-operation.
    pub fn is_link_lost(&self) -> bool {
        matches!(self, Error::LinkLost)
    }

    /// True for failures detected while validating a response frame. These
    /// are recovered locally by the caller; anything else came from the
    /// transport or from misuse.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::FrameLengthMismatch { .. }
                | Error::IdmMismatch { .. }
                | Error::StatusFlag { .. }
                | Error::UnexpectedResponse { .. }
                | Error::BlockCountMismatch { .. }
        )
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
