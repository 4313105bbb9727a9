// felilite/src/transport/traits.rs

use std::time::Duration;

use crate::Result;

/// Transport trait abstracts the contactless link away from protocol logic.
///
/// `exchange` is a blocking half-duplex transceive: one request frame out,
/// one response frame back. Implementations report a tag that left the field
/// as [`crate::Error::LinkLost`] and any other I/O fault as
/// [`crate::Error::Transport`] (or [`crate::Error::Timeout`]).
pub trait Transport {
    /// Open the link to the presented card.
    fn open(&mut self) -> Result<()>;

    /// Whether the link is currently open.
    fn is_open(&self) -> bool;

    /// Close the link. Closing a link that is not open is a no-op.
    fn close(&mut self) -> Result<()>;

    /// Send one request frame and wait for the response frame.
    fn exchange(&mut self, request: &[u8]) -> Result<Vec<u8>>;

    /// Set how long `exchange` waits for a response. Transports without a
    /// configurable wait may ignore it.
    fn set_timeout(&mut self, _timeout: Duration) {}

    /// Largest request frame the link accepts.
    fn max_transceive_length(&self) -> usize {
        255
    }
}
