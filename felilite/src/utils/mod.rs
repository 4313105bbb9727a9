//! Small helpers shared across the crate: hex rendering for logs and
//! response-wait durations.

pub mod hex;
pub mod timeout;

pub use self::hex::*;
pub use self::timeout::*;
