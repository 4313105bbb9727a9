// felilite/src/lib.rs

//! felilite
//!
//! FeliCa Lite block access over an NFC-F link, and provisioning of FeliCa
//! Lite and MIFARE Ultralight cards into an NDEF or erased state.
#![warn(missing_docs)]

pub mod card;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod error;
pub mod ndef;
pub mod prelude;
pub mod protocol;
pub mod provision;
pub mod session;
pub mod tag;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
