// felilite/src/prelude.rs

pub use crate::card::CardInfo;
pub use crate::config::{Config, ConfigBuilder, Intent};
pub use crate::dispatch::{Dispatcher, Outcome};
pub use crate::ndef::{NdefMessage, NdefRecord, Tnf};
pub use crate::protocol::{Command, Response};
pub use crate::provision::{FormatReport, Tally, UltralightReport};
pub use crate::session::{Connected, Session, Unbound};
pub use crate::tag::{
    NdefFormatableTag, NdefTag, NfcF, Tag, TagTechnology, Technology, UltralightTag,
};
pub use crate::transport::Transport;
pub use crate::{
    BlockData, BlockElement, BlockNumber, Error, Idm, Pmm, Result, ServiceCode, SystemCode,
};

// Re-export small utilities for convenience
pub use crate::utils::{Hex, bytes_to_hex, bytes_to_hex_spaced, default_response_timeout, ms};
