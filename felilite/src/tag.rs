// felilite/src/tag.rs
//! Contract with the host platform's tag discovery.
//!
//! A presented [`Tag`] lists the technologies it supports and hands out a
//! per-technology handle for each of them. Only NFC-F is driven through this
//! crate's own codec; the other technologies expose the native operations the
//! dispatcher needs.

use crate::Result;
use crate::ndef::NdefMessage;
use crate::transport::Transport;
use crate::types::SystemCode;

/// Technologies the dispatcher knows how to provision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Technology {
    /// Already NDEF formatted; the platform writes messages natively.
    Ndef,
    /// Not yet NDEF formatted but the platform can format it.
    NdefFormatable,
    /// FeliCa (NFC-F); FeliCa Lite is provisioned block by block.
    NfcF,
    /// Simple memory tag with 4-byte pages.
    MifareUltralight,
}

/// Connection lifecycle shared by the native technology handles.
pub trait TagTechnology {
    fn connect(&mut self) -> Result<()>;
    fn is_connected(&self) -> bool;
    fn close(&mut self) -> Result<()>;
}

/// Handle for a tag that is already NDEF formatted.
pub trait NdefTag: TagTechnology {
    fn write_ndef_message(&mut self, message: &NdefMessage) -> Result<()>;
}

/// Handle for a tag the platform can NDEF format itself.
pub trait NdefFormatableTag: TagTechnology {
    fn format(&mut self, first_message: &NdefMessage) -> Result<()>;
}

/// Handle for a page-addressed simple memory tag.
pub trait UltralightTag: TagTechnology {
    fn write_page(&mut self, page: u8, data: &[u8; 4]) -> Result<()>;
}

/// NFC-F link: a raw transceive transport plus the system code the platform
/// saw while polling.
pub trait NfcF: Transport {
    fn system_code(&self) -> SystemCode;
}

/// A card presented by the host platform.
pub trait Tag {
    /// Card identifier; the IDm for NFC-F cards.
    fn id(&self) -> &[u8];

    fn technologies(&self) -> &[Technology];

    fn has_technology(&self, tech: Technology) -> bool {
        self.technologies().contains(&tech)
    }

    fn nfc_f(&mut self) -> Option<&mut dyn NfcF> {
        None
    }

    fn ndef(&mut self) -> Option<&mut dyn NdefTag> {
        None
    }

    fn ndef_formatable(&mut self) -> Option<&mut dyn NdefFormatableTag> {
        None
    }

    fn ultralight(&mut self) -> Option<&mut dyn UltralightTag> {
        None
    }
}
