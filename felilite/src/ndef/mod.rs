// felilite/src/ndef/mod.rs
//! Minimal NDEF message model: enough to serialize the messages written during
//! provisioning. Parsing is not needed by the provisioning flow.

pub mod t3t;

pub use t3t::AttributeInfo;

/// Type Name Format, the low three bits of the record header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tnf {
    Empty = 0x00,
    WellKnown = 0x01,
    MimeMedia = 0x02,
    AbsoluteUri = 0x03,
    External = 0x04,
    Unknown = 0x05,
    Unchanged = 0x06,
}

const FLAG_MB: u8 = 0x80;
const FLAG_ME: u8 = 0x40;
const FLAG_SR: u8 = 0x10;
const FLAG_IL: u8 = 0x08;

/// One NDEF record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NdefRecord {
    pub tnf: Tnf,
    pub record_type: Vec<u8>,
    pub id: Vec<u8>,
    pub payload: Vec<u8>,
}

impl NdefRecord {
    pub fn new(tnf: Tnf, record_type: &[u8], id: &[u8], payload: &[u8]) -> Self {
        Self {
            tnf,
            record_type: record_type.to_vec(),
            id: id.to_vec(),
            payload: payload.to_vec(),
        }
    }

    /// Record with TNF Empty and no type, id or payload.
    pub fn empty() -> Self {
        Self::new(Tnf::Empty, &[], &[], &[])
    }

    /// Well-known text record ("T") with a language code and UTF-8 text.
    pub fn text(lang: &str, text: &str) -> Self {
        let lang = lang.as_bytes();
        let mut payload = Vec::with_capacity(1 + lang.len() + text.len());
        // status byte: UTF-8, language code length in the low six bits
        payload.push((lang.len() & 0x3f) as u8);
        payload.extend_from_slice(lang);
        payload.extend_from_slice(text.as_bytes());
        Self::new(Tnf::WellKnown, b"T", &[], &payload)
    }

    fn is_short(&self) -> bool {
        self.payload.len() < 256
    }

    fn write_to(&self, out: &mut Vec<u8>, first: bool, last: bool) {
        let mut header = self.tnf as u8;
        if first {
            header |= FLAG_MB;
        }
        if last {
            header |= FLAG_ME;
        }
        if self.is_short() {
            header |= FLAG_SR;
        }
        if !self.id.is_empty() {
            header |= FLAG_IL;
        }

        out.push(header);
        out.push(self.record_type.len() as u8);
        if self.is_short() {
            out.push(self.payload.len() as u8);
        } else {
            out.extend_from_slice(&(self.payload.len() as u32).to_be_bytes());
        }
        if !self.id.is_empty() {
            out.push(self.id.len() as u8);
        }
        out.extend_from_slice(&self.record_type);
        out.extend_from_slice(&self.id);
        out.extend_from_slice(&self.payload);
    }
}

/// An ordered, non-empty list of records.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NdefMessage {
    records: Vec<NdefRecord>,
}

impl NdefMessage {
    /// Build a message; an empty record list yields the empty message.
    pub fn new(records: Vec<NdefRecord>) -> Self {
        if records.is_empty() {
            return Self::empty();
        }
        Self { records }
    }

    /// Message holding a single empty record.
    pub fn empty() -> Self {
        Self {
            records: vec![NdefRecord::empty()],
        }
    }

    pub fn records(&self) -> &[NdefRecord] {
        &self.records
    }

    /// Serialize to the NDEF wire form.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        let last = self.records.len().saturating_sub(1);
        for (i, record) in self.records.iter().enumerate() {
            record.write_to(&mut out, i == 0, i == last);
        }
        out
    }

    pub fn byte_len(&self) -> usize {
        self.to_bytes().len()
    }
}

impl Default for NdefMessage {
    fn default() -> Self {
        Self::empty()
    }
}
