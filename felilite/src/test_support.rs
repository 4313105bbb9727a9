//! Test support helpers intended for use by unit and integration tests.
//!
//! Response frame builders for `MockTransport` scripts, and simulated cards
//! that answer real request frames from an in-memory block or page store.
#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use crate::constants::{
    BLOCK_SIZE, CMD_POLLING, CMD_READ_WITHOUT_ENCRYPTION, CMD_WRITE_WITHOUT_ENCRYPTION,
    RESP_POLLING, RESP_READ_WITHOUT_ENCRYPTION, RESP_WRITE_WITHOUT_ENCRYPTION,
};
use crate::ndef::NdefMessage;
use crate::protocol::Frame;
use crate::tag::{
    NdefFormatableTag, NdefTag, NfcF, Tag, TagTechnology, Technology, UltralightTag,
};
use crate::transport::Transport;
use crate::types::{BlockData, BlockNumber, Idm, Pmm, SystemCode};
use crate::{Error, Result};

/// Status flags a FeliCa card returns for a rejected block access.
pub const STATUS_ACCESS_ERROR: (u8, u8) = (0x01, 0xa8);

/// Polling response frame: `[18][0x01][IDm][PMm]`.
#[doc(hidden)]
pub fn polling_response(idm: &Idm, pmm: &Pmm) -> Vec<u8> {
    let mut v = vec![18, RESP_POLLING];
    v.extend_from_slice(idm.as_bytes());
    v.extend_from_slice(pmm.as_bytes());
    v
}

/// Successful read response frame carrying `blocks`.
#[doc(hidden)]
pub fn read_response(idm: &Idm, blocks: &[BlockData]) -> Vec<u8> {
    let mut v = vec![
        (13 + BLOCK_SIZE * blocks.len()) as u8,
        RESP_READ_WITHOUT_ENCRYPTION,
    ];
    v.extend_from_slice(idm.as_bytes());
    v.extend_from_slice(&[0, 0, blocks.len() as u8]);
    for b in blocks {
        v.extend_from_slice(b.as_bytes());
    }
    v
}

/// Read error response frame (no block count, no data).
#[doc(hidden)]
pub fn read_error_response(idm: &Idm, status1: u8, status2: u8) -> Vec<u8> {
    let mut v = vec![12, RESP_READ_WITHOUT_ENCRYPTION];
    v.extend_from_slice(idm.as_bytes());
    v.extend_from_slice(&[status1, status2]);
    v
}

/// Write response frame with the given status flags.
#[doc(hidden)]
pub fn write_response(idm: &Idm, status1: u8, status2: u8) -> Vec<u8> {
    let mut v = vec![12, RESP_WRITE_WITHOUT_ENCRYPTION];
    v.extend_from_slice(idm.as_bytes());
    v.extend_from_slice(&[status1, status2]);
    v
}

/// FeliCa Lite card with block memory. Requests are parsed from the wire
/// bytes, so anything a session sends is checked the way a card would.
#[derive(Debug)]
pub struct SimulatedFelicaLite {
    pub idm: Idm,
    pub pmm: Pmm,
    pub system_code: SystemCode,
    pub blocks: BTreeMap<BlockNumber, BlockData>,
    /// Every request frame received, in order
    pub requests: Vec<Vec<u8>>,
    pub timeout: Option<Duration>,
    pub open: bool,
    pub close_calls: usize,
    /// Testing hooks
    pub fail_reads: BTreeSet<BlockNumber>,
    pub fail_writes: BTreeSet<BlockNumber>,
    pub mute_polling: bool,
    pub fail_close: bool,
    /// Exchanges answered before the link drops
    pub link_lost_after: Option<usize>,
}

impl SimulatedFelicaLite {
    /// A card in its shipped state: NDEF disabled, user blocks holding 0xaa.
    pub fn new(idm: Idm) -> Self {
        let mut blocks = BTreeMap::new();
        for n in 0..=13 {
            if let Some(b) = BlockNumber::pad(n) {
                blocks.insert(b, BlockData::from_bytes([0xaa; BLOCK_SIZE]));
            }
        }
        let mut mc = [0u8; BLOCK_SIZE];
        mc[0] = 0xff;
        mc[1] = 0xff;
        mc[2] = 0x00;
        mc[3] = 0x00;
        blocks.insert(BlockNumber::MC, BlockData::from_bytes(mc));

        Self {
            idm,
            pmm: Pmm::from_bytes([0x00, 0xf1, 0x00, 0x00, 0x00, 0x01, 0x43, 0x00]),
            system_code: SystemCode::FELICA_LITE,
            blocks,
            requests: Vec::new(),
            timeout: None,
            open: false,
            close_calls: 0,
            fail_reads: BTreeSet::new(),
            fail_writes: BTreeSet::new(),
            mute_polling: false,
            fail_close: false,
            link_lost_after: None,
        }
    }

    pub fn with_system_code(mut self, system_code: SystemCode) -> Self {
        self.system_code = system_code;
        self
    }

    pub fn block(&self, block: BlockNumber) -> BlockData {
        self.blocks.get(&block).copied().unwrap_or(BlockData::ZERO)
    }

    /// Blocks written by write requests, in order.
    pub fn written_blocks(&self) -> Vec<BlockNumber> {
        self.requests
            .iter()
            .filter(|r| r.get(1) == Some(&CMD_WRITE_WITHOUT_ENCRYPTION))
            .filter_map(|r| r.get(15).map(|&b| BlockNumber::new(b)))
            .collect()
    }

    fn answer(&mut self, payload: &[u8]) -> Result<Vec<u8>> {
        let Some(&code) = payload.first() else {
            return Err(Error::Timeout);
        };
        match code {
            CMD_POLLING => self.answer_polling(payload),
            CMD_READ_WITHOUT_ENCRYPTION => self.answer_read(payload),
            CMD_WRITE_WITHOUT_ENCRYPTION => self.answer_write(payload),
            // Unknown commands go unanswered
            _ => Err(Error::Timeout),
        }
    }

    fn addressed_to_me(&self, payload: &[u8]) -> bool {
        payload.get(1..9) == Some(&self.idm.as_bytes()[..])
    }

    fn answer_polling(&mut self, payload: &[u8]) -> Result<Vec<u8>> {
        let sc = payload
            .get(1..3)
            .map(|b| SystemCode::from_be_bytes([b[0], b[1]]))
            .ok_or(Error::Timeout)?;
        if self.mute_polling || (sc != SystemCode::BROADCAST && sc != self.system_code) {
            return Err(Error::Timeout);
        }
        Ok(polling_response(&self.idm, &self.pmm))
    }

    fn answer_read(&mut self, payload: &[u8]) -> Result<Vec<u8>> {
        if !self.addressed_to_me(payload) {
            return Err(Error::Timeout);
        }
        let services = usize::from(*payload.get(9).ok_or(Error::Timeout)?);
        let count_at = 10 + 2 * services;
        let count = usize::from(*payload.get(count_at).ok_or(Error::Timeout)?);
        let list = payload
            .get(count_at + 1..count_at + 1 + 2 * count)
            .ok_or(Error::Timeout)?;

        let mut data = Vec::with_capacity(count);
        for element in list.chunks(2) {
            let block = BlockNumber::new(element[1]);
            if self.fail_reads.contains(&block) {
                let (s1, s2) = STATUS_ACCESS_ERROR;
                return Ok(read_error_response(&self.idm, s1, s2));
            }
            data.push(self.block(block));
        }
        Ok(read_response(&self.idm, &data))
    }

    fn answer_write(&mut self, payload: &[u8]) -> Result<Vec<u8>> {
        if !self.addressed_to_me(payload) || payload.len() != 31 {
            return Err(Error::Timeout);
        }
        let block = BlockNumber::new(payload[14]);
        if self.fail_writes.contains(&block) {
            let (s1, s2) = STATUS_ACCESS_ERROR;
            return Ok(write_response(&self.idm, s1, s2));
        }
        let data = BlockData::from_slice(&payload[15..])?;
        self.blocks.insert(block, data);
        Ok(write_response(&self.idm, 0, 0))
    }
}

impl Transport for SimulatedFelicaLite {
    fn open(&mut self) -> Result<()> {
        self.open = true;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) -> Result<()> {
        self.close_calls += 1;
        self.open = false;
        if self.fail_close {
            return Err(Error::Transport("close failed".into()));
        }
        Ok(())
    }

    fn exchange(&mut self, request: &[u8]) -> Result<Vec<u8>> {
        if !self.open {
            return Err(Error::Transport("not connected".into()));
        }
        self.requests.push(request.to_vec());

        if let Some(left) = self.link_lost_after.as_mut() {
            if *left == 0 {
                return Err(Error::LinkLost);
            }
            *left -= 1;
        }

        let payload = Frame::decode(request)?;
        self.answer(payload)
    }

    fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }
}

impl NfcF for SimulatedFelicaLite {
    fn system_code(&self) -> SystemCode {
        self.system_code
    }
}

/// Ultralight tag with `page_count` 4-byte pages; writes past the end fail.
#[derive(Debug)]
pub struct SimulatedUltralight {
    pub pages: Vec<[u8; 4]>,
    pub connected: bool,
    pub close_calls: usize,
    /// Pages written, in order
    pub writes: Vec<u8>,
    pub fail_pages: BTreeSet<u8>,
    pub fail_connect: bool,
    pub fail_close: bool,
}

impl SimulatedUltralight {
    pub fn new(page_count: usize) -> Self {
        Self {
            pages: vec![[0xaa; 4]; page_count],
            connected: false,
            close_calls: 0,
            writes: Vec::new(),
            fail_pages: BTreeSet::new(),
            fail_connect: false,
            fail_close: false,
        }
    }

    pub fn page(&self, page: u8) -> Option<[u8; 4]> {
        self.pages.get(usize::from(page)).copied()
    }
}

impl TagTechnology for SimulatedUltralight {
    fn connect(&mut self) -> Result<()> {
        if self.fail_connect {
            return Err(Error::Transport("connect refused".into()));
        }
        self.connected = true;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn close(&mut self) -> Result<()> {
        self.close_calls += 1;
        self.connected = false;
        if self.fail_close {
            return Err(Error::Transport("close failed".into()));
        }
        Ok(())
    }
}

impl UltralightTag for SimulatedUltralight {
    fn write_page(&mut self, page: u8, data: &[u8; 4]) -> Result<()> {
        if !self.connected {
            return Err(Error::Transport("not connected".into()));
        }
        self.writes.push(page);
        if self.fail_pages.contains(&page) {
            return Err(Error::Transport(format!("page {} nak", page)));
        }
        let slot = self
            .pages
            .get_mut(usize::from(page))
            .ok_or_else(|| Error::Transport(format!("page {} out of range", page)))?;
        *slot = *data;
        Ok(())
    }
}

/// NDEF capable tag: records the messages written or used for formatting.
#[derive(Debug, Default)]
pub struct SimulatedNdef {
    pub connected: bool,
    pub close_calls: usize,
    pub formatted_with: Option<NdefMessage>,
    pub written: Vec<NdefMessage>,
    pub fail_io: bool,
    pub fail_close: bool,
}

impl SimulatedNdef {
    pub fn new() -> Self {
        Self::default()
    }

    fn check(&self) -> Result<()> {
        if !self.connected {
            return Err(Error::Transport("not connected".into()));
        }
        if self.fail_io {
            return Err(Error::Transport("tag io error".into()));
        }
        Ok(())
    }
}

impl TagTechnology for SimulatedNdef {
    fn connect(&mut self) -> Result<()> {
        self.connected = true;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn close(&mut self) -> Result<()> {
        self.close_calls += 1;
        self.connected = false;
        if self.fail_close {
            return Err(Error::Transport("close failed".into()));
        }
        Ok(())
    }
}

impl NdefTag for SimulatedNdef {
    fn write_ndef_message(&mut self, message: &NdefMessage) -> Result<()> {
        self.check()?;
        self.written.push(message.clone());
        Ok(())
    }
}

impl NdefFormatableTag for SimulatedNdef {
    fn format(&mut self, first_message: &NdefMessage) -> Result<()> {
        self.check()?;
        self.formatted_with = Some(first_message.clone());
        Ok(())
    }
}

/// A presented tag built from the simulated technologies above. Only the
/// technologies listed are handed out.
#[derive(Debug, Default)]
pub struct SimulatedTag {
    pub id: Vec<u8>,
    pub technologies: Vec<Technology>,
    pub felica: Option<SimulatedFelicaLite>,
    pub ultralight: Option<SimulatedUltralight>,
    pub ndef: Option<SimulatedNdef>,
}

impl SimulatedTag {
    pub fn felica_lite(card: SimulatedFelicaLite) -> Self {
        Self {
            id: card.idm.as_bytes().to_vec(),
            technologies: vec![Technology::NfcF],
            felica: Some(card),
            ..Self::default()
        }
    }

    pub fn ultralight(tag: SimulatedUltralight) -> Self {
        Self {
            id: vec![0x04, 0x5a, 0x21, 0x6b, 0x3c, 0x48, 0x80],
            technologies: vec![Technology::MifareUltralight],
            ultralight: Some(tag),
            ..Self::default()
        }
    }

    pub fn ndef(tag: SimulatedNdef) -> Self {
        Self {
            id: vec![0x04, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06],
            technologies: vec![Technology::Ndef],
            ndef: Some(tag),
            ..Self::default()
        }
    }

    pub fn ndef_formatable(tag: SimulatedNdef) -> Self {
        Self {
            technologies: vec![Technology::NdefFormatable],
            ..Self::ndef(tag)
        }
    }

    pub fn with_technology(mut self, tech: Technology) -> Self {
        if !self.technologies.contains(&tech) {
            self.technologies.push(tech);
        }
        self
    }
}

impl Tag for SimulatedTag {
    fn id(&self) -> &[u8] {
        &self.id
    }

    fn technologies(&self) -> &[Technology] {
        &self.technologies
    }

    fn nfc_f(&mut self) -> Option<&mut dyn NfcF> {
        if !self.technologies.contains(&Technology::NfcF) {
            return None;
        }
        self.felica.as_mut().map(|c| c as &mut dyn NfcF)
    }

    fn ndef(&mut self) -> Option<&mut dyn NdefTag> {
        if !self.technologies.contains(&Technology::Ndef) {
            return None;
        }
        self.ndef.as_mut().map(|t| t as &mut dyn NdefTag)
    }

    fn ndef_formatable(&mut self) -> Option<&mut dyn NdefFormatableTag> {
        if !self.technologies.contains(&Technology::NdefFormatable) {
            return None;
        }
        self.ndef.as_mut().map(|t| t as &mut dyn NdefFormatableTag)
    }

    fn ultralight(&mut self) -> Option<&mut dyn UltralightTag> {
        if !self.technologies.contains(&Technology::MifareUltralight) {
            return None;
        }
        self.ultralight.as_mut().map(|t| t as &mut dyn UltralightTag)
    }
}
