// felilite/src/session/handle.rs

use std::marker::PhantomData;
use std::time::Duration;

use log::{error, trace, warn};

use crate::card::CardInfo;
use crate::card::operations;
use crate::protocol::codec;
use crate::protocol::{Command, Response};
use crate::provision::{self, FormatReport};
use crate::tag::{NfcF, Tag, Technology};
use crate::types::{BlockData, BlockNumber, Idm, Pmm, SystemCode};
use crate::utils::{Hex, default_response_timeout};
use crate::{Error, Result};

/// Bound to a card, link not yet opened.
pub struct Unbound;
/// Link open, commands may be exchanged.
pub struct Connected;

/// Exclusive handle on one presented FeliCa card.
///
/// The handle borrows the NFC-F link mutably for its whole life, so no second
/// session can exist for the same card. `connect` moves it to `Connected`;
/// `close` consumes it. Dropping a connected session closes the link.
pub struct Session<'t, State = Unbound> {
    link: Option<&'t mut dyn NfcF>,
    idm: Idm,
    system_code: SystemCode,
    timeout: Duration,
    _state: PhantomData<State>,
}

impl<'t> Session<'t, Unbound> {
    /// Bind a session to a presented tag. Fails when the tag has no NFC-F
    /// technology or handle, when its identifier is not an IDm, or when its
    /// link is already open.
    pub fn acquire(tag: &'t mut dyn Tag) -> Result<Self> {
        if !tag.has_technology(Technology::NfcF) {
            error!("acquire: not NFC-F");
            return Err(Error::UnsupportedCardType("tag does not expose NFC-F".into()));
        }
        let idm = Idm::try_from(tag.id());
        let link = tag
            .nfc_f()
            .ok_or_else(|| Error::UnsupportedCardType("tag has no NFC-F handle".into()))?;
        Self::new(link, idm?)
    }

    /// Bind a session directly to an NFC-F link for the card `idm`.
    pub fn new(link: &'t mut dyn NfcF, idm: Idm) -> Result<Self> {
        if link.is_open() {
            error!("acquire: already connected");
            return Err(Error::SessionState("link already connected".into()));
        }
        let system_code = link.system_code();
        Ok(Self {
            link: Some(link),
            idm,
            system_code,
            timeout: default_response_timeout(),
            _state: PhantomData,
        })
    }

    /// Response wait handed to the transport on connect.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Open the link. Returns a connected session on success.
    pub fn connect(mut self) -> Result<Session<'t, Connected>> {
        let link = self
            .link
            .take()
            .ok_or_else(|| Error::SessionState("session already released".into()))?;
        link.set_timeout(self.timeout);
        link.open()?;

        Ok(Session {
            link: Some(link),
            idm: self.idm,
            system_code: self.system_code,
            timeout: self.timeout,
            _state: PhantomData,
        })
    }
}

impl<'t, State> Session<'t, State> {
    /// IDm every command is addressed to.
    pub fn idm(&self) -> &Idm {
        &self.idm
    }

    /// System code the platform reported for this card.
    pub fn system_code(&self) -> SystemCode {
        self.system_code
    }

    pub fn card_info(&self) -> CardInfo {
        CardInfo::new(self.idm, self.system_code)
    }

    /// Release the card. The link is closed if open; the handle is gone
    /// whatever the transport reports.
    pub fn close(mut self) -> Result<()> {
        match self.link.take() {
            Some(link) if link.is_open() => link.close(),
            _ => Ok(()),
        }
    }
}

impl<State> Drop for Session<'_, State> {
    fn drop(&mut self) {
        if let Some(link) = self.link.take() {
            if link.is_open() {
                if let Err(e) = link.close() {
                    warn!("session dropped: close failed: {}", e);
                }
            }
        }
    }
}

impl Session<'_, Connected> {
    /// Send one raw frame and return the raw response.
    pub fn exchange(&mut self, request: &[u8]) -> Result<Vec<u8>> {
        let link = self
            .link
            .as_deref_mut()
            .ok_or_else(|| Error::SessionState("session already released".into()))?;
        if !link.is_open() {
            return Err(Error::SessionState("link is not open".into()));
        }
        if request.len() > link.max_transceive_length() {
            return Err(Error::InvalidParameter(format!(
                "request of {} bytes exceeds link limit of {}",
                request.len(),
                link.max_transceive_length()
            )));
        }

        trace!(">> {}", Hex(request));
        let response = link.exchange(request)?;
        trace!("<< {}", Hex(&response));
        Ok(response)
    }

    /// Execute a command and return the validated Response. Validation
    /// failures are logged with the check that failed.
    pub fn execute(&mut self, cmd: &Command) -> Result<Response> {
        let frame = codec::encode_command_frame(cmd)?;
        let raw = self.exchange(&frame)?;
        let idm = self.idm;

        codec::decode_response_frame(cmd, &idm, &raw).inspect_err(|e| {
            let check = match e {
                Error::FrameLengthMismatch { .. } => "length",
                Error::IdmMismatch { .. } => "idm",
                Error::UnexpectedResponse { .. } => "response code",
                Error::StatusFlag { .. } => "status",
                Error::BlockCountMismatch { .. } => "block count",
                _ => "decode",
            };
            error!(
                "command {:#04x}: {} check failed: {}",
                cmd.command_code(),
                check,
                e
            );
        })
    }

    /// Poll for `system_code` and confirm this card answered.
    pub fn poll(&mut self, system_code: SystemCode) -> Result<Pmm> {
        operations::poll(self, system_code)
    }

    /// Read one block.
    pub fn read_block(&mut self, block: BlockNumber) -> Result<BlockData> {
        operations::read_block(self, block)
    }

    /// Read up to four blocks in one command.
    pub fn read_blocks(&mut self, blocks: &[BlockNumber]) -> Result<Vec<BlockData>> {
        operations::read_blocks(self, blocks)
    }

    /// Write one block from the first 16 bytes of `data`.
    pub fn write_block(&mut self, block: BlockNumber, data: &[u8]) -> Result<()> {
        operations::write_block(self, block, data)
    }

    /// Whether the platform saw the FeliCa Lite system code.
    pub fn is_felica_lite_system(&self) -> bool {
        provision::felica::is_felica_lite_system(self)
    }

    /// NDEF format, optionally laying out `initial_message` (serialized).
    pub fn format(&mut self, initial_message: Option<&[u8]>) -> Result<FormatReport> {
        provision::felica::format(self, initial_message)
    }

    /// Disable NDEF and erase the user blocks.
    pub fn raw_format(&mut self) -> Result<FormatReport> {
        provision::felica::raw_format(self)
    }
}
