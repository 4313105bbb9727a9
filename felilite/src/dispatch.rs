// felilite/src/dispatch.rs
//! Route a presented tag to the provisioning routine for the first
//! technology it exposes, in the priority order the [`Config`] gives.

use log::{error, info, warn};

use crate::config::{Config, Intent};
use crate::ndef::NdefMessage;
use crate::provision::{FormatReport, UltralightReport, felica, ultralight};
use crate::session::{Connected, Session};
use crate::tag::{Tag, TagTechnology, Technology};
use crate::types::SystemCode;
use crate::{Error, Result};

/// What a successful dispatch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// An empty NDEF message was written to an NDEF tag.
    NdefWritten,
    /// The platform NDEF formatted the tag with an empty message.
    NdefFormatted,
    /// A FeliCa Lite card was formatted or raw formatted.
    FelicaLite(FormatReport),
    /// A MIFARE Ultralight tag was raw formatted.
    Ultralight(UltralightReport),
}

impl Outcome {
    /// Technology the tag was handled as.
    pub fn technology(&self) -> Technology {
        match self {
            Outcome::NdefWritten => Technology::Ndef,
            Outcome::NdefFormatted => Technology::NdefFormatable,
            Outcome::FelicaLite(_) => Technology::NfcF,
            Outcome::Ultralight(_) => Technology::MifareUltralight,
        }
    }
}

/// Combine a run's result with the close that followed it. A close failure
/// fails an otherwise successful run; after a failed run it is only logged.
fn settle<R>(result: Result<R>, closed: Result<()>) -> Result<R> {
    match (result, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => {
            error!("close failed: {}", e);
            Err(e)
        }
        (Err(e), closed) => {
            if let Err(ce) = closed {
                warn!("close after failure also failed: {}", ce);
            }
            Err(e)
        }
    }
}

/// Connect, run `f`, and close whatever `f` returned.
fn with_connection<T, R>(tech: &mut T, f: impl FnOnce(&mut T) -> Result<R>) -> Result<R>
where
    T: TagTechnology + ?Sized,
{
    tech.connect()?;
    let result = f(tech);
    settle(result, tech.close())
}

fn missing_handle(tech: Technology) -> Error {
    Error::UnsupportedCardType(format!("tag lists {} but exposes no handle", tech))
}

/// Routes presented tags to a provisioning routine.
pub struct Dispatcher<'c> {
    config: &'c Config,
}

impl<'c> Dispatcher<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self { config }
    }

    /// First technology in the configured order that `tag` exposes.
    pub fn select(&self, tag: &dyn Tag, intent: Intent) -> Option<Technology> {
        self.config
            .technologies(intent)
            .iter()
            .copied()
            .find(|&tech| tag.has_technology(tech))
    }

    /// Provision `tag` for `intent`.
    pub fn dispatch(&self, tag: &mut dyn Tag, intent: Intent) -> Result<Outcome> {
        let Some(tech) = self.select(tag, intent) else {
            error!("{}: no handled technology on tag", intent);
            return Err(Error::UnsupportedCardType(format!(
                "no technology handled for {}",
                intent
            )));
        };
        info!("{}: handling tag as {}", intent, tech);

        match (intent, tech) {
            (Intent::NdefFormat, Technology::Ndef) => {
                let ndef = tag.ndef().ok_or_else(|| missing_handle(tech))?;
                with_connection(ndef, |t| t.write_ndef_message(&NdefMessage::empty()))?;
                Ok(Outcome::NdefWritten)
            }
            (Intent::NdefFormat, Technology::NdefFormatable) => {
                let formatable = tag.ndef_formatable().ok_or_else(|| missing_handle(tech))?;
                with_connection(formatable, |t| t.format(&NdefMessage::empty()))?;
                Ok(Outcome::NdefFormatted)
            }
            (_, Technology::NfcF) => self.felica_lite(tag, intent).map(Outcome::FelicaLite),
            (Intent::RawFormat, Technology::MifareUltralight) => {
                let ul = tag.ultralight().ok_or_else(|| missing_handle(tech))?;
                ultralight::raw_format(ul).map(Outcome::Ultralight)
            }
            (intent, tech) => Err(Error::UnsupportedCardType(format!(
                "{} has no {} handler",
                intent, tech
            ))),
        }
    }

    fn felica_lite(&self, tag: &mut dyn Tag, intent: Intent) -> Result<FormatReport> {
        let session = Session::acquire(tag)?.with_timeout(self.config.response_timeout());
        let mut session = session.connect()?;

        let result = Self::provision_felica_lite(&mut session, intent);
        settle(result, session.close())
    }

    fn provision_felica_lite(
        session: &mut Session<'_, Connected>,
        intent: Intent,
    ) -> Result<FormatReport> {
        felica::ensure_felica_lite(session)?;

        session
            .poll(SystemCode::FELICA_LITE)
            .inspect_err(|e| error!("felica lite polling failed: {}", e))?;

        match intent {
            Intent::NdefFormat => session.format(Some(&NdefMessage::empty().to_bytes())),
            Intent::RawFormat => session.raw_format(),
        }
    }
}
