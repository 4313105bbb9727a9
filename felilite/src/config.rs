// felilite/src/config.rs
//! Dispatcher configuration: which technologies are tried for each intent and
//! how long the NFC-F link waits for a response.

use std::time::Duration;

use crate::tag::Technology;
use crate::utils::default_response_timeout;
use crate::{Error, Result};

/// What the caller wants done to the presented card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Intent {
    /// Leave the card NDEF formatted with an empty message.
    NdefFormat,
    /// Leave the card erased and not NDEF formatted.
    RawFormat,
}

impl Intent {
    /// Technologies the dispatcher has a handler for under this intent.
    pub fn supported(&self) -> &'static [Technology] {
        match self {
            Intent::NdefFormat => &[
                Technology::Ndef,
                Technology::NdefFormatable,
                Technology::NfcF,
            ],
            Intent::RawFormat => &[Technology::NfcF, Technology::MifareUltralight],
        }
    }
}

/// Immutable dispatcher configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    ndef_format: Vec<Technology>,
    raw_format: Vec<Technology>,
    response_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ndef_format: Intent::NdefFormat.supported().to_vec(),
            raw_format: Intent::RawFormat.supported().to_vec(),
            response_timeout: default_response_timeout(),
        }
    }
}

impl Config {
    /// Start from the defaults.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Technologies tried for `intent`, highest priority first.
    pub fn technologies(&self, intent: Intent) -> &[Technology] {
        match intent {
            Intent::NdefFormat => &self.ndef_format,
            Intent::RawFormat => &self.raw_format,
        }
    }

    /// Response wait handed to the NFC-F link.
    pub fn response_timeout(&self) -> Duration {
        self.response_timeout
    }
}

/// Builder for [`Config`]; unset fields keep their defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    ndef_format: Option<Vec<Technology>>,
    raw_format: Option<Vec<Technology>>,
    response_timeout: Option<Duration>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the priority list for `intent`.
    pub fn technologies(mut self, intent: Intent, order: &[Technology]) -> Self {
        match intent {
            Intent::NdefFormat => self.ndef_format = Some(order.to_vec()),
            Intent::RawFormat => self.raw_format = Some(order.to_vec()),
        }
        self
    }

    pub fn response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = Some(timeout);
        self
    }

    /// Validate and build. Every listed technology must have a handler for
    /// its intent and appear once.
    pub fn build(self) -> Result<Config> {
        let defaults = Config::default();
        let config = Config {
            ndef_format: self.ndef_format.unwrap_or(defaults.ndef_format),
            raw_format: self.raw_format.unwrap_or(defaults.raw_format),
            response_timeout: self.response_timeout.unwrap_or(defaults.response_timeout),
        };

        if config.response_timeout.is_zero() {
            return Err(Error::InvalidParameter(
                "response timeout must be non-zero".into(),
            ));
        }
        for intent in [Intent::NdefFormat, Intent::RawFormat] {
            let order = config.technologies(intent);
            for (i, tech) in order.iter().enumerate() {
                if !intent.supported().contains(tech) {
                    return Err(Error::InvalidParameter(format!(
                        "{} has no {} handler",
                        intent, tech
                    )));
                }
                if order[..i].contains(tech) {
                    return Err(Error::InvalidParameter(format!(
                        "{} listed twice for {}",
                        tech, intent
                    )));
                }
            }
        }
        Ok(config)
    }
}
