// felilite/src/card/info.rs

use crate::types::{Idm, SystemCode};

/// Compact information describing the card a session is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardInfo {
    pub idm: Idm,
    pub system_code: SystemCode,
}

impl CardInfo {
    pub fn new(idm: Idm, system_code: SystemCode) -> Self {
        Self { idm, system_code }
    }

    pub fn idm(&self) -> &Idm {
        &self.idm
    }

    pub fn system_code(&self) -> SystemCode {
        self.system_code
    }

    /// System code is `0x88B4`.
    pub fn is_felica_lite(&self) -> bool {
        self.system_code == SystemCode::FELICA_LITE
    }
}
