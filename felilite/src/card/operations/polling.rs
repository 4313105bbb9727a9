// felilite/src/card/operations/polling.rs

use crate::protocol::{Command, Response};
use crate::session::{Connected, Session};
use crate::types::{Pmm, SystemCode};
use crate::{Error, Result};

/// Poll for `system_code` and confirm the bound card is the one answering.
/// Returns the card's PMm.
pub fn poll(session: &mut Session<'_, Connected>, system_code: SystemCode) -> Result<Pmm> {
    let cmd = Command::Polling {
        system_code,
        request_code: 0x00,
        time_slot: 0x00,
    };

    match session.execute(&cmd)? {
        Response::Polling { pmm, .. } => Ok(pmm),
        other => Err(Error::UnexpectedResponse {
            expected: cmd.command_code() + 1,
            actual: other.response_code(),
        }),
    }
}
