// felilite/src/protocol/codec.rs

use crate::Result;
use crate::types::Idm;

use super::Frame;
use super::commands::Command;
use super::responses::Response;

/// Encode a Command into a full request frame (length byte + payload).
pub fn encode_command_frame(cmd: &Command) -> Result<Vec<u8>> {
    let payload = cmd.encode();
    Frame::encode(&payload)
}

/// Validate and parse the response frame answering `cmd`, which was
/// addressed to the card `idm`.
pub fn decode_response_frame(cmd: &Command, idm: &Idm, frame: &[u8]) -> Result<Response> {
    Response::decode(cmd.command_code(), frame, idm, cmd.response_block_count())
}
