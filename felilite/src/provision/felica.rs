// felilite/src/provision/felica.rs
//! FeliCa Lite provisioning: NDEF format and raw format.

use log::{debug, error, info, warn};

use crate::constants::{
    BLOCK_SIZE, MAX_INITIAL_MESSAGE_LEN, MC_NDEF_DISABLED, MC_NDEF_ENABLED, MC_NDEF_FLAG_OFFSET,
    NDEF_CONTENT_BLOCKS,
};
use crate::ndef::AttributeInfo;
use crate::provision::best_effort::{BestEffort, Tally};
use crate::session::{Connected, Session};
use crate::types::{BlockData, BlockNumber, SystemCode};
use crate::{Error, Result};

/// What a provisioning run did beyond its must-succeed steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatReport {
    /// Length announced in the attribute block, if a message was laid out.
    pub message_len: Option<usize>,
    /// An initial message was given but was too long to lay out.
    pub message_dropped: bool,
    /// Message chunks written from PAD1.
    pub message_blocks: Tally,
    /// Content blocks zeroed after the message.
    pub zero_fill: Tally,
}

impl FormatReport {
    /// Every best-effort write went through.
    pub fn is_complete(&self) -> bool {
        !self.message_dropped && self.message_blocks.is_clean() && self.zero_fill.is_clean()
    }
}

/// Whether the platform saw the FeliCa Lite system code for this card.
pub fn is_felica_lite_system<S>(session: &Session<'_, S>) -> bool {
    session.system_code() == SystemCode::FELICA_LITE
}

pub(crate) fn ensure_felica_lite(session: &Session<'_, Connected>) -> Result<()> {
    if !is_felica_lite_system(session) {
        error!(
            "card {} reports system code {:#06x}, not FeliCa Lite",
            session.idm().to_hex(),
            session.system_code().as_u16()
        );
        return Err(Error::UnsupportedCardType(format!(
            "system code {:#06x} is not FeliCa Lite",
            session.system_code().as_u16()
        )));
    }
    Ok(())
}

/// Read MC, set the NDEF system flag to `flag` and write MC back.
fn set_ndef_flag(session: &mut Session<'_, Connected>, flag: u8) -> Result<()> {
    let mut mc = session.read_block(BlockNumber::MC).inspect_err(|e| {
        error!("read MC failed: {}", e);
    })?;
    mc.as_bytes_mut()[MC_NDEF_FLAG_OFFSET] = flag;
    session
        .write_block(BlockNumber::MC, mc.as_bytes())
        .inspect_err(|e| {
            error!("write MC failed: {}", e);
        })?;
    debug!("MC ndef flag = {}", flag);
    Ok(())
}

/// Number of content blocks given over to a message of `len` bytes.
///
/// This keeps the card's historical `(len + 15) % 16` rule rather than the
/// ceiling division, clamped to the content area.
pub fn content_block_count(len: usize) -> usize {
    ((len + 15) % BLOCK_SIZE).min(NDEF_CONTENT_BLOCKS)
}

/// Chunk `index` of `message`, zero padded to a full block.
fn message_chunk(message: &[u8], index: usize) -> BlockData {
    let mut block = BlockData::ZERO;
    let start = index * BLOCK_SIZE;
    let end = (start + BLOCK_SIZE).min(message.len());
    if start < end {
        block.as_bytes_mut()[..end - start].copy_from_slice(&message[start..end]);
    }
    block
}

/// Write zeros to `PAD(first) ..= PAD13`, best effort.
fn zero_fill(session: &mut Session<'_, Connected>, effort: &mut BestEffort, first: usize) {
    for n in first..=NDEF_CONTENT_BLOCKS {
        let Some(block) = BlockNumber::PAD0.pad_offset(n) else {
            break;
        };
        effort.step(block, || session.write_block(block, BlockData::ZERO.as_bytes()));
    }
}

/// NDEF format the card.
///
/// Enables the NDEF flag in MC, writes the attribute block to PAD0 and then,
/// best effort, lays out `initial_message` from PAD1 and zeroes the rest of
/// the content area. The run fails only if one of the MC or PAD0 steps fails.
/// A message longer than 208 bytes is dropped with a warning.
pub fn format(
    session: &mut Session<'_, Connected>,
    initial_message: Option<&[u8]>,
) -> Result<FormatReport> {
    ensure_felica_lite(session)?;

    let mut report = FormatReport::default();
    let message = match initial_message {
        Some(m) if m.len() > MAX_INITIAL_MESSAGE_LEN => {
            warn!(
                "initial message of {} bytes exceeds {} bytes, not written",
                m.len(),
                MAX_INITIAL_MESSAGE_LEN
            );
            report.message_dropped = true;
            None
        }
        other => other,
    };

    set_ndef_flag(session, MC_NDEF_ENABLED)?;

    let attribute = match message {
        Some(m) => AttributeInfo::with_message_len(m.len())?,
        None => AttributeInfo::empty(),
    };
    session
        .write_block(BlockNumber::PAD0, attribute.to_block().as_bytes())
        .inspect_err(|e| {
            error!("write attribute block failed: {}", e);
        })?;

    let mut effort = BestEffort::new("ndef message");
    let mut count = 0;
    if let Some(m) = message {
        report.message_len = Some(m.len());
        count = content_block_count(m.len());
        for i in 0..count {
            let Some(block) = BlockNumber::PAD1.pad_offset(i) else {
                break;
            };
            let chunk = message_chunk(m, i);
            effort.step(block, || session.write_block(block, chunk.as_bytes()));
        }
    }
    report.message_blocks = effort.next_phase("zero fill");

    zero_fill(session, &mut effort, 1 + count);
    report.zero_fill = effort.finish();

    info!(
        "ndef format done for {} ({} message blocks, {} zeroed)",
        session.idm().to_hex(),
        report.message_blocks.succeeded,
        report.zero_fill.succeeded
    );
    Ok(report)
}

/// Disable NDEF in MC and zero PAD0 ..= PAD13. The run fails only if one of
/// the MC steps fails.
pub fn raw_format(session: &mut Session<'_, Connected>) -> Result<FormatReport> {
    ensure_felica_lite(session)?;

    set_ndef_flag(session, MC_NDEF_DISABLED)?;

    let mut effort = BestEffort::new("zero fill");
    zero_fill(session, &mut effort, 0);

    let report = FormatReport {
        zero_fill: effort.finish(),
        ..FormatReport::default()
    };
    info!(
        "raw format done for {} ({} blocks zeroed)",
        session.idm().to_hex(),
        report.zero_fill.succeeded
    );
    Ok(report)
}
