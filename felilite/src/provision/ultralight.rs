// felilite/src/provision/ultralight.rs
//! Raw format for MIFARE Ultralight style tags: an empty NDEF TLV in the
//! first user page and the terminator pattern across the rest.

use log::{error, info, warn};

use crate::Result;
use crate::provision::best_effort::{BestEffort, StopPolicy, Tally};
use crate::tag::UltralightTag;

/// First user page
pub const FIRST_USER_PAGE: u8 = 4;
/// Last page every Ultralight variant has
pub const LAST_REQUIRED_PAGE: u8 = 15;
/// Last page tried on larger variants
pub const LAST_EXTENDED_PAGE: u8 = 39;

/// NDEF TLV of length zero followed by the terminator TLV.
pub const EMPTY_NDEF_TLV: [u8; 4] = [0x03, 0x00, 0xfe, 0x00];
/// Page pattern written after the first user page.
pub const CLEAR_PAGE: [u8; 4] = [0x00, 0x00, 0xfe, 0x00];

/// What the raw format did on pages past the required area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UltralightReport {
    /// Pages written in `FIRST_USER_PAGE ..= LAST_REQUIRED_PAGE`
    pub required_pages: usize,
    /// Pages past the required area, written until the first failure.
    pub extended: Tally,
}

fn write_pages(tag: &mut dyn UltralightTag) -> Result<UltralightReport> {
    let mut report = UltralightReport::default();

    tag.write_page(FIRST_USER_PAGE, &EMPTY_NDEF_TLV)?;
    report.required_pages += 1;
    for page in FIRST_USER_PAGE + 1..=LAST_REQUIRED_PAGE {
        tag.write_page(page, &CLEAR_PAGE).inspect_err(|e| {
            error!("write page {} failed: {}", page, e);
        })?;
        report.required_pages += 1;
    }

    // Smaller variants end at page 15; the first failure marks the end.
    let mut effort = BestEffort::with_policy("extended pages", StopPolicy::OnFirstFailure);
    for page in LAST_REQUIRED_PAGE + 1..=LAST_EXTENDED_PAGE {
        effort.step(page, || tag.write_page(page, &CLEAR_PAGE));
    }
    report.extended = effort.finish();
    Ok(report)
}

/// Raw format an Ultralight tag. The tag is connected here and closed again
/// whatever happens; a failed close is only logged.
pub fn raw_format(tag: &mut dyn UltralightTag) -> Result<UltralightReport> {
    tag.connect()?;
    let result = write_pages(tag);
    if let Err(e) = tag.close() {
        warn!("ultralight close failed: {}", e);
    }

    let report = result?;
    info!(
        "ultralight raw format done ({} extended pages written)",
        report.extended.succeeded
    );
    Ok(report)
}
