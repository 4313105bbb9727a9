//! Hexadecimal rendering for IDm values, block dumps and frame traces.

use std::fmt;

/// Formats a byte slice as lowercase hex when displayed.
///
/// `{}` renders compact (`"dead"`), `{:#}` renders spaced (`"de ad"`).
#[derive(Clone, Copy)]
pub struct Hex<'a>(pub &'a [u8]);

impl fmt::Display for Hex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spaced = f.alternate();
        for (i, b) in self.0.iter().enumerate() {
            if spaced && i != 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Hex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:#}]", self)
    }
}

/// Convert a byte slice to a lowercase hex string without separators.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    Hex(bytes).to_string()
}

/// Convert a byte slice to a lowercase hex string with a single space between
/// each byte.
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    format!("{:#}", Hex(bytes))
}
