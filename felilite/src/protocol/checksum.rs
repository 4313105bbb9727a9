// felilite/src/protocol/checksum.rs

/// Compute the 16-bit additive checksum used by the Type 3 Tag attribute
/// information block: the plain sum of the covered bytes, truncated to u16.
pub fn sum16(bytes: &[u8]) -> u16 {
    bytes
        .iter()
        .fold(0u16, |acc, &b| acc.wrapping_add(u16::from(b)))
}
