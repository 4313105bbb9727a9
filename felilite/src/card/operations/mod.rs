// felilite/src/card/operations/mod.rs

pub mod polling;
pub mod read;
pub mod write;

// Re-export so callers can use `crate::card::operations::read_block(...)`.
pub use polling::poll;
pub use read::{read_block, read_blocks};
pub use write::write_block;
