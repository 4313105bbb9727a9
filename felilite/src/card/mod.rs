// felilite/src/card/mod.rs
//! Block-level access to a connected FeliCa Lite card.

mod info;
pub use info::CardInfo;

pub mod operations;
