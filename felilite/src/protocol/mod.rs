// felilite/src/protocol/mod.rs

pub mod checksum;
pub mod codec;
pub mod commands;
pub mod frame;
pub mod parser;
pub mod responses;

pub use checksum::sum16;
pub use commands::{Command, encode_polling, encode_read, encode_write};
pub use frame::Frame;
pub use responses::{Response, decode_polling, decode_read, decode_write};
