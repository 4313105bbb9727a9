// felilite/src/session/mod.rs

mod handle;

pub use handle::{Connected, Session, Unbound};
