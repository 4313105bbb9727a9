// felilite/src/provision/mod.rs
//! Provisioning sequences: put a card into an NDEF readable state or erase it
//! back to raw memory.

pub mod best_effort;
pub mod felica;
pub mod ultralight;

pub use best_effort::{BestEffort, StopPolicy, Tally};
pub use felica::{FormatReport, format, is_felica_lite_system, raw_format};
pub use ultralight::UltralightReport;
