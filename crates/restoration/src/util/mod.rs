//! Helpers for showing lines in logs and tables

mod buf;

pub use buf::Buf;
