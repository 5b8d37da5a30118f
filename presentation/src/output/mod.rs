//! Output formatting for comparison runs

pub mod console;
pub mod formatter;
