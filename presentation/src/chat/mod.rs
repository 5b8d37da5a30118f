//! Interactive chat module
//!
//! Provides a readline-based prompt loop that runs one comparison per line.

mod repl;

pub use repl::ChatRepl;
