//! Interactive chat mode: a REPL over one assistant session.

/// Slash command parsing and autocomplete.
pub mod command;
mod session;
mod ui;

pub use session::ChatSession;
