//! # CLI Behavior
//!
//! One possible client of the library. Running `prompt-builder` with no command
//! prints the synthesized prompt, since reading it back is the common case.
//!
//! `set <key>` with no text reads the value from stdin when stdin is piped:
//!
//! ```text
//! cat notes.md | prompt-builder set context
//! ```
//!
//! ## Module Structure
//!
//! - `setup`: clap definitions
//! - `commands`: context setup and per-command handlers
//! - `render`: terminal formatting
//! - `shell`: the interactive session

mod commands;
mod render;
pub mod setup;
mod shell;

pub use commands::run;
