//! # Prompt Builder Architecture
//!
//! Prompt Builder assembles structured prompts out of a fixed catalogue of labeled
//! sections (goal, context, output format, ...). A user fills in the sections they
//! care about, reorders them, and gets one markdown document back. Templates are
//! kept in a small collection that survives restarts.
//!
//! Like any tool built this way, it is a library with a CLI client, not the other
//! way around.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - clap parsing, terminal rendering, clipboard, shell       │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Parses section names and template selectors              │
//! │  - Dispatches to exactly one command                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One store operation plus a user-facing status message    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Store (store/)                                             │
//! │  - TemplateStore: the collection, the selection, mutations  │
//! │  - StorageBackend trait: FsBackend, MemBackend              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pure helpers sit beside the layers and have no state: [`synthesis`] turns a
//! template into markdown, [`lint`] reports missing required content, and
//! [`estimator`] counts characters, words and tokens.
//!
//! ## Failure Model
//!
//! - Malformed imports and persisted records are **rejected**; the store is left
//!   as it was.
//! - Persistence failures are **swallowed** inside the store and logged with
//!   `tracing`. In-memory state stays authoritative for the session.
//! - Acting with nothing to act on (no current template, a reorder at the edge)
//!   is a **no-op**, never an error.
//!
//! ## Testing Strategy
//!
//! 1. **Store and helpers**: property-style unit tests over `MemBackend`.
//! 2. **Commands**: unit tests of messages and returned data.
//! 3. **API**: dispatch and input parsing.
//! 4. **CLI**: argument parsing in `cli/setup.rs`, end-to-end runs in `tests/`.

pub mod api;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod error;
pub mod estimator;
pub mod index;
pub mod lint;
pub mod model;
pub mod store;
pub mod synthesis;
