//! # Storage Layer
//!
//! [`TemplateStore`] is the single source of truth for every template and for which
//! one is current. All mutation goes through it so the invariants hold continuously:
//!
//! - Once initialized, the collection is never empty and exactly one id is current.
//! - Template ids are unique.
//! - Every template's section ranks form a permutation of `0..N-1`.
//!
//! ## Snapshots
//!
//! The collection lives behind an `Arc` and is replaced wholesale on every
//! mutation. A reader holding a [`TemplateStore::snapshot`] keeps a consistent view
//! and never observes a half-applied change.
//!
//! ## Persistence
//!
//! The store writes through a [`StorageBackend`] after every mutation:
//!
//! ```text
//! templates          # JSON array of every template
//! current_template   # JSON object, the current template (also names the selection)
//! ```
//!
//! Writes are best effort. A failing backend is logged and otherwise ignored: the
//! in-memory state stays authoritative for the rest of the session.
//!
//! ## No-ops
//!
//! Operating without a current template, on an unknown id, or past the edge of the
//! section list changes nothing and is not an error. Mutators return `false`
//! (or `None`) so callers can tell, but need not check.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one JSON file per key under a data directory.
//! - [`mem_backend::MemBackend`]: in-memory, for tests.

pub mod backend;
pub mod codec;
pub mod fs_backend;
pub mod mem_backend;
pub mod template_store;

pub use backend::StorageBackend;
pub use template_store::TemplateStore;
