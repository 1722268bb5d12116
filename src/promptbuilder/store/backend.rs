use crate::error::Result;

/// Opaque key/value storage the template store persists into.
///
/// Values are whole JSON documents. Implementations decide where they live
/// (files on disk, memory, ...); the store decides what goes in them.
pub trait StorageBackend {
    /// Read the value stored under `key`.
    /// Returns Ok(None) when nothing has been written yet.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`.
    /// MUST be atomic so a crash never leaves a half-written record.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}
