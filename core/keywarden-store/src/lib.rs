//! Key-value configuration persistence for Keywarden.
//!
//! The license manager owns its persisted state exclusively and reaches it
//! through the [`ConfigStore`] trait, so embedders can substitute their own
//! backing store. Two implementations ship here:
//!
//! - [`MemoryStore`]: process-local, used by tests and short-lived tools
//! - [`JsonFileStore`]: a single JSON object on disk, rewritten atomically
//!   on every mutation

mod error;
mod file;
mod memory;

pub use error::{StoreError, StoreResult};
pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// A string key-value store with atomic per-key reads and writes.
pub trait ConfigStore: Send + Sync {
    /// Returns the value for `key`, or `None` if unset.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Sets `key` to `value`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;
}
