//! Key-value persistence for the notes and to-do collections.
//!
//! Values are opaque text (the collections store JSON); keys are fixed
//! strings owned by each collection.

pub mod local;

pub use local::LocalStore;

use crate::error::Result;

/// Async get/set-by-key text store.
pub trait KeyValueStore {
    /// Returns `None` when nothing is stored under `key`.
    fn get_item(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Inserts or overwrites the value under `key`.
    fn set_item(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;

    fn remove_item(&self, key: &str) -> impl Future<Output = Result<()>> + Send;
}
