//! Profile persistence behind an injected key-value store.

pub mod kv;
pub mod profile;

pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};
pub use profile::{ProfileRepository, UserProfile, PROFILE_KEY};
