// Adapters layer: concrete implementations for external systems (storage, http).

pub mod http;
pub mod storage;

pub use storage::{JsonFileStore, MemoryStore, DEFAULT_STORE_PATH};
