pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::ServeArgs;

pub use adapters::http::{router, AppState};
pub use adapters::storage::{JsonFileStore, MemoryStore};
pub use config::Settings;
pub use core::inventory::Inventory;
pub use domain::model::{Freezer, Item, MovePolicy, NewItem, State};
pub use domain::ports::StateStore;
pub use utils::error::{InventoryError, Result};
