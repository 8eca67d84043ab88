pub mod export;
pub mod inventory;
pub mod mutator;

pub use crate::domain::model::{Freezer, Item, MoveOutcome, MovePolicy, NewItem, State};
pub use crate::domain::ports::StateStore;
pub use crate::utils::error::Result;
