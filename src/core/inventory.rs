use crate::core::mutator;
use crate::domain::model::{MoveOutcome, MovePolicy, NewItem, State};
use crate::domain::ports::StateStore;
use crate::utils::error::Result;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Sole owner of the state store.
///
/// Each operation holds one lock across load, mutate and save so that two
/// requests in the same process can never overwrite each other's changes.
pub struct Inventory {
    store: Arc<dyn StateStore>,
    move_policy: MovePolicy,
    lock: Mutex<()>,
}

impl Inventory {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self::with_move_policy(store, MovePolicy::default())
    }

    pub fn with_move_policy(store: Arc<dyn StateStore>, move_policy: MovePolicy) -> Self {
        Self {
            store,
            move_policy,
            lock: Mutex::new(()),
        }
    }

    pub fn move_policy(&self) -> MovePolicy {
        self.move_policy
    }

    pub fn store_location(&self) -> String {
        self.store.location()
    }

    /// Current state as stored.
    pub async fn snapshot(&self) -> Result<State> {
        let _guard = self.lock.lock().await;
        self.store.load().await
    }

    pub async fn add_item(&self, freezer: &str, item: NewItem) -> Result<State> {
        let name = item.name.clone();
        let state = self
            .apply(|state| mutator::add_item(state, freezer, item))
            .await?;

        tracing::info!("Added '{}' to freezer '{}'", name, freezer);
        Ok(state)
    }

    pub async fn remove_container(&self, container: &str) -> Result<State> {
        let mut removed = 0;
        let state = self
            .apply(|state| {
                removed = mutator::remove_container(state, container);
                Ok(())
            })
            .await?;

        if removed == 0 {
            tracing::debug!("Container '{}' was not stored anywhere", container);
        } else {
            tracing::info!("Removed container '{}'", container);
        }
        Ok(state)
    }

    pub async fn move_container(&self, container: &str, destination: &str) -> Result<State> {
        let policy = self.move_policy;
        let mut outcome = MoveOutcome::Dropped;
        let state = self
            .apply(|state| {
                outcome = mutator::move_container(state, container, destination, policy)?;
                Ok(())
            })
            .await?;

        match outcome {
            MoveOutcome::Dropped => tracing::warn!(
                "Container '{}' removed but freezer '{}' does not exist; it is no longer tracked",
                container,
                destination
            ),
            MoveOutcome::Untracked => tracing::warn!(
                "Container '{}' was not stored anywhere and freezer '{}' does not exist",
                container,
                destination
            ),
            MoveOutcome::Merged | MoveOutcome::Created => tracing::info!(
                "Moved container '{}' to freezer '{}' ({:?})",
                container,
                destination,
                outcome
            ),
        }
        Ok(state)
    }

    /// Load, mutate and save under the lock. A failed mutation is never saved.
    async fn apply<F>(&self, mutate: F) -> Result<State>
    where
        F: FnOnce(&mut State) -> Result<()>,
    {
        let _guard = self.lock.lock().await;

        let mut state = self.store.load().await?;
        mutate(&mut state)?;
        self.store.save(&state).await?;

        Ok(state)
    }
}
