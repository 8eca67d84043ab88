use crate::domain::model::State;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Whole-document persistence for the inventory state.
///
/// Implementations replace the stored document on every `save`; there are no
/// partial writes and no locking. Serializing access is the caller's job.
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn load(&self) -> Result<State>;
    async fn save(&self, state: &State) -> Result<()>;

    /// Where the document lives, for log messages.
    fn location(&self) -> String;
}
