//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{AppState, DomainError};

/// Persistence gateway. Stores and restores full state snapshots.
#[async_trait::async_trait]
pub trait SnapshotPort: Send + Sync {
    /// Last saved snapshot. `None` when nothing has been saved yet.
    async fn load(&self) -> Result<Option<AppState>, DomainError>;

    /// Replace the stored snapshot with `state`.
    async fn save(&self, state: &AppState) -> Result<(), DomainError>;
}
