//! Application service: runs commands and keeps the snapshot in step with memory.
//!
//! - Restores the last snapshot on open (missing snapshot = empty state)
//! - Persists the next state before committing it, so a failed save changes nothing
//! - Commands are serialized through one lock; each is applied start to finish

use crate::domain::{AppState, DomainError};
use crate::ports::{RandomSource, SnapshotPort};
use crate::usecases::command_processor::CommandProcessor;
use crate::usecases::commands::Command;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

pub struct GroupService {
    processor: Mutex<CommandProcessor>,
    snapshots: Arc<dyn SnapshotPort>,
}

impl GroupService {
    pub async fn open(
        snapshots: Arc<dyn SnapshotPort>,
        rng: Arc<dyn RandomSource>,
    ) -> Result<Self, DomainError> {
        let state = match snapshots.load().await? {
            Some(state) => {
                info!(
                    version = state.version,
                    groups = state.list_groups().len(),
                    "restored snapshot"
                );
                state
            }
            None => {
                info!("no snapshot found, starting empty");
                AppState::default()
            }
        };
        Ok(Self {
            processor: Mutex::new(CommandProcessor::new(state, rng)),
            snapshots,
        })
    }

    /// Applies `command`, saves the result and returns the new state.
    pub async fn execute(&self, command: Command) -> Result<AppState, DomainError> {
        let mut processor = self.processor.lock().await;
        let next = processor.plan(&command)?;
        self.snapshots.save(&next).await?;
        debug!(command = command.name(), version = next.version, "snapshot saved");
        processor.commit(next);
        Ok(processor.state().clone())
    }

    /// Current committed state.
    pub async fn state(&self) -> AppState {
        self.processor.lock().await.state().clone()
    }
}
