//! Application state: entity store + history ledger, versioned.
//!
//! This is the unit handed to the persistence adapter. Read-only queries for the UI live here.

use crate::domain::{
    DayType, EntityStore, Group, HistoryEntry, HistoryLedger, Participant, ParticipantId,
    Schedule,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Bumped once per committed command.
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub store: EntityStore,
    #[serde(default)]
    pub history: HistoryLedger,
}

impl AppState {
    pub fn list_groups(&self) -> &[Group] {
        self.store.groups()
    }

    pub fn active_group(&self) -> Option<&Group> {
        self.store
            .active_group_id()
            .and_then(|id| self.store.group(id))
    }

    pub fn list_participants(&self, group_id: &str) -> &[Participant] {
        self.store.participants(group_id)
    }

    pub fn list_day_types(&self, group_id: &str) -> &[DayType] {
        self.store.day_types(group_id)
    }

    pub fn selected_day_type(&self, group_id: &str) -> Option<&DayType> {
        self.store.selected_day_type(group_id)
    }

    pub fn list_schedules(&self, group_id: &str, year: Option<i32>) -> Vec<&Schedule> {
        self.store.schedules(group_id, year)
    }

    pub fn draw_order(&self, group_id: &str) -> &[ParticipantId] {
        self.store.draw_order(group_id)
    }

    pub fn list_history(&self, group_id: &str) -> &[HistoryEntry] {
        self.history.entries(group_id)
    }
}
