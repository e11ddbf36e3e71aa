//! Per-group history ledger.
//!
//! Entries tied to a schedule are deduplicated by `(schedule_id, status)`: recording the same
//! status again overwrites the earlier entry in place. Entries without a schedule always append.

use crate::domain::HistoryEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of [`HistoryLedger::record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    Appended,
    /// Replaced the entry at this position.
    Replaced(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryLedger {
    #[serde(default)]
    by_group: BTreeMap<String, Vec<HistoryEntry>>,
}

impl HistoryLedger {
    pub fn record(&mut self, entry: HistoryEntry) -> Recorded {
        let entries = self.by_group.entry(entry.group_id.clone()).or_default();
        if entry.schedule_id.is_some() {
            let existing = entries
                .iter()
                .position(|e| e.schedule_id == entry.schedule_id && e.status == entry.status);
            if let Some(idx) = existing {
                entries[idx] = entry;
                return Recorded::Replaced(idx);
            }
        }
        entries.push(entry);
        Recorded::Appended
    }

    /// Entries of a group in ledger order.
    pub fn entries(&self, group_id: &str) -> &[HistoryEntry] {
        self.by_group
            .get(group_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Drops every entry of the group. Returns how many were removed.
    pub(crate) fn remove_group(&mut self, group_id: &str) -> usize {
        self.by_group.remove(group_id).map_or(0, |v| v.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ScheduleStatus;
    use chrono::NaiveDate;

    fn entry(id: &str, schedule_id: Option<&str>, status: ScheduleStatus, note: &str) -> HistoryEntry {
        HistoryEntry {
            id: id.to_string(),
            group_id: "g1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 9, 14).unwrap(),
            participant_id: "p1".to_string(),
            day_type_id: String::new(),
            status,
            note: Some(note.to_string()),
            schedule_id: schedule_id.map(String::from),
        }
    }

    #[test]
    fn same_schedule_and_status_replaces_in_place() {
        let mut ledger = HistoryLedger::default();
        ledger.record(entry("h1", Some("2024-09"), ScheduleStatus::Completed, "first"));
        ledger.record(entry("h2", Some("2024-09"), ScheduleStatus::Canceled, "rain"));
        let outcome = ledger.record(entry("h3", Some("2024-09"), ScheduleStatus::Completed, "again"));

        assert_eq!(outcome, Recorded::Replaced(0));
        let entries = ledger.entries("g1");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].note.as_deref(), Some("again"));
        assert_eq!(entries[0].status, ScheduleStatus::Completed);
        assert_eq!(entries[1].status, ScheduleStatus::Canceled);
    }

    #[test]
    fn entries_without_schedule_accumulate() {
        let mut ledger = HistoryLedger::default();
        ledger.record(entry("h1", None, ScheduleStatus::Completed, "a"));
        ledger.record(entry("h2", None, ScheduleStatus::Completed, "b"));
        assert_eq!(ledger.entries("g1").len(), 2);
    }

    #[test]
    fn remove_group_clears_entries() {
        let mut ledger = HistoryLedger::default();
        ledger.record(entry("h1", None, ScheduleStatus::Completed, "a"));
        assert_eq!(ledger.remove_group("g1"), 1);
        assert!(ledger.entries("g1").is_empty());
        assert_eq!(ledger.remove_group("g1"), 0);
    }
}
