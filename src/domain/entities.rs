//! Domain entities. Pure data structures for the core business.
//!
//! Every entity below a [`Group`] carries the `group_id` of the group that owns it.

use crate::domain::DomainError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub type GroupId = String;
pub type ParticipantId = String;
pub type DayTypeId = String;
pub type ScheduleId = String;

/// A rotating-fund circle. Root of all group-scoped data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: ParticipantId,
    pub group_id: GroupId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Kind of gift collected on a hosting day (gold, quarter coin, cash...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayType {
    pub id: DayTypeId,
    pub group_id: GroupId,
    pub name: String,
}

/// Ordered planned < completed < canceled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Planned,
    Completed,
    Canceled,
}

impl std::fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ScheduleStatus::Planned => "planned",
            ScheduleStatus::Completed => "completed",
            ScheduleStatus::Canceled => "canceled",
        };
        f.write_str(s)
    }
}

/// Calendar month, `month` in 1..=12. Build with [`YearMonth::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::Validation(format!(
                "month must be 1..=12, got {}",
                month
            )));
        }
        Ok(Self { year, month })
    }

    /// Month `months` after this one, wrapping past December into the following years.
    pub fn advance(self, months: u32) -> Self {
        let mut year = self.year;
        let mut month = self.month + months;
        while month > 12 {
            month -= 12;
            year += 1;
        }
        Self { year, month }
    }

    /// Deterministic schedule id for this month, e.g. `2024-08`.
    pub fn schedule_id(self) -> ScheduleId {
        format!("{}-{:02}", self.year, self.month)
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// One month's hosting event. At most one per (group, year, month).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: ScheduleId,
    pub group_id: GroupId,
    pub year: i32,
    pub month: u32,
    /// Unset until the host picks a day.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub participant_id: ParticipantId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub status: ScheduleStatus,
}

impl Schedule {
    /// Fresh `planned` schedule for `slot` with no date and no note.
    pub fn planned(group_id: &str, slot: YearMonth, participant_id: &str) -> Self {
        Self {
            id: slot.schedule_id(),
            group_id: group_id.to_string(),
            year: slot.year,
            month: slot.month,
            date: None,
            participant_id: participant_id.to_string(),
            note: None,
            status: ScheduleStatus::Planned,
        }
    }

    pub fn slot(&self) -> YearMonth {
        YearMonth {
            year: self.year,
            month: self.month,
        }
    }

    pub fn has_date(&self) -> bool {
        self.date.is_some()
    }
}

/// Ledger record of a schedule outcome (or a manual entry when `schedule_id` is absent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub group_id: GroupId,
    pub date: NaiveDate,
    pub participant_id: ParticipantId,
    /// Empty when the group had no selected day type.
    pub day_type_id: DayTypeId,
    pub status: ScheduleStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_id: Option<ScheduleId>,
}
