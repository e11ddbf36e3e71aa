//! Domain errors. Returned by the store, the scheduler and the command processor.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

/// Entity kind named in a [`DomainError::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Group,
    Participant,
    DayType,
    Schedule,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::Group => "group",
            EntityKind::Participant => "participant",
            EntityKind::DayType => "day type",
            EntityKind::Schedule => "schedule",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Status or note change attempted before the schedule has a date.
    #[error("Schedule {schedule_id} has no date set")]
    MissingDate { schedule_id: String },

    /// Invariant guard: a group already holds a schedule for this month.
    #[error("Group {group_id} already has a schedule for {year}-{month:02}")]
    DuplicateScheduleSlot {
        group_id: String,
        year: i32,
        month: u32,
    },

    #[error("State error: {0}")]
    State(String),

    #[error("Input error: {0}")]
    Input(String),
}

impl DomainError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        DomainError::NotFound {
            kind,
            id: id.into(),
        }
    }
}
