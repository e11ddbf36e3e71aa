//! Core domain layer. No external I/O dependencies.
//!
//! Entities, the group-scoped store, the history ledger and group cascade live here.

pub mod cascade;
pub mod entities;
pub mod errors;
pub mod history;
pub mod state;
pub mod store;

pub use cascade::{CascadeReport, delete_group};
pub use entities::{
    DayType, DayTypeId, Group, GroupId, HistoryEntry, Participant, ParticipantId, Schedule,
    ScheduleId, ScheduleStatus, YearMonth,
};
pub use errors::{DomainError, EntityKind};
pub use history::{HistoryLedger, Recorded};
pub use state::AppState;
pub use store::{EntityStore, GroupScope};
