//! Commands: every state change the UI can request, as data.

use crate::domain::{
    DayType, DayTypeId, Group, GroupId, Participant, ParticipantId, ScheduleId, ScheduleStatus, YearMonth,
};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Creates a group with the default day types and makes it the active group.
    CreateGroup {
        name: String,
    },
    UpdateGroup {
        group: Group,
    },
    /// Removes the group and everything scoped to it.
    DeleteGroup {
        group_id: GroupId,
    },
    SetActiveGroup {
        group_id: Option<GroupId>,
    },
    AddParticipant {
        group_id: GroupId,
        name: String,
        phone: Option<String>,
    },
    UpdateParticipant {
        participant: Participant,
    },
    RemoveParticipant {
        group_id: GroupId,
        participant_id: ParticipantId,
    },
    AddDayType {
        group_id: GroupId,
        name: String,
    },
    UpdateDayType {
        day_type: DayType,
    },
    RemoveDayType {
        group_id: GroupId,
        day_type_id: DayTypeId,
    },
    SelectDayType {
        group_id: GroupId,
        day_type_id: DayTypeId,
    },
    /// Draws a random order and drops the group's planned schedules.
    ShuffleOrder {
        group_id: GroupId,
        participant_ids: Vec<ParticipantId>,
    },
    /// Stores an order chosen by hand; schedules are not touched.
    SetDrawOrder {
        group_id: GroupId,
        order: Vec<ParticipantId>,
    },
    /// Fills the months after `reference` from the stored draw order.
    GenerateSchedules {
        group_id: GroupId,
        reference: YearMonth,
    },
    ClearPlannedSchedules {
        group_id: GroupId,
    },
    /// `None` clears the date.
    UpdateScheduleDate {
        group_id: GroupId,
        schedule_id: ScheduleId,
        date: Option<NaiveDate>,
    },
    SetScheduleHost {
        group_id: GroupId,
        schedule_id: ScheduleId,
        participant_id: ParticipantId,
    },
    SetScheduleStatus {
        group_id: GroupId,
        schedule_id: ScheduleId,
        status: ScheduleStatus,
    },
    SetScheduleNote {
        group_id: GroupId,
        schedule_id: ScheduleId,
        note: String,
    },
    /// Ledger entry not tied to a schedule.
    RecordHistory {
        group_id: GroupId,
        date: NaiveDate,
        participant_id: ParticipantId,
        day_type_id: Option<DayTypeId>,
        status: ScheduleStatus,
        note: Option<String>,
    },
}

impl Command {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateGroup { .. } => "create_group",
            Command::UpdateGroup { .. } => "update_group",
            Command::DeleteGroup { .. } => "delete_group",
            Command::SetActiveGroup { .. } => "set_active_group",
            Command::AddParticipant { .. } => "add_participant",
            Command::UpdateParticipant { .. } => "update_participant",
            Command::RemoveParticipant { .. } => "remove_participant",
            Command::AddDayType { .. } => "add_day_type",
            Command::UpdateDayType { .. } => "update_day_type",
            Command::RemoveDayType { .. } => "remove_day_type",
            Command::SelectDayType { .. } => "select_day_type",
            Command::ShuffleOrder { .. } => "shuffle_order",
            Command::SetDrawOrder { .. } => "set_draw_order",
            Command::GenerateSchedules { .. } => "generate_schedules",
            Command::ClearPlannedSchedules { .. } => "clear_planned_schedules",
            Command::UpdateScheduleDate { .. } => "update_schedule_date",
            Command::SetScheduleHost { .. } => "set_schedule_host",
            Command::SetScheduleStatus { .. } => "set_schedule_status",
            Command::SetScheduleNote { .. } => "set_schedule_note",
            Command::RecordHistory { .. } => "record_history",
        }
    }
}
