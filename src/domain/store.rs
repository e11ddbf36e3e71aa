//! Group-scoped entity store.
//!
//! One [`GroupScope`] per existing group holds that group's participants, day types,
//! schedules and draw order. A scope exists exactly as long as its group does, so a child
//! entity can never be created for an unknown group. Collections keep insertion order.

use crate::domain::{
    DayType, DayTypeId, DomainError, EntityKind, Group, GroupId, Participant, ParticipantId,
    Schedule, YearMonth,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything owned by a single group, except its history (see `HistoryLedger`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupScope {
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub day_types: Vec<DayType>,
    #[serde(default)]
    pub selected_day_type: Option<DayTypeId>,
    #[serde(default)]
    pub schedules: Vec<Schedule>,
    #[serde(default)]
    pub draw_order: Vec<ParticipantId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityStore {
    #[serde(default)]
    groups: Vec<Group>,
    #[serde(default)]
    active_group_id: Option<GroupId>,
    /// Keyed by group id; ordered so snapshots serialize deterministically.
    #[serde(default)]
    scopes: BTreeMap<GroupId, GroupScope>,
}

fn require_name(what: &str, name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::Validation(format!("{} name is required", what)));
    }
    Ok(())
}

impl EntityStore {
    // ─────────────────────────────────────────────────────────────────────────
    // Groups
    // ─────────────────────────────────────────────────────────────────────────

    pub fn add_group(&mut self, group: Group) -> Result<(), DomainError> {
        require_name("group", &group.name)?;
        if self.scopes.contains_key(&group.id) {
            return Err(DomainError::Validation(format!(
                "group id already in use: {}",
                group.id
            )));
        }
        self.scopes.insert(group.id.clone(), GroupScope::default());
        self.groups.push(group);
        Ok(())
    }

    pub fn update_group(&mut self, group: Group) -> Result<(), DomainError> {
        require_name("group", &group.name)?;
        let slot = self
            .groups
            .iter_mut()
            .find(|g| g.id == group.id)
            .ok_or_else(|| DomainError::not_found(EntityKind::Group, &group.id))?;
        *slot = group;
        Ok(())
    }

    /// Drops the group and its whole scope. Only the cascade deleter calls this.
    pub(crate) fn remove_group(&mut self, group_id: &str) -> Result<Group, DomainError> {
        let idx = self
            .groups
            .iter()
            .position(|g| g.id == group_id)
            .ok_or_else(|| DomainError::not_found(EntityKind::Group, group_id))?;
        let group = self.groups.remove(idx);
        self.scopes.remove(group_id);
        if self.active_group_id.as_deref() == Some(group_id) {
            self.active_group_id = None;
        }
        Ok(group)
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, group_id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    pub fn require_group(&self, group_id: &str) -> Result<&Group, DomainError> {
        self.group(group_id)
            .ok_or_else(|| DomainError::not_found(EntityKind::Group, group_id))
    }

    pub fn active_group_id(&self) -> Option<&str> {
        self.active_group_id.as_deref()
    }

    pub fn set_active_group(&mut self, group_id: Option<&str>) -> Result<(), DomainError> {
        if let Some(id) = group_id {
            self.require_group(id)?;
        }
        self.active_group_id = group_id.map(str::to_string);
        Ok(())
    }

    fn scope(&self, group_id: &str) -> Option<&GroupScope> {
        self.scopes.get(group_id)
    }

    fn scope_mut(&mut self, group_id: &str) -> Result<&mut GroupScope, DomainError> {
        self.scopes
            .get_mut(group_id)
            .ok_or_else(|| DomainError::not_found(EntityKind::Group, group_id))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Participants
    // ─────────────────────────────────────────────────────────────────────────

    /// Appends unconditionally; names are not unique.
    pub fn add_participant(&mut self, participant: Participant) -> Result<(), DomainError> {
        require_name("participant", &participant.name)?;
        let scope = self.scope_mut(&participant.group_id)?;
        scope.participants.push(participant);
        Ok(())
    }

    pub fn update_participant(&mut self, participant: Participant) -> Result<(), DomainError> {
        require_name("participant", &participant.name)?;
        let scope = self.scope_mut(&participant.group_id)?;
        let slot = scope
            .participants
            .iter_mut()
            .find(|p| p.id == participant.id)
            .ok_or_else(|| DomainError::not_found(EntityKind::Participant, &participant.id))?;
        *slot = participant;
        Ok(())
    }

    /// Removes the participant only. Draw order and schedules that mention it are left as is.
    pub fn remove_participant(
        &mut self,
        group_id: &str,
        participant_id: &str,
    ) -> Result<Participant, DomainError> {
        let scope = self.scope_mut(group_id)?;
        let idx = scope
            .participants
            .iter()
            .position(|p| p.id == participant_id)
            .ok_or_else(|| DomainError::not_found(EntityKind::Participant, participant_id))?;
        Ok(scope.participants.remove(idx))
    }

    pub fn participants(&self, group_id: &str) -> &[Participant] {
        self.scope(group_id)
            .map(|s| s.participants.as_slice())
            .unwrap_or_default()
    }

    pub fn participant(&self, group_id: &str, participant_id: &str) -> Option<&Participant> {
        self.participants(group_id)
            .iter()
            .find(|p| p.id == participant_id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Day types
    // ─────────────────────────────────────────────────────────────────────────

    pub fn add_day_type(&mut self, day_type: DayType) -> Result<(), DomainError> {
        require_name("day type", &day_type.name)?;
        let scope = self.scope_mut(&day_type.group_id)?;
        scope.day_types.push(day_type);
        Ok(())
    }

    pub fn update_day_type(&mut self, day_type: DayType) -> Result<(), DomainError> {
        require_name("day type", &day_type.name)?;
        let scope = self.scope_mut(&day_type.group_id)?;
        let slot = scope
            .day_types
            .iter_mut()
            .find(|d| d.id == day_type.id)
            .ok_or_else(|| DomainError::not_found(EntityKind::DayType, &day_type.id))?;
        *slot = day_type;
        Ok(())
    }

    /// Removes a day type; clears the group's selection if it pointed at it.
    pub fn remove_day_type(
        &mut self,
        group_id: &str,
        day_type_id: &str,
    ) -> Result<DayType, DomainError> {
        let scope = self.scope_mut(group_id)?;
        let idx = scope
            .day_types
            .iter()
            .position(|d| d.id == day_type_id)
            .ok_or_else(|| DomainError::not_found(EntityKind::DayType, day_type_id))?;
        if scope.selected_day_type.as_deref() == Some(day_type_id) {
            scope.selected_day_type = None;
        }
        Ok(scope.day_types.remove(idx))
    }

    pub fn select_day_type(&mut self, group_id: &str, day_type_id: &str) -> Result<(), DomainError> {
        let scope = self.scope_mut(group_id)?;
        if !scope.day_types.iter().any(|d| d.id == day_type_id) {
            return Err(DomainError::not_found(EntityKind::DayType, day_type_id));
        }
        scope.selected_day_type = Some(day_type_id.to_string());
        Ok(())
    }

    pub fn day_types(&self, group_id: &str) -> &[DayType] {
        self.scope(group_id)
            .map(|s| s.day_types.as_slice())
            .unwrap_or_default()
    }

    pub fn selected_day_type(&self, group_id: &str) -> Option<&DayType> {
        let scope = self.scope(group_id)?;
        let selected = scope.selected_day_type.as_deref()?;
        scope.day_types.iter().find(|d| d.id == selected)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Schedules
    // ─────────────────────────────────────────────────────────────────────────

    pub fn has_slot(&self, group_id: &str, slot: YearMonth) -> bool {
        self.scope(group_id)
            .is_some_and(|s| s.schedules.iter().any(|x| x.slot() == slot))
    }

    /// Adds a schedule. Re-adding an identical schedule is a no-op; a different schedule for
    /// an occupied month fails with `DuplicateScheduleSlot`.
    pub fn add_schedule(&mut self, schedule: Schedule) -> Result<(), DomainError> {
        let slot = YearMonth::new(schedule.year, schedule.month)?;
        if schedule.id != slot.schedule_id() {
            return Err(DomainError::Validation(format!(
                "schedule id {} does not match month {}",
                schedule.id, slot
            )));
        }
        let scope = self.scope_mut(&schedule.group_id)?;
        if let Some(existing) = scope.schedules.iter().find(|s| s.slot() == slot) {
            if *existing == schedule {
                return Ok(());
            }
            return Err(DomainError::DuplicateScheduleSlot {
                group_id: schedule.group_id.clone(),
                year: slot.year,
                month: slot.month,
            });
        }
        scope.schedules.push(schedule);
        Ok(())
    }

    /// Replaces the schedule with the same id. Never creates one implicitly.
    pub fn update_schedule(&mut self, schedule: Schedule) -> Result<(), DomainError> {
        let slot = YearMonth::new(schedule.year, schedule.month)?;
        if schedule.id != slot.schedule_id() {
            return Err(DomainError::Validation(format!(
                "schedule id {} does not match month {}",
                schedule.id, slot
            )));
        }
        let scope = self.scope_mut(&schedule.group_id)?;
        let existing = scope
            .schedules
            .iter_mut()
            .find(|s| s.id == schedule.id)
            .ok_or_else(|| DomainError::not_found(EntityKind::Schedule, &schedule.id))?;
        *existing = schedule;
        Ok(())
    }

    /// Keeps only the schedules matching `keep`. Returns how many were removed.
    pub fn retain_schedules(
        &mut self,
        group_id: &str,
        keep: impl Fn(&Schedule) -> bool,
    ) -> Result<usize, DomainError> {
        let scope = self.scope_mut(group_id)?;
        let before = scope.schedules.len();
        scope.schedules.retain(|s| keep(s));
        Ok(before - scope.schedules.len())
    }

    pub fn schedule(&self, group_id: &str, schedule_id: &str) -> Option<&Schedule> {
        self.scope(group_id)?
            .schedules
            .iter()
            .find(|s| s.id == schedule_id)
    }

    pub fn require_schedule(
        &self,
        group_id: &str,
        schedule_id: &str,
    ) -> Result<&Schedule, DomainError> {
        self.require_group(group_id)?;
        self.schedule(group_id, schedule_id)
            .ok_or_else(|| DomainError::not_found(EntityKind::Schedule, schedule_id))
    }

    /// Schedules of a group, optionally restricted to one year, in insertion order.
    pub fn schedules(&self, group_id: &str, year: Option<i32>) -> Vec<&Schedule> {
        self.scope(group_id)
            .map(|s| {
                s.schedules
                    .iter()
                    .filter(|x| year.is_none_or(|y| x.year == y))
                    .collect()
            })
            .unwrap_or_default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Draw order
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_draw_order(
        &mut self,
        group_id: &str,
        order: Vec<ParticipantId>,
    ) -> Result<(), DomainError> {
        self.scope_mut(group_id)?.draw_order = order;
        Ok(())
    }

    pub fn draw_order(&self, group_id: &str) -> &[ParticipantId] {
        self.scope(group_id)
            .map(|s| s.draw_order.as_slice())
            .unwrap_or_default()
    }
}
