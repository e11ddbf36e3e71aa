//! Single entry point for state changes.
//!
//! A command runs against a draft copy of the state. Only a fully applied draft is committed,
//! so no reader (snapshot writer included) can observe a half-applied command.

use crate::domain::{
    AppState, DayType, DomainError, EntityKind, Group, HistoryEntry, Participant, Schedule,
    ScheduleStatus, delete_group,
};
use crate::ports::RandomSource;
use crate::usecases::commands::Command;
use crate::usecases::rotation::{RotationScheduler, check_order};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Day types every new group starts with.
pub const DEFAULT_DAY_TYPES: [&str; 4] = ["Altın", "Çeyrek", "Para", "Hediye"];

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn trimmed(name: &str) -> String {
    name.trim().to_string()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub struct CommandProcessor {
    state: AppState,
    scheduler: RotationScheduler,
}

impl CommandProcessor {
    pub fn new(state: AppState, rng: Arc<dyn RandomSource>) -> Self {
        Self {
            state,
            scheduler: RotationScheduler::new(rng),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Computes the state that `command` would produce, without committing it.
    pub fn plan(&self, command: &Command) -> Result<AppState, DomainError> {
        let mut draft = self.state.clone();
        match self.apply_to(&mut draft, command) {
            Ok(()) => {
                draft.version += 1;
                Ok(draft)
            }
            Err(e) => {
                warn!(command = command.name(), error = %e, "command rejected");
                Err(e)
            }
        }
    }

    /// Replaces the current state with one returned by [`plan`](Self::plan).
    pub fn commit(&mut self, next: AppState) {
        self.state = next;
    }

    /// Plans and commits in one step.
    pub fn apply(&mut self, command: &Command) -> Result<&AppState, DomainError> {
        let next = self.plan(command)?;
        self.commit(next);
        Ok(&self.state)
    }

    fn apply_to(&self, draft: &mut AppState, command: &Command) -> Result<(), DomainError> {
        match command {
            Command::CreateGroup { name } => {
                let group = Group {
                    id: new_id(),
                    name: trimmed(name),
                    created_at: Utc::now(),
                };
                let group_id = group.id.clone();
                draft.store.add_group(group)?;
                for (i, name) in DEFAULT_DAY_TYPES.iter().enumerate() {
                    draft.store.add_day_type(DayType {
                        id: format!("{}-{}", group_id, i + 1),
                        group_id: group_id.clone(),
                        name: name.to_string(),
                    })?;
                }
                draft.store.set_active_group(Some(&group_id))?;
                info!(group_id = %group_id, "group created");
            }
            Command::UpdateGroup { group } => {
                let mut group = group.clone();
                group.name = trimmed(&group.name);
                draft.store.update_group(group)?;
            }
            Command::DeleteGroup { group_id } => {
                let report = delete_group(draft, group_id)?;
                info!(
                    group_id = %group_id,
                    participants = report.participants,
                    schedules = report.schedules,
                    history = report.history,
                    "group deleted"
                );
            }
            Command::SetActiveGroup { group_id } => {
                draft.store.set_active_group(group_id.as_deref())?;
            }
            Command::AddParticipant {
                group_id,
                name,
                phone,
            } => {
                draft.store.add_participant(Participant {
                    id: new_id(),
                    group_id: group_id.clone(),
                    name: trimmed(name),
                    phone: non_blank(phone.clone()),
                })?;
            }
            Command::UpdateParticipant { participant } => {
                let mut participant = participant.clone();
                participant.name = trimmed(&participant.name);
                participant.phone = non_blank(participant.phone);
                draft.store.update_participant(participant)?;
            }
            Command::RemoveParticipant {
                group_id,
                participant_id,
            } => {
                draft.store.remove_participant(group_id, participant_id)?;
            }
            Command::AddDayType { group_id, name } => {
                draft.store.add_day_type(DayType {
                    id: new_id(),
                    group_id: group_id.clone(),
                    name: trimmed(name),
                })?;
            }
            Command::UpdateDayType { day_type } => {
                let mut day_type = day_type.clone();
                day_type.name = trimmed(&day_type.name);
                draft.store.update_day_type(day_type)?;
            }
            Command::RemoveDayType {
                group_id,
                day_type_id,
            } => {
                draft.store.remove_day_type(group_id, day_type_id)?;
            }
            Command::SelectDayType {
                group_id,
                day_type_id,
            } => {
                draft.store.select_day_type(group_id, day_type_id)?;
            }
            Command::ShuffleOrder {
                group_id,
                participant_ids,
            } => {
                let outcome = self
                    .scheduler
                    .shuffle(&mut draft.store, group_id, participant_ids)?;
                info!(
                    group_id = %group_id,
                    participants = outcome.order.len(),
                    cleared = outcome.cleared,
                    "draw order shuffled"
                );
            }
            Command::SetDrawOrder { group_id, order } => {
                check_order(&draft.store, group_id, order)?;
                draft.store.set_draw_order(group_id, order.clone())?;
            }
            Command::GenerateSchedules {
                group_id,
                reference,
            } => {
                let order = draft.store.draw_order(group_id).to_vec();
                let count = draft.store.participants(group_id).len();
                let created = self.scheduler.generate_schedules(
                    &mut draft.store,
                    group_id,
                    &order,
                    count,
                    *reference,
                )?;
                info!(
                    group_id = %group_id,
                    reference = %reference,
                    created = created.len(),
                    "schedules generated"
                );
            }
            Command::ClearPlannedSchedules { group_id } => {
                let removed = draft
                    .store
                    .retain_schedules(group_id, |s| s.status != ScheduleStatus::Planned)?;
                info!(group_id = %group_id, removed, "planned schedules cleared");
            }
            Command::UpdateScheduleDate {
                group_id,
                schedule_id,
                date,
            } => {
                let mut schedule = draft.store.require_schedule(group_id, schedule_id)?.clone();
                schedule.date = *date;
                draft.store.update_schedule(schedule)?;
            }
            Command::SetScheduleHost {
                group_id,
                schedule_id,
                participant_id,
            } => {
                let mut schedule = draft.store.require_schedule(group_id, schedule_id)?.clone();
                if draft.store.participant(group_id, participant_id).is_none() {
                    return Err(DomainError::not_found(
                        EntityKind::Participant,
                        participant_id.as_str(),
                    ));
                }
                schedule.participant_id = participant_id.clone();
                draft.store.update_schedule(schedule)?;
            }
            Command::SetScheduleStatus {
                group_id,
                schedule_id,
                status,
            } => {
                let mut schedule = dated_schedule(draft, group_id, schedule_id)?;
                schedule.status = *status;
                self.transition(draft, schedule)?;
            }
            Command::SetScheduleNote {
                group_id,
                schedule_id,
                note,
            } => {
                let mut schedule = dated_schedule(draft, group_id, schedule_id)?;
                schedule.note = non_blank(Some(note.clone()));
                self.transition(draft, schedule)?;
            }
            Command::RecordHistory {
                group_id,
                date,
                participant_id,
                day_type_id,
                status,
                note,
            } => {
                draft.store.require_group(group_id)?;
                draft.history.record(HistoryEntry {
                    id: new_id(),
                    group_id: group_id.clone(),
                    date: *date,
                    participant_id: participant_id.clone(),
                    day_type_id: day_type_id.clone().unwrap_or_default(),
                    status: *status,
                    note: non_blank(note.clone()),
                    schedule_id: None,
                });
            }
        }
        Ok(())
    }

    /// Stores the changed schedule and records its current status in the ledger.
    fn transition(&self, draft: &mut AppState, schedule: Schedule) -> Result<(), DomainError> {
        let date = schedule.date.ok_or_else(|| DomainError::MissingDate {
            schedule_id: schedule.id.clone(),
        })?;
        let day_type_id = draft
            .store
            .selected_day_type(&schedule.group_id)
            .map(|d| d.id.clone())
            .unwrap_or_default();
        let entry = HistoryEntry {
            id: new_id(),
            group_id: schedule.group_id.clone(),
            date,
            participant_id: schedule.participant_id.clone(),
            day_type_id,
            status: schedule.status,
            note: schedule.note.clone(),
            schedule_id: Some(schedule.id.clone()),
        };
        info!(
            group_id = %schedule.group_id,
            schedule_id = %schedule.id,
            status = %schedule.status,
            "schedule transition"
        );
        draft.store.update_schedule(schedule)?;
        draft.history.record(entry);
        Ok(())
    }
}

/// Looks up a schedule and refuses it when no date has been set.
fn dated_schedule(
    state: &AppState,
    group_id: &str,
    schedule_id: &str,
) -> Result<Schedule, DomainError> {
    let schedule = state.store.require_schedule(group_id, schedule_id)?;
    if !schedule.has_date() {
        return Err(DomainError::MissingDate {
            schedule_id: schedule.id.clone(),
        });
    }
    Ok(schedule.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::random::{ScriptedRandomSource, SeededRandomSource};
    use crate::domain::YearMonth;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn processor(picks: &[usize]) -> CommandProcessor {
        CommandProcessor::new(
            AppState::default(),
            Arc::new(ScriptedRandomSource::new(picks.to_vec())),
        )
    }

    /// Creates group g1 with participants named A, B, C. Returns (group id, [A, B, C] ids).
    fn group_with_abc(p: &mut CommandProcessor) -> (String, Vec<String>) {
        p.apply(&Command::CreateGroup {
            name: "  Kuzenler ".into(),
        })
        .unwrap();
        let gid = p.state().active_group().unwrap().id.clone();
        for name in ["A", "B", "C"] {
            p.apply(&Command::AddParticipant {
                group_id: gid.clone(),
                name: name.into(),
                phone: Some("  ".into()),
            })
            .unwrap();
        }
        let ids = p
            .state()
            .list_participants(&gid)
            .iter()
            .map(|x| x.id.clone())
            .collect();
        (gid, ids)
    }

    fn hosts(p: &CommandProcessor, gid: &str) -> Vec<(String, String, ScheduleStatus)> {
        p.state()
            .list_schedules(gid, None)
            .iter()
            .map(|s| (s.id.clone(), s.participant_id.clone(), s.status))
            .collect()
    }

    fn july() -> YearMonth {
        YearMonth::new(2024, 7).unwrap()
    }

    fn set_date(p: &mut CommandProcessor, gid: &str, sid: &str, day: u32) {
        let date = NaiveDate::from_ymd_opt(2024, 9, day);
        p.apply(&Command::UpdateScheduleDate {
            group_id: gid.into(),
            schedule_id: sid.into(),
            date,
        })
        .unwrap();
    }

    #[test]
    fn create_group_adds_defaults_and_activates() {
        let mut p = processor(&[]);
        let (gid, ids) = group_with_abc(&mut p);
        let state = p.state();
        assert_eq!(state.list_groups()[0].name, "Kuzenler");
        let names: Vec<&str> = state
            .list_day_types(&gid)
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, DEFAULT_DAY_TYPES.to_vec());
        assert_eq!(state.list_day_types(&gid)[0].id, format!("{}-1", gid));
        assert_eq!(ids.len(), 3);
        assert!(state.list_participants(&gid)[0].phone.is_none());
        assert_eq!(state.version, 4);
    }

    #[test]
    fn blank_group_name_rejected_without_version_bump() {
        let mut p = processor(&[]);
        let err = p
            .apply(&Command::CreateGroup { name: "  ".into() })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(p.state(), &AppState::default());
    }

    #[test]
    fn scenario_a_shuffle_then_generate() {
        let mut p = processor(&[0, 0]);
        let (gid, ids) = group_with_abc(&mut p);
        let (a, b, c) = (ids[0].clone(), ids[1].clone(), ids[2].clone());

        p.apply(&Command::ShuffleOrder {
            group_id: gid.clone(),
            participant_ids: ids.clone(),
        })
        .unwrap();
        assert_eq!(p.state().draw_order(&gid), &[b.clone(), c.clone(), a.clone()]);

        p.apply(&Command::GenerateSchedules {
            group_id: gid.clone(),
            reference: july(),
        })
        .unwrap();
        assert_eq!(
            hosts(&p, &gid),
            vec![
                ("2024-08".to_string(), b, ScheduleStatus::Planned),
                ("2024-09".to_string(), c, ScheduleStatus::Planned),
                ("2024-10".to_string(), a, ScheduleStatus::Planned),
            ]
        );
    }

    #[test]
    fn scenario_b_reshuffle_keeps_completed_month() {
        // first draw [B, C, A], second draw [A, C, B]
        let mut p = processor(&[0, 0, 1, 1]);
        let (gid, ids) = group_with_abc(&mut p);
        let (a, b, c) = (ids[0].clone(), ids[1].clone(), ids[2].clone());
        let shuffle = Command::ShuffleOrder {
            group_id: gid.clone(),
            participant_ids: ids.clone(),
        };
        let generate = Command::GenerateSchedules {
            group_id: gid.clone(),
            reference: july(),
        };
        p.apply(&shuffle).unwrap();
        p.apply(&generate).unwrap();

        set_date(&mut p, &gid, "2024-08", 10);
        p.apply(&Command::SetScheduleStatus {
            group_id: gid.clone(),
            schedule_id: "2024-08".into(),
            status: ScheduleStatus::Completed,
        })
        .unwrap();
        let history = p.state().list_history(&gid);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].schedule_id.as_deref(), Some("2024-08"));
        assert_eq!(history[0].status, ScheduleStatus::Completed);
        let completed = p.state().store.schedule(&gid, "2024-08").unwrap().clone();

        p.apply(&shuffle).unwrap();
        assert_eq!(p.state().draw_order(&gid), &[a.clone(), c.clone(), b.clone()]);
        assert_eq!(hosts(&p, &gid).len(), 1);

        p.apply(&generate).unwrap();
        assert_eq!(p.state().store.schedule(&gid, "2024-08"), Some(&completed));
        assert_eq!(
            hosts(&p, &gid),
            vec![
                ("2024-08".to_string(), b.clone(), ScheduleStatus::Completed),
                ("2024-09".to_string(), c, ScheduleStatus::Planned),
                ("2024-10".to_string(), b, ScheduleStatus::Planned),
            ]
        );
    }

    #[test]
    fn scenario_c_toggling_status_keeps_one_entry_per_status() {
        let mut p = processor(&[0, 0]);
        let (gid, ids) = group_with_abc(&mut p);
        p.apply(&Command::ShuffleOrder {
            group_id: gid.clone(),
            participant_ids: ids,
        })
        .unwrap();
        p.apply(&Command::GenerateSchedules {
            group_id: gid.clone(),
            reference: july(),
        })
        .unwrap();
        p.apply(&Command::SelectDayType {
            group_id: gid.clone(),
            day_type_id: format!("{}-2", gid),
        })
        .unwrap();
        set_date(&mut p, &gid, "2024-09", 7);

        let status = |s| Command::SetScheduleStatus {
            group_id: gid.clone(),
            schedule_id: "2024-09".into(),
            status: s,
        };
        p.apply(&status(ScheduleStatus::Completed)).unwrap();
        p.apply(&status(ScheduleStatus::Canceled)).unwrap();
        set_date(&mut p, &gid, "2024-09", 21);
        p.apply(&Command::SetScheduleNote {
            group_id: gid.clone(),
            schedule_id: "2024-09".into(),
            note: "moved".into(),
        })
        .unwrap();
        p.apply(&status(ScheduleStatus::Completed)).unwrap();

        let history = p.state().list_history(&gid);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].status, ScheduleStatus::Completed);
        assert_eq!(history[0].date, NaiveDate::from_ymd_opt(2024, 9, 21).unwrap());
        assert_eq!(history[0].note.as_deref(), Some("moved"));
        assert_eq!(history[0].day_type_id, format!("{}-2", gid));
        assert_eq!(history[1].status, ScheduleStatus::Canceled);
        assert_eq!(history[1].note.as_deref(), Some("moved"));
    }

    #[test]
    fn status_and_note_need_a_date() {
        let mut p = processor(&[0, 0]);
        let (gid, ids) = group_with_abc(&mut p);
        p.apply(&Command::SetDrawOrder {
            group_id: gid.clone(),
            order: ids,
        })
        .unwrap();
        p.apply(&Command::GenerateSchedules {
            group_id: gid.clone(),
            reference: july(),
        })
        .unwrap();
        let before = p.state().clone();

        for command in [
            Command::SetScheduleStatus {
                group_id: gid.clone(),
                schedule_id: "2024-08".into(),
                status: ScheduleStatus::Completed,
            },
            Command::SetScheduleNote {
                group_id: gid.clone(),
                schedule_id: "2024-08".into(),
                note: "early".into(),
            },
        ] {
            let err = p.apply(&command).unwrap_err();
            assert_eq!(
                err,
                DomainError::MissingDate {
                    schedule_id: "2024-08".into()
                }
            );
        }
        assert_eq!(p.state(), &before);
    }

    #[test]
    fn unknown_schedule_is_not_found() {
        let mut p = processor(&[]);
        let (gid, _) = group_with_abc(&mut p);
        let err = p
            .apply(&Command::UpdateScheduleDate {
                group_id: gid,
                schedule_id: "2030-01".into(),
                date: None,
            })
            .unwrap_err();
        assert_eq!(err, DomainError::not_found(EntityKind::Schedule, "2030-01"));
    }

    #[test]
    fn host_can_be_reassigned_to_group_member_only() {
        let mut p = processor(&[]);
        let (gid, ids) = group_with_abc(&mut p);
        p.apply(&Command::SetDrawOrder {
            group_id: gid.clone(),
            order: ids.clone(),
        })
        .unwrap();
        p.apply(&Command::GenerateSchedules {
            group_id: gid.clone(),
            reference: july(),
        })
        .unwrap();
        p.apply(&Command::SetScheduleHost {
            group_id: gid.clone(),
            schedule_id: "2024-08".into(),
            participant_id: ids[2].clone(),
        })
        .unwrap();
        assert_eq!(
            p.state().store.schedule(&gid, "2024-08").unwrap().participant_id,
            ids[2]
        );
        assert!(p
            .apply(&Command::SetScheduleHost {
                group_id: gid,
                schedule_id: "2024-08".into(),
                participant_id: "stranger".into(),
            })
            .is_err());
    }

    #[test]
    fn delete_group_cascades() {
        let mut p = processor(&[0, 0]);
        let (gid, ids) = group_with_abc(&mut p);
        p.apply(&Command::ShuffleOrder {
            group_id: gid.clone(),
            participant_ids: ids,
        })
        .unwrap();
        p.apply(&Command::GenerateSchedules {
            group_id: gid.clone(),
            reference: july(),
        })
        .unwrap();
        set_date(&mut p, &gid, "2024-08", 3);
        p.apply(&Command::SetScheduleStatus {
            group_id: gid.clone(),
            schedule_id: "2024-08".into(),
            status: ScheduleStatus::Completed,
        })
        .unwrap();

        p.apply(&Command::DeleteGroup {
            group_id: gid.clone(),
        })
        .unwrap();
        let state = p.state();
        assert!(state.list_groups().is_empty());
        assert!(state.active_group().is_none());
        assert!(state.list_participants(&gid).is_empty());
        assert!(state.list_day_types(&gid).is_empty());
        assert!(state.list_schedules(&gid, None).is_empty());
        assert!(state.list_history(&gid).is_empty());
        assert!(state.draw_order(&gid).is_empty());
    }

    #[test]
    fn manual_history_entries_accumulate() {
        let mut p = processor(&[]);
        let (gid, ids) = group_with_abc(&mut p);
        let record = Command::RecordHistory {
            group_id: gid.clone(),
            date: NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
            participant_id: ids[0].clone(),
            day_type_id: None,
            status: ScheduleStatus::Completed,
            note: Some("before the app".into()),
        };
        p.apply(&record).unwrap();
        p.apply(&record).unwrap();
        assert_eq!(p.state().list_history(&gid).len(), 2);
    }

    #[test]
    fn plan_does_not_commit() {
        let mut p = processor(&[]);
        let (gid, _) = group_with_abc(&mut p);
        let next = p
            .plan(&Command::AddDayType {
                group_id: gid.clone(),
                name: "Dolar".into(),
            })
            .unwrap();
        assert_eq!(next.list_day_types(&gid).len(), 5);
        assert_eq!(p.state().list_day_types(&gid).len(), 4);
        assert_eq!(next.version, p.state().version + 1);
    }

    #[test]
    fn draw_order_must_name_group_members_once() {
        let mut p = processor(&[]);
        let (gid, ids) = group_with_abc(&mut p);
        let before = p.state().clone();
        let set = |order: Vec<String>| Command::SetDrawOrder {
            group_id: gid.clone(),
            order,
        };

        let err = p.apply(&set(vec!["ghost".into(), "ghost".into()])).unwrap_err();
        assert_eq!(err, DomainError::not_found(EntityKind::Participant, "ghost"));
        let err = p.apply(&set(vec![ids[0].clone(), ids[0].clone()])).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        let err = p.apply(&set(vec![])).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(p.state(), &before);

        p.apply(&Command::GenerateSchedules {
            group_id: gid.clone(),
            reference: july(),
        })
        .unwrap();
        assert!(p.state().list_schedules(&gid, None).is_empty());

        p.apply(&set(vec![ids[1].clone(), ids[0].clone()])).unwrap();
        assert_eq!(p.state().draw_order(&gid), &[ids[1].clone(), ids[0].clone()]);
    }

    #[test]
    fn update_group_renames_and_rejects_unknown() {
        let mut p = processor(&[]);
        let (gid, _) = group_with_abc(&mut p);
        let mut group = p.state().active_group().unwrap().clone();
        group.name = " Kuzenler 2024 ".into();
        p.apply(&Command::UpdateGroup {
            group: group.clone(),
        })
        .unwrap();
        assert_eq!(p.state().store.group(&gid).unwrap().name, "Kuzenler 2024");

        group.id = "missing".into();
        let err = p.apply(&Command::UpdateGroup { group }).unwrap_err();
        assert_eq!(err, DomainError::not_found(EntityKind::Group, "missing"));
    }

    #[test]
    fn active_group_can_be_switched_and_cleared() {
        let mut p = processor(&[]);
        let (first, _) = group_with_abc(&mut p);
        p.apply(&Command::CreateGroup {
            name: "Komşular".into(),
        })
        .unwrap();
        assert_ne!(p.state().active_group().unwrap().id, first);

        p.apply(&Command::SetActiveGroup {
            group_id: Some(first.clone()),
        })
        .unwrap();
        assert_eq!(p.state().active_group().unwrap().id, first);
        assert!(p
            .apply(&Command::SetActiveGroup {
                group_id: Some("missing".into()),
            })
            .is_err());
        p.apply(&Command::SetActiveGroup { group_id: None }).unwrap();
        assert!(p.state().active_group().is_none());
    }

    #[test]
    fn participant_update_trims_and_clears_phone() {
        let mut p = processor(&[]);
        let (gid, ids) = group_with_abc(&mut p);
        let mut participant = p.state().list_participants(&gid)[0].clone();
        participant.name = " Ayşe ".into();
        participant.phone = Some("0555".into());
        p.apply(&Command::UpdateParticipant {
            participant: participant.clone(),
        })
        .unwrap();
        let stored = &p.state().list_participants(&gid)[0];
        assert_eq!(stored.id, ids[0]);
        assert_eq!(stored.name, "Ayşe");
        assert_eq!(stored.phone.as_deref(), Some("0555"));

        participant.phone = Some("".into());
        p.apply(&Command::UpdateParticipant { participant }).unwrap();
        assert!(p.state().list_participants(&gid)[0].phone.is_none());
    }

    #[test]
    fn removing_participant_leaves_draw_order_as_is() {
        let mut p = processor(&[]);
        let (gid, ids) = group_with_abc(&mut p);
        p.apply(&Command::SetDrawOrder {
            group_id: gid.clone(),
            order: ids.clone(),
        })
        .unwrap();
        p.apply(&Command::RemoveParticipant {
            group_id: gid.clone(),
            participant_id: ids[1].clone(),
        })
        .unwrap();
        assert_eq!(p.state().list_participants(&gid).len(), 2);
        assert_eq!(p.state().draw_order(&gid), ids.as_slice());
        assert!(p
            .apply(&Command::RemoveParticipant {
                group_id: gid,
                participant_id: ids[1].clone(),
            })
            .is_err());
    }

    #[test]
    fn day_types_can_be_renamed_and_removed() {
        let mut p = processor(&[]);
        let (gid, _) = group_with_abc(&mut p);
        let gold = format!("{}-1", gid);
        p.apply(&Command::SelectDayType {
            group_id: gid.clone(),
            day_type_id: gold.clone(),
        })
        .unwrap();
        let mut day_type = p.state().list_day_types(&gid)[0].clone();
        day_type.name = " Gram Altın ".into();
        p.apply(&Command::UpdateDayType { day_type }).unwrap();
        assert_eq!(p.state().selected_day_type(&gid).unwrap().name, "Gram Altın");

        p.apply(&Command::RemoveDayType {
            group_id: gid.clone(),
            day_type_id: gold,
        })
        .unwrap();
        assert_eq!(p.state().list_day_types(&gid).len(), 3);
        assert!(p.state().selected_day_type(&gid).is_none());
    }

    #[test]
    fn clearing_planned_keeps_finished_months() {
        let mut p = processor(&[]);
        let (gid, ids) = group_with_abc(&mut p);
        p.apply(&Command::SetDrawOrder {
            group_id: gid.clone(),
            order: ids,
        })
        .unwrap();
        p.apply(&Command::GenerateSchedules {
            group_id: gid.clone(),
            reference: july(),
        })
        .unwrap();
        for (sid, status) in [
            ("2024-08", ScheduleStatus::Completed),
            ("2024-09", ScheduleStatus::Canceled),
        ] {
            set_date(&mut p, &gid, sid, 5);
            p.apply(&Command::SetScheduleStatus {
                group_id: gid.clone(),
                schedule_id: sid.into(),
                status,
            })
            .unwrap();
        }

        p.apply(&Command::ClearPlannedSchedules {
            group_id: gid.clone(),
        })
        .unwrap();
        let left: Vec<(String, ScheduleStatus)> = p
            .state()
            .list_schedules(&gid, None)
            .iter()
            .map(|s| (s.id.clone(), s.status))
            .collect();
        assert_eq!(
            left,
            vec![
                ("2024-08".to_string(), ScheduleStatus::Completed),
                ("2024-09".to_string(), ScheduleStatus::Canceled),
            ]
        );
    }

    proptest! {
        #[test]
        fn ledger_keeps_one_entry_per_status(steps in prop::collection::vec(0u8..3, 1..30), seed in any::<u64>()) {
            let mut p = CommandProcessor::new(AppState::default(), Arc::new(SeededRandomSource::new(seed)));
            let (gid, ids) = group_with_abc(&mut p);
            p.apply(&Command::ShuffleOrder { group_id: gid.clone(), participant_ids: ids }).unwrap();
            p.apply(&Command::GenerateSchedules { group_id: gid.clone(), reference: july() }).unwrap();
            set_date(&mut p, &gid, "2024-10", 12);

            let mut reached = std::collections::HashSet::new();
            for step in steps {
                let status = match step {
                    0 => ScheduleStatus::Planned,
                    1 => ScheduleStatus::Completed,
                    _ => ScheduleStatus::Canceled,
                };
                reached.insert(status);
                p.apply(&Command::SetScheduleStatus {
                    group_id: gid.clone(),
                    schedule_id: "2024-10".into(),
                    status,
                }).unwrap();
            }
            let history = p.state().list_history(&gid);
            prop_assert_eq!(history.len(), reached.len());
            let mut seen = std::collections::HashSet::new();
            for entry in history {
                prop_assert!(seen.insert((entry.schedule_id.clone(), entry.status)));
            }
        }
    }
}
