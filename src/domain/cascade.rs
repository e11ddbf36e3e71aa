//! Group deletion across every collection.
//!
//! Works on a single `&mut AppState`, so the caller sees either the whole removal or,
//! on error, an untouched state.

use crate::domain::{AppState, DomainError, Group};

/// What a cascade removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeReport {
    pub group: Group,
    pub participants: usize,
    pub day_types: usize,
    pub schedules: usize,
    pub history: usize,
}

/// Removes the group, its participants, day types, schedules, draw order and history.
/// Clears the active group pointer when it named this group.
pub fn delete_group(state: &mut AppState, group_id: &str) -> Result<CascadeReport, DomainError> {
    state.store.require_group(group_id)?;

    let participants = state.store.participants(group_id).len();
    let day_types = state.store.day_types(group_id).len();
    let schedules = state.store.schedules(group_id, None).len();

    let group = state.store.remove_group(group_id)?;
    let history = state.history.remove_group(group_id);

    Ok(CascadeReport {
        group,
        participants,
        day_types,
        schedules,
        history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        DayType, EntityKind, HistoryEntry, Participant, Schedule, ScheduleStatus, YearMonth,
    };
    use chrono::{NaiveDate, Utc};

    fn seeded_state() -> AppState {
        let mut state = AppState::default();
        for gid in ["g1", "g2"] {
            state
                .store
                .add_group(Group {
                    id: gid.into(),
                    name: gid.to_uppercase(),
                    created_at: Utc::now(),
                })
                .unwrap();
            state
                .store
                .add_participant(Participant {
                    id: format!("{}-p", gid),
                    group_id: gid.into(),
                    name: "Zeynep".into(),
                    phone: Some("555".into()),
                })
                .unwrap();
            state
                .store
                .add_day_type(DayType {
                    id: format!("{}-1", gid),
                    group_id: gid.into(),
                    name: "Altın".into(),
                })
                .unwrap();
            state
                .store
                .add_schedule(Schedule::planned(
                    gid,
                    YearMonth::new(2024, 8).unwrap(),
                    &format!("{}-p", gid),
                ))
                .unwrap();
            state
                .store
                .set_draw_order(gid, vec![format!("{}-p", gid)])
                .unwrap();
            state.history.record(HistoryEntry {
                id: format!("{}-h", gid),
                group_id: gid.into(),
                date: NaiveDate::from_ymd_opt(2024, 8, 3).unwrap(),
                participant_id: format!("{}-p", gid),
                day_type_id: String::new(),
                status: ScheduleStatus::Completed,
                note: None,
                schedule_id: Some("2024-08".into()),
            });
        }
        state.store.set_active_group(Some("g1")).unwrap();
        state
    }

    #[test]
    fn removes_every_scoped_collection() {
        let mut state = seeded_state();
        let report = delete_group(&mut state, "g1").unwrap();

        assert_eq!(report.group.id, "g1");
        assert_eq!(
            (report.participants, report.day_types, report.schedules, report.history),
            (1, 1, 1, 1)
        );
        assert!(state.list_groups().iter().all(|g| g.id != "g1"));
        assert!(state.list_participants("g1").is_empty());
        assert!(state.list_day_types("g1").is_empty());
        assert!(state.list_schedules("g1", None).is_empty());
        assert!(state.draw_order("g1").is_empty());
        assert!(state.list_history("g1").is_empty());
        assert!(state.active_group().is_none());
    }

    #[test]
    fn other_groups_untouched() {
        let mut state = seeded_state();
        delete_group(&mut state, "g1").unwrap();
        assert_eq!(state.list_participants("g2").len(), 1);
        assert_eq!(state.list_schedules("g2", None).len(), 1);
        assert_eq!(state.list_history("g2").len(), 1);
        assert_eq!(state.draw_order("g2").len(), 1);
    }

    #[test]
    fn unknown_group_leaves_state_unchanged() {
        let mut state = seeded_state();
        let before = state.clone();
        let err = delete_group(&mut state, "nope").unwrap_err();
        assert_eq!(err, DomainError::not_found(EntityKind::Group, "nope"));
        assert_eq!(state, before);
    }
}
