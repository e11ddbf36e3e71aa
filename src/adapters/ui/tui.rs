//! Implements InputPort. Inquire-based interactive menus.
//!
//! Only turns prompts into commands and renders query views; every rule lives in the core.
//! Esc goes back one menu, Ctrl+C quits.

use crate::domain::{
    AppState, DayType, DomainError, Group, Participant, Schedule, ScheduleStatus, YearMonth,
};
use crate::ports::InputPort;
use crate::usecases::{Command, GroupService};
use async_trait::async_trait;
use chrono::{Datelike, Local, NaiveDate};
use inquire::error::InquireError;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{Confirm, Select, Text};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Gold prompt prefix and highlighted option.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("◆").with_fg(Color::LightYellow))
        .with_highlighted_option_prefix(Styled::new("➤").with_fg(Color::LightYellow));
    inquire::set_global_render_config(config);
}

fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("?")
}

fn status_label(status: ScheduleStatus) -> &'static str {
    match status {
        ScheduleStatus::Planned => "planned",
        ScheduleStatus::Completed => "completed ✓",
        ScheduleStatus::Canceled => "canceled ✗",
    }
}

fn participant_name(state: &AppState, group_id: &str, id: &str) -> String {
    state
        .store
        .participant(group_id, id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "(removed participant)".to_string())
}

/// Menu option carrying a value; only the label is shown.
struct Choice<T> {
    label: String,
    value: T,
}

impl<T> Choice<T> {
    fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

impl<T> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// `Ok(None)` when the user backed out with Esc.
fn answered<T>(result: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled) => Ok(None),
        Err(e) => Err(DomainError::Input(e.to_string())),
    }
}

fn pick<T>(message: &str, choices: Vec<Choice<T>>) -> Result<Option<T>, DomainError> {
    if choices.is_empty() {
        return Ok(None);
    }
    Ok(answered(Select::new(message, choices).prompt())?.map(|c| c.value))
}

fn ask(message: &str) -> Result<Option<String>, DomainError> {
    answered(Text::new(message).prompt())
}

fn confirm(message: &str) -> Result<bool, DomainError> {
    Ok(answered(Confirm::new(message).with_default(false).prompt())?.unwrap_or(false))
}

/// Prints a rejected command and keeps the menu running.
fn report(err: &DomainError) {
    match err {
        DomainError::MissingDate { .. } => println!("  ✗ Pick a date for this month first."),
        other => println!("  ✗ {}", other),
    }
}

#[derive(Clone, Copy)]
enum GroupAction {
    Participants,
    DayTypes,
    Draw,
    Schedules,
    History,
    Rename,
    Delete,
}

#[derive(Clone, Copy)]
enum ScheduleAction {
    Date,
    Status,
    Note,
    Host,
}

/// TUI adapter. Inquire prompts over the group service.
pub struct TuiInputPort {
    service: Arc<GroupService>,
}

impl TuiInputPort {
    pub fn new(service: Arc<GroupService>) -> Self {
        Self { service }
    }

    /// Runs a command; rejected commands are reported, not propagated.
    async fn exec(&self, command: Command) -> Option<AppState> {
        match self.service.execute(command).await {
            Ok(state) => Some(state),
            Err(e) => {
                if matches!(e, DomainError::State(_)) {
                    warn!(error = %e, "snapshot not saved");
                }
                report(&e);
                None
            }
        }
    }

    async fn main_menu(&self) -> Result<bool, DomainError> {
        let state = self.service.state().await;
        let mut choices: Vec<Choice<Option<String>>> = state
            .list_groups()
            .iter()
            .map(|g| {
                let marker = if state.active_group().map(|a| &a.id) == Some(&g.id) {
                    "★ "
                } else {
                    ""
                };
                Choice::new(
                    format!(
                        "{}{} ({} participants, since {})",
                        marker,
                        g.name,
                        state.list_participants(&g.id).len(),
                        g.created_at.format("%d.%m.%Y")
                    ),
                    Some(g.id.clone()),
                )
            })
            .collect();
        choices.push(Choice::new("+ New group", None));

        let Some(selected) = pick("Gold day groups", choices)? else {
            return Ok(false);
        };
        match selected {
            Some(group_id) => {
                self.exec(Command::SetActiveGroup {
                    group_id: Some(group_id.clone()),
                })
                .await;
                self.group_menu(&group_id).await?;
            }
            None => {
                if let Some(name) = ask("Group name:")? {
                    if let Some(state) = self.exec(Command::CreateGroup { name }).await {
                        if let Some(group) = state.active_group() {
                            let id = group.id.clone();
                            self.group_menu(&id).await?;
                        }
                    }
                }
            }
        }
        Ok(true)
    }

    async fn group_menu(&self, group_id: &str) -> Result<(), DomainError> {
        loop {
            let state = self.service.state().await;
            let Some(group) = state.store.group(group_id).cloned() else {
                return Ok(());
            };
            if state.selected_day_type(group_id).is_none() {
                println!("  ! No day type selected yet (see Day types).");
            }
            let choices = vec![
                Choice::new("Participants", GroupAction::Participants),
                Choice::new("Day types", GroupAction::DayTypes),
                Choice::new("Draw order", GroupAction::Draw),
                Choice::new("Schedule", GroupAction::Schedules),
                Choice::new("History", GroupAction::History),
                Choice::new("Rename group", GroupAction::Rename),
                Choice::new("Delete group", GroupAction::Delete),
            ];
            let Some(action) = pick(&format!("{} ›", group.name), choices)? else {
                return Ok(());
            };
            match action {
                GroupAction::Participants => self.participants_menu(group_id).await?,
                GroupAction::DayTypes => self.day_types_menu(group_id).await?,
                GroupAction::Draw => self.draw_menu(group_id).await?,
                GroupAction::Schedules => self.schedules_menu(group_id).await?,
                GroupAction::History => self.show_history(group_id).await,
                GroupAction::Rename => self.rename_group(group).await?,
                GroupAction::Delete => {
                    let prompt = format!(
                        "Delete \"{}\" with all participants, schedules and history?",
                        group.name
                    );
                    if confirm(&prompt)? {
                        self.exec(Command::DeleteGroup {
                            group_id: group_id.to_string(),
                        })
                        .await;
                        return Ok(());
                    }
                }
            }
        }
    }

    async fn rename_group(&self, group: Group) -> Result<(), DomainError> {
        let answer = answered(Text::new("New name:").with_default(&group.name).prompt())?;
        if let Some(name) = answer {
            self.exec(Command::UpdateGroup {
                group: Group { name, ..group },
            })
            .await;
        }
        Ok(())
    }

    async fn participants_menu(&self, group_id: &str) -> Result<(), DomainError> {
        loop {
            let state = self.service.state().await;
            let participants = state.list_participants(group_id);
            println!("  Participants: {}", participants.len());
            for p in participants {
                println!(
                    "   • {}{}",
                    p.name,
                    p.phone.as_deref().map(|ph| format!(" ({})", ph)).unwrap_or_default()
                );
            }
            let choices = vec![
                Choice::new("Add", 0u8),
                Choice::new("Edit", 1),
                Choice::new("Remove", 2),
            ];
            let Some(action) = pick("Participants ›", choices)? else {
                return Ok(());
            };
            if action == 0 {
                let Some(name) = ask("Name:")? else { continue };
                let phone = ask("Phone (optional):")?;
                self.exec(Command::AddParticipant {
                    group_id: group_id.to_string(),
                    name,
                    phone,
                })
                .await;
                continue;
            }

            let choices = participants
                .iter()
                .map(|p| Choice::new(p.name.clone(), p.clone()))
                .collect();
            let prompt = if action == 1 { "Edit who?" } else { "Remove who?" };
            let Some(participant) = pick(prompt, choices)? else {
                continue;
            };
            if action == 1 {
                self.edit_participant(participant).await?;
            } else {
                self.exec(Command::RemoveParticipant {
                    group_id: group_id.to_string(),
                    participant_id: participant.id,
                })
                .await;
            }
        }
    }

    async fn edit_participant(&self, participant: Participant) -> Result<(), DomainError> {
        let Some(name) =
            answered(Text::new("Name:").with_default(&participant.name).prompt())?
        else {
            return Ok(());
        };
        let current_phone = participant.phone.clone().unwrap_or_default();
        let Some(phone) = answered(
            Text::new("Phone (empty to clear):")
                .with_default(&current_phone)
                .prompt(),
        )?
        else {
            return Ok(());
        };
        self.exec(Command::UpdateParticipant {
            participant: Participant {
                name,
                phone: Some(phone),
                ..participant
            },
        })
        .await;
        Ok(())
    }

    async fn day_types_menu(&self, group_id: &str) -> Result<(), DomainError> {
        loop {
            let state = self.service.state().await;
            let selected = state.selected_day_type(group_id).map(|d| d.id.clone());
            let mut choices: Vec<Choice<Option<String>>> = state
                .list_day_types(group_id)
                .iter()
                .map(|d| {
                    let marker = if selected.as_ref() == Some(&d.id) { "●" } else { "○" };
                    Choice::new(format!("{} {}", marker, d.name), Some(d.id.clone()))
                })
                .collect();
            choices.push(Choice::new("+ New day type", None));

            let Some(choice) = pick("Select the day type for this group", choices)? else {
                return Ok(());
            };
            match choice {
                Some(day_type_id) => {
                    let actions = vec![
                        Choice::new("Select", 0u8),
                        Choice::new("Rename", 1),
                        Choice::new("Remove", 2),
                    ];
                    match pick("Day type ›", actions)? {
                        Some(0) => {
                            self.exec(Command::SelectDayType {
                                group_id: group_id.to_string(),
                                day_type_id,
                            })
                            .await;
                        }
                        Some(1) => {
                            let Some(current) = state
                                .list_day_types(group_id)
                                .iter()
                                .find(|d| d.id == day_type_id)
                                .cloned()
                            else {
                                continue;
                            };
                            let answer = answered(
                                Text::new("New name:").with_default(&current.name).prompt(),
                            )?;
                            if let Some(name) = answer {
                                self.exec(Command::UpdateDayType {
                                    day_type: DayType { name, ..current },
                                })
                                .await;
                            }
                        }
                        Some(_) => {
                            self.exec(Command::RemoveDayType {
                                group_id: group_id.to_string(),
                                day_type_id,
                            })
                            .await;
                        }
                        None => {}
                    }
                }
                None => {
                    if let Some(name) = ask("Day type name:")? {
                        self.exec(Command::AddDayType {
                            group_id: group_id.to_string(),
                            name,
                        })
                        .await;
                    }
                }
            }
        }
    }

    async fn draw_menu(&self, group_id: &str) -> Result<(), DomainError> {
        let state = self.service.state().await;
        let order = state.draw_order(group_id);
        if order.is_empty() {
            println!("  No draw yet.");
        } else {
            for (i, id) in order.iter().enumerate() {
                println!("   {}. {}", i + 1, participant_name(&state, group_id, id));
            }
        }

        let now = Local::now();
        let reference = YearMonth::new(now.year(), now.month())?;
        let choices = vec![
            Choice::new("Draw now", 0u8),
            Choice::new("Fill missing months", 1),
            Choice::new("Clear planned months", 2),
        ];
        let Some(action) = pick("Draw ›", choices)? else {
            return Ok(());
        };
        match action {
            0 => {
                let ids: Vec<String> = state
                    .list_participants(group_id)
                    .iter()
                    .map(|p| p.id.clone())
                    .collect();
                if !order.is_empty()
                    && !confirm("Redraw? Planned months will be regenerated.")?
                {
                    return Ok(());
                }
                let shuffled = self
                    .exec(Command::ShuffleOrder {
                        group_id: group_id.to_string(),
                        participant_ids: ids,
                    })
                    .await;
                if shuffled.is_some() {
                    self.generate(group_id, reference).await;
                }
            }
            1 => self.generate(group_id, reference).await,
            _ => {
                self.exec(Command::ClearPlannedSchedules {
                    group_id: group_id.to_string(),
                })
                .await;
            }
        }
        Ok(())
    }

    async fn generate(&self, group_id: &str, reference: YearMonth) {
        if let Some(state) = self
            .exec(Command::GenerateSchedules {
                group_id: group_id.to_string(),
                reference,
            })
            .await
        {
            println!(
                "  Schedule starts {} {}; {} months planned.",
                month_name(reference.advance(1).month),
                reference.advance(1).year,
                state.list_schedules(group_id, None).len()
            );
        }
    }

    async fn schedules_menu(&self, group_id: &str) -> Result<(), DomainError> {
        let this_year = Local::now().year();
        let Some(year) = answered(
            Text::new("Year:")
                .with_default(&this_year.to_string())
                .prompt(),
        )?
        else {
            return Ok(());
        };
        let Ok(year) = year.trim().parse::<i32>() else {
            println!("  ✗ Not a year: {}", year);
            return Ok(());
        };

        loop {
            let state = self.service.state().await;
            let mut schedules: Vec<&Schedule> = state.list_schedules(group_id, Some(year));
            schedules.sort_by_key(|s| s.month);
            let day_type = state
                .selected_day_type(group_id)
                .map(|d| d.name.clone())
                .unwrap_or_else(|| "no day type".to_string());
            let choices: Vec<Choice<String>> = schedules
                .iter()
                .map(|s| {
                    let label = format!(
                        "{:<9} {} · {} · {} · {}{}",
                        month_name(s.month),
                        s.year,
                        participant_name(&state, group_id, &s.participant_id),
                        s.date
                            .map(|d| d.format("%d.%m.%Y").to_string())
                            .unwrap_or_else(|| "no date".to_string()),
                        status_label(s.status),
                        s.note.as_deref().map(|n| format!(" · {}", n)).unwrap_or_default()
                    );
                    Choice::new(label, s.id.clone())
                })
                .collect();
            if choices.is_empty() {
                println!("  No months scheduled for {} ({}).", year, day_type);
                return Ok(());
            }
            let Some(schedule_id) = pick(&format!("{} · {}", year, day_type), choices)? else {
                return Ok(());
            };
            self.schedule_menu(&state, group_id, &schedule_id).await?;
        }
    }

    async fn schedule_menu(
        &self,
        state: &AppState,
        group_id: &str,
        schedule_id: &str,
    ) -> Result<(), DomainError> {
        let actions = vec![
            Choice::new("Set date", ScheduleAction::Date),
            Choice::new("Set status", ScheduleAction::Status),
            Choice::new("Save note", ScheduleAction::Note),
            Choice::new("Change host", ScheduleAction::Host),
        ];
        let Some(action) = pick(&format!("{} ›", schedule_id), actions)? else {
            return Ok(());
        };
        let group_id = group_id.to_string();
        let schedule_id = schedule_id.to_string();
        match action {
            ScheduleAction::Date => {
                let Some(raw) = ask("Date (YYYY-MM-DD, empty to clear):")? else {
                    return Ok(());
                };
                let date = if raw.trim().is_empty() {
                    None
                } else {
                    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
                        Ok(d) => Some(d),
                        Err(_) => {
                            println!("  ✗ Not a date: {}", raw);
                            return Ok(());
                        }
                    }
                };
                self.exec(Command::UpdateScheduleDate {
                    group_id,
                    schedule_id,
                    date,
                })
                .await;
            }
            ScheduleAction::Status => {
                let choices = vec![
                    Choice::new("Planned", ScheduleStatus::Planned),
                    Choice::new("Completed", ScheduleStatus::Completed),
                    Choice::new("Canceled", ScheduleStatus::Canceled),
                ];
                if let Some(status) = pick("Status:", choices)? {
                    self.exec(Command::SetScheduleStatus {
                        group_id,
                        schedule_id,
                        status,
                    })
                    .await;
                }
            }
            ScheduleAction::Note => {
                if let Some(note) = ask("Note:")? {
                    if confirm("Save this note to the history?")? {
                        self.exec(Command::SetScheduleNote {
                            group_id,
                            schedule_id,
                            note,
                        })
                        .await;
                    }
                }
            }
            ScheduleAction::Host => {
                let choices = state
                    .list_participants(&group_id)
                    .iter()
                    .map(|p| Choice::new(p.name.clone(), p.id.clone()))
                    .collect();
                if let Some(participant_id) = pick("New host:", choices)? {
                    self.exec(Command::SetScheduleHost {
                        group_id,
                        schedule_id,
                        participant_id,
                    })
                    .await;
                }
            }
        }
        Ok(())
    }

    /// Newest first; same-day entries ordered planned, completed, canceled.
    async fn show_history(&self, group_id: &str) {
        let state = self.service.state().await;
        let mut entries: Vec<_> = state.list_history(group_id).iter().collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date).then(a.status.cmp(&b.status)));
        if entries.is_empty() {
            println!("  No history yet.");
            return;
        }
        for e in entries {
            let day_type = state
                .list_day_types(group_id)
                .iter()
                .find(|d| d.id == e.day_type_id)
                .map(|d| d.name.as_str())
                .unwrap_or("-");
            println!(
                "   {} {} {} · {} · {} · {}{}",
                e.date.day(),
                month_name(e.date.month()),
                e.date.year(),
                participant_name(&state, group_id, &e.participant_id),
                day_type,
                status_label(e.status),
                e.note.as_deref().map(|n| format!(" · {}", n)).unwrap_or_default()
            );
        }
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        while self.main_menu().await? {}
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_names_are_one_based() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "?");
        assert_eq!(month_name(13), "?");
    }

    #[test]
    fn esc_is_not_an_error() {
        let r: Result<u8, InquireError> = Err(InquireError::OperationCanceled);
        assert_eq!(answered(r).unwrap(), None);
        let r: Result<u8, InquireError> = Err(InquireError::OperationInterrupted);
        assert!(matches!(answered(r), Err(DomainError::Input(_))));
    }
}
