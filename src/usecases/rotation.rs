//! Draw order and monthly schedule generation.
//!
//! - `shuffle` draws a new order (Fisher–Yates) and drops the group's `planned` schedules
//! - `generate_schedules` fills empty months after the reference month from the order
//!
//! Completed and canceled months survive a reshuffle; generation never overwrites a month.

use crate::domain::{
    DomainError, EntityKind, EntityStore, ParticipantId, Schedule, ScheduleId, ScheduleStatus,
    YearMonth,
};
use crate::ports::RandomSource;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Result of a draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffleOutcome {
    pub order: Vec<ParticipantId>,
    /// Number of `planned` schedules removed.
    pub cleared: usize,
}

/// Unbiased in-place shuffle of a copy of `ids`.
pub fn fisher_yates(ids: &[ParticipantId], rng: &dyn RandomSource) -> Vec<ParticipantId> {
    let mut out = ids.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.random_index(i + 1);
        out.swap(i, j);
    }
    out
}

/// An order must be non-empty, free of repeats, and name only participants of the group.
pub fn check_order(
    store: &EntityStore,
    group_id: &str,
    order: &[ParticipantId],
) -> Result<(), DomainError> {
    store.require_group(group_id)?;
    if order.is_empty() {
        return Err(DomainError::Validation(
            "draw needs at least one participant".into(),
        ));
    }
    if let Some(unknown) = order
        .iter()
        .find(|id| store.participant(group_id, id).is_none())
    {
        return Err(DomainError::not_found(EntityKind::Participant, unknown.as_str()));
    }
    let mut seen = HashSet::new();
    if let Some(repeated) = order.iter().find(|id| !seen.insert(id.as_str())) {
        return Err(DomainError::Validation(format!(
            "participant {} appears twice in the draw order",
            repeated
        )));
    }
    Ok(())
}

pub struct RotationScheduler {
    rng: Arc<dyn RandomSource>,
}

impl RotationScheduler {
    pub fn new(rng: Arc<dyn RandomSource>) -> Self {
        Self { rng }
    }

    /// Draws a new order for the group from `participant_ids`, replacing any previous order.
    /// The ids must pass [`check_order`].
    pub fn shuffle(
        &self,
        store: &mut EntityStore,
        group_id: &str,
        participant_ids: &[ParticipantId],
    ) -> Result<ShuffleOutcome, DomainError> {
        check_order(store, group_id, participant_ids)?;

        let order = fisher_yates(participant_ids, self.rng.as_ref());
        let cleared = store.retain_schedules(group_id, |s| s.status != ScheduleStatus::Planned)?;
        store.set_draw_order(group_id, order.clone())?;
        Ok(ShuffleOutcome { order, cleared })
    }

    /// Creates a `planned` schedule for each of the `participant_count` months following
    /// `reference`, hosted by `order[i % order.len()]`. Months that already hold a schedule
    /// are skipped, so repeated calls only fill gaps. Returns the ids of created schedules.
    pub fn generate_schedules(
        &self,
        store: &mut EntityStore,
        group_id: &str,
        order: &[ParticipantId],
        participant_count: usize,
        reference: YearMonth,
    ) -> Result<Vec<ScheduleId>, DomainError> {
        store.require_group(group_id)?;
        let mut created = Vec::new();
        if order.is_empty() {
            return Ok(created);
        }

        for i in 0..participant_count {
            let slot = reference.advance(1 + i as u32);
            if store.has_slot(group_id, slot) {
                debug!(group_id, slot = %slot, "month already scheduled, skipping");
                continue;
            }
            let host = &order[i % order.len()];
            match store.add_schedule(Schedule::planned(group_id, slot, host)) {
                Ok(()) => created.push(slot.schedule_id()),
                Err(DomainError::DuplicateScheduleSlot { .. }) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(created)
    }
}
