use chrono::{DateTime, Duration, Timelike, Utc};
use chrono_tz::Tz;
use thiserror::Error;

use crate::domain::models::{SlotRole, SlotSet};

pub const OPENING_HOUR: u32 = 6;
pub const CLOSING_HOUR: u32 = 23;
pub const BUFFER_BEFORE_MINUTES: i64 = 30;
pub const BUFFER_AFTER_MINUTES: i64 = 45;

/// Recoverable rejections, surfaced to the user as blocking messages.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("all engagement fields are required")]
    MissingField,
    #[error("please select a time between 6:00 AM and 11:00 PM")]
    OutOfHours,
    #[error("this time is already selected, please choose another")]
    DuplicateSlot,
    #[error("this time conflicts with another slot's buffer window")]
    BufferConflict,
    #[error("a primary date and time is required")]
    MissingPrimary,
}

/// Gates a candidate pick for `role`. Rules run in a fixed order so the
/// surfaced reason is deterministic: operating hours, then uniqueness, then
/// the buffer window. The slot being replaced is excluded from comparisons.
pub fn try_accept(
    candidate: DateTime<Utc>,
    role: SlotRole,
    slots: &SlotSet,
    zone: Tz,
) -> Result<(), ValidationError> {
    let local = candidate.with_timezone(&zone);
    if local.hour() < OPENING_HOUR || (local.hour() == CLOSING_HOUR && local.minute() > 0) {
        return Err(ValidationError::OutOfHours);
    }

    let others = slots.held_except(role);
    if others
        .iter()
        .any(|held| held.timestamp() == candidate.timestamp())
    {
        return Err(ValidationError::DuplicateSlot);
    }
    if others.iter().any(|held| within_buffer(candidate, *held)) {
        return Err(ValidationError::BufferConflict);
    }
    Ok(())
}

/// Picker grey-out predicate: would `candidate` land inside any held slot's
/// buffer window? Checked against every held slot, including the value the
/// pick would replace; only the accept path excludes the replaced slot.
pub fn is_disabled(candidate: DateTime<Utc>, slots: &SlotSet) -> bool {
    slots
        .held()
        .iter()
        .any(|held| within_buffer(candidate, *held))
}

fn within_buffer(candidate: DateTime<Utc>, held: DateTime<Utc>) -> bool {
    let start = held - Duration::minutes(BUFFER_BEFORE_MINUTES);
    let end = held + Duration::minutes(BUFFER_AFTER_MINUTES);
    candidate >= start && candidate <= end
}
