use crate::domain::models::{EngagementDraft, EngagementRecord, SlotRole};
use crate::domain::timezone;
use crate::domain::validation::{self, ValidationError};
use crate::infrastructure::engagement_repository::{next_record_id, EngagementRecordRepository};
use crate::infrastructure::error::InfraError;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Infra(#[from] InfraError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Owner,
    Speaker,
    Caterer,
    Cohost,
}

/// Holds the in-progress engagement record and orchestrates validation,
/// timezone reprojection, and persistence. The repository is injected once
/// at construction; the session is the only component with mutable state.
pub struct EngagementSession {
    repository: Arc<dyn EngagementRecordRepository>,
    draft: EngagementDraft,
    details_committed: bool,
}

impl EngagementSession {
    pub fn new(repository: Arc<dyn EngagementRecordRepository>, timezone: Tz) -> Self {
        Self {
            repository,
            draft: EngagementDraft::new(timezone),
            details_committed: false,
        }
    }

    pub fn draft(&self) -> &EngagementDraft {
        &self.draft
    }

    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Owner => self.draft.owner = value,
            DraftField::Speaker => self.draft.speaker = value,
            DraftField::Caterer => self.draft.caterer = value,
            DraftField::Cohost => self.draft.cohost = value,
        }
    }

    pub fn commit_details(&mut self) -> Result<(), ValidationError> {
        self.draft.validate_details()?;
        self.details_committed = true;
        Ok(())
    }

    /// Reprojects every held slot through the converter (old zone to new)
    /// and switches the active display zone.
    pub fn set_timezone(&mut self, new_zone: Tz) {
        let old_zone = self.draft.timezone;
        for role in SlotRole::ALL {
            let reprojected = timezone::convert(self.draft.slots.get(role), old_zone, new_zone);
            self.draft.slots.set(role, reprojected);
        }
        self.draft.timezone = new_zone;
    }

    /// A `None` candidate clears the role unconditionally; a `Some` candidate
    /// must pass the validator. The draft is untouched on rejection.
    pub fn pick_slot(
        &mut self,
        role: SlotRole,
        candidate: Option<DateTime<Utc>>,
    ) -> Result<(), ValidationError> {
        let Some(candidate) = candidate else {
            self.draft.slots.set(role, None);
            return Ok(());
        };
        validation::try_accept(candidate, role, &self.draft.slots, self.draft.timezone)?;
        self.draft.slots.set(role, Some(candidate));
        Ok(())
    }

    pub fn delete_slot(&mut self, role: SlotRole) {
        self.draft.slots.set(role, None);
    }

    /// Picker support: times that would land inside any held slot's buffer
    /// window, including the slot a pick would replace.
    pub fn is_time_disabled(&self, candidate: DateTime<Utc>) -> bool {
        validation::is_disabled(candidate, &self.draft.slots)
    }

    /// Freezes the draft into a record, appends it, and resets the draft.
    /// The active zone survives the reset; everything else is discarded.
    pub fn submit(&mut self) -> Result<EngagementRecord, SessionError> {
        if !self.details_committed {
            self.draft.validate_details()?;
        }
        if self.draft.slots.primary.is_none() {
            return Err(ValidationError::MissingPrimary.into());
        }

        let record = EngagementRecord {
            id: next_record_id(),
            owner: self.draft.owner.clone(),
            speaker: self.draft.speaker.clone(),
            caterer: self.draft.caterer.clone(),
            cohost: self.draft.cohost.clone(),
            primary: self.draft.slots.primary,
            secondary: self.draft.slots.secondary,
            tertiary: self.draft.slots.tertiary,
            timezone: self.draft.timezone.name().to_string(),
            created_at: Utc::now(),
        };
        self.repository.append(&record)?;

        let zone = self.draft.timezone;
        self.draft = EngagementDraft::new(zone);
        self.details_committed = false;
        Ok(record)
    }

    pub fn list_records(&self) -> Result<Vec<EngagementRecord>, InfraError> {
        self.repository.list()
    }

    pub fn delete_record(&self, position: usize) -> Result<(), InfraError> {
        self.repository.delete_at(position)
    }

    pub fn clear_records(&self) -> Result<(), InfraError> {
        self.repository.clear()
    }
}
