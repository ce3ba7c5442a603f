use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SlotRole {
    Primary,
    Secondary,
    Tertiary,
}

impl SlotRole {
    pub const ALL: [SlotRole; 3] = [SlotRole::Primary, SlotRole::Secondary, SlotRole::Tertiary];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Tertiary => "tertiary",
        }
    }
}

/// The up-to-three candidate meeting instants held by a draft, one per role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotSet {
    pub primary: Option<DateTime<Utc>>,
    pub secondary: Option<DateTime<Utc>>,
    pub tertiary: Option<DateTime<Utc>>,
}

impl SlotSet {
    pub fn get(&self, role: SlotRole) -> Option<DateTime<Utc>> {
        match role {
            SlotRole::Primary => self.primary,
            SlotRole::Secondary => self.secondary,
            SlotRole::Tertiary => self.tertiary,
        }
    }

    pub fn set(&mut self, role: SlotRole, value: Option<DateTime<Utc>>) {
        match role {
            SlotRole::Primary => self.primary = value,
            SlotRole::Secondary => self.secondary = value,
            SlotRole::Tertiary => self.tertiary = value,
        }
    }

    pub fn held(&self) -> Vec<DateTime<Utc>> {
        SlotRole::ALL.iter().filter_map(|role| self.get(*role)).collect()
    }

    /// All held instants except the one belonging to `role`. The accept path
    /// compares a candidate only against the slots it is not replacing.
    pub fn held_except(&self, role: SlotRole) -> Vec<DateTime<Utc>> {
        SlotRole::ALL
            .iter()
            .filter(|other| **other != role)
            .filter_map(|other| self.get(*other))
            .collect()
    }
}

/// The in-progress engagement record held by the active session.
#[derive(Debug, Clone, PartialEq)]
pub struct EngagementDraft {
    pub owner: String,
    pub speaker: String,
    pub caterer: String,
    pub cohost: String,
    pub timezone: Tz,
    pub slots: SlotSet,
}

impl EngagementDraft {
    pub fn new(timezone: Tz) -> Self {
        Self {
            owner: String::new(),
            speaker: String::new(),
            caterer: String::new(),
            cohost: String::new(),
            timezone,
            slots: SlotSet::default(),
        }
    }

    pub fn validate_details(&self) -> Result<(), ValidationError> {
        for value in [&self.owner, &self.speaker, &self.caterer, &self.cohost] {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField);
            }
        }
        Ok(())
    }
}

/// An immutable persisted engagement entry. `created_at` is stamped once at
/// creation and never overwritten on later loads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EngagementRecord {
    pub id: String,
    pub owner: String,
    pub speaker: String,
    pub caterer: String,
    pub cohost: String,
    pub primary: Option<DateTime<Utc>>,
    pub secondary: Option<DateTime<Utc>>,
    pub tertiary: Option<DateTime<Utc>>,
    pub timezone: String,
    pub created_at: DateTime<Utc>,
}
