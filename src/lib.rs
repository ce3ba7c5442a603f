pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::bootstrap::{bootstrap_workspace, BootstrapResult};
pub use application::session::{DraftField, EngagementSession, SessionError};
pub use domain::models::{EngagementDraft, EngagementRecord, SlotRole, SlotSet};
pub use domain::timezone::{convert, format_in_zone, parse_zone, TimezoneOption, TIMEZONE_CHOICES};
pub use domain::validation::{is_disabled, try_accept, ValidationError};
pub use infrastructure::engagement_repository::{
    EngagementRecordRepository, InMemoryEngagementRepository, JsonFileEngagementRepository,
};
pub use infrastructure::error::InfraError;
