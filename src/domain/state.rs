/// Application-state document
///
/// The journal and the user's app-level flags live together in one JSON
/// document. Every field defaults when absent so a first run (or a document
/// written by an older build) loads cleanly.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::domain::DailyEntry;

/// All journal entries keyed by calendar date
pub type JournalSnapshot = BTreeMap<NaiveDate, DailyEntry>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    pub has_completed_onboarding: bool,
    pub notifications_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    pub entries: JournalSnapshot,
}

/// Partial update of the app-level flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppStateUpdate {
    pub has_completed_onboarding: Option<bool>,
    pub notifications_enabled: Option<bool>,
    /// `Some("")` (or whitespace) clears the stored name
    pub user_name: Option<String>,
}

impl AppStateUpdate {
    pub fn onboarding_completed(mut self, done: bool) -> Self {
        self.has_completed_onboarding = Some(done);
        self
    }

    pub fn notifications_enabled(mut self, enabled: bool) -> Self {
        self.notifications_enabled = Some(enabled);
        self
    }

    pub fn user_name(mut self, name: impl Into<String>) -> Self {
        self.user_name = Some(name.into());
        self
    }
}

impl AppState {
    /// Apply an update, leaving unspecified flags and all entries untouched
    pub fn apply(&mut self, update: AppStateUpdate) {
        if let Some(done) = update.has_completed_onboarding {
            self.has_completed_onboarding = done;
        }
        if let Some(enabled) = update.notifications_enabled {
            self.notifications_enabled = enabled;
        }
        if let Some(name) = update.user_name {
            let name = name.trim();
            self.user_name = (!name.is_empty()).then(|| name.to_string());
        }
    }

    /// Entries that carry any user content, newest first
    pub fn history(&self) -> Vec<DailyEntry> {
        self.entries
            .values()
            .rev()
            .filter(|entry| entry.has_content())
            .cloned()
            .collect()
    }
}
