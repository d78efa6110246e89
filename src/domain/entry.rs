/// DailyEntry entity for the user's journal
///
/// This module defines the DailyEntry struct (four gratitudes, a goal and a
/// wish for one calendar day), the partial update applied to it, and the
/// completeness rule the streak engine counts.

use serde::{Deserialize, Deserializer, Serialize};
use chrono::NaiveDate;
use crate::domain::{DomainError, Reading};

/// Number of gratitude slots in every entry
pub const GRATITUDE_SLOTS: usize = 4;

/// The fixed set of gratitude slots, each independently empty or filled
pub type Gratitudes = [String; GRATITUDE_SLOTS];

/// One day's user-authored journal fields
///
/// Entries are created lazily on the first write for a date and then only
/// ever changed through [`DailyEntry::merge`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyEntry {
    /// Which day this entry is for
    pub date: NaiveDate,
    /// Gratitude slots; an empty string means the slot is unfilled
    #[serde(default, deserialize_with = "deserialize_slots")]
    pub gratitudes: Gratitudes,
    /// Goal for the day, empty when unset
    #[serde(default)]
    pub goal: String,
    /// Wish for the day, empty when unset
    #[serde(default)]
    pub wish: String,
    /// Reading attached to this day, if any
    #[serde(
        default,
        rename = "jftContent",
        deserialize_with = "deserialize_reading",
        skip_serializing_if = "Option::is_none"
    )]
    pub reading: Option<Reading>,
}

/// How far along a day's entry is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayProgress {
    pub gratitudes_filled: usize,
    pub has_goal: bool,
    pub has_wish: bool,
}

impl DayProgress {
    pub fn is_complete(&self) -> bool {
        self.gratitudes_filled == GRATITUDE_SLOTS && self.has_goal && self.has_wish
    }
}

impl DailyEntry {
    /// Create an empty entry for a date
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            gratitudes: Gratitudes::default(),
            goal: String::new(),
            wish: String::new(),
            reading: None,
        }
    }

    /// Apply a partial update; fields absent from the update are kept
    pub fn merge(&mut self, update: EntryUpdate) {
        if let Some(gratitudes) = update.gratitudes {
            self.gratitudes = gratitudes;
        }
        if let Some(goal) = update.goal {
            self.goal = goal;
        }
        if let Some(wish) = update.wish {
            self.wish = wish;
        }
        if let Some(reading) = update.reading {
            self.reading = Some(reading);
        }
    }

    /// Count filled fields after trimming whitespace
    pub fn progress(&self) -> DayProgress {
        DayProgress {
            gratitudes_filled: self.gratitudes.iter().filter(|g| is_filled(g)).count(),
            has_goal: is_filled(&self.goal),
            has_wish: is_filled(&self.wish),
        }
    }

    /// A day is complete when all gratitude slots, the goal and the wish are filled
    pub fn is_complete(&self) -> bool {
        self.progress().is_complete()
    }

    /// Whether the user has written anything at all for this day
    pub fn has_content(&self) -> bool {
        let progress = self.progress();
        progress.gratitudes_filled > 0 || progress.has_goal || progress.has_wish
    }
}

/// Completeness of a possibly absent entry; absent is never complete
pub fn is_day_complete(entry: Option<&DailyEntry>) -> bool {
    entry.map_or(false, DailyEntry::is_complete)
}

fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Partial update for a [`DailyEntry`]
///
/// Every `Some` field replaces the stored value; `None` fields leave the
/// stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryUpdate {
    pub gratitudes: Option<Gratitudes>,
    pub goal: Option<String>,
    pub wish: Option<String>,
    pub reading: Option<Reading>,
}

impl EntryUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gratitudes(mut self, gratitudes: Gratitudes) -> Self {
        self.gratitudes = Some(gratitudes);
        self
    }

    /// Set gratitudes from a list of at most [`GRATITUDE_SLOTS`] items,
    /// padding the remaining slots with empty strings
    pub fn gratitude_list(self, items: Vec<String>) -> Result<Self, DomainError> {
        if items.len() > GRATITUDE_SLOTS {
            return Err(DomainError::Validation {
                message: format!(
                    "At most {} gratitudes per day, got {}",
                    GRATITUDE_SLOTS,
                    items.len()
                ),
            });
        }
        Ok(self.gratitudes(normalize_slots(items)))
    }

    pub fn goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = Some(goal.into());
        self
    }

    pub fn wish(mut self, wish: impl Into<String>) -> Self {
        self.wish = Some(wish.into());
        self
    }

    pub fn reading(mut self, reading: Reading) -> Self {
        self.reading = Some(reading);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.gratitudes.is_none() && self.goal.is_none() && self.wish.is_none() && self.reading.is_none()
    }
}

/// Fit any number of items into the fixed slots (extra items are dropped)
pub fn normalize_slots<I>(items: I) -> Gratitudes
where
    I: IntoIterator<Item = String>,
{
    let mut slots = Gratitudes::default();
    for (slot, item) in slots.iter_mut().zip(items) {
        *slot = item;
    }
    slots
}

/// Stored documents may hold fewer slots, `null` items, or no array at all
fn deserialize_slots<'de, D>(deserializer: D) -> Result<Gratitudes, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Option<String>>> = Option::deserialize(deserializer)?;
    Ok(normalize_slots(
        raw.unwrap_or_default().into_iter().map(Option::unwrap_or_default),
    ))
}

/// A reading this build cannot decode is dropped so the rest of the entry,
/// and the document around it, still loads
fn deserialize_reading<'de, D>(deserializer: D) -> Result<Option<Reading>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match serde_json::from_value(value) {
        Ok(reading) => Some(reading),
        Err(e) => {
            tracing::warn!("Dropping unreadable reading from journal entry: {}", e);
            None
        }
    }))
}
