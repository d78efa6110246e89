/// Reading entity: one day's structured inspirational content
///
/// A Reading is produced by a content parser, optionally persisted by the
/// reading cache, and never mutated afterwards. A newer fetch supersedes it.

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

/// Maximum number of characters of the body kept in a preview
pub const PREVIEW_LIMIT: usize = 150;

/// Marker appended to a truncated preview
pub const PREVIEW_ELLIPSIS: &str = "...";

/// One day's reading, as extracted from the content page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    /// Calendar date this reading was fetched for
    pub date: NaiveDate,
    pub title: String,
    /// The quoted excerpt at the top of the page
    pub quote: String,
    /// Citation line for the quote (e.g. "Basic Text p. 89")
    pub reference: String,
    /// Multi-paragraph body text, paragraphs separated by newlines
    pub full_content: String,
    /// Short actionable excerpt that closes the reading
    pub just_for_today: String,
    /// Bounded excerpt of `full_content`, see [`preview_of`]
    pub preview: String,
}

impl Reading {
    /// Build a reading, deriving the preview from the body
    pub fn new(
        date: NaiveDate,
        title: String,
        quote: String,
        reference: String,
        full_content: String,
        just_for_today: String,
    ) -> Self {
        let preview = preview_of(&full_content);
        Self {
            date,
            title,
            quote,
            reference,
            full_content,
            just_for_today,
            preview,
        }
    }
}

/// Derive the preview of a body
///
/// Bodies of at most [`PREVIEW_LIMIT`] characters are returned whole. Longer
/// bodies are cut after that many characters (never inside a multi-byte
/// character) and suffixed with [`PREVIEW_ELLIPSIS`].
pub fn preview_of(body: &str) -> String {
    match body.char_indices().nth(PREVIEW_LIMIT) {
        None => body.to_string(),
        Some((cut, _)) => format!("{}{}", &body[..cut], PREVIEW_ELLIPSIS),
    }
}
