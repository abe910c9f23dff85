use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title used when a note's content has no non-blank line
pub const UNTITLED: &str = "Untitled";

/// One stored clipboard snippet
///
/// `id`, `content` and `date` are fixed at creation; only the title can be
/// changed afterwards, through `History::rename`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub date: DateTime<Utc>,
}

impl Note {
    /// Create a note stamped now, with its title derived from the content
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            id: Uuid::new_v4(),
            title: default_title(&content),
            content,
            date: Utc::now(),
        }
    }

    /// Create a note with an explicit title
    #[allow(dead_code)]
    pub fn with_title(content: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::new(content)
        }
    }

    /// Creation time rendered in local time, e.g. "Oct 18, 2026 at 3:04 PM"
    pub fn display_date(&self) -> String {
        self.date
            .with_timezone(&Local)
            .format("%b %-d, %Y at %-I:%M %p")
            .to_string()
    }

    /// Case-insensitive substring match against title or content.
    /// `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.content.to_lowercase().contains(needle)
    }
}

/// First non-blank line of `content`, trimmed, or `UNTITLED`
pub fn default_title(content: &str) -> String {
    content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or(UNTITLED)
        .to_string()
}
