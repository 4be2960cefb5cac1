//! Entity types stored in the document tree.
//!
//! Field names on the wire are camelCase. Every record's `id` is the key it is
//! stored under, so it is skipped during (de)serialization and filled in by
//! the repository after a read. Records keep unknown fields in `extra` so a
//! partial update written by another client survives a read-modify-write.
//!
//! Other clients write timestamps as epoch milliseconds and form values as
//! strings, so timestamps accept RFC 3339 or millis and `progress` accepts a
//! number or a numeric string. Writes always use RFC 3339 and numbers.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::formats::Flexible;
use serde_with::{DefaultOnNull, DisplayFromStr, PickFirst, Same, TimestampMilliSeconds, serde_as};
use crate::store::Fields;

/// RFC 3339 on write; RFC 3339 or epoch millis (number or string) on read.
type Timestamp = PickFirst<(Same, TimestampMilliSeconds<i64, Flexible>)>;

/// A number, a numeric string, or null (read as 0).
type LenientNumber = DefaultOnNull<PickFirst<(Same, DisplayFromStr)>>;

/// One per user, stored at `users/{uid}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    #[serde(skip)]
    pub id: String,

    #[serde(default)]
    pub title: String,

    /// Percent complete, 0–100. Not range-checked on update.
    #[serde_as(as = "LenientNumber")]
    #[serde(default)]
    pub progress: f64,

    #[serde(default)]
    pub completed: bool,

    #[serde_as(as = "Option<Timestamp>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde_as(as = "Option<Timestamp>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    #[serde_as(as = "Option<Timestamp>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,

    #[serde(flatten)]
    pub extra: Fields,
}

impl Goal {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(skip)]
    pub id: String,

    #[serde(default)]
    pub title: String,

    /// The due date as entered, usually `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    #[serde(default)]
    pub completed: bool,

    #[serde_as(as = "Option<Timestamp>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,

    #[serde(flatten)]
    pub extra: Fields,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Journal categories. Anything unrecognised (including the empty string a
/// form submits when nothing was picked) reads back as `Other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum JournalCategory {
    Personal,
    Work,
    Health,
    Finance,
    #[default]
    Other,
}

impl JournalCategory {
    pub const ALL: [JournalCategory; 5] = [
        JournalCategory::Personal,
        JournalCategory::Work,
        JournalCategory::Health,
        JournalCategory::Finance,
        JournalCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JournalCategory::Personal => "personal",
            JournalCategory::Work => "work",
            JournalCategory::Health => "health",
            JournalCategory::Finance => "finance",
            JournalCategory::Other => "other",
        }
    }
}

impl fmt::Display for JournalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JournalCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown journal category: {s}"))
    }
}

impl From<String> for JournalCategory {
    fn from(raw: String) -> Self {
        raw.parse().unwrap_or_default()
    }
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    #[serde(skip)]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub category: JournalCategory,

    #[serde_as(as = "Option<Timestamp>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,

    #[serde(flatten)]
    pub extra: Fields,
}

impl JournalEntry {
    /// Case-insensitive match on title, text, or category.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term)
            || self.text.to_lowercase().contains(&term)
            || self.category.as_str().contains(&term)
    }
}

/// A community post. Globally visible, stored at `posts/{id}`.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(skip)]
    pub id: String,

    #[serde(default)]
    pub author_id: String,

    #[serde(default)]
    pub author_name: String,

    #[serde(default, rename = "authorPhotoURL", skip_serializing_if = "Option::is_none")]
    pub author_photo_url: Option<String>,

    #[serde(default)]
    pub content: String,

    #[serde_as(as = "Option<Timestamp>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    /// userId → true for everyone who encouraged this post.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub encouragements: BTreeMap<String, bool>,
}

impl Post {
    pub fn encouragement_count(&self) -> usize {
        self.encouragements.values().filter(|v| **v).count()
    }
}

/// A calendar event. Only the common fields are typed; the rest ride in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    #[serde(skip)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,

    #[serde(flatten)]
    pub extra: Fields,
}

/// Free-form profile statistics at `users/{uid}/stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserStats(pub Fields);

impl UserStats {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(|v| v.as_i64())
    }
}
