//! Where each entity lives in the tree.
//!
//! ```text
//! users/{uid}                     profile (username, email)
//! users/{uid}/stats               free-form stats
//! users/{uid}/stats/lastCheckIn   date of the last daily check-in
//! users/{uid}/goals/{id}          active goals
//! users/{uid}/completedGoals/{id} completed goals
//! users/{uid}/tasks/{id}
//! users/{uid}/journalEntries/{id}
//! users/{uid}/calendarEvents/{id}
//! posts/{id}                      community posts (global)
//! ```

use ascend_core::error::StoreError;
use ascend_core::path::KeyPath;

pub const USERS: &str = "users";
pub const POSTS: &str = "posts";
pub const GOALS: &str = "goals";
pub const COMPLETED_GOALS: &str = "completedGoals";
pub const TASKS: &str = "tasks";
pub const JOURNAL_ENTRIES: &str = "journalEntries";
pub const CALENDAR_EVENTS: &str = "calendarEvents";
pub const STATS: &str = "stats";
pub const ENCOURAGEMENTS: &str = "encouragements";
pub const LAST_CHECK_IN: &str = "lastCheckIn";

pub fn user(uid: &str) -> Result<KeyPath, StoreError> {
    KeyPath::root().child(USERS)?.child(uid)
}

/// A collection directly under the user's node.
pub fn user_collection(uid: &str, name: &str) -> Result<KeyPath, StoreError> {
    user(uid)?.child(name)
}

/// One record in a user collection.
pub fn user_record(uid: &str, collection: &str, id: &str) -> Result<KeyPath, StoreError> {
    user_collection(uid, collection)?.child(id)
}

pub fn posts() -> Result<KeyPath, StoreError> {
    KeyPath::root().child(POSTS)
}

pub fn post(id: &str) -> Result<KeyPath, StoreError> {
    posts()?.child(id)
}
