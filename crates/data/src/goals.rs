//! Goals: `users/{uid}/goals` (active) and `users/{uid}/completedGoals`.
//!
//! A goal id lives in exactly one of the two collections. Completion moves the
//! record with a single multi-path update, so a failed move leaves the goal
//! where it was.

use ascend_core::error::DataError;
use ascend_core::model::Goal;
use ascend_core::store::Fields;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::info;
use crate::paths::{self, COMPLETED_GOALS, GOALS};
use crate::{Repository, now_value};

impl Repository {
    /// Create an active goal. Stamps `createdAt` (unless given) and `ownerId`.
    pub async fn create_goal(&self, uid: &str, mut goal: Goal) -> Result<String, DataError> {
        goal.created_at.get_or_insert_with(Utc::now);
        goal.owner_id = Some(uid.to_string());
        goal.completed = false;
        self.push_record(&paths::user_collection(uid, GOALS)?, &goal)
            .await
    }

    /// All active goals, in creation order.
    pub async fn read_goals(&self, uid: &str) -> Result<Vec<Goal>, DataError> {
        self.read_collection(&paths::user_collection(uid, GOALS)?).await
    }

    pub async fn read_goal(&self, uid: &str, goal_id: &str) -> Result<Option<Goal>, DataError> {
        self.read_record(&paths::user_collection(uid, GOALS)?, goal_id)
            .await
    }

    pub async fn read_completed_goals(&self, uid: &str) -> Result<Vec<Goal>, DataError> {
        self.read_collection(&paths::user_collection(uid, COMPLETED_GOALS)?)
            .await
    }

    /// The `limit` most recently created active goals, newest first.
    pub async fn recent_goals(&self, uid: &str, limit: usize) -> Result<Vec<Goal>, DataError> {
        let mut goals = self.read_goals(uid).await?;
        goals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        goals.truncate(limit);
        Ok(goals)
    }

    /// Shallow-merge `fields` into an active goal.
    ///
    /// Always stamps `lastUpdated`. Setting `completed: true` without an
    /// explicit `completedAt` stamps one no earlier than the goal's
    /// `createdAt`; setting `completed: false` clears it.
    pub async fn update_goal(
        &self,
        uid: &str,
        goal_id: &str,
        mut fields: Fields,
    ) -> Result<(), DataError> {
        let path = paths::user_record(uid, GOALS, goal_id)?;

        if !fields.contains_key("completedAt") {
            match fields.get("completed") {
                Some(Value::Bool(true)) => {
                    let created_at = self
                        .read_goal(uid, goal_id)
                        .await?
                        .and_then(|g| g.created_at);
                    let completed_at = completion_time(created_at);
                    fields.insert("completedAt".into(), serde_json::json!(completed_at));
                }
                Some(Value::Bool(false)) => {
                    fields.insert("completedAt".into(), Value::Null);
                }
                _ => {}
            }
        }
        fields.insert("lastUpdated".into(), now_value());

        self.merge(&path, fields).await
    }

    pub async fn delete_goal(&self, uid: &str, goal_id: &str) -> Result<(), DataError> {
        self.delete(&paths::user_record(uid, GOALS, goal_id)?).await
    }

    /// Move an active goal to `completedGoals`, marking it complete.
    ///
    /// The write to `completedGoals/{id}` and the delete of `goals/{id}` go out
    /// as one multi-path update, so the goal is never in both collections.
    pub async fn move_goal_to_completed(&self, uid: &str, goal_id: &str) -> Result<Goal, DataError> {
        let active = paths::user_record(uid, GOALS, goal_id)?;
        let mut goal = self
            .read_goal(uid, goal_id)
            .await?
            .ok_or_else(|| DataError::NotFound {
                path: active.to_string(),
            })?;

        let now = Utc::now();
        goal.completed = true;
        goal.progress = 100.0;
        goal.completed_at = Some(completion_time(goal.created_at));
        goal.last_updated = Some(now);
        if goal.owner_id.is_none() {
            goal.owner_id = Some(uid.to_string());
        }

        let completed = paths::user_record(uid, COMPLETED_GOALS, goal_id)?;
        let value = crate::record::encode(&goal)?;
        self.store()
            .update_paths(vec![(completed, Some(value)), (active, None)])
            .await?;

        info!(uid, goal_id, "Goal moved to completed");
        Ok(goal)
    }
}

/// Now, but never before `created_at` (clock skew between devices).
fn completion_time(created_at: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now();
    match created_at {
        Some(created) if created > now => created,
        _ => now,
    }
}
