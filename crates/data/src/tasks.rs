//! Tasks: `users/{uid}/tasks`.

use ascend_core::error::DataError;
use ascend_core::model::Task;
use ascend_core::store::Fields;
use chrono::Utc;
use crate::Repository;
use crate::paths::{self, TASKS};

impl Repository {
    pub async fn create_task(&self, uid: &str, mut task: Task) -> Result<String, DataError> {
        task.created_at.get_or_insert_with(Utc::now);
        task.owner_id = Some(uid.to_string());
        self.push_record(&paths::user_collection(uid, TASKS)?, &task)
            .await
    }

    pub async fn read_tasks(&self, uid: &str) -> Result<Vec<Task>, DataError> {
        self.read_collection(&paths::user_collection(uid, TASKS)?).await
    }

    pub async fn update_task(&self, uid: &str, task_id: &str, fields: Fields) -> Result<(), DataError> {
        self.merge(&paths::user_record(uid, TASKS, task_id)?, fields)
            .await
    }

    pub async fn delete_task(&self, uid: &str, task_id: &str) -> Result<(), DataError> {
        self.delete(&paths::user_record(uid, TASKS, task_id)?).await
    }

    /// The first `limit` unfinished tasks in stored order. Push ids sort by
    /// creation time, so this is oldest first.
    pub async fn recent_active_tasks(&self, uid: &str, limit: usize) -> Result<Vec<Task>, DataError> {
        Ok(self
            .read_tasks(uid)
            .await?
            .into_iter()
            .filter(|t| !t.completed)
            .take(limit)
            .collect())
    }
}
