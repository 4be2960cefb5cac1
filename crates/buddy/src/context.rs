//! Context aggregation: one snapshot of a user's goals, tasks, journal and
//! stats, used as prompt context for the buddy.

use ascend_core::error::DataError;
use ascend_core::model::{Goal, JournalEntry, Task, UserStats};
use ascend_data::Repository;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything the buddy knows about a user at one instant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    pub goals: Vec<Goal>,
    pub tasks: Vec<Task>,
    pub journal_entries: Vec<JournalEntry>,
    pub stats: UserStats,
    /// When the snapshot was taken.
    pub last_activity: DateTime<Utc>,
}

impl UserContext {
    /// Nothing stored for the user at all.
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
            && self.tasks.is_empty()
            && self.journal_entries.is_empty()
            && self.stats.is_empty()
    }
}

/// Collects a [`UserContext`] from the repository.
#[derive(Clone)]
pub struct ContextAggregator {
    repo: Repository,
}

impl ContextAggregator {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Read the four collections concurrently.
    ///
    /// Missing collections come back empty. Any failed read fails the whole
    /// aggregation; there is no partial result and nothing is cached.
    pub async fn aggregate(&self, uid: &str) -> Result<UserContext, DataError> {
        let (goals, tasks, journal_entries, stats) = tokio::try_join!(
            self.repo.read_goals(uid),
            self.repo.read_tasks(uid),
            self.repo.read_journal_entries(uid),
            self.repo.read_stats(uid),
        )?;

        debug!(
            uid,
            goals = goals.len(),
            tasks = tasks.len(),
            journal_entries = journal_entries.len(),
            "Aggregated user context"
        );

        Ok(UserContext {
            goals,
            tasks,
            journal_entries,
            stats,
            last_activity: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{faulty_repo, memory_repo};
    use ascend_core::model::JournalCategory;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn empty_user_gives_empty_context() {
        let aggregator = ContextAggregator::new(memory_repo());
        let before = Utc::now();
        let context = aggregator.aggregate("nobody").await.unwrap();
        let after = Utc::now();

        assert!(context.is_empty());
        assert!(context.last_activity >= before && context.last_activity <= after);
    }

    #[tokio::test]
    async fn collects_every_collection() {
        let repo = memory_repo();
        repo.create_goal("u1", Goal::new("Run a marathon")).await.unwrap();
        repo.create_task("u1", Task::new("Buy shoes")).await.unwrap();
        repo.create_journal_entry(
            "u1",
            JournalEntry {
                title: "Week 1".into(),
                category: JournalCategory::Health,
                ..JournalEntry::default()
            },
        )
        .await
        .unwrap();
        repo.update_stats("u1", ascend_data::fields! { "streak" => 2 })
            .await
            .unwrap();

        let context = ContextAggregator::new(repo).aggregate("u1").await.unwrap();
        assert_eq!(context.goals.len(), 1);
        assert_eq!(context.tasks.len(), 1);
        assert_eq!(context.journal_entries.len(), 1);
        assert_eq!(context.stats.get_i64("streak"), Some(2));
    }

    #[tokio::test]
    async fn serializes_camel_case() {
        let context = ContextAggregator::new(memory_repo())
            .aggregate("u1")
            .await
            .unwrap();
        let json = serde_json::to_value(&context).unwrap();
        assert!(json.get("journalEntries").is_some());
        assert!(json.get("lastActivity").is_some());
    }

    #[tokio::test]
    async fn failed_read_fails_aggregation() {
        let (repo, store) = faulty_repo();
        repo.create_goal("u1", Goal::new("Anything")).await.unwrap();
        store.fail_reads.store(true, Ordering::SeqCst);

        let result = ContextAggregator::new(repo).aggregate("u1").await;
        assert!(matches!(result, Err(DataError::Store(_))));
    }
}
