//! End-to-end tests for Ascend.
//!
//! These drive the repository, the store backends and the buddy together,
//! with scripted providers standing in for the completion endpoint.

use std::sync::Arc;

use ascend_buddy::{AccountabilityBuddy, ChatRejected, ChatSession, ChatSettings, ContextAggregator};
use ascend_config::{AppConfig, RetryConfig, StoreBackend};
use ascend_core::error::ProviderError;
use ascend_core::message::{Message, Role};
use ascend_core::model::{Goal, JournalCategory, JournalEntry, Post, Task};
use ascend_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use ascend_data::{Repository, fields};
use ascend_providers::RetryProvider;
use ascend_store::open_from_config;

// ── Mock Providers ───────────────────────────────────────────────────────

/// Returns scripted replies in sequence and records every request.
struct ScriptedProvider {
    replies: std::sync::Mutex<Vec<String>>,
    requests: std::sync::Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    fn new(replies: &[&str]) -> Self {
        Self {
            replies: std::sync::Mutex::new(replies.iter().rev().map(|r| r.to_string()).collect()),
            requests: std::sync::Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn request(&self, n: usize) -> ProviderRequest {
        self.requests.lock().unwrap()[n].clone()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        self.requests.lock().unwrap().push(request);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop()
            .expect("ScriptedProvider exhausted");
        Ok(ProviderResponse {
            message: Message::assistant(reply),
            usage: Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
            model: "e2e-model".into(),
        })
    }
}

/// Always fails with a server error.
struct DownProvider {
    call_count: std::sync::Mutex<usize>,
}

#[async_trait::async_trait]
impl Provider for DownProvider {
    fn name(&self) -> &str {
        "down"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        *self.call_count.lock().unwrap() += 1;
        Err(ProviderError::ApiError {
            status_code: 502,
            message: "bad gateway".into(),
        })
    }
}

fn file_config(dir: &tempfile::TempDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.store.backend = StoreBackend::File;
    config.store.path = Some(dir.path().join("data.json"));
    config
}

fn open_repo(config: &AppConfig) -> Repository {
    Repository::new(open_from_config(&config.store).unwrap())
}

// ── Tests ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn records_survive_reopening_the_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = file_config(&dir);

    let goal_id = {
        let repo = open_repo(&config);
        repo.write_user("amy", "amy", "amy@example.com").await.unwrap();
        repo.create_task("amy", Task::new("Stretch")).await.unwrap();
        repo.create_goal("amy", Goal::new("Run 5k")).await.unwrap()
    };

    let repo = open_repo(&config);
    assert_eq!(repo.read_user("amy").await.unwrap().unwrap().email, "amy@example.com");
    assert_eq!(repo.read_tasks("amy").await.unwrap().len(), 1);
    let goals = repo.read_goals("amy").await.unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].id, goal_id);
}

#[tokio::test]
async fn goal_lifecycle_from_creation_to_completion() {
    let dir = tempfile::tempdir().unwrap();
    let repo = open_repo(&file_config(&dir));

    let id = repo.create_goal("amy", Goal::new("Read 12 books")).await.unwrap();
    repo.update_goal("amy", &id, fields! { "progress" => 50 }).await.unwrap();

    let goal = repo.read_goal("amy", &id).await.unwrap().unwrap();
    assert_eq!(goal.progress, 50.0);
    assert!(goal.last_updated.is_some());

    let done = repo.move_goal_to_completed("amy", &id).await.unwrap();
    assert!(done.completed);
    assert!(done.completed_at.unwrap() >= done.created_at.unwrap());

    assert!(repo.read_goals("amy").await.unwrap().is_empty());
    let completed = repo.read_completed_goals("amy").await.unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, id);
    assert_eq!(completed[0].progress, 100.0);
}

#[tokio::test]
async fn failed_flush_during_completion_leaves_goal_active_only() {
    let dir = tempfile::tempdir().unwrap();
    let config = file_config(&dir);
    let repo = open_repo(&config);
    let id = repo.create_goal("amy", Goal::new("Run 5k")).await.unwrap();

    // A directory where the store writes its temp file makes every flush fail.
    std::fs::create_dir(dir.path().join("data.json.tmp")).unwrap();
    assert!(repo.move_goal_to_completed("amy", &id).await.is_err());

    assert_eq!(repo.read_goals("amy").await.unwrap().len(), 1);
    assert!(repo.read_completed_goals("amy").await.unwrap().is_empty());

    let reopened = open_repo(&config);
    assert_eq!(reopened.read_goals("amy").await.unwrap()[0].id, id);
    assert!(reopened.read_completed_goals("amy").await.unwrap().is_empty());
}

#[tokio::test]
async fn enriched_chat_sends_the_users_context() {
    let dir = tempfile::tempdir().unwrap();
    let repo = open_repo(&file_config(&dir));
    repo.create_goal("amy", Goal::new("Learn the cello")).await.unwrap();
    repo.create_journal_entry(
        "amy",
        JournalEntry {
            title: "First lesson".into(),
            text: "Bow hold is hard".into(),
            category: JournalCategory::Personal,
            ..JournalEntry::default()
        },
    )
    .await
    .unwrap();

    let provider = Arc::new(ScriptedProvider::new(&["Practice ten minutes a day."]));
    let session = ChatSession::new(provider.clone(), repo, ChatSettings::default());

    let reply = session.ask("amy", "How do I keep going?").await.unwrap();
    assert_eq!(reply, "Practice ten minutes a day.");

    let request = provider.request(0);
    assert_eq!(request.model, "gpt-4o-mini");
    assert_eq!(request.max_tokens, Some(150));
    let roles: Vec<Role> = request.messages.iter().map(|m| m.role).collect();
    assert_eq!(roles, [Role::System, Role::System, Role::User]);
    assert!(request.messages[1].content.contains("Learn the cello"));
    assert!(request.messages[1].content.contains("Bow hold is hard"));

    assert_eq!(session.ask("amy", "").await, Err(ChatRejected::EmptyMessage));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn endpoint_outage_falls_back_after_retries() {
    let down = Arc::new(DownProvider {
        call_count: std::sync::Mutex::new(0),
    });
    let retry = RetryProvider::new(
        down.clone(),
        &RetryConfig {
            max_attempts: 3,
            base_delay_ms: 100,
            max_delay_ms: 1000,
        },
    );

    let config = AppConfig::default();
    let repo = Repository::new(open_from_config(&ascend_config::StoreConfig {
        backend: StoreBackend::Memory,
        ..config.store.clone()
    })
    .unwrap());
    let session = ChatSession::new(Arc::new(retry), repo, ChatSettings::from_config(&config));

    let reply = session.ask("amy", "Are you there?").await.unwrap();
    assert_eq!(reply, "I'm currently unavailable. Please try again shortly.");
    assert_eq!(*down.call_count.lock().unwrap(), 3);
}

#[tokio::test]
async fn context_and_check_in_reflect_stored_progress() {
    let dir = tempfile::tempdir().unwrap();
    let repo = open_repo(&file_config(&dir));
    let done = repo.create_goal("amy", Goal::new("Ship v1")).await.unwrap();
    repo.create_goal("amy", Goal::new("Write docs")).await.unwrap();
    repo.move_goal_to_completed("amy", &done).await.unwrap();
    repo.update_stats("amy", fields! { "streak" => 5 }).await.unwrap();

    let context = ContextAggregator::new(repo.clone()).aggregate("amy").await.unwrap();
    assert_eq!(context.goals.len(), 1);
    assert_eq!(context.stats.get_i64("streak"), Some(5));

    let provider = Arc::new(ScriptedProvider::new(&["One down, one to go!"]));
    let buddy = AccountabilityBuddy::new(provider.clone(), repo, ChatSettings::default());

    let check_in = buddy.daily_check_in("amy").await.unwrap().unwrap();
    assert_eq!(check_in.message, "One down, one to go!");
    assert!(buddy.daily_check_in("amy").await.unwrap().is_none());

    let prompt = &provider.request(0).messages[1].content;
    assert!(prompt.contains("\"totalActive\":1"));
    assert!(prompt.contains("\"totalCompleted\":1"));
}

#[tokio::test]
async fn community_posts_are_shared_between_users() {
    let dir = tempfile::tempdir().unwrap();
    let repo = open_repo(&file_config(&dir));

    let id = repo
        .create_post(Post {
            author_id: "amy".into(),
            author_name: "Amy".into(),
            content: "Finished my first 5k!".into(),
            ..Post::default()
        })
        .await
        .unwrap();

    assert!(repo.toggle_encouragement(&id, "bob").await.unwrap());
    assert!(repo.toggle_encouragement(&id, "cat").await.unwrap());

    let posts = repo.recent_posts(5).await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].encouragement_count(), 2);
    assert!(repo.read_goals("bob").await.unwrap().is_empty());
}
