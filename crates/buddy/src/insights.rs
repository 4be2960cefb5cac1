//! Progress insights, motivational feedback and the daily check-in.

use crate::chat::ChatSettings;
use ascend_core::Result;
use ascend_core::error::DataError;
use ascend_core::message::Message;
use ascend_core::model::Goal;
use ascend_core::provider::{Provider, ProviderRequest};
use ascend_data::Repository;
use chrono::{Duration, Local, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

const FEEDBACK_SYSTEM_PROMPT: &str =
    "You are a motivational AI accountability partner focused on helping users achieve their goals.";

/// Goals touched within this window count as recent progress.
const RECENT_WINDOW_DAYS: i64 = 7;

/// A summary of where a user stands on their goals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressInsights {
    pub total_active: usize,
    pub total_completed: usize,
    /// Active goals updated in the last week.
    pub recent_progress: Vec<Goal>,
    /// Active goals never updated since creation.
    pub needs_attention: Vec<Goal>,
}

impl ProgressInsights {
    pub fn from_goals(active: Vec<Goal>, completed: &[Goal]) -> Self {
        let cutoff = Utc::now() - Duration::days(RECENT_WINDOW_DAYS);
        let total_active = active.len();
        let mut insights = Self {
            total_active,
            total_completed: completed.len(),
            ..Self::default()
        };

        for goal in active {
            match goal.last_updated {
                None => insights.needs_attention.push(goal),
                Some(at) if at >= cutoff => insights.recent_progress.push(goal),
                Some(_) => {}
            }
        }
        insights
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
    pub greeting: String,
    pub message: String,
}

/// Time-of-day greeting for a local hour (0-23).
pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good morning!",
        12..=16 => "Good afternoon!",
        _ => "Good evening!",
    }
}

/// Goal analysis and once-a-day check-ins for any number of users.
///
/// The date of each user's last check-in is kept in the store, so the
/// once-a-day limit holds across processes.
pub struct AccountabilityBuddy {
    provider: Arc<dyn Provider>,
    repo: Repository,
    settings: ChatSettings,
}

impl AccountabilityBuddy {
    pub fn new(provider: Arc<dyn Provider>, repo: Repository, settings: ChatSettings) -> Self {
        Self {
            provider,
            repo,
            settings,
        }
    }

    pub async fn analyze_progress(&self, uid: &str) -> std::result::Result<ProgressInsights, DataError> {
        let (active, completed) = tokio::try_join!(
            self.repo.read_goals(uid),
            self.repo.read_completed_goals(uid),
        )?;
        Ok(ProgressInsights::from_goals(active, &completed))
    }

    /// Ask the provider for feedback on the user's progress.
    ///
    /// Unlike chat, failures are returned to the caller.
    pub async fn provide_feedback(&self, uid: &str) -> Result<String> {
        let insights = self.analyze_progress(uid).await?;
        let prompt = format!(
            "Based on this goal progress: {}, provide motivational feedback and suggestions for improvement.",
            serde_json::to_string(&insights)?
        );

        let request = ProviderRequest {
            model: self.settings.model.clone(),
            messages: vec![Message::system(FEEDBACK_SYSTEM_PROMPT), Message::user(prompt)],
            temperature: Some(self.settings.temperature),
            max_tokens: None,
        };
        let response = self.provider.complete(request).await?;
        Ok(response.message.content)
    }

    /// Today's check-in, or `None` if the user already had one today.
    pub async fn daily_check_in(&self, uid: &str) -> Result<Option<CheckIn>> {
        self.check_in_at(uid, Local::now().naive_local()).await
    }

    /// Check-in as of the local time `now`.
    ///
    /// The day is only marked once feedback succeeds, so a failed check-in
    /// can be retried the same day.
    pub async fn check_in_at(&self, uid: &str, now: NaiveDateTime) -> Result<Option<CheckIn>> {
        let today = now.date();
        if self.repo.read_last_check_in(uid).await? == Some(today) {
            debug!(uid, %today, "Already checked in today");
            return Ok(None);
        }

        let message = self.provide_feedback(uid).await?;

        // Another check-in may have landed while the provider was answering.
        if self.repo.read_last_check_in(uid).await? == Some(today) {
            debug!(uid, %today, "Check-in delivered elsewhere meanwhile");
            return Ok(None);
        }
        self.repo.record_check_in(uid, today).await?;
        info!(uid, %today, "Daily check-in delivered");

        Ok(Some(CheckIn {
            greeting: greeting_for_hour(now.hour()).to_string(),
            message,
        }))
    }
}
