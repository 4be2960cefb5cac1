//! Community posts: `posts/{id}`, visible to every user.
//!
//! Posts are append-only under unique push ids, so concurrent authors never
//! conflict. Encouragements are a set stored as `encouragements/{uid}: true`.

use ascend_core::error::DataError;
use ascend_core::model::Post;
use ascend_core::path::KeyPath;
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, warn};
use crate::Repository;
use crate::paths::{self, ENCOURAGEMENTS};

impl Repository {
    /// Publish a post, stamping `timestamp` unless one is given.
    pub async fn create_post(&self, mut post: Post) -> Result<String, DataError> {
        post.timestamp.get_or_insert_with(Utc::now);
        self.push_record(&paths::posts()?, &post).await
    }

    pub async fn read_post(&self, post_id: &str) -> Result<Option<Post>, DataError> {
        self.read_record(&paths::posts()?, post_id).await
    }

    /// The `limit` newest posts, newest first.
    pub async fn recent_posts(&self, limit: usize) -> Result<Vec<Post>, DataError> {
        let mut posts: Vec<Post> = self.read_collection(&paths::posts()?).await?;
        posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        posts.truncate(limit);
        Ok(posts)
    }

    pub async fn delete_post(&self, post_id: &str) -> Result<(), DataError> {
        self.delete(&paths::post(post_id)?).await
    }

    /// Add `uid`'s encouragement to a post, or take it back if already there.
    /// Returns whether the post is now encouraged by `uid`.
    pub async fn toggle_encouragement(&self, post_id: &str, uid: &str) -> Result<bool, DataError> {
        let post = paths::post(post_id)?;
        self.require_live_post(&post).await?;

        let mark = post.child(ENCOURAGEMENTS)?.child(uid)?;
        let encouraged = matches!(self.store().get(&mark).await?, Some(Value::Bool(true)));
        if encouraged {
            self.store().remove(&mark).await?;
        } else {
            self.store().set(&mark, Value::Bool(true)).await?;
            // The post may have been deleted between the check and the write.
            self.require_live_post(&post).await?;
        }
        debug!(post_id, uid, encouraged = !encouraged, "Encouragement toggled");
        Ok(!encouraged)
    }

    /// `NotFound` unless the post has content beyond encouragements. A node
    /// left holding only encouragements is removed.
    async fn require_live_post(&self, post: &KeyPath) -> Result<(), DataError> {
        let node = self.store().get(post).await?;
        let live = matches!(
            &node,
            Some(Value::Object(map)) if map.keys().any(|k| k != ENCOURAGEMENTS)
        );
        if live {
            return Ok(());
        }
        if node.is_some() {
            warn!(%post, "Removing encouragements left on a deleted post");
            self.store().remove(post).await?;
        }
        Err(DataError::NotFound {
            path: post.to_string(),
        })
    }
}
