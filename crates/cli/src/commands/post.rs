//! `ascend post`: Community posts.

use super::{CmdResult, load_config, open_repository, require_text, show_time};
use ascend_core::model::Post;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum PostAction {
    /// Share a post with the community
    Add {
        content: String,

        /// Display name (defaults to the profile username)
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        photo_url: Option<String>,
    },

    /// Show the newest posts
    List {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Encourage a post, or take the encouragement back
    Encourage { id: String },

    /// Delete a post
    Delete { id: String },
}

pub async fn run(uid: &str, action: PostAction) -> CmdResult {
    let config = load_config()?;
    let repo = open_repository(&config)?;

    match action {
        PostAction::Add {
            content,
            name,
            photo_url,
        } => {
            require_text(&content, "Post")?;
            let author_name = match name {
                Some(name) => name,
                None => repo
                    .read_user(uid)
                    .await?
                    .map(|p| p.username)
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| uid.to_string()),
            };
            let post = Post {
                author_id: uid.to_string(),
                author_name,
                author_photo_url: photo_url,
                content,
                ..Post::default()
            };
            let id = repo.create_post(post).await?;
            println!("✅ Posted {id}");
        }
        PostAction::List { limit } => {
            let posts = repo.recent_posts(limit).await?;
            if posts.is_empty() {
                println!("  No posts yet.");
            }
            for post in &posts {
                println!(
                    "  {:<22} {}  {}  ({} 👏)",
                    post.id,
                    show_time(post.timestamp),
                    post.author_name,
                    post.encouragement_count()
                );
                println!("      {}", post.content);
            }
        }
        PostAction::Encourage { id } => {
            if repo.toggle_encouragement(&id, uid).await? {
                println!("👏 Encouraged {id}");
            } else {
                println!("  Encouragement removed from {id}");
            }
        }
        PostAction::Delete { id } => {
            let post = repo.read_post(&id).await?.ok_or("No such post")?;
            if post.author_id != uid {
                return Err(format!("Post {id} belongs to {}", post.author_id).into());
            }
            repo.delete_post(&id).await?;
            println!("🗑️  Deleted post {id}");
        }
    }

    Ok(())
}
