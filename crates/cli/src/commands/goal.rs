//! `ascend goal`: Active and completed goals.

use super::{CmdResult, load_config, open_repository, parse_field, require_text, show_time};
use ascend_core::model::Goal;
use ascend_core::store::Fields;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum GoalAction {
    /// Create a goal
    Add { title: String },

    /// List goals
    List {
        /// Show completed goals instead of active ones
        #[arg(long)]
        completed: bool,

        /// Only the N most recently created
        #[arg(long)]
        recent: Option<usize>,
    },

    /// Update fields of an active goal
    Update {
        id: String,

        #[arg(long)]
        title: Option<String>,

        /// Percent complete
        #[arg(long)]
        progress: Option<f64>,

        #[arg(long)]
        completed: Option<bool>,

        /// Extra `key=value` fields
        #[arg(long = "set", value_parser = parse_field)]
        extra: Vec<(String, serde_json::Value)>,
    },

    /// Mark a goal complete and move it to the completed list
    Complete { id: String },

    /// Delete an active goal
    Delete { id: String },
}

pub async fn run(uid: &str, action: GoalAction) -> CmdResult {
    let config = load_config()?;
    let repo = open_repository(&config)?;

    match action {
        GoalAction::Add { title } => {
            require_text(&title, "Title")?;
            let id = repo.create_goal(uid, Goal::new(title)).await?;
            println!("✅ Created goal {id}");
        }
        GoalAction::List { completed, recent } => {
            let goals = match (completed, recent) {
                (true, _) => repo.read_completed_goals(uid).await?,
                (false, Some(n)) => repo.recent_goals(uid, n).await?,
                (false, None) => repo.read_goals(uid).await?,
            };
            if goals.is_empty() {
                println!("  No goals yet.");
            }
            for goal in &goals {
                print_goal(goal);
            }
        }
        GoalAction::Update {
            id,
            title,
            progress,
            completed,
            extra,
        } => {
            let mut fields: Fields = extra.into_iter().collect();
            if let Some(title) = title {
                require_text(&title, "Title")?;
                fields.insert("title".into(), title.into());
            }
            if let Some(progress) = progress {
                fields.insert("progress".into(), progress.into());
            }
            if let Some(completed) = completed {
                fields.insert("completed".into(), completed.into());
            }
            if fields.is_empty() {
                return Err("Nothing to update".into());
            }
            repo.update_goal(uid, &id, fields).await?;
            println!("✅ Updated goal {id}");
        }
        GoalAction::Complete { id } => {
            let goal = repo.move_goal_to_completed(uid, &id).await?;
            println!("🎉 Completed \"{}\"", goal.title);
        }
        GoalAction::Delete { id } => {
            repo.delete_goal(uid, &id).await?;
            println!("🗑️  Deleted goal {id}");
        }
    }

    Ok(())
}

fn print_goal(goal: &Goal) {
    let mark = if goal.completed { "✔" } else { " " };
    println!(
        "  [{mark}] {:<22} {:>5.1}%  {}  created {}",
        goal.id,
        goal.progress,
        goal.title,
        show_time(goal.created_at)
    );
}
