//! `ascend task`: Tasks.

use super::{CmdResult, load_config, open_repository, require_text};
use ascend_core::model::Task;
use ascend_data::fields;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a task
    Add {
        title: String,

        /// Due date, e.g. 2026-10-31
        #[arg(long)]
        due: Option<String>,
    },

    /// List tasks
    List {
        /// Only the N most recent unfinished tasks
        #[arg(long)]
        active: Option<usize>,
    },

    /// Mark a task done
    Done { id: String },

    /// Mark a task not done
    Undo { id: String },

    /// Delete a task
    Delete { id: String },
}

pub async fn run(uid: &str, action: TaskAction) -> CmdResult {
    let config = load_config()?;
    let repo = open_repository(&config)?;

    match action {
        TaskAction::Add { title, due } => {
            require_text(&title, "Title")?;
            let task = Task {
                due_date: due,
                ..Task::new(title)
            };
            let id = repo.create_task(uid, task).await?;
            println!("✅ Created task {id}");
        }
        TaskAction::List { active } => {
            let tasks = match active {
                Some(n) => repo.recent_active_tasks(uid, n).await?,
                None => repo.read_tasks(uid).await?,
            };
            if tasks.is_empty() {
                println!("  No tasks.");
            }
            for task in &tasks {
                let mark = if task.completed { "✔" } else { " " };
                let due = task.due_date.as_deref().unwrap_or("-");
                println!("  [{mark}] {:<22} due {:<10}  {}", task.id, due, task.title);
            }
        }
        TaskAction::Done { id } => {
            repo.update_task(uid, &id, fields! { "completed" => true }).await?;
            println!("✅ Task {id} done");
        }
        TaskAction::Undo { id } => {
            repo.update_task(uid, &id, fields! { "completed" => false }).await?;
            println!("  Task {id} reopened");
        }
        TaskAction::Delete { id } => {
            repo.delete_task(uid, &id).await?;
            println!("🗑️  Deleted task {id}");
        }
    }

    Ok(())
}
