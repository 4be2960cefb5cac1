//! `ascend journal`: Journal entries.

use super::{CmdResult, load_config, open_repository, require_text, show_time};
use ascend_core::model::{JournalCategory, JournalEntry};
use ascend_core::store::Fields;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum JournalAction {
    /// Write an entry
    Add {
        title: String,

        #[arg(long, default_value = "")]
        text: String,

        /// personal, work, health, finance or other
        #[arg(long, default_value = "other")]
        category: JournalCategory,

        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// List entries, optionally filtered by a search term
    List {
        #[arg(long)]
        search: Option<String>,
    },

    /// Edit an entry
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        text: Option<String>,

        #[arg(long)]
        category: Option<JournalCategory>,
    },

    /// Delete an entry
    Delete { id: String },
}

pub async fn run(uid: &str, action: JournalAction) -> CmdResult {
    let config = load_config()?;
    let repo = open_repository(&config)?;

    match action {
        JournalAction::Add {
            title,
            text,
            category,
            tags,
        } => {
            require_text(&title, "Title")?;
            let entry = JournalEntry {
                title,
                text,
                category,
                tags,
                ..JournalEntry::default()
            };
            let id = repo.create_journal_entry(uid, entry).await?;
            println!("✅ Saved entry {id}");
        }
        JournalAction::List { search } => {
            let entries = match search {
                Some(term) => repo.search_journal_entries(uid, &term).await?,
                None => repo.read_journal_entries(uid).await?,
            };
            if entries.is_empty() {
                println!("  No entries found.");
            }
            for entry in &entries {
                println!(
                    "  {:<22} {}  [{}] {}",
                    entry.id,
                    show_time(entry.date),
                    entry.category,
                    entry.title
                );
                if !entry.text.is_empty() {
                    println!("      {}", entry.text);
                }
            }
        }
        JournalAction::Edit {
            id,
            title,
            text,
            category,
        } => {
            let mut fields = Fields::new();
            if let Some(title) = title {
                require_text(&title, "Title")?;
                fields.insert("title".into(), title.into());
            }
            if let Some(text) = text {
                fields.insert("text".into(), text.into());
            }
            if let Some(category) = category {
                fields.insert("category".into(), category.as_str().into());
            }
            if fields.is_empty() {
                return Err("Nothing to update".into());
            }
            repo.update_journal_entry(uid, &id, fields).await?;
            println!("✅ Updated entry {id}");
        }
        JournalAction::Delete { id } => {
            repo.delete_journal_entry(uid, &id).await?;
            println!("🗑️  Deleted entry {id}");
        }
    }

    Ok(())
}
