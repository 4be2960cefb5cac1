//! `ascend event`: Calendar events.

use super::{CmdResult, load_config, open_repository, parse_field, require_text};
use ascend_core::model::CalendarEvent;
use ascend_core::store::Fields;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum EventAction {
    /// Add an event
    Add {
        title: String,

        /// Start time, e.g. 2026-10-20T09:00
        #[arg(long)]
        start: String,

        #[arg(long)]
        end: Option<String>,
    },

    /// List events
    List,

    /// Change `key=value` fields of an event
    Update {
        id: String,

        #[arg(value_parser = parse_field, required = true)]
        fields: Vec<(String, serde_json::Value)>,
    },

    /// Delete an event
    Delete { id: String },
}

pub async fn run(uid: &str, action: EventAction) -> CmdResult {
    let config = load_config()?;
    let repo = open_repository(&config)?;

    match action {
        EventAction::Add { title, start, end } => {
            require_text(&title, "Title")?;
            let event = CalendarEvent {
                title: Some(title),
                start: Some(start),
                end,
                ..CalendarEvent::default()
            };
            let id = repo.create_calendar_event(uid, event).await?;
            println!("✅ Added event {id}");
        }
        EventAction::List => {
            let mut events = repo.read_calendar_events(uid).await?;
            events.sort_by(|a, b| a.start.cmp(&b.start));
            if events.is_empty() {
                println!("  No events.");
            }
            for event in &events {
                println!(
                    "  {:<22} {} → {}  {}",
                    event.id,
                    event.start.as_deref().unwrap_or("-"),
                    event.end.as_deref().unwrap_or("-"),
                    event.title.as_deref().unwrap_or("(untitled)")
                );
            }
        }
        EventAction::Update { id, fields } => {
            let fields: Fields = fields.into_iter().collect();
            repo.update_calendar_event(uid, &id, fields).await?;
            println!("✅ Updated event {id}");
        }
        EventAction::Delete { id } => {
            repo.delete_calendar_event(uid, &id).await?;
            println!("🗑️  Deleted event {id}");
        }
    }

    Ok(())
}
