//! `ascend user`: Profile and stats.

use super::{CmdResult, load_config, open_repository, parse_field, require_text};
use ascend_core::store::Fields;
use ascend_data::fields;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum UserAction {
    /// Show the profile and stats
    Show,

    /// Write the username and email
    Set {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
    },

    /// Merge `key=value` pairs into the profile stats
    Stats {
        #[arg(value_parser = parse_field)]
        fields: Vec<(String, serde_json::Value)>,
    },

    /// Delete the user and everything stored under them
    Delete {
        #[arg(long)]
        confirm: bool,
    },
}

pub async fn run(uid: &str, action: UserAction) -> CmdResult {
    let config = load_config()?;
    let repo = open_repository(&config)?;

    match action {
        UserAction::Show => {
            match repo.read_user(uid).await? {
                Some(profile) => {
                    println!("  User:      {uid}");
                    println!("  Username:  {}", profile.username);
                    println!("  Email:     {}", profile.email);
                }
                None => println!("  No profile for '{uid}'. Run `ascend user set`."),
            }
            let stats = repo.read_stats(uid).await?;
            if !stats.is_empty() {
                println!("  Stats:     {}", serde_json::to_string(&stats)?);
            }
        }
        UserAction::Set { username, email } => {
            require_text(&username, "Username")?;
            if repo.read_user(uid).await?.is_some() {
                repo.update_user(uid, fields! { "username" => username, "email" => email })
                    .await?;
            } else {
                repo.write_user(uid, &username, &email).await?;
            }
            println!("✅ Saved profile for {uid}");
        }
        UserAction::Stats { fields } => {
            if fields.is_empty() {
                println!("{}", serde_json::to_string_pretty(&repo.read_stats(uid).await?)?);
            } else {
                let fields: Fields = fields.into_iter().collect();
                repo.update_stats(uid, fields).await?;
                println!("✅ Stats updated");
            }
        }
        UserAction::Delete { confirm } => {
            if !confirm {
                println!("⚠️  This deletes '{uid}' with all goals, tasks and journal entries.");
                println!("   Run with --confirm to proceed.");
                return Ok(());
            }
            repo.delete_user(uid).await?;
            println!("🗑️  Deleted user {uid}");
        }
    }

    Ok(())
}
