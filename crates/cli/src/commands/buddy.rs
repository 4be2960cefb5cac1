//! `ascend context`, `ascend chat` and `ascend checkin`: the accountability buddy.

use super::{CmdResult, load_config, open_repository};
use ascend_buddy::{AccountabilityBuddy, ChatRejected, ChatSession, ChatSettings, ContextAggregator};
use ascend_config::AppConfig;
use ascend_core::Provider;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn context(uid: &str) -> CmdResult {
    let config = load_config()?;
    let repo = open_repository(&config)?;
    let context = ContextAggregator::new(repo).aggregate(uid).await?;
    println!("{}", serde_json::to_string_pretty(&context)?);
    Ok(())
}

pub async fn chat(uid: &str, message: Option<String>) -> CmdResult {
    let config = load_config()?;
    let provider = provider_or_help(&config)?;
    let repo = open_repository(&config)?;
    let session = ChatSession::new(provider, repo, ChatSettings::from_config(&config));

    if let Some(msg) = message {
        // Single message mode
        eprint!("  Thinking...");
        let reply = session.ask(uid, &msg).await;
        eprint!("\r              \r");
        println!("{}", reply?);
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  AI Accountability Buddy");
    println!("  Model: {}  |  Context: {}", config.provider.model, if config.buddy.enriched { "on" } else { "off" });
    println!("  Type your message and press Enter. Type 'exit' to quit.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print!("  You > ");
    std::io::stdout().flush()?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        match session.ask(uid, line).await {
            Ok(reply) => {
                println!();
                for text in reply.lines() {
                    println!("  Buddy > {text}");
                }
                println!();
            }
            Err(ChatRejected::EmptyMessage) => {}
            Err(e) => eprintln!("  [{e}]"),
        }

        print!("  You > ");
        std::io::stdout().flush()?;
    }

    println!();
    println!("  Keep going! 👋");
    println!();
    Ok(())
}

pub async fn checkin(uid: &str) -> CmdResult {
    let config = load_config()?;
    let provider = provider_or_help(&config)?;
    let repo = open_repository(&config)?;
    let buddy = AccountabilityBuddy::new(provider, repo, ChatSettings::from_config(&config));

    let insights = buddy.analyze_progress(uid).await?;
    println!(
        "  Active goals: {}  |  Completed: {}  |  Needs attention: {}",
        insights.total_active,
        insights.total_completed,
        insights.needs_attention.len()
    );
    for goal in &insights.needs_attention {
        println!("    • {} (no updates yet)", goal.title);
    }
    println!();

    match buddy.daily_check_in(uid).await? {
        Some(check_in) => {
            println!("  {}", check_in.greeting);
            println!();
            println!("  {}", check_in.message);
        }
        None => println!("  Already checked in today."),
    }
    Ok(())
}

fn provider_or_help(config: &AppConfig) -> Result<Arc<dyn Provider>, Box<dyn std::error::Error>> {
    if !config.has_api_key() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    OPENAI_API_KEY=sk-...");
        eprintln!("    ASCEND_API_KEY=sk-...");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }
    Ok(ascend_providers::build_from_config(config)?)
}
