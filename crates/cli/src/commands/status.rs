//! `ascend status`: Show configuration and store status.

use super::{CmdResult, load_config, open_repository};
use ascend_config::{AppConfig, StoreBackend};

pub async fn run(uid: &str) -> CmdResult {
    let config = load_config()?;

    println!("Ascend Status");
    println!("=============");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    match config.store.backend {
        StoreBackend::Memory => println!("  Store:        memory (not persisted)"),
        StoreBackend::File => {
            println!("  Store:        file ({})", config.store.resolved_path().display())
        }
        StoreBackend::Firebase => println!(
            "  Store:        firebase ({})",
            config.store.database_url.as_deref().unwrap_or("-")
        ),
    }
    println!("  API URL:      {}", config.provider.api_url);
    println!("  Model:        {}", config.provider.model);
    println!("  Max tokens:   {}", config.provider.max_tokens);
    println!("  Temperature:  {}", config.provider.temperature);
    println!("  Attempts:     {}", config.retry.max_attempts);
    println!("  Context:      {}", if config.buddy.enriched { "enriched" } else { "plain" });
    println!("  API key:      {}", if config.has_api_key() { "set" } else { "missing" });

    let repo = open_repository(&config)?;
    println!("  User:         {uid}");
    match repo.read_stats(uid).await {
        Ok(_) => println!("\n  ✅ Store reachable ({})", repo.store().name()),
        Err(e) => println!("\n  ❌ Store unreachable: {e}"),
    }

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("  ✅ Config file found");
    } else {
        println!("  ⚠️  No config file, run `ascend onboard` first");
    }

    Ok(())
}
