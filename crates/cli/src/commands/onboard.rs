//! `ascend onboard`: First-time setup.

use super::CmdResult;
use ascend_config::{AppConfig, StoreBackend};

pub async fn run() -> CmdResult {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("Ascend First-Time Setup");
    println!("=========================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
        return Ok(());
    }

    std::fs::write(&config_path, AppConfig::default_toml())?;
    println!("✅ Created config.toml at: {}", config_path.display());

    let defaults = AppConfig::default();
    if defaults.store.backend == StoreBackend::File {
        println!("   Data will be kept in {}", defaults.store.resolved_path().display());
    }

    println!("\n📝 Next steps:");
    println!("   1. Set OPENAI_API_KEY or add provider.api_key to {}", config_path.display());
    println!("   2. Optionally point [store] at a Firebase database_url");
    println!("   3. Run: ascend goal add \"My first goal\"\n");

    Ok(())
}
