//! Ascend CLI: the main entry point.
//!
//! Commands:
//! - `onboard`: Create the config directory and a default config.toml
//! - `status`: Show configuration and store health
//! - `user`: Profile and stats
//! - `goal`, `task`, `journal`, `event`: the user's own records
//! - `post`: Community posts and encouragements
//! - `context`: Print the context the buddy sees
//! - `chat`: Talk to the accountability buddy
//! - `checkin`: Today's check-in with progress feedback

use clap::{Parser, Subcommand};

mod commands;

use commands::{event, goal, journal, post, task, user};

#[derive(Parser)]
#[command(
    name = "ascend",
    about = "Ascend: goals, journal and an AI accountability buddy",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// The user to act as
    #[arg(short, long, global = true, env = "ASCEND_USER", default_value = "local")]
    user: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration
    Onboard,

    /// Show configuration and store status
    Status,

    /// Manage the user profile and stats
    User {
        #[command(subcommand)]
        action: user::UserAction,
    },

    /// Manage goals
    Goal {
        #[command(subcommand)]
        action: goal::GoalAction,
    },

    /// Manage tasks
    Task {
        #[command(subcommand)]
        action: task::TaskAction,
    },

    /// Manage journal entries
    Journal {
        #[command(subcommand)]
        action: journal::JournalAction,
    },

    /// Community posts
    Post {
        #[command(subcommand)]
        action: post::PostAction,
    },

    /// Manage calendar events
    Event {
        #[command(subcommand)]
        action: event::EventAction,
    },

    /// Print the aggregated context sent to the buddy
    Context,

    /// Chat with the accountability buddy
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Get today's check-in
    Checkin,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let uid = cli.user.as_str();
    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Status => commands::status::run(uid).await?,
        Commands::User { action } => user::run(uid, action).await?,
        Commands::Goal { action } => goal::run(uid, action).await?,
        Commands::Task { action } => task::run(uid, action).await?,
        Commands::Journal { action } => journal::run(uid, action).await?,
        Commands::Post { action } => post::run(uid, action).await?,
        Commands::Event { action } => event::run(uid, action).await?,
        Commands::Context => commands::buddy::context(uid).await?,
        Commands::Chat { message } => commands::buddy::chat(uid, message).await?,
        Commands::Checkin => commands::buddy::checkin(uid).await?,
    }

    Ok(())
}
