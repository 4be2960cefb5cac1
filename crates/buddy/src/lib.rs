//! The Ascend accountability buddy.
//!
//! - [`context`]: aggregates a user's goals, tasks, journal and stats
//! - [`chat`]: the chat session, with one message in flight at a time
//! - [`insights`]: progress analysis, feedback and the daily check-in

pub mod chat;
pub mod context;
pub mod insights;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use chat::{ChatRejected, ChatSession, ChatSettings};
pub use context::{ContextAggregator, UserContext};
pub use insights::{AccountabilityBuddy, CheckIn, ProgressInsights, greeting_for_hour};
