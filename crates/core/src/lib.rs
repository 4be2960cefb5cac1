//! # Ascend Core
//!
//! Domain types, traits, and error definitions for the Ascend goal tracker.
//! This crate has **no I/O of its own**: it defines the entity model and the
//! two outward seams (the document store and the completion provider) that
//! every other crate implements or consumes.
//!
//! ## Layout
//!
//! - [`model`]: goals, tasks, journal entries, posts, calendar events
//! - [`path`]: key paths into the hierarchical document tree
//! - [`store`]: the `DocumentStore` trait
//! - [`provider`]: the `Provider` trait over chat-completion endpoints
//! - [`message`]: role-tagged chat messages

pub mod error;
pub mod message;
pub mod model;
pub mod path;
pub mod provider;
pub mod store;

// Re-export key types at crate root for ergonomics
pub use error::{DataError, Error, ProviderError, Result, StoreError};
pub use message::{Message, Role};
pub use model::{
    CalendarEvent, Goal, JournalCategory, JournalEntry, Post, Task, UserProfile, UserStats,
};
pub use path::KeyPath;
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
pub use store::{DocumentStore, Fields, PathUpdates};
