//! Presence tracking for the operator's away mode.
//!
//! - `tracker` - away state, per-chat counters and the notification policy
//! - `template` - custom notification template validation
//! - `notice` - rendering of notices and summaries

pub mod notice;
pub mod template;
pub mod tracker;

pub use tracker::{AwaySummary, ChatKind, Notice, Notification, PresenceTracker};
