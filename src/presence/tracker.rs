//! Presence tracker.
//!
//! Holds the operator's away state and the per-chat message counters,
//! and decides for every incoming message whether the sender gets a notice.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::debug;

/// Reason shown when the operator goes away without giving one.
pub const DEFAULT_REASON: &str = "Negotiating with aliens";

/// Counter value at which the nagging notice is sent.
pub const NAG_THRESHOLD: u32 = 50;

/// A reminder is resent whenever the counter is a multiple of this.
pub const REMINDER_INTERVAL: u32 = 5;

/// Where an incoming message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatKind {
    /// One-to-one chat.
    Direct,
    /// Group or supergroup.
    Group,
}

/// Which notice a message should trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// First message from a chat in this away period.
    Greeting,
    /// Periodic resend of the reason-bearing notice.
    Reminder,
    /// The "I already told you" variant, sent once.
    Nag,
}

/// A notice to send, with everything needed to render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub notice: Notice,
    pub reason: String,
    pub since: DateTime<Utc>,
}

/// Figures reported when the operator comes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwaySummary {
    pub since: DateTime<Utc>,
    pub messages: u64,
    pub chats: usize,
}

/// Notification policy for a chat whose counter already exists.
///
/// The `NAG_THRESHOLD` arm must come before the modulo arm.
pub fn notice_for(count: u32) -> Option<Notice> {
    match count {
        NAG_THRESHOLD => Some(Notice::Nag),
        c if c > NAG_THRESHOLD => None,
        c if c % REMINDER_INTERVAL == 0 => Some(Notice::Reminder),
        _ => None,
    }
}

#[derive(Debug)]
struct AwayPeriod {
    reason: String,
    since: DateTime<Utc>,
    direct: HashMap<i64, u32>,
    groups: HashMap<i64, u32>,
}

impl AwayPeriod {
    fn counters(&mut self, kind: ChatKind) -> &mut HashMap<i64, u32> {
        match kind {
            ChatKind::Direct => &mut self.direct,
            ChatKind::Group => &mut self.groups,
        }
    }
}

/// Away state of the operator. Counters only exist inside an away period.
#[derive(Debug, Default)]
pub struct PresenceState {
    away: Option<AwayPeriod>,
}

impl PresenceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_away(&self) -> bool {
        self.away.is_some()
    }

    /// Current reason, if away.
    #[cfg(test)]
    pub fn reason(&self) -> Option<&str> {
        self.away.as_ref().map(|a| a.reason.as_str())
    }

    /// When the current away period started, if away.
    #[cfg(test)]
    pub fn since(&self) -> Option<DateTime<Utc>> {
        self.away.as_ref().map(|a| a.since)
    }

    /// Go away. Re-entering only overwrites reason and timestamp.
    pub fn enter(&mut self, reason: Option<String>, now: DateTime<Utc>) {
        let reason = reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_REASON.to_string());

        match self.away.as_mut() {
            Some(period) => {
                period.reason = reason;
                period.since = now;
            }
            None => {
                self.away = Some(AwayPeriod {
                    reason,
                    since: now,
                    direct: HashMap::new(),
                    groups: HashMap::new(),
                });
            }
        }
    }

    /// Come back. Returns `None` if the operator was not away.
    pub fn leave(&mut self) -> Option<AwaySummary> {
        let period = self.away.take()?;
        let messages = period
            .direct
            .values()
            .chain(period.groups.values())
            .map(|&c| u64::from(c))
            .sum();

        Some(AwaySummary {
            since: period.since,
            messages,
            chats: period.direct.len() + period.groups.len(),
        })
    }

    /// Count a qualifying message and decide whether to notify its chat.
    pub fn observe(&mut self, kind: ChatKind, chat_id: i64) -> Option<Notification> {
        let period = self.away.as_mut()?;
        let reason = period.reason.clone();
        let since = period.since;
        let counters = period.counters(kind);

        let notice = match counters.entry(chat_id) {
            Entry::Vacant(entry) => {
                entry.insert(1);
                Some(Notice::Greeting)
            }
            Entry::Occupied(mut entry) => {
                let count = entry.get_mut();
                let notice = notice_for(*count);
                *count = count.saturating_add(1);
                notice
            }
        };

        debug!("AFK counter for {:?} chat {}: notice={:?}", kind, chat_id, notice);

        notice.map(|notice| Notification { notice, reason, since })
    }

    /// Counter for a chat in the current away period.
    #[cfg(test)]
    pub fn count(&self, kind: ChatKind, chat_id: i64) -> Option<u32> {
        let period = self.away.as_ref()?;
        let counters = match kind {
            ChatKind::Direct => &period.direct,
            ChatKind::Group => &period.groups,
        };
        counters.get(&chat_id).copied()
    }
}

/// Shared handle to the process-wide [`PresenceState`].
///
/// The lock is only taken for synchronous steps and never held across an
/// `.await`.
#[derive(Clone, Default)]
pub struct PresenceTracker {
    state: Arc<Mutex<PresenceState>>,
}

impl PresenceTracker {
    /// Start in the "not away" state.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(PresenceState::new())),
        }
    }

    pub fn is_away(&self) -> bool {
        self.state.lock().is_away()
    }

    pub fn enter(&self, reason: Option<String>, now: DateTime<Utc>) {
        self.state.lock().enter(reason, now);
    }

    pub fn leave(&self) -> Option<AwaySummary> {
        self.state.lock().leave()
    }

    pub fn observe(&self, kind: ChatKind, chat_id: i64) -> Option<Notification> {
        self.state.lock().observe(kind, chat_id)
    }

    #[cfg(test)]
    pub fn count(&self, kind: ChatKind, chat_id: i64) -> Option<u32> {
        self.state.lock().count(kind, chat_id)
    }
}
