//! Message dispatcher setup.
//!
//! Builds the dispatcher with the operator's command handlers and the AFK
//! event handlers.

use std::sync::Arc;

use teloxide::adaptors::Throttle;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

use super::operator::Operator;
use crate::database::KvStore;
use crate::events;
use crate::plugins;
use crate::presence::PresenceTracker;

/// Bot type with Throttle adaptor for automatic rate limiting.
pub type ThrottledBot = Throttle<Bot>;

/// Dispatcher type shared by the runtime runners.
pub type BotDispatcher = Dispatcher<ThrottledBot, anyhow::Error, teloxide::dispatching::DefaultKey>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Plugin settings storage.
    pub store: Arc<dyn KvStore>,

    /// Operator away state and per-chat counters.
    pub presence: PresenceTracker,

    /// The user this bot answers for.
    pub operator: Operator,
}

impl AppState {
    /// Create a new application state with the operator present.
    pub fn new(store: Arc<dyn KvStore>, operator: Operator) -> Self {
        Self {
            store,
            presence: PresenceTracker::new(),
            operator,
        }
    }
}

/// Build the dispatcher with all handlers.
pub fn build_dispatcher(bot: ThrottledBot, state: AppState) -> BotDispatcher {
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
}

/// Build the handler schema.
fn schema() -> UpdateHandler<anyhow::Error> {
    // Operator messages: commands first, anything else ends AFK mode
    let operator_handler = dptree::filter(|msg: Message, state: AppState| {
        state.operator.is_sender(&msg)
    })
    .branch(plugins::command_handler())
    .branch(events::operator_activity_handler());

    let message_handler = Update::filter_message()
        .branch(operator_handler)
        .branch(events::message_event_handler());

    dptree::entry().branch(message_handler)
}
