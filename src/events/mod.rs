//! Event handler system.
//!
//! Message handlers that run without a command: AFK notifications for
//! incoming messages and the implicit return when the operator writes.

pub mod afk;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

use crate::bot::AppState;
use crate::bot::operator::is_afk_candidate;

/// Build the handler for messages from other users.
///
/// Only direct messages and group messages mentioning the operator get
/// through; service messages never do.
pub fn message_event_handler() -> UpdateHandler<anyhow::Error> {
    dptree::filter(|msg: Message, state: AppState| is_afk_candidate(&msg, &state.operator))
        .endpoint(afk::incoming_message)
}

/// Build the handler for the operator's non-command messages.
pub fn operator_activity_handler() -> UpdateHandler<anyhow::Error> {
    dptree::endpoint(afk::operator_activity)
}
